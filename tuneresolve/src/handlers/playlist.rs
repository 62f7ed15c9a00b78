//! Playlist body parsing shared by the extension and media-type handlers

use url::Url;

/// Child URIs of an M3U body: every trimmed non-blank line, in document
/// order. Lines are parsed as absolute URIs; an unparsable line is surfaced
/// as an error for the caller to propagate.
pub(crate) fn m3u_entries(body: &str) -> impl Iterator<Item = Result<Url, url::ParseError>> + '_ {
    body.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Url::parse)
}

/// Child URIs of a PLS/INI body: lines beginning with `File`
/// (case-insensitive), taking the substring after the first `=`, in document
/// order.
pub(crate) fn pls_entries(body: &str) -> impl Iterator<Item = Result<Url, url::ParseError>> + '_ {
    body.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| starts_with_file(line))
        .map(|line| match line.find('=') {
            Some(position) => &line[position + 1..],
            None => line,
        })
        .map(Url::parse)
}

fn starts_with_file(line: &str) -> bool {
    // get() instead of slicing: a multi-byte character straddling the
    // boundary must read as a non-match, not panic.
    line.get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("file"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pls_entries_keep_document_order() {
        let body = "[playlist]\r\nNumberOfEntries=2\r\nFile1=http://example.org/a\r\nTitle1=A\r\nfile2=http://example.org/b\r\nLength1=-1\r\n";
        let entries: Vec<Url> = pls_entries(body).collect::<Result<_, _>>().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].as_str(), "http://example.org/a");
        assert_eq!(entries[1].as_str(), "http://example.org/b");
    }

    #[test]
    fn pls_entries_take_substring_after_first_equals() {
        let body = "File1=http://example.org/stream?a=1&b=2";
        let entries: Vec<Url> = pls_entries(body).collect::<Result<_, _>>().unwrap();
        assert_eq!(entries[0].as_str(), "http://example.org/stream?a=1&b=2");
    }

    #[test]
    fn m3u_entries_drop_blank_lines() {
        let body = "\nhttp://example.org/one.mp3\r\n\r\n  http://example.org/two.aac  \n";
        let entries: Vec<Url> = m3u_entries(body).collect::<Result<_, _>>().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].as_str(), "http://example.org/one.mp3");
        assert_eq!(entries[1].as_str(), "http://example.org/two.aac");
    }

    #[test]
    fn pls_entries_skip_multibyte_junk_lines() {
        // Lines whose fourth byte falls inside a multi-byte character must
        // be ignored like any other non-File line.
        let body = "[playlist]\n日本=noise\nFile1=http://example.org/a\n";
        let entries: Vec<Url> = pls_entries(body).collect::<Result<_, _>>().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].as_str(), "http://example.org/a");
    }

    #[test]
    fn m3u_entries_surface_unparsable_lines() {
        let body = "not a uri";
        let mut entries = m3u_entries(body);
        assert!(entries.next().unwrap().is_err());
    }
}
