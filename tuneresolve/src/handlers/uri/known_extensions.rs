//! Handles URIs with the extensions .flac, .aac, .aacp, .mp3, .ogg

use crate::handlers::{scheme_is_http_or_https, SourceStream, UriHandler};
use crate::models::{MediaSource, MediaStream};
use crate::resolver::ResolveCx;
use async_stream::try_stream;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

/// Synthesizes one source per known audio extension without any network
/// access: the URI itself is assumed to be a direct live stream.
pub struct KnownExtensionsUriHandler {
    supported: HashMap<&'static str, (&'static str, &'static str)>,
}

impl Default for KnownExtensionsUriHandler {
    fn default() -> Self {
        // extension -> (container, codec)
        let supported = HashMap::from([
            (".flac", ("flac", "flac")),
            (".aac", ("aac", "aac")),
            (".aacp", ("aac", "aac")),
            (".mp3", ("mp3", "mp3")),
            (".ogg", ("ogg", "ogg")),
        ]);
        Self { supported }
    }
}

impl KnownExtensionsUriHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn lookup(&self, uri: &str) -> Option<(&'static str, &'static str)> {
        let dot = uri.rfind('.')?;
        self.supported.get(&uri[dot..]).copied()
    }
}

impl UriHandler for KnownExtensionsUriHandler {
    fn name(&self) -> &'static str {
        "known-extensions"
    }

    fn order(&self) -> u32 {
        0
    }

    fn handle(self: Arc<Self>, uri: Url, _cx: ResolveCx) -> SourceStream {
        Box::pin(try_stream! {
            if !scheme_is_http_or_https(&uri) {
                return;
            }

            let requested = uri.to_string();
            let Some((container, codec)) = self.lookup(&requested) else {
                return;
            };

            let mut source = MediaSource::live(requested, container, MediaStream::audio(codec));
            source.infer_total_bitrate();
            yield source;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_maps_known_extensions() {
        let handler = KnownExtensionsUriHandler::new();
        assert_eq!(handler.lookup("http://x/a.mp3"), Some(("mp3", "mp3")));
        assert_eq!(handler.lookup("http://x/a.aacp"), Some(("aac", "aac")));
        assert_eq!(handler.lookup("http://x/a.flac"), Some(("flac", "flac")));
        assert_eq!(handler.lookup("http://x/a.ogg"), Some(("ogg", "ogg")));
    }

    #[test]
    fn lookup_rejects_unknown_or_missing_extensions() {
        let handler = KnownExtensionsUriHandler::new();
        assert_eq!(handler.lookup("http://x/a.m3u8"), None);
        assert_eq!(handler.lookup("http://x/nodots"), None);
        // The extension is taken from the last '.' of the whole URI.
        assert_eq!(handler.lookup("http://x/a.mp3?session=4"), None);
    }
}
