//! Handler chains
//!
//! Two distinct composition primitives, deliberately kept apart:
//!
//! - [`UriHandler`] — ordered chain over a URI. The resolver runs handlers by
//!   ascending `order()`; the first handler that yields at least one source
//!   wins and the rest are skipped.
//! - [`MediaTypeHandler`] — unordered-by-priority chain over a fetched
//!   response. Every handler runs (in registration order) and their outputs
//!   are concatenated; a response could in principle satisfy more than one
//!   handler.

use crate::client::FetchedResponse;
use crate::error::Result;
use crate::models::MediaSource;
use crate::resolver::ResolveCx;
use futures::stream::BoxStream;
use std::sync::Arc;
use url::Url;

pub mod media_type;
pub(crate) mod playlist;
pub mod uri;

/// Lazy, finite, non-restartable sequence of resolved sources.
pub type SourceStream = BoxStream<'static, Result<MediaSource>>;

/// Strategy over a URI: emit sources directly, expand a playlist through
/// `cx`, or yield nothing to let the chain continue.
pub trait UriHandler: Send + Sync {
    /// Handler name for diagnostics.
    fn name(&self) -> &'static str;

    /// Chain position; lower runs first.
    fn order(&self) -> u32;

    fn handle(self: Arc<Self>, uri: Url, cx: ResolveCx) -> SourceStream;
}

/// Strategy over a declared content type. No priority: the fallback URI
/// handler runs all of these in registration order.
pub trait MediaTypeHandler: Send + Sync {
    /// Handler name for diagnostics.
    fn name(&self) -> &'static str;

    fn handle(self: Arc<Self>, response: Arc<FetchedResponse>, cx: ResolveCx) -> SourceStream;
}

/// Every handler requires a plain web URI.
pub(crate) fn scheme_is_http_or_https(uri: &Url) -> bool {
    matches!(uri.scheme(), "http" | "https")
}

/// ASCII case-insensitive suffix check, used for extension matching.
pub(crate) fn ends_with_ignore_case(value: &str, suffix: &str) -> bool {
    value.len() >= suffix.len()
        && value[value.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_check_accepts_web_schemes_only() {
        let http = Url::parse("http://example.org/a.mp3").unwrap();
        let https = Url::parse("https://example.org/a.mp3").unwrap();
        let ftp = Url::parse("ftp://example.org/a.mp3").unwrap();
        let file = Url::parse("file:///tmp/a.mp3").unwrap();

        assert!(scheme_is_http_or_https(&http));
        assert!(scheme_is_http_or_https(&https));
        assert!(!scheme_is_http_or_https(&ftp));
        assert!(!scheme_is_http_or_https(&file));
    }

    #[test]
    fn suffix_check_ignores_ascii_case() {
        assert!(ends_with_ignore_case("http://x/playlist.M3U8", ".m3u8"));
        assert!(ends_with_ignore_case("http://x/stream.PLS", ".pls"));
        assert!(!ends_with_ignore_case("http://x/playlist.m3u", ".m3u8"));
        assert!(!ends_with_ignore_case("x", ".m3u8"));
    }
}
