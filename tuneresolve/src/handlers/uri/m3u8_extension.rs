//! Handles URIs with the extension .m3u8

use crate::handlers::{ends_with_ignore_case, scheme_is_http_or_https, SourceStream, UriHandler};
use crate::models::{MediaSource, MediaStream};
use crate::resolver::ResolveCx;
use async_stream::try_stream;
use std::sync::Arc;
use url::Url;

/// Optimistic HLS source from the extension alone: the manifest is never
/// fetched, `container` is assumed to be aac.
#[derive(Debug, Default)]
pub struct M3u8ExtensionUriHandler;

impl M3u8ExtensionUriHandler {
    pub fn new() -> Self {
        Self
    }
}

impl UriHandler for M3u8ExtensionUriHandler {
    fn name(&self) -> &'static str {
        "m3u8-extension"
    }

    fn order(&self) -> u32 {
        1
    }

    fn handle(self: Arc<Self>, uri: Url, _cx: ResolveCx) -> SourceStream {
        Box::pin(try_stream! {
            if !scheme_is_http_or_https(&uri) {
                return;
            }

            let requested = uri.to_string();
            if !ends_with_ignore_case(&requested, ".m3u8") {
                return;
            }

            let mut source = MediaSource::live(requested, "aac", MediaStream::audio("aac"));
            source.transcoding_sub_protocol = Some("hls".to_string());
            source.run_time_ticks = Some(0);
            yield source;
        })
    }
}
