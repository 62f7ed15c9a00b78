//! Handles responses declared as application/vnd.apple.mpegurl

use crate::client::FetchedResponse;
use crate::handlers::{MediaTypeHandler, SourceStream};
use crate::models::{MediaSource, MediaStream};
use crate::resolver::ResolveCx;
use async_stream::try_stream;
use std::sync::Arc;

/// Treats an HLS manifest as a single source without parsing it: the
/// requested URI is handed to the player as an `mpegts` container with the
/// "hls" transcoding hint.
#[derive(Debug, Default)]
pub struct AppleMpegUrlMediaTypeHandler;

impl AppleMpegUrlMediaTypeHandler {
    pub fn new() -> Self {
        Self
    }
}

impl MediaTypeHandler for AppleMpegUrlMediaTypeHandler {
    fn name(&self) -> &'static str {
        "apple-mpeg-url"
    }

    fn handle(self: Arc<Self>, response: Arc<FetchedResponse>, _cx: ResolveCx) -> SourceStream {
        Box::pin(try_stream! {
            if response.content_type() != Some("application/vnd.apple.mpegurl") {
                return;
            }

            let requested = response.requested_uri().to_string();
            let mut source = MediaSource::live(requested, "mpegts", MediaStream::audio("aac"));
            source.transcoding_sub_protocol = Some("hls".to_string());
            source.run_time_ticks = Some(0);
            yield source;
        })
    }
}
