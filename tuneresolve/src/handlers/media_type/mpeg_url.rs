//! Handles responses declared as audio/x-mpegurl

use crate::client::FetchedResponse;
use crate::handlers::playlist::m3u_entries;
use crate::handlers::{MediaTypeHandler, SourceStream};
use crate::resolver::ResolveCx;
use async_stream::try_stream;
use futures::StreamExt;
use std::sync::Arc;

/// Expands a classic M3U playlist: every line is resolved as a new URI and
/// the resulting sources are emitted in playlist order.
#[derive(Debug, Default)]
pub struct MpegUrlMediaTypeHandler;

impl MpegUrlMediaTypeHandler {
    pub fn new() -> Self {
        Self
    }
}

impl MediaTypeHandler for MpegUrlMediaTypeHandler {
    fn name(&self) -> &'static str {
        "mpeg-url"
    }

    fn handle(self: Arc<Self>, response: Arc<FetchedResponse>, cx: ResolveCx) -> SourceStream {
        Box::pin(try_stream! {
            if response.content_type() != Some("audio/x-mpegurl") {
                return;
            }

            let body = response.text(cx.token()).await?;
            for child in m3u_entries(body) {
                let mut children = cx.recurse(child?);
                while let Some(item) = children.next().await {
                    yield item?;
                }
            }
        })
    }
}
