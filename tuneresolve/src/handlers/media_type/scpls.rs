//! Handles responses declared as audio/x-scpls

use crate::client::FetchedResponse;
use crate::handlers::playlist::pls_entries;
use crate::handlers::{MediaTypeHandler, SourceStream};
use crate::resolver::ResolveCx;
use async_stream::try_stream;
use futures::StreamExt;
use std::sync::Arc;

/// Expands SHOUTcast PLS playlists: every `FileN=` entry is resolved as a
/// new URI and the resulting sources are emitted in playlist order.
#[derive(Debug, Default)]
pub struct ScplsMediaTypeHandler;

impl ScplsMediaTypeHandler {
    pub fn new() -> Self {
        Self
    }
}

impl MediaTypeHandler for ScplsMediaTypeHandler {
    fn name(&self) -> &'static str {
        "scpls"
    }

    fn handle(self: Arc<Self>, response: Arc<FetchedResponse>, cx: ResolveCx) -> SourceStream {
        Box::pin(try_stream! {
            if response.content_type() != Some("audio/x-scpls") {
                return;
            }

            let body = response.text(cx.token()).await?;
            for child in pls_entries(body) {
                let mut children = cx.recurse(child?);
                while let Some(item) = children.next().await {
                    yield item?;
                }
            }
        })
    }
}
