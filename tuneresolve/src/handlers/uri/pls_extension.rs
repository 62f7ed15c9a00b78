//! Handles URIs with the extension .pls

use crate::client;
use crate::handlers::playlist::pls_entries;
use crate::handlers::{ends_with_ignore_case, scheme_is_http_or_https, SourceStream, UriHandler};
use crate::resolver::ResolveCx;
use async_stream::try_stream;
use futures::StreamExt;
use std::sync::Arc;
use tracing::{error, warn};
use url::Url;

/// Downloads .pls playlists and resolves every `FileN=` entry in turn.
#[derive(Debug, Default)]
pub struct PlsExtensionUriHandler;

impl PlsExtensionUriHandler {
    pub fn new() -> Self {
        Self
    }
}

impl UriHandler for PlsExtensionUriHandler {
    fn name(&self) -> &'static str {
        "pls-extension"
    }

    fn order(&self) -> u32 {
        2
    }

    fn handle(self: Arc<Self>, uri: Url, cx: ResolveCx) -> SourceStream {
        Box::pin(try_stream! {
            if !scheme_is_http_or_https(&uri) {
                return;
            }

            if !ends_with_ignore_case(uri.as_str(), ".pls") {
                return;
            }

            let response = match client::fetch(cx.client(), &uri, cx.token()).await {
                Ok(response) => response,
                Err(err) if err.is_recoverable() => {
                    error!(%uri, %err, "playlist fetch failed");
                    return;
                }
                Err(err) => Err(err)?,
            };

            if !response.status().is_success() {
                warn!(%uri, status = %response.status(), "playlist fetch failed");
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
