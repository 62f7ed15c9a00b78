//! Fallback handler that fetches the URI and hands the response to the
//! media-type chain

use crate::client;
use crate::handlers::{scheme_is_http_or_https, SourceStream, UriHandler};
use crate::resolver::ResolveCx;
use async_stream::try_stream;
use futures::StreamExt;
use std::sync::Arc;
use tracing::{error, warn};
use url::Url;

/// Last handler in the URI chain: issues the GET and runs every registered
/// [`MediaTypeHandler`](crate::handlers::MediaTypeHandler) over the response,
/// concatenating their output.
#[derive(Debug, Default)]
pub struct ProcessUriHandler;

impl ProcessUriHandler {
    pub fn new() -> Self {
        Self
    }
}

impl UriHandler for ProcessUriHandler {
    fn name(&self) -> &'static str {
        "process"
    }

    fn order(&self) -> u32 {
        99
    }

    fn handle(self: Arc<Self>, uri: Url, cx: ResolveCx) -> SourceStream {
        Box::pin(try_stream! {
            if !scheme_is_http_or_https(&uri) {
                return;
            }

            let response = match client::fetch(cx.client(), &uri, cx.token()).await {
                Ok(response) => response,
                Err(err) if err.is_recoverable() => {
                    error!(%uri, %err, "fetch failed");
                    return;
                }
                Err(err) => Err(err)?,
            };

            if !response.status().is_success() {
                warn!(%uri, status = %response.status(), "fetch failed");
                return;
            }

            let response = Arc::new(response);
            for handler in cx.media_type_handlers() {
                let mut sources = handler.handle(Arc::clone(&response), cx.clone());
                while let Some(item) = sources.next().await {
                    yield item?;
                }
            }
        })
    }
}
