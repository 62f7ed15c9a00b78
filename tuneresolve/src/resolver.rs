//! URI resolution: the ordered handler chain and its recursion context

use crate::error::Error;
use crate::handlers::media_type::{
    AppleMpegUrlMediaTypeHandler, KnownMediaTypeHandler, MpegUrlMediaTypeHandler,
    ScplsMediaTypeHandler,
};
use crate::handlers::uri::{
    KnownExtensionsUriHandler, M3u8ExtensionUriHandler, PlsExtensionUriHandler, ProcessUriHandler,
};
use crate::handlers::{MediaTypeHandler, SourceStream, UriHandler};
use async_stream::try_stream;
use futures::StreamExt;
use reqwest::Client;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

/// Playlists may reference further playlists; a chain deeper than this is
/// treated as a reference cycle and aborted.
pub const MAX_PLAYLIST_DEPTH: usize = 8;

/// Runs the [`UriHandler`] chain over a URI, first non-empty handler wins.
///
/// Handlers recurse into playlist entries through [`ResolveCx`], which
/// carries the resolver itself, the recursion depth and the cancellation
/// token.
pub struct UriResolver {
    client: Client,
    uri_handlers: Vec<Arc<dyn UriHandler>>,
    media_type_handlers: Vec<Arc<dyn MediaTypeHandler>>,
}

impl UriResolver {
    /// Resolver with the default handler chains.
    pub fn new(client: Client) -> Arc<Self> {
        Self::with_handlers(
            client,
            vec![
                Arc::new(KnownExtensionsUriHandler::new()),
                Arc::new(M3u8ExtensionUriHandler::new()),
                Arc::new(PlsExtensionUriHandler::new()),
                Arc::new(ProcessUriHandler::new()),
            ],
            vec![
                Arc::new(MpegUrlMediaTypeHandler::new()),
                Arc::new(AppleMpegUrlMediaTypeHandler::new()),
                Arc::new(KnownMediaTypeHandler::new()),
                Arc::new(ScplsMediaTypeHandler::new()),
            ],
        )
    }

    /// Resolver with explicit handler chains. URI handlers are sorted by
    /// `order()`; media-type handlers keep their registration order.
    pub fn with_handlers(
        client: Client,
        mut uri_handlers: Vec<Arc<dyn UriHandler>>,
        media_type_handlers: Vec<Arc<dyn MediaTypeHandler>>,
    ) -> Arc<Self> {
        uri_handlers.sort_by_key(|handler| handler.order());
        Arc::new(Self {
            client,
            uri_handlers,
            media_type_handlers,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Resolve `uri` into a stream of playable sources.
    pub fn resolve(self: &Arc<Self>, uri: Url, token: CancellationToken) -> SourceStream {
        Arc::clone(self).resolve_at(uri, 0, token)
    }

    fn resolve_at(
        self: Arc<Self>,
        uri: Url,
        depth: usize,
        token: CancellationToken,
    ) -> SourceStream {
        Box::pin(try_stream! {
            if token.is_cancelled() {
                Err(Error::Cancelled)?;
            }
            if depth > MAX_PLAYLIST_DEPTH {
                Err(Error::RecursionLimit(depth))?;
            }

            let cx = ResolveCx {
                resolver: Arc::clone(&self),
                depth,
                token,
            };

            for handler in &self.uri_handlers {
                let mut produced = 0usize;
                let mut sources = Arc::clone(handler).handle(uri.clone(), cx.clone());

                while let Some(item) = sources.next().await {
                    produced += 1;
                    yield item?;
                }

                if produced > 0 {
                    debug!(%uri, depth, handler = handler.name(), produced, "resolved");
                    return;
                }
            }
        })
    }
}

/// Generic fallback provider: any URI the handler chain can make sense of.
impl crate::manager::MediaSourceProvider for UriResolver {
    fn name(&self) -> &'static str {
        "uri-resolver"
    }

    fn order(&self) -> u32 {
        1
    }

    fn sources(self: Arc<Self>, uri: Url, token: CancellationToken) -> SourceStream {
        self.resolve_at(uri, 0, token)
    }
}

/// Per-resolution context handed to handlers.
#[derive(Clone)]
pub struct ResolveCx {
    resolver: Arc<UriResolver>,
    depth: usize,
    token: CancellationToken,
}

impl ResolveCx {
    pub fn client(&self) -> &Client {
        self.resolver.client()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Resolve a playlist entry one level deeper.
    pub fn recurse(&self, uri: Url) -> SourceStream {
        Arc::clone(&self.resolver).resolve_at(uri, self.depth + 1, self.token.clone())
    }

    /// The media-type chain, for the fallback URI handler.
    pub(crate) fn media_type_handlers(&self) -> Vec<Arc<dyn MediaTypeHandler>> {
        self.resolver.media_type_handlers.clone()
    }
}
