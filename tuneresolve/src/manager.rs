//! Provider manager: ordered provider fallback with output filtering

use crate::error::Error;
use crate::filters::MediaSourceFilter;
use crate::handlers::SourceStream;
use async_stream::try_stream;
use futures::StreamExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

/// A source of resolved media for a URI. Providers are tried by ascending
/// `order()`; the first one whose (filtered) output is non-empty wins.
pub trait MediaSourceProvider: Send + Sync {
    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;

    /// Fallback position; lower runs first.
    fn order(&self) -> u32;

    fn sources(self: Arc<Self>, uri: Url, token: CancellationToken) -> SourceStream;
}

/// Runs providers in order and filters what they emit.
///
/// An item rejected by any filter is dropped and does not count as provider
/// output, so a provider whose entire yield is filtered away falls through
/// to the next one. A provider that fails outright is logged and skipped the
/// same way; only cancellation cuts the whole resolution short.
pub struct ProviderManager {
    providers: Vec<Arc<dyn MediaSourceProvider>>,
    filters: Vec<Arc<dyn MediaSourceFilter>>,
}

impl ProviderManager {
    pub fn builder() -> ProviderManagerBuilder {
        ProviderManagerBuilder::default()
    }

    /// Resolve `uri` through the provider chain, applying every filter.
    pub fn resolve(self: &Arc<Self>, uri: Url, token: CancellationToken) -> SourceStream {
        let manager = Arc::clone(self);
        Box::pin(try_stream! {
            for provider in &manager.providers {
                let mut produced = 0usize;
                let mut sources = Arc::clone(provider).sources(uri.clone(), token.clone());

                while let Some(item) = sources.next().await {
                    match item {
                        Ok(source) => {
                            if manager.filters.iter().all(|f| f.is_allowed(&source)) {
                                produced += 1;
                                yield source;
                            } else {
                                debug!(path = %source.path, "filtered out");
                            }
                        }
                        Err(Error::Cancelled) => Err(Error::Cancelled)?,
                        Err(err) => {
                            warn!(%uri, provider = provider.name(), %err, "provider failed");
                            break;
                        }
                    }
                }

                if produced > 0 {
                    debug!(%uri, provider = provider.name(), produced, "resolved");
                    return;
                }
            }
        })
    }
}

/// Assembles a [`ProviderManager`]; providers are sorted by `order()` once
/// at build time.
#[derive(Default)]
pub struct ProviderManagerBuilder {
    providers: Vec<Arc<dyn MediaSourceProvider>>,
    filters: Vec<Arc<dyn MediaSourceFilter>>,
}

impl ProviderManagerBuilder {
    pub fn provider(mut self, provider: Arc<dyn MediaSourceProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn filter(mut self, filter: Arc<dyn MediaSourceFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn build(mut self) -> Arc<ProviderManager> {
        self.providers.sort_by_key(|provider| provider.order());
        Arc::new(ProviderManager {
            providers: self.providers,
            filters: self.filters,
        })
    }
}
