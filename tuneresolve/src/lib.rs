//! # tuneresolve - Internet Radio Stream Resolution
//!
//! `tuneresolve` turns a station or playlist URI into directly playable
//! stream descriptions. Radio directories rarely hand out a raw stream: the
//! URL behind a station points at an M3U or PLS playlist, an HLS manifest,
//! a vendor tune endpoint or, with luck, the audio itself. This crate walks
//! that indirection and yields one [`MediaSource`] per playable stream it
//! finds.
//!
//! ## Features
//!
//! - **Handler chains**: extension and content-type handlers that expand
//!   playlists recursively and describe raw audio from its ICY headers
//! - **Provider fallback**: the vendor tune API is asked first, the generic
//!   resolver only runs when it comes up empty
//! - **Filtering**: ad injection endpoints and user-configured URL patterns
//!   are dropped before a source ever reaches the player
//! - **Genre catalog**: the vendor's OPML genre directory, fetched once and
//!   cached through [`tunecache`]
//! - **Cancellation**: every resolution carries a `CancellationToken`;
//!   dropping a stream or cancelling the token stops outstanding requests
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use futures::TryStreamExt;
//! use tokio_util::sync::CancellationToken;
//! use tuneresolve::{ProviderManager, TuneInApiProvider, UriResolver, AdsFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = tuneresolve::default_client()?;
//!
//!     let manager = ProviderManager::builder()
//!         .provider(Arc::new(TuneInApiProvider::new(client.clone())))
//!         .provider(UriResolver::new(client))
//!         .filter(Arc::new(AdsFilter::new()))
//!         .build();
//!
//!     let uri = url::Url::parse("http://opml.radiotime.com/Tune.ashx?id=s24939")?;
//!     let sources: Vec<_> = manager
//!         .resolve(uri, CancellationToken::new())
//!         .try_collect()
//!         .await?;
//!
//!     for source in &sources {
//!         println!("{} [{}] {}", source.name, source.container, source.path);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod filters;
pub mod genres;
pub mod handlers;
pub mod manager;
pub mod models;
pub mod resolver;
pub mod tunein;
pub mod urls;

pub use client::{default_client, FetchedResponse};
pub use config::TuneInConfig;
pub use error::{Error, Result};
pub use filters::{AdsFilter, MediaSourceFilter, UrlFilter, UrlFilterOptions};
pub use genres::{Genre, GenresProvider};
pub use handlers::{MediaTypeHandler, SourceStream, UriHandler};
pub use manager::{MediaSourceProvider, ProviderManager, ProviderManagerBuilder};
pub use models::{MediaProtocol, MediaSource, MediaStream, MediaStreamType};
pub use resolver::{ResolveCx, UriResolver, MAX_PLAYLIST_DEPTH};
pub use tunein::TuneInApiProvider;
pub use urls::TuneInUrls;
