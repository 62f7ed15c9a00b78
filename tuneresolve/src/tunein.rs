//! Vendor stream-resolution API client
//!
//! TuneIn station URIs answer with a JSON tune document when `render=json`
//! is appended. Each `audio` element of the body is a directly playable
//! stream the station endpoint would otherwise serve as a plain-text list.

use crate::client;
use crate::handlers::SourceStream;
use crate::manager::MediaSourceProvider;
use crate::models::{MediaProtocol, MediaSource, MediaStream};
use async_stream::try_stream;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};
use url::Url;

/// Root of the `render=json` tune document.
#[derive(Debug, Deserialize)]
pub struct MediaTuneResponse {
    #[serde(default)]
    pub head: Option<MediaTuneHead>,
    #[serde(default)]
    pub body: Option<Vec<MediaTuneEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct MediaTuneHead {
    #[serde(default)]
    pub status: Option<String>,
}

/// One element of the tune document body. Only `audio` elements describe
/// playable streams.
#[derive(Debug, Deserialize)]
pub struct MediaTuneEntry {
    #[serde(default)]
    pub element: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub bitrate: Option<u32>,
    #[serde(default)]
    pub reliability: Option<u32>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub player_width: Option<u32>,
    #[serde(default)]
    pub player_height: Option<u32>,
    #[serde(default)]
    pub is_hls_advanced: Option<String>,
    #[serde(default)]
    pub live_seek_stream: Option<String>,
    #[serde(default)]
    pub guide_id: Option<String>,
    #[serde(default)]
    pub is_ad_clipped_content_enabled: Option<String>,
    #[serde(default)]
    pub is_direct: Option<bool>,
}

/// Resolves station URIs through the vendor tune API. Order 0: it runs
/// before the generic handler chain and keeps the station endpoint from
/// being scraped as a playlist when the API knows the answer.
pub struct TuneInApiProvider {
    client: Client,
}

impl TuneInApiProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl MediaSourceProvider for TuneInApiProvider {
    fn name(&self) -> &'static str {
        "tunein-api"
    }

    fn order(&self) -> u32 {
        0
    }

    fn sources(self: Arc<Self>, uri: Url, token: CancellationToken) -> SourceStream {
        Box::pin(try_stream! {
            let mut tune_uri = uri.clone();
            tune_uri.query_pairs_mut().append_pair("render", "json");

            let response = match client::fetch(&self.client, &tune_uri, &token).await {
                Ok(response) => response,
                Err(err) if err.is_recoverable() => {
                    error!(%uri, %err, "tune request failed");
                    return;
                }
                Err(err) => Err(err)?,
            };

            if !response.status().is_success() {
                warn!(%uri, status = %response.status(), "tune request failed");
                return;
            }

            let tune: MediaTuneResponse = serde_json::from_str(response.text(&token).await?)?;
            let Some(body) = tune.body else {
                return;
            };

            // Id and name stay bound to the URI the caller asked for, not
            // the stream URL the API handed back.
            let requested = uri.to_string();

            for entry in body {
                if !entry
                    .element
                    .as_deref()
                    .is_some_and(|element| element.eq_ignore_ascii_case("audio"))
                {
                    continue;
                }

                let media_type = entry.media_type.unwrap_or_default();
                let mut stream = MediaStream::audio(media_type.clone());
                stream.bitrate = entry.bitrate;

                yield MediaSource {
                    id: requested.clone(),
                    name: requested.clone(),
                    path: entry.url.unwrap_or_default(),
                    container: media_type,
                    protocol: MediaProtocol::Http,
                    is_remote: true,
                    is_infinite_stream: true,
                    supports_probing: false,
                    supports_transcoding: false,
                    supports_direct_play: true,
                    supports_direct_stream: true,
                    transcoding_sub_protocol: None,
                    run_time_ticks: None,
                    bitrate: None,
                    media_streams: vec![stream],
                };
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tune_document_parses_lowercase_keys() {
        let json = r#"{
            "head": { "status": "200" },
            "body": [
                {
                    "element": "audio",
                    "url": "http://stream.example.org/live",
                    "reliability": 98,
                    "bitrate": 128,
                    "media_type": "mp3",
                    "position": 0,
                    "player_width": 640,
                    "player_height": 480,
                    "is_hls_advanced": "false",
                    "live_seek_stream": "false",
                    "guide_id": "e1",
                    "is_ad_clipped_content_enabled": "false",
                    "is_direct": true
                },
                { "element": "outline" }
            ]
        }"#;

        let tune: MediaTuneResponse = serde_json::from_str(json).unwrap();
        let body = tune.body.unwrap();
        assert_eq!(body.len(), 2);
        assert_eq!(body[0].element.as_deref(), Some("audio"));
        assert_eq!(body[0].url.as_deref(), Some("http://stream.example.org/live"));
        assert_eq!(body[0].bitrate, Some(128));
        assert_eq!(body[0].media_type.as_deref(), Some("mp3"));
        assert_eq!(body[0].position, Some(0));
        assert_eq!(body[0].player_width, Some(640));
        assert_eq!(body[0].is_hls_advanced.as_deref(), Some("false"));
        assert_eq!(body[0].guide_id.as_deref(), Some("e1"));
        assert_eq!(body[0].is_direct, Some(true));
        assert_eq!(body[1].element.as_deref(), Some("outline"));
        assert_eq!(tune.head.unwrap().status.as_deref(), Some("200"));
    }

    #[test]
    fn empty_document_parses() {
        let tune: MediaTuneResponse = serde_json::from_str("{}").unwrap();
        assert!(tune.head.is_none());
        assert!(tune.body.is_none());
    }
}
