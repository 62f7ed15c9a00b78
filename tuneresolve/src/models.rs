//! Candidate model: resolved, playable stream references
//!
//! A [`MediaSource`] is the final output of the resolution engine: one
//! directly-fetchable stream URL together with container/codec metadata and
//! streaming capability flags. Handlers construct a source once per
//! resolution step; after the final bitrate-inference pass it is never
//! mutated again.

use serde::{Deserialize, Serialize};

/// Transport protocol of a resolved source. This engine only produces HTTP
/// sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaProtocol {
    Http,
}

/// Kind of an embedded stream descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaStreamType {
    Audio,
}

/// A single elementary stream inside a [`MediaSource`].
///
/// `index = -1` means "not probed frame-accurately, described from metadata";
/// every source built by this engine carries exactly one such audio stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaStream {
    pub index: i32,
    #[serde(rename = "type")]
    pub stream_type: MediaStreamType,
    pub codec: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<u32>,
}

impl MediaStream {
    /// Unprobed audio stream with the given codec.
    pub fn audio(codec: impl Into<String>) -> Self {
        Self {
            index: -1,
            stream_type: MediaStreamType::Audio,
            codec: codec.into(),
            bitrate: None,
            sample_rate: None,
            channels: None,
        }
    }
}

/// A resolved, playable stream reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSource {
    /// Opaque identity, typically the resolved or original URI.
    pub id: String,
    /// Display title; defaults to the id.
    pub name: String,
    /// The actual fetch URL.
    pub path: String,
    /// Short format tag: "mp3", "aac", "ogg", "flac", "mpegts".
    pub container: String,
    pub protocol: MediaProtocol,
    pub is_remote: bool,
    /// True for live radio: no known duration.
    pub is_infinite_stream: bool,
    pub supports_probing: bool,
    pub supports_transcoding: bool,
    pub supports_direct_play: bool,
    pub supports_direct_stream: bool,
    /// Optional transcoding hint, e.g. "hls".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcoding_sub_protocol: Option<String>,
    /// 0 for live streams.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_time_ticks: Option<i64>,
    /// Total bitrate; inferred from streams when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    pub media_streams: Vec<MediaStream>,
}

impl MediaSource {
    /// Build the common shape of a live remote HTTP source: id, name and
    /// path all bound to `uri`, every capability flag set.
    pub fn live(uri: impl Into<String>, container: impl Into<String>, stream: MediaStream) -> Self {
        let uri = uri.into();
        Self {
            id: uri.clone(),
            name: uri.clone(),
            path: uri,
            container: container.into(),
            protocol: MediaProtocol::Http,
            is_remote: true,
            is_infinite_stream: true,
            supports_probing: true,
            supports_transcoding: true,
            supports_direct_play: true,
            supports_direct_stream: true,
            transcoding_sub_protocol: None,
            run_time_ticks: None,
            bitrate: None,
            media_streams: vec![stream],
        }
    }

    /// Set the source-level bitrate to the sum of stream bitrates, unless a
    /// bitrate is already present or no stream carries one.
    pub fn infer_total_bitrate(&mut self) {
        if self.bitrate.is_some() {
            return;
        }

        let total: u32 = self
            .media_streams
            .iter()
            .filter_map(|stream| stream.bitrate)
            .sum();

        if total > 0 {
            self.bitrate = Some(total);
        }
    }
}
