//! Handles responses declared as a known raw audio media type

use crate::client::FetchedResponse;
use crate::handlers::{MediaTypeHandler, SourceStream};
use crate::models::{MediaSource, MediaStream};
use crate::resolver::ResolveCx;
use async_stream::try_stream;
use reqwest::header::HeaderMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Turns a raw audio response into one source, enriched from the ICY
/// headers Shoutcast/Icecast servers send alongside the stream.
pub struct KnownMediaTypeHandler {
    supported: HashMap<&'static str, (&'static str, &'static str)>,
}

impl Default for KnownMediaTypeHandler {
    fn default() -> Self {
        // content type -> (container, codec)
        let supported = HashMap::from([
            ("audio/x-aac", ("aac", "aac")),
            ("audio/aacp", ("aac", "aac")),
            ("audio/aac", ("aac", "aac")),
            ("audio/mpeg", ("mp3", "mp3")),
            ("audio/ogg", ("ogg", "ogg")),
        ]);
        Self { supported }
    }
}

impl KnownMediaTypeHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MediaTypeHandler for KnownMediaTypeHandler {
    fn name(&self) -> &'static str {
        "known-media-type"
    }

    fn handle(self: Arc<Self>, response: Arc<FetchedResponse>, _cx: ResolveCx) -> SourceStream {
        Box::pin(try_stream! {
            let Some((container, codec)) =
                response.content_type().and_then(|ct| self.supported.get(ct)).copied()
            else {
                return;
            };

            let requested = response.requested_uri().to_string();
            let mut source = MediaSource::live(requested, container, MediaStream::audio(codec));
            apply_icy_headers(&mut source, response.headers());
            source.infer_total_bitrate();
            yield source;
        })
    }
}

/// Fold ICY stream metadata into the source.
///
/// `ice-audio-info` carries `key=value` pairs separated by `;`; the discrete
/// `icy-sr`/`icy-br` headers override it, and `icy-description` overrides
/// `icy-name` as the display title.
fn apply_icy_headers(source: &mut MediaSource, headers: &HeaderMap) {
    let stream = &mut source.media_streams[0];

    for pairs in header_values(headers, "ice-audio-info") {
        for pair in pairs.split(';') {
            let Some((key, value)) = pair.trim().split_once('=') else {
                continue;
            };
            match key {
                "ice-bitrate" => stream.bitrate = value.parse().ok().or(stream.bitrate),
                "ice-channels" => stream.channels = value.parse().ok().or(stream.channels),
                "ice-samplerate" => stream.sample_rate = value.parse().ok().or(stream.sample_rate),
                _ => {}
            }
        }
    }

    for name in header_values(headers, "icy-name") {
        if !name.trim().is_empty() {
            source.name = name.to_string();
        }
    }

    for description in header_values(headers, "icy-description") {
        if !description.trim().is_empty() {
            source.name = description.to_string();
        }
    }

    for value in header_values(headers, "icy-sr") {
        if let Ok(sample_rate) = value.parse() {
            stream.sample_rate = Some(sample_rate);
        }
    }

    for value in header_values(headers, "icy-br") {
        if let Ok(bitrate) = value.parse() {
            stream.bitrate = Some(bitrate);
        }
    }
}

fn header_values<'a>(headers: &'a HeaderMap, name: &str) -> impl Iterator<Item = &'a str> {
    headers.get_all(name).iter().filter_map(|v| v.to_str().ok())
}
