//! Genre catalogue from the vendor OPML directory

use crate::error::Result;
use crate::urls::TuneInUrls;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tunecache::Cache;

const GENRES_CACHE_KEY: &str = "tunein-genres";

/// One entry of the genre directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: String,
    pub name: Option<String>,
}

/// Fetches and caches the station genre directory.
///
/// The directory rarely changes, so the parsed map is cached for the
/// lifetime of the provider; concurrent first calls share one fetch.
pub struct GenresProvider {
    client: Client,
    urls: TuneInUrls,
    cache: Arc<Cache>,
}

impl GenresProvider {
    pub fn new(client: Client, urls: TuneInUrls, cache: Arc<Cache>) -> Self {
        Self { client, urls, cache }
    }

    /// Look a genre up by its guide id.
    pub async fn genre(&self, id: &str, token: &CancellationToken) -> Result<Option<Genre>> {
        let genres = self.genres(token).await?;
        Ok(genres.get(id).cloned())
    }

    /// The full genre map, keyed by guide id.
    pub async fn genres(&self, token: &CancellationToken) -> Result<Arc<HashMap<String, Genre>>> {
        let genres = self
            .cache
            .get_or_compute(GENRES_CACHE_KEY, |token| self.fetch_genres(token), token)
            .await?;
        Ok(genres)
    }

    async fn fetch_genres(&self, token: CancellationToken) -> anyhow::Result<HashMap<String, Genre>> {
        let url = self.urls.genres();
        let response = crate::client::fetch(&self.client, &url, &token).await?;
        if !response.status().is_success() {
            return Err(crate::error::Error::Status(response.status()).into());
        }

        let genres = parse_genres_opml(response.text(&token).await?)?;
        debug!(count = genres.len(), "genre directory loaded");
        Ok(genres)
    }
}

/// Every `<outline>` with a non-empty `guide_id` is a genre; `text` is its
/// display name.
fn parse_genres_opml(xml: &str) -> Result<HashMap<String, Genre>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut genres = HashMap::new();

    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element)
                if element.local_name().as_ref() == b"outline" =>
            {
                let mut id = None;
                let mut name = None;

                for attribute in element.attributes().flatten() {
                    match attribute.key.as_ref() {
                        b"guide_id" => id = Some(attribute_text(&attribute.value)?),
                        b"text" => name = Some(attribute_text(&attribute.value)?),
                        _ => {}
                    }
                }

                if let Some(id) = id.filter(|id| !id.is_empty()) {
                    genres.insert(id.clone(), Genre { id, name });
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(genres)
}

fn attribute_text(raw: &[u8]) -> Result<String> {
    let raw = String::from_utf8_lossy(raw);
    let text = quick_xml::escape::unescape(&raw)
        .map_err(quick_xml::Error::from)?
        .into_owned();
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<opml version="1">
  <head><title>Browse</title><status>200</status></head>
  <body>
    <outline type="link" text="Blues" URL="http://opml.radiotime.com/Browse.ashx?id=g106" guide_id="g106"/>
    <outline type="link" text="Jazz" URL="http://opml.radiotime.com/Browse.ashx?id=g2754" guide_id="g2754"/>
    <outline type="link" text="No id"/>
    <outline type="link" text="Empty id" guide_id=""/>
  </body>
</opml>"#;

    #[test]
    fn outlines_with_guide_ids_become_genres() {
        let genres = parse_genres_opml(OPML).unwrap();
        assert_eq!(genres.len(), 2);
        assert_eq!(genres["g106"].name.as_deref(), Some("Blues"));
        assert_eq!(genres["g2754"].name.as_deref(), Some("Jazz"));
    }

    #[test]
    fn outline_without_text_keeps_no_name() {
        let genres = parse_genres_opml(r#"<opml><body><outline guide_id="g1"/></body></opml>"#).unwrap();
        assert_eq!(genres["g1"].name, None);
    }

    #[test]
    fn escaped_attribute_values_are_unescaped() {
        let genres =
            parse_genres_opml(r#"<opml><body><outline guide_id="g9" text="Rock &amp; Roll"/></body></opml>"#)
                .unwrap();
        assert_eq!(genres["g9"].name.as_deref(), Some("Rock & Roll"));
    }
}
