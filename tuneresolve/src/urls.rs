//! Vendor catalog URL construction
//!
//! Builds the directory and describe URLs of the TuneIn OPML API, carrying
//! the configured partner/username/geo parameters on every request. The
//! catalog tree traversal itself lives outside this engine; these URLs are
//! what it feeds into [`crate::manager::ProviderManager::resolve`] and what
//! the genre catalog is fetched from.

use crate::config::TuneInConfig;
use crate::error::Result;
use url::Url;

/// Vendor API root
pub const ROOT_URL: &str = "http://opml.radiotime.com";

/// Formats advertised on every catalog request
pub const DEFAULT_FORMATS: &str = "mp3,aac,ogg,hls,flac,wma,wav";

/// URL builder over the vendor API root.
#[derive(Debug, Clone)]
pub struct TuneInUrls {
    browse: Url,
    search: Url,
    describe: Url,
    config: TuneInConfig,
}

impl TuneInUrls {
    /// Builder over the default vendor root.
    pub fn new(config: TuneInConfig) -> Result<Self> {
        Self::with_root(ROOT_URL, config)
    }

    /// Builder over a custom root (used by tests against a mock server).
    pub fn with_root(root: &str, config: TuneInConfig) -> Result<Self> {
        let root = Url::parse(root)?;
        Ok(Self {
            browse: root.join("Browse.ashx")?,
            search: root.join("Search.ashx")?,
            describe: root.join("Describe.ashx")?,
            config,
        })
    }

    /// Top-level directory.
    pub fn browse(&self) -> Url {
        self.with_common_params(self.browse.clone())
    }

    /// Local stations category.
    pub fn local(&self) -> Url {
        let mut url = self.with_common_params(self.browse.clone());
        url.query_pairs_mut().append_pair("c", "local");
        url
    }

    /// Popular stations category.
    pub fn popular(&self) -> Url {
        let mut url = self.with_common_params(self.browse.clone());
        url.query_pairs_mut().append_pair("c", "popular");
        url
    }

    /// Account presets; requires a configured username.
    pub fn favorites(&self) -> Option<Url> {
        match &self.config.username {
            Some(username) if !username.trim().is_empty() => {
                let mut url = self.with_common_params(self.browse.clone());
                url.query_pairs_mut().append_pair("c", "presets");
                Some(url)
            }
            _ => None,
        }
    }

    /// Station/show search.
    pub fn search(&self, term: &str) -> Url {
        let mut url = self.with_common_params(self.search.clone());
        url.query_pairs_mut().append_pair("query", term);
        url
    }

    /// Genre catalog feed (OPML).
    pub fn genres(&self) -> Url {
        let mut url = self.with_common_params(self.describe.clone());
        url.query_pairs_mut().append_pair("c", "genres");
        url
    }

    fn with_common_params(&self, mut url: Url) -> Url {
        {
            let mut params = url.query_pairs_mut();
            params.append_pair("formats", DEFAULT_FORMATS);

            if let Some(partner_id) = &self.config.partner_id {
                if !partner_id.is_empty() {
                    params.append_pair("partnerId", partner_id);
                }
            }
            if let Some(username) = &self.config.username {
                if !username.trim().is_empty() {
                    params.append_pair("username", username);
                }
            }
            if let Some(latlon) = &self.config.latitude_longitude {
                if !latlon.is_empty() {
                    params.append_pair("latlon", latlon);
                }
            }
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> TuneInConfig {
        TuneInConfig {
            partner_id: Some("TestPartnerId".to_string()),
            username: Some("TestUsername".to_string()),
            latitude_longitude: Some("48.85,2.35".to_string()),
            filtered_urls: None,
        }
    }

    #[test]
    fn browse_carries_common_params() {
        let urls = TuneInUrls::new(full_config()).unwrap();
        let browse = urls.browse();

        assert!(browse.as_str().starts_with("http://opml.radiotime.com/Browse.ashx?"));
        let pairs: Vec<(String, String)> = browse
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("formats".to_string(), DEFAULT_FORMATS.to_string())));
        assert!(pairs.contains(&("partnerId".to_string(), "TestPartnerId".to_string())));
        assert!(pairs.contains(&("username".to_string(), "TestUsername".to_string())));
        assert!(pairs.contains(&("latlon".to_string(), "48.85,2.35".to_string())));
    }

    #[test]
    fn favorites_requires_username() {
        let urls = TuneInUrls::new(TuneInConfig::default()).unwrap();
        assert!(urls.favorites().is_none());

        let urls = TuneInUrls::new(full_config()).unwrap();
        let favorites = urls.favorites().unwrap();
        assert!(favorites.query_pairs().any(|(k, v)| k == "c" && v == "presets"));
    }

    #[test]
    fn genres_uses_describe_endpoint() {
        let urls = TuneInUrls::new(TuneInConfig::default()).unwrap();
        let genres = urls.genres();
        assert!(genres.path().ends_with("Describe.ashx"));
        assert!(genres.query_pairs().any(|(k, v)| k == "c" && v == "genres"));
    }

    #[test]
    fn empty_optional_params_are_omitted() {
        let config = TuneInConfig {
            partner_id: Some(String::new()),
            username: Some("  ".to_string()),
            latitude_longitude: None,
            filtered_urls: None,
        };
        let urls = TuneInUrls::new(config).unwrap();
        let browse = urls.browse();
        assert!(!browse.query_pairs().any(|(k, _)| k == "partnerId"));
        assert!(!browse.query_pairs().any(|(k, _)| k == "username"));
        assert!(!browse.query_pairs().any(|(k, _)| k == "latlon"));
    }

    #[test]
    fn search_appends_query_term() {
        let urls = TuneInUrls::new(TuneInConfig::default()).unwrap();
        let search = urls.search("jazz radio");
        assert!(search.path().ends_with("Search.ashx"));
        assert!(search.query_pairs().any(|(k, v)| k == "query" && v == "jazz radio"));
    }
}
