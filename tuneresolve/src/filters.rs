//! Candidate filters
//!
//! Filters are stateless predicates over resolved sources; the provider
//! manager ANDs them. A source rejected by any filter is dropped and does not
//! count toward a provider having produced results.

use crate::models::MediaSource;
use tracing::{debug, info};

/// Known ad-serving domain rejected unconditionally.
pub const AD_SERVER_DOMAIN: &str = "fns.tunein.com";

/// Predicate deciding whether a resolved source may be yielded.
pub trait MediaSourceFilter: Send + Sync {
    fn is_allowed(&self, source: &MediaSource) -> bool;
}

/// Rejects sources served from the vendor's ad domain.
#[derive(Debug, Default)]
pub struct AdsFilter;

impl AdsFilter {
    pub fn new() -> Self {
        Self
    }
}

impl MediaSourceFilter for AdsFilter {
    fn is_allowed(&self, source: &MediaSource) -> bool {
        if contains_ignore_case(&source.path, AD_SERVER_DOMAIN) {
            info!(path = %source.path, "Filtered out ad source");
            return false;
        }
        true
    }
}

/// Configured deny-list for the URL filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlFilterOptions {
    filter_urls: Vec<String>,
}

impl UrlFilterOptions {
    /// Parse a `;`/`|` delimited deny-list string; `None` or an empty string
    /// yields options that allow everything.
    pub fn parse(filters: Option<&str>) -> Self {
        let mut options = Self::default();
        if let Some(filters) = filters {
            options.add_filters(filters);
        }
        options
    }

    /// Append entries from a delimited string, trimming and dropping empties.
    pub fn add_filters(&mut self, filters: &str) {
        self.filter_urls.extend(
            filters
                .split(|c| c == ';' || c == '|')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string),
        );
    }

    pub fn filter_urls(&self) -> &[String] {
        &self.filter_urls
    }
}

/// Rejects sources whose path contains any configured substring,
/// case-insensitively. Empty options allow everything.
#[derive(Debug, Default)]
pub struct UrlFilter {
    options: UrlFilterOptions,
}

impl UrlFilter {
    pub fn new(options: UrlFilterOptions) -> Self {
        Self { options }
    }
}

impl MediaSourceFilter for UrlFilter {
    fn is_allowed(&self, source: &MediaSource) -> bool {
        if self
            .options
            .filter_urls()
            .iter()
            .any(|filter| contains_ignore_case(&source.path, filter))
        {
            info!(path = %source.path, "Filtered out by URL filter");
            return false;
        }

        debug!(path = %source.path, "Filtered in");
        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaStream;

    fn source_with_path(path: &str) -> MediaSource {
        MediaSource::live(path, "mp3", MediaStream::audio("mp3"))
    }

    #[test]
    fn ads_filter_rejects_ad_domain_case_insensitively() {
        let filter = AdsFilter;
        assert!(!filter.is_allowed(&source_with_path("http://FNS.TuneIn.com/v1/ad.mp3")));
        assert!(filter.is_allowed(&source_with_path("http://stream.example.org/radio.mp3")));
    }

    #[test]
    fn url_filter_options_split_on_both_delimiters() {
        let options = UrlFilterOptions::parse(Some("ads.example.com; track_id |  ; |utm_"));
        assert_eq!(options.filter_urls(), ["ads.example.com", "track_id", "utm_"]);
    }

    #[test]
    fn url_filter_matches_substring_case_insensitively() {
        let filter = UrlFilter::new(UrlFilterOptions::parse(Some("Track_ID")));
        assert!(!filter.is_allowed(&source_with_path("http://example.org/play?track_id=4")));
        assert!(filter.is_allowed(&source_with_path("http://example.org/play")));
    }

    #[test]
    fn empty_url_filter_allows_everything() {
        let filter = UrlFilter::new(UrlFilterOptions::parse(None));
        assert!(filter.is_allowed(&source_with_path("http://fns.example.org/anything")));
    }
}
