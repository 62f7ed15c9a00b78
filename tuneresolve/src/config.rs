//! Engine configuration
//!
//! All fields are optional; an empty configuration resolves public stations
//! without personalization and filters nothing beyond the built-in ad filter.

use serde::{Deserialize, Serialize};

/// Configuration supplied by the host application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuneInConfig {
    /// Vendor partner id, appended to every catalog URL when set.
    pub partner_id: Option<String>,
    /// Account username; enables the favorites URL and personalized results.
    pub username: Option<String>,
    /// "lat,lon" pair for localized directory results.
    pub latitude_longitude: Option<String>,
    /// Deny-list for the configurable URL filter: substrings separated by
    /// `;` or `|` (e.g. ad tracking query-parameter names).
    pub filtered_urls: Option<String>,
}
