//! Shared User-Agent string for Zotero API traffic.

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/nicksrandall/zotero-examples";

/// Default User-Agent for API requests (identifies the tool and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("zotero-examples/{version} (+{PROJECT_UA_URL})")
}
