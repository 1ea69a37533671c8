//! URL derivation from the configured Hudu base URL
//!
//! The base URL may be given either as the site root
//! (`https://acme.huducloud.com`) or as the API root
//! (`https://acme.huducloud.com/api/v1`). Both forms must work.

const API_SEGMENT: &str = "/api/";

/// Root of the versioned REST API
///
/// Kept as-is when the base URL already carries an `/api/` path segment,
/// otherwise `/api/v1` is appended.
pub fn api_root(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');

    if base.contains(API_SEGMENT) {
        base.to_string()
    } else if base.ends_with("/api") {
        format!("{base}/v1")
    } else {
        format!("{base}/api/v1")
    }
}

/// Full URL of the assets collection
pub fn assets_endpoint(base_url: &str) -> String {
    format!("{}/assets", api_root(base_url))
}

/// Site root used to build human facing asset links
///
/// Everything from the first `/api/` segment on is dropped.
pub fn site_root(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');

    let root = match base.find(API_SEGMENT) {
        Some(index) => &base[..index],
        None => base.strip_suffix("/api").unwrap_or(base),
    };

    root.trim_end_matches('/').to_string()
}

/// Link to an asset page built from its slug
pub fn asset_url_from_slug(base_url: &str, slug: &str) -> String {
    format!("{}/a/{}", site_root(base_url), slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_root_appends_version_to_site_root() {
        assert_eq!(
            api_root("https://acme.huducloud.com"),
            "https://acme.huducloud.com/api/v1"
        );
        assert_eq!(
            api_root("https://acme.huducloud.com/"),
            "https://acme.huducloud.com/api/v1"
        );
    }

    #[test]
    fn test_api_root_keeps_existing_api_segment() {
        assert_eq!(
            api_root("https://acme.huducloud.com/api/v1/"),
            "https://acme.huducloud.com/api/v1"
        );
        assert_eq!(
            api_root("https://acme.huducloud.com/api"),
            "https://acme.huducloud.com/api/v1"
        );
    }

    #[test]
    fn test_api_root_ignores_api_subdomain() {
        assert_eq!(
            api_root("https://api.acme.com"),
            "https://api.acme.com/api/v1"
        );
    }

    #[test]
    fn test_assets_endpoint() {
        assert_eq!(
            assets_endpoint("https://acme.huducloud.com"),
            "https://acme.huducloud.com/api/v1/assets"
        );
    }

    #[test]
    fn test_site_root_strips_api_suffix() {
        assert_eq!(
            site_root("https://acme.huducloud.com/api/v1"),
            "https://acme.huducloud.com"
        );
        assert_eq!(
            site_root("https://acme.huducloud.com/api"),
            "https://acme.huducloud.com"
        );
        assert_eq!(
            site_root("https://acme.huducloud.com/"),
            "https://acme.huducloud.com"
        );
    }

    #[test]
    fn test_asset_url_from_slug() {
        assert_eq!(
            asset_url_from_slug("https://acme.huducloud.com/api/v1", "emily-r-oparowski-1a2b"),
            "https://acme.huducloud.com/a/emily-r-oparowski-1a2b"
        );
    }
}
