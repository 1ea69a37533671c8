use crate::prelude::{println, *};
use hudumcp_core::assets::{extract_assets, AssetList, AssetQuery};
use hudumcp_core::search::TitlePolicy;
use hudumcp_core::urls::assets_endpoint;
use log::warn;
use std::time::Duration;

pub mod fetch;
pub mod search;

/// Hudu module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "hudu")]
#[command(about = "Hudu asset operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Search assets by free text
    #[clap(name = "search")]
    Search(search::SearchOptions),

    /// Fetch a single asset by id
    #[clap(name = "fetch")]
    Fetch(fetch::FetchOptions),
}

/// Hudu configuration, validated once at startup
#[derive(Clone)]
pub struct HuduConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    pub api_key: String,
    pub page_size: u32,
    pub timeout: Duration,
    pub enrich_titles: bool,
}

impl std::fmt::Debug for HuduConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuduConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("page_size", &self.page_size)
            .field("timeout", &self.timeout)
            .field("enrich_titles", &self.enrich_titles)
            .finish()
    }
}

impl HuduConfig {
    pub const DEFAULT_PAGE_SIZE: u32 = 15;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
            page_size: Self::DEFAULT_PAGE_SIZE,
            timeout: Self::DEFAULT_TIMEOUT,
            enrich_titles: false,
        }
    }

    /// Build the configuration from CLI flags and their environment fallbacks
    pub fn from_global(global: &crate::Global) -> Result<Self> {
        let base_url = required(global.base_url.as_deref())
            .ok_or_else(|| eyre!("HUDU_BASE_URL environment variable not set"))?;
        let api_key = required(global.api_key.as_deref())
            .ok_or_else(|| eyre!("HUDU_API_KEY environment variable not set"))?;

        if global.page_size == 0 {
            return Err(eyre!("HUDU_DEFAULT_PAGE_SIZE must be at least 1"));
        }
        if !global.timeout.is_finite() || global.timeout <= 0.0 {
            return Err(eyre!(
                "HTTP_TIMEOUT_S must be a positive number of seconds, got {}",
                global.timeout
            ));
        }

        let timeout = Duration::try_from_secs_f64(global.timeout)
            .map_err(|e| eyre!("HTTP_TIMEOUT_S is out of range ({}): {e}", global.timeout))?;

        Ok(Self {
            page_size: global.page_size,
            timeout,
            enrich_titles: global.enrich_titles,
            ..Self::new(base_url, api_key)
        })
    }

    pub fn title_policy(&self) -> TitlePolicy {
        if self.enrich_titles {
            TitlePolicy::Enriched
        } else {
            TitlePolicy::Plain
        }
    }
}

fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Create an HTTP client that authenticates every request with the API key
pub fn create_hudu_client(config: &HuduConfig) -> Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

    let mut api_key = HeaderValue::from_str(&config.api_key)
        .map_err(|e| eyre!("Invalid header value: {}", e))?;
    api_key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert("x-api-key", api_key);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Configured access to the Hudu assets API
///
/// Cheap to clone; the underlying reqwest client shares its connection pool.
#[derive(Debug, Clone)]
pub struct HuduClient {
    config: HuduConfig,
    http: reqwest::Client,
}

impl HuduClient {
    pub fn new(config: HuduConfig) -> Result<Self> {
        let http = create_hudu_client(&config)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &HuduConfig {
        &self.config
    }

    /// Issue one `GET /assets` and locate the asset list in the response
    ///
    /// Every transport problem (connect failure, timeout, non-2xx, body that
    /// is not JSON) becomes [`HuduError::Upstream`]. Unexpected payload shapes
    /// are logged and come back as an empty list.
    pub async fn list_assets(&self, query: &AssetQuery) -> Result<AssetList, HuduError> {
        let url = assets_endpoint(&self.config.base_url);

        let response = self
            .http
            .get(&url)
            .query(&query.to_params())
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(300).collect();
            warn!("Hudu /assets {:?} -> {} {}", query.to_params(), status, preview);
            return Err(HuduError::Upstream {
                status: Some(status.as_u16()),
                message: format!("Hudu API /assets failed ({status})"),
            });
        }

        let payload: serde_json::Value =
            response.json().await.map_err(|e| HuduError::Upstream {
                status: None,
                message: format!("Failed to parse Hudu response: {e}"),
            })?;

        let list = extract_assets(&payload);
        for anomaly in &list.anomalies {
            warn!("Unexpected Hudu payload from {url}: {anomaly}");
        }

        Ok(list)
    }
}

fn transport_error(err: reqwest::Error) -> HuduError {
    let message = if err.is_timeout() {
        format!("Request to Hudu timed out: {err}")
    } else {
        format!("Failed to send request to Hudu: {err}")
    };

    HuduError::Upstream {
        status: err.status().map(|s| s.as_u16()),
        message,
    }
}

/// Module entry point
pub async fn run(app: App, config: HuduConfig, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Hudu API: {}", assets_endpoint(&config.base_url));
        println!();
    }

    let client = HuduClient::new(config)?;

    match app.command {
        Commands::Search(options) => search::handler(options, &client).await,
        Commands::Fetch(options) => fetch::handler(options, &client).await,
    }
}


#[cfg(test)]
mod tests {
    use super::fake::{unreachable_base_url, FakeHudu};
    use super::*;
    use axum::http::StatusCode;
    use hudumcp_core::assets::{EnvelopeKey, ShapeAnomaly};
    use serde_json::json;

    fn global(base_url: Option<&str>, api_key: Option<&str>) -> crate::Global {
        crate::Global {
            base_url: base_url.map(str::to_string),
            api_key: api_key.map(str::to_string),
            page_size: 15,
            timeout: 15.0,
            enrich_titles: false,
            verbose: false,
        }
    }

    #[test]
    fn test_config_requires_base_url_and_key() {
        let missing_url = HuduConfig::from_global(&global(None, Some("key")));
        let blank_key = HuduConfig::from_global(&global(Some("https://x"), Some("  ")));

        assert!(missing_url
            .unwrap_err()
            .to_string()
            .contains("HUDU_BASE_URL"));
        assert!(blank_key.unwrap_err().to_string().contains("HUDU_API_KEY"));
    }

    #[test]
    fn test_config_trims_trailing_slash() {
        let config =
            HuduConfig::from_global(&global(Some("https://acme.huducloud.com/"), Some("key")))
                .unwrap();

        assert_eq!(config.base_url, "https://acme.huducloud.com");
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.title_policy(), TitlePolicy::Plain);
    }

    #[test]
    fn test_config_rejects_bad_limits() {
        let mut zero_page = global(Some("https://x"), Some("key"));
        zero_page.page_size = 0;
        let mut zero_timeout = global(Some("https://x"), Some("key"));
        zero_timeout.timeout = 0.0;

        assert!(HuduConfig::from_global(&zero_page).is_err());
        assert!(HuduConfig::from_global(&zero_timeout).is_err());
    }

    #[test]
    fn test_config_rejects_oversized_timeout() {
        let mut huge_timeout = global(Some("https://x"), Some("key"));
        huge_timeout.timeout = 1e20;

        let err = HuduConfig::from_global(&huge_timeout).unwrap_err();

        assert!(err.to_string().contains("HTTP_TIMEOUT_S"));
    }

    #[test]
    fn test_config_debug_redacts_api_key() {
        let config = HuduConfig::new("https://x", "super-secret");

        let debug = format!("{config:?}");

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_list_assets_sends_key_and_params() {
        // Arrange
        let fake = FakeHudu::start(StatusCode::OK, json!({"assets": [{"id": 1}]})).await;
        let client = fake.client();

        // Act
        let list = client
            .list_assets(&AssetQuery::search("Emily", 2, 5))
            .await
            .unwrap();

        // Assert
        assert_eq!(list.records.len(), 1);
        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].api_key.as_deref(), Some("test-key"));
        assert_eq!(calls[0].params.get("search").map(String::as_str), Some("Emily"));
        assert_eq!(calls[0].params.get("page").map(String::as_str), Some("2"));
        assert_eq!(calls[0].params.get("page_size").map(String::as_str), Some("5"));
        assert!(!calls[0].params.contains_key("id"));
    }

    #[tokio::test]
    async fn test_list_assets_reads_data_envelope() {
        let fake = FakeHudu::start(StatusCode::OK, json!({"data": [{"id": 1}, {"id": 2}]})).await;

        let list = fake.client().list_assets(&AssetQuery::by_id("1")).await.unwrap();

        assert_eq!(list.source, Some(EnvelopeKey::Data));
        assert_eq!(list.records.len(), 2);
    }

    #[tokio::test]
    async fn test_list_assets_unexpected_shape_is_empty() {
        let fake = FakeHudu::start(StatusCode::OK, json!("maintenance")).await;

        let list = fake.client().list_assets(&AssetQuery::by_id("1")).await.unwrap();

        assert!(list.records.is_empty());
        assert_eq!(list.anomalies, vec![ShapeAnomaly::NotAnObject]);
    }

    #[tokio::test]
    async fn test_list_assets_non_success_status() {
        let fake = FakeHudu::start(StatusCode::UNAUTHORIZED, json!({"error": "bad key"})).await;

        let err = fake
            .client()
            .list_assets(&AssetQuery::by_id("1"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "upstream");
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_list_assets_connection_failure() {
        let config = HuduConfig::new(&unreachable_base_url().await, "test-key");
        let client = HuduClient::new(config).unwrap();

        let err = client
            .list_assets(&AssetQuery::by_id("1"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "upstream");
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_list_assets_timeout() {
        // Arrange: the fake answers well after the client gives up
        let fake = FakeHudu::start_with_delay(
            StatusCode::OK,
            json!({"assets": []}),
            Duration::from_secs(2),
        )
        .await;
        let mut config = fake.config();
        config.timeout = Duration::from_millis(200);
        let client = HuduClient::new(config).unwrap();

        // Act
        let err = client
            .list_assets(&AssetQuery::by_id("1"))
            .await
            .unwrap_err();

        // Assert
        assert_eq!(err.kind(), "upstream");
        assert!(err.to_string().contains("timed out"));
    }
}
