pub mod listing;
pub mod radarr;
pub mod sonarr;

mod error;

pub use error::{Error, ErrorKind, Result};

use reqwest::{
	Client,
	header::{HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;

use arrsweep_config::{Category, CategoryConfig};

pub const API_KEY_HEADER: &str = "x-api-key";

pub fn auth_headers(api_key: &str) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();
	let mut value = HeaderValue::from_str(api_key)?;

	value.set_sensitive(true);
	headers.insert(HeaderName::from_static(API_KEY_HEADER), value);

	Ok(headers)
}

/// IDs of monitored items that have no file yet.
pub async fn fetch_missing(cfg: &CategoryConfig) -> Result<Vec<i64>> {
	match cfg.category {
		Category::Episodes => sonarr::fetch_missing(cfg).await,
		Category::Movies => radarr::fetch_missing(cfg).await,
	}
}

/// IDs of items whose file is below the quality cutoff.
pub async fn fetch_cutoff_unmet(cfg: &CategoryConfig) -> Result<Vec<i64>> {
	match cfg.category {
		Category::Episodes => sonarr::fetch_cutoff_unmet(cfg).await,
		Category::Movies => radarr::fetch_cutoff_unmet(cfg).await,
	}
}

/// Submits one search command. Any non-2xx response is an error.
pub async fn trigger_search(cfg: &CategoryConfig, item_id: i64) -> Result<()> {
	let url = format!("{}/api/v3/command", cfg.base_url);
	let body = command_payload(cfg.category, item_id);

	client(cfg)?.post(url).json(&body).send().await?.error_for_status()?;

	Ok(())
}

pub fn command_payload(category: Category, item_id: i64) -> Value {
	match category {
		Category::Episodes => sonarr::search_command(item_id),
		Category::Movies => radarr::search_command(item_id),
	}
}

pub(crate) fn client(cfg: &CategoryConfig) -> Result<Client> {
	let client = Client::builder()
		.timeout(cfg.request_timeout)
		.default_headers(auth_headers(&cfg.api_key)?)
		.build()?;

	Ok(client)
}
