//! Sonarr v3: episodes come from the `wanted` listings.

use serde_json::Value;

use arrsweep_config::CategoryConfig;

use crate::{Result, listing};

const SORT_KEY: &str = "airDateUtc";
const SORT_DIR: &str = "desc";

pub async fn fetch_missing(cfg: &CategoryConfig) -> Result<Vec<i64>> {
	let client = crate::client(cfg)?;

	listing::fetch_paged(&client, cfg, "/api/v3/wanted/missing", SORT_KEY, SORT_DIR).await
}

pub async fn fetch_cutoff_unmet(cfg: &CategoryConfig) -> Result<Vec<i64>> {
	let client = crate::client(cfg)?;

	listing::fetch_paged(&client, cfg, "/api/v3/wanted/cutoff", SORT_KEY, SORT_DIR).await
}

pub fn search_command(episode_id: i64) -> Value {
	serde_json::json!({ "name": "EpisodeSearch", "episodeIds": [episode_id] })
}
