//! Radarr v3: missing movies are derived from the full catalog, cutoff-unmet movies come from
//! the `wanted/cutoff` listing.

use serde_json::Value;

use arrsweep_config::CategoryConfig;

use crate::{Error, Result, listing};

pub async fn fetch_missing(cfg: &CategoryConfig) -> Result<Vec<i64>> {
	let url = format!("{}/api/v3/movie", cfg.base_url);
	let json: Value =
		crate::client(cfg)?.get(url).send().await?.error_for_status()?.json().await?;

	missing_movie_ids(&json)
}

pub async fn fetch_cutoff_unmet(cfg: &CategoryConfig) -> Result<Vec<i64>> {
	let client = crate::client(cfg)?;

	listing::fetch_paged(&client, cfg, "/api/v3/wanted/cutoff", "title", "asc").await
}

pub fn search_command(movie_id: i64) -> Value {
	serde_json::json!({ "name": "MoviesSearch", "movieIds": [movie_id] })
}

/// Monitored movies without a file, in catalog order.
pub fn missing_movie_ids(json: &Value) -> Result<Vec<i64>> {
	let movies = json.as_array().ok_or_else(|| Error::InvalidResponse {
		message: "Movie catalog response must be an array.".to_string(),
	})?;
	let mut ids = Vec::new();

	for movie in movies {
		let monitored = movie.get("monitored").and_then(Value::as_bool).unwrap_or(false);
		let has_file = movie.get("hasFile").and_then(Value::as_bool).unwrap_or(false);

		if monitored && !has_file {
			ids.push(listing::item_id(movie)?);
		}
	}

	Ok(ids)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keeps_monitored_movies_without_files() {
		let json = serde_json::json!([
			{ "id": 1, "monitored": true, "hasFile": false },
			{ "id": 2, "monitored": true, "hasFile": true },
			{ "id": 3, "monitored": false, "hasFile": false },
			{ "id": 4, "monitored": true }
		]);

		assert_eq!(missing_movie_ids(&json).expect("Failed to parse movie catalog."), vec![1, 4]);
	}

	#[test]
	fn rejects_wrapped_catalog() {
		let json = serde_json::json!({ "records": [] });

		assert!(missing_movie_ids(&json).is_err());
	}
}
