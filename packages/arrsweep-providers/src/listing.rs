use reqwest::Client;
use serde_json::Value;

use arrsweep_config::CategoryConfig;

use crate::{Error, Result};

/// One page of a listing endpoint, reduced to item IDs.
#[derive(Debug, PartialEq, Eq)]
pub struct IdListing {
	pub ids: Vec<i64>,
	/// Present only for wrapped (`{ "records": [...] }`) responses.
	pub total_records: Option<u64>,
}

/// Accepts either a paging wrapper with a `records` array or a bare array of items.
pub fn parse_id_listing(json: Value) -> Result<IdListing> {
	match json {
		Value::Object(mut map) => {
			let records = match map.remove("records") {
				Some(Value::Array(records)) => records,
				_ => {
					return Err(Error::InvalidResponse {
						message: "Listing response is missing records array.".to_string(),
					});
				},
			};
			let total_records = map.get("totalRecords").and_then(Value::as_u64);

			Ok(IdListing { ids: collect_ids(&records)?, total_records })
		},
		Value::Array(items) => Ok(IdListing { ids: collect_ids(&items)?, total_records: None }),
		_ => Err(Error::InvalidResponse {
			message: "Listing response must be an object or an array.".to_string(),
		}),
	}
}

pub(crate) fn item_id(item: &Value) -> Result<i64> {
	item.get("id").and_then(Value::as_i64).ok_or_else(|| Error::InvalidResponse {
		message: "Listing item is missing an integer id.".to_string(),
	})
}

fn collect_ids(items: &[Value]) -> Result<Vec<i64>> {
	items.iter().map(item_id).collect()
}

/// Walks a `wanted/*` endpoint page by page until `totalRecords` is reached, a page comes
/// back empty, or `max_pages` pages were read.
pub(crate) async fn fetch_paged(
	client: &Client,
	cfg: &CategoryConfig,
	path: &str,
	sort_key: &str,
	sort_dir: &str,
) -> Result<Vec<i64>> {
	let url = format!("{}{}", cfg.base_url, path);
	let page_size = cfg.page_size.to_string();
	let mut ids = Vec::new();

	for page in 1..=cfg.max_pages {
		let page_param = page.to_string();
		let json: Value = client
			.get(&url)
			.query(&[
				("page", page_param.as_str()),
				("pageSize", page_size.as_str()),
				("sortKey", sort_key),
				("sortDir", sort_dir),
			])
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;
		let listing = parse_id_listing(json)?;
		let fetched = listing.ids.len();

		ids.extend(listing.ids);

		tracing::debug!(
			category = %cfg.category,
			path,
			page,
			fetched,
			total_records = ?listing.total_records,
			"Fetched listing page."
		);

		let Some(total_records) = listing.total_records else {
			return Ok(ids);
		};

		if fetched == 0 || ids.len() as u64 >= total_records {
			return Ok(ids);
		}
	}

	tracing::warn!(
		category = %cfg.category,
		path,
		max_pages = cfg.max_pages,
		collected = ids.len(),
		"Listing truncated at the page limit."
	);

	Ok(ids)
}
