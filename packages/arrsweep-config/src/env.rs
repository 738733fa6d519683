use std::{path::PathBuf, str::FromStr};

use crate::{Category, Config, Error, Result};

pub(crate) fn apply_env<F>(cfg: &mut Config, lookup: F) -> Result<()>
where
	F: Fn(&str) -> Option<String>,
{
	if let Some(level) = string_var(&lookup, "LOG_LEVEL") {
		cfg.service.log_level = level;
	}
	if let Some(delay) = parse_var(&lookup, "REQUEST_DELAY_SECONDS")? {
		cfg.service.request_delay_seconds = delay;
	}
	if let Some(timeout) = parse_var(&lookup, "REQUEST_TIMEOUT_SECONDS")? {
		cfg.service.request_timeout_seconds = timeout;
	}
	if let Some(days) = parse_var(&lookup, "MAX_CYCLE_DAYS")? {
		cfg.service.max_cycle_days = days;
	}
	// `RUN_EVERY` is the older spelling; the explicit one wins when both are present.
	if let Some(minutes) = parse_var(&lookup, "RUN_EVERY")? {
		cfg.service.run_every_minutes = minutes;
	}
	if let Some(minutes) = parse_var(&lookup, "RUN_EVERY_MINUTES")? {
		cfg.service.run_every_minutes = minutes;
	}
	if let Some(path) = string_var(&lookup, "DB_PATH") {
		cfg.storage.sqlite_path = PathBuf::from(path);
	}

	for category in Category::ALL {
		let prefix = category.env_prefix();
		let section = cfg.section_mut(category);

		if let Some(url) = string_var(&lookup, &format!("{prefix}_URL")) {
			section.url = Some(url);
		}
		if let Some(api_key) = string_var(&lookup, &format!("{prefix}_API_KEY")) {
			section.api_key = Some(api_key);
		}
		if let Some(limit) = parse_var(&lookup, &format!("{prefix}_LIMIT"))? {
			section.limit = limit;
		}
		if let Some(cutoff_limit) = parse_var(&lookup, &format!("{prefix}_CUTOFF_LIMIT"))? {
			section.cutoff_limit = cutoff_limit;
		}
		if let Some(page_size) = parse_var(&lookup, &format!("{prefix}_PAGE_SIZE"))? {
			section.page_size = page_size;
		}
	}

	Ok(())
}

/// A set but blank variable leaves the file value in place.
fn string_var<F>(lookup: &F, key: &str) -> Option<String>
where
	F: Fn(&str) -> Option<String>,
{
	lookup(key).filter(|value| !value.trim().is_empty())
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
	F: Fn(&str) -> Option<String>,
	T: FromStr,
{
	let Some(raw) = lookup(key) else {
		return Ok(None);
	};
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return Ok(None);
	}

	trimmed
		.parse()
		.map(Some)
		.map_err(|_| Error::InvalidEnv { key: key.to_string(), value: raw.clone() })
}
