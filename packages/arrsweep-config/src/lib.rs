mod env;
mod error;
mod types;

pub use error::{Error, Result};
pub use types::{ArrService, Category, CategoryConfig, Config, Service, Storage};

use std::{fs, path::Path};

/// Loads the optional TOML file, then applies process environment overrides.
pub fn load(path: Option<&Path>) -> Result<Config> {
	load_with_env(path, |key| std::env::var(key).ok())
}

pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> Result<Config>
where
	F: Fn(&str) -> Option<String>,
{
	let mut cfg = match path {
		Some(path) => {
			let raw = fs::read_to_string(path)
				.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

			toml::from_str(&raw)
				.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?
		},
		None => Config::default(),
	};

	env::apply_env(&mut cfg, lookup)?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.run_every_minutes == 0 {
		return Err(Error::Validation {
			message: "service.run_every_minutes must be greater than zero.".to_string(),
		});
	}
	if cfg.service.max_cycle_days == 0 {
		return Err(Error::Validation {
			message: "service.max_cycle_days must be greater than zero.".to_string(),
		});
	}
	if cfg.service.request_timeout_seconds == 0 {
		return Err(Error::Validation {
			message: "service.request_timeout_seconds must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.sqlite_path.as_os_str().is_empty() {
		return Err(Error::Validation {
			message: "storage.sqlite_path must be non-empty.".to_string(),
		});
	}
	if cfg.storage.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	for category in Category::ALL {
		let section = cfg.section(category);
		let label = category.service_name();

		if !section.is_enabled() {
			continue;
		}
		if let Some(url) = section.url.as_deref()
			&& !(url.starts_with("http://") || url.starts_with("https://"))
		{
			return Err(Error::Validation {
				message: format!("{label}.url must start with http:// or https://."),
			});
		}
		if section.limit == 0 {
			return Err(Error::Validation {
				message: format!("{label}.limit must be greater than zero."),
			});
		}
		if section.page_size == 0 {
			return Err(Error::Validation {
				message: format!("{label}.page_size must be greater than zero."),
			});
		}
		if section.max_pages == 0 {
			return Err(Error::Validation {
				message: format!("{label}.max_pages must be greater than zero."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}

	for category in Category::ALL {
		let section = cfg.section_mut(category);

		section.url = section
			.url
			.take()
			.map(|url| url.trim().trim_end_matches('/').to_string())
			.filter(|url| !url.is_empty());
		section.api_key =
			section.api_key.take().map(|key| key.trim().to_string()).filter(|key| !key.is_empty());
	}
}
