use std::{fmt, path::PathBuf, time::Duration};

use serde::Deserialize;

const SECONDS_PER_DAY: u64 = 86_400;

/// The two independent content pipelines. Each one owns its remote service, batch limit and
/// ledger partition.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Category {
	Episodes,
	Movies,
}
impl Category {
	pub const ALL: [Self; 2] = [Self::Episodes, Self::Movies];

	/// Stable key used to partition persisted state.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Episodes => "episodes",
			Self::Movies => "movies",
		}
	}

	pub fn service_name(self) -> &'static str {
		match self {
			Self::Episodes => "sonarr",
			Self::Movies => "radarr",
		}
	}

	pub fn env_prefix(self) -> &'static str {
		match self {
			Self::Episodes => "SONARR",
			Self::Movies => "RADARR",
		}
	}

	pub fn index(self) -> usize {
		match self {
			Self::Episodes => 0,
			Self::Movies => 1,
		}
	}
}
impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub sonarr: ArrService,
	pub radarr: ArrService,
}
impl Config {
	pub fn section(&self, category: Category) -> &ArrService {
		match category {
			Category::Episodes => &self.sonarr,
			Category::Movies => &self.radarr,
		}
	}

	pub fn section_mut(&mut self, category: Category) -> &mut ArrService {
		match category {
			Category::Episodes => &mut self.sonarr,
			Category::Movies => &mut self.radarr,
		}
	}

	/// Immutable per-category settings for every enabled category, in scheduling order.
	pub fn categories(&self) -> Vec<CategoryConfig> {
		Category::ALL
			.into_iter()
			.filter_map(|category| {
				let section = self.section(category);
				let (Some(url), Some(api_key)) = (section.url.as_ref(), section.api_key.as_ref())
				else {
					return None;
				};

				Some(CategoryConfig {
					category,
					base_url: url.clone(),
					api_key: api_key.clone(),
					limit: section.limit as usize,
					include_cutoff: section.cutoff_limit > 0,
					page_size: section.page_size,
					max_pages: section.max_pages,
					request_timeout: self.service.request_timeout(),
				})
			})
			.collect()
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Service {
	pub log_level: String,
	pub run_every_minutes: u64,
	pub request_delay_seconds: u64,
	pub request_timeout_seconds: u64,
	pub max_cycle_days: u64,
}
impl Service {
	pub fn run_every(&self) -> Duration {
		Duration::from_secs(self.run_every_minutes.saturating_mul(60))
	}

	pub fn request_delay(&self) -> Duration {
		Duration::from_secs(self.request_delay_seconds)
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_seconds)
	}

	pub fn max_cycle_age(&self) -> Duration {
		Duration::from_secs(self.max_cycle_days.saturating_mul(SECONDS_PER_DAY))
	}
}
impl Default for Service {
	fn default() -> Self {
		Self {
			log_level: "info".to_string(),
			run_every_minutes: 15,
			request_delay_seconds: 2,
			request_timeout_seconds: 30,
			max_cycle_days: 30,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Storage {
	pub sqlite_path: PathBuf,
	pub pool_max_conns: u32,
}
impl Default for Storage {
	fn default() -> Self {
		Self { sqlite_path: PathBuf::from("/data/history.db"), pool_max_conns: 4 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ArrService {
	pub url: Option<String>,
	pub api_key: Option<String>,
	/// Maximum number of searches triggered per cycle.
	pub limit: u32,
	/// Any value above zero adds the cutoff-unmet listing to the candidates.
	pub cutoff_limit: u32,
	pub page_size: u32,
	pub max_pages: u32,
}
impl ArrService {
	pub fn is_enabled(&self) -> bool {
		self.url.is_some() && self.api_key.is_some()
	}
}
impl Default for ArrService {
	fn default() -> Self {
		Self { url: None, api_key: None, limit: 10, cutoff_limit: 0, page_size: 1_000, max_pages: 20 }
	}
}

/// Settings for one enabled category, built once at startup and passed explicitly to the
/// cycle engine and its collaborators.
#[derive(Clone, Debug)]
pub struct CategoryConfig {
	pub category: Category,
	pub base_url: String,
	pub api_key: String,
	pub limit: usize,
	pub include_cutoff: bool,
	pub page_size: u32,
	pub max_pages: u32,
	pub request_timeout: Duration,
}
