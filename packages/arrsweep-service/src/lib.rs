pub mod candidates;
pub mod cycle;
pub mod dispatch;

use std::{future::Future, pin::Pin};

use arrsweep_config::CategoryConfig;
use arrsweep_providers::Result as ProviderResult;

pub use cycle::{CycleEngine, CycleOutcome, CycleReport, CycleSettings};
pub use dispatch::DispatchReport;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The narrow capability the cycle engine needs from a remote media manager.
pub trait ArrProvider
where
	Self: Send + Sync,
{
	fn fetch_missing<'a>(
		&'a self,
		cfg: &'a CategoryConfig,
	) -> BoxFuture<'a, ProviderResult<Vec<i64>>>;

	fn fetch_cutoff_unmet<'a>(
		&'a self,
		cfg: &'a CategoryConfig,
	) -> BoxFuture<'a, ProviderResult<Vec<i64>>>;

	fn trigger_search<'a>(
		&'a self,
		cfg: &'a CategoryConfig,
		item_id: i64,
	) -> BoxFuture<'a, ProviderResult<()>>;
}

/// Talks to Sonarr and Radarr over their v3 HTTP APIs.
#[derive(Debug, Default)]
pub struct HttpProvider;
impl ArrProvider for HttpProvider {
	fn fetch_missing<'a>(
		&'a self,
		cfg: &'a CategoryConfig,
	) -> BoxFuture<'a, ProviderResult<Vec<i64>>> {
		Box::pin(arrsweep_providers::fetch_missing(cfg))
	}

	fn fetch_cutoff_unmet<'a>(
		&'a self,
		cfg: &'a CategoryConfig,
	) -> BoxFuture<'a, ProviderResult<Vec<i64>>> {
		Box::pin(arrsweep_providers::fetch_cutoff_unmet(cfg))
	}

	fn trigger_search<'a>(
		&'a self,
		cfg: &'a CategoryConfig,
		item_id: i64,
	) -> BoxFuture<'a, ProviderResult<()>> {
		Box::pin(arrsweep_providers::trigger_search(cfg, item_id))
	}
}
