use arrsweep_config::CategoryConfig;
use arrsweep_domain::candidates::CandidateSet;
use arrsweep_providers::{ErrorKind, Result as ProviderResult};

use crate::ArrProvider;

/// Merges the missing listing and, when enabled, the cutoff-unmet listing.
///
/// A failed listing contributes nothing and is logged; it never aborts the fetch.
pub async fn fetch_candidates(provider: &dyn ArrProvider, cfg: &CategoryConfig) -> CandidateSet {
	let mut candidates = CandidateSet::new();

	candidates.extend(or_empty(cfg, "missing", provider.fetch_missing(cfg).await));

	if cfg.include_cutoff {
		candidates.extend(or_empty(cfg, "cutoff_unmet", provider.fetch_cutoff_unmet(cfg).await));
	}

	candidates
}

fn or_empty(
	cfg: &CategoryConfig,
	listing: &'static str,
	result: ProviderResult<Vec<i64>>,
) -> Vec<i64> {
	let category = cfg.category;

	match result {
		Ok(ids) => {
			tracing::debug!(%category, listing, count = ids.len(), "Fetched candidate listing.");

			ids
		},
		Err(err) => {
			match err.kind() {
				ErrorKind::Transport => tracing::error!(
					%category,
					listing,
					error = %err,
					"Candidate listing request failed."
				),
				ErrorKind::Parse => tracing::error!(
					%category,
					listing,
					error = %err,
					"Candidate listing response was malformed."
				),
				ErrorKind::Config => tracing::error!(
					%category,
					listing,
					error = %err,
					"Candidate listing request could not be built."
				),
			}

			Vec::new()
		},
	}
}
