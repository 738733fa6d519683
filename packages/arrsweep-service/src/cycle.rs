use std::{collections::HashSet, sync::Arc, time::Duration};

use time::OffsetDateTime;
use tokio::sync::Mutex;

use arrsweep_config::{Category, CategoryConfig};
use arrsweep_domain::cycle::{CyclePlan, plan_cycle, safety_net_expired};
use arrsweep_storage::{db::Db, ledger::Ledger};

use crate::{ArrProvider, candidates, dispatch, dispatch::DispatchReport};

#[derive(Clone, Copy, Debug)]
pub struct CycleSettings {
	pub request_delay: Duration,
	pub max_cycle_age: Duration,
}
impl CycleSettings {
	pub fn from_service(cfg: &arrsweep_config::Service) -> Self {
		Self { request_delay: cfg.request_delay(), max_cycle_age: cfg.max_cycle_age() }
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CycleOutcome {
	NoCandidates,
	/// All known candidates were covered; `wiped` is false when the reset itself failed.
	Completed { wiped: bool },
	Dispatched(DispatchReport),
}

#[derive(Clone, Debug)]
pub struct CycleReport {
	pub category: Category,
	pub safety_net_reset: bool,
	pub candidates: usize,
	pub already_searched: usize,
	pub outcome: CycleOutcome,
}

/// Runs search cycles against a shared ledger database.
///
/// Cycles of the same category are serialized; storage and remote failures are logged and
/// degrade the cycle instead of failing it.
pub struct CycleEngine {
	db: Db,
	provider: Arc<dyn ArrProvider>,
	settings: CycleSettings,
	guards: [Mutex<()>; 2],
}
impl CycleEngine {
	pub fn new(db: Db, provider: Arc<dyn ArrProvider>, settings: CycleSettings) -> Self {
		Self { db, provider, settings, guards: [Mutex::new(()), Mutex::new(())] }
	}

	pub fn ledger(&self, category: Category) -> Ledger {
		Ledger::new(self.db.clone(), category)
	}

	pub async fn run_cycle(&self, cfg: &CategoryConfig) -> CycleReport {
		let category = cfg.category;
		let _guard = self.guards[category.index()].lock().await;
		let ledger = self.ledger(category);

		tracing::info!(%category, service = category.service_name(), "Starting cycle.");

		let safety_net_reset = self.check_safety_net(&ledger, OffsetDateTime::now_utc()).await;
		let candidates = candidates::fetch_candidates(self.provider.as_ref(), cfg).await;
		let mut report = CycleReport {
			category,
			safety_net_reset,
			candidates: candidates.len(),
			already_searched: 0,
			outcome: CycleOutcome::NoCandidates,
		};

		if candidates.is_empty() {
			tracing::info!(%category, "No missing or upgradeable content found.");

			return report;
		}

		let searched = load_searched(&ledger).await;

		report.already_searched = searched.len();

		let plan = plan_cycle(&candidates, &searched, cfg.limit);
		let remaining = match &plan {
			CyclePlan::Dispatch { batch, remaining } => batch.len() + remaining,
			CyclePlan::NoCandidates | CyclePlan::Complete => 0,
		};

		tracing::info!(
			%category,
			candidates = candidates.len(),
			already_searched = searched.len(),
			remaining,
			"Filtered candidates against the ledger."
		);

		report.outcome = match plan {
			CyclePlan::NoCandidates => CycleOutcome::NoCandidates,
			CyclePlan::Complete => {
				tracing::info!(%category, "Cycle complete; every candidate has been searched.");

				CycleOutcome::Completed { wiped: wipe(&ledger, "cycle_complete").await }
			},
			CyclePlan::Dispatch { batch, remaining } => {
				tracing::info!(%category, batch = batch.len(), remaining, "Searching batch.");

				let dispatched = dispatch::trigger_searches(
					self.provider.as_ref(),
					&ledger,
					cfg,
					&batch,
					self.settings.request_delay,
				)
				.await;

				tracing::info!(
					%category,
					triggered = dispatched.triggered(),
					recorded = dispatched.recorded.len(),
					unrecorded = dispatched.unrecorded.len(),
					failed = dispatched.failed.len(),
					"Batch finished."
				);

				CycleOutcome::Dispatched(dispatched)
			},
		};

		report
	}

	async fn check_safety_net(&self, ledger: &Ledger, now: OffsetDateTime) -> bool {
		let category = ledger.category();

		match ledger.oldest_timestamp().await {
			Ok(Some(oldest)) if safety_net_expired(oldest, now, self.settings.max_cycle_age) => {
				tracing::warn!(
					%category,
					oldest = ?oldest,
					max_cycle_age_secs = self.settings.max_cycle_age.as_secs(),
					"Safety net triggered; cycle exceeded its maximum age."
				);

				wipe(ledger, "safety_net").await
			},
			Ok(_) => false,
			Err(err) => {
				tracing::error!(%category, error = %err, "Failed to read oldest ledger entry.");

				false
			},
		}
	}
}

async fn load_searched(ledger: &Ledger) -> HashSet<i64> {
	match ledger.load_searched_ids().await {
		Ok(ids) => ids,
		Err(err) => {
			tracing::error!(
				category = %ledger.category(),
				error = %err,
				"Failed to load searched IDs; treating the ledger as empty."
			);

			HashSet::new()
		},
	}
}

async fn wipe(ledger: &Ledger, reason: &'static str) -> bool {
	let category = ledger.category();

	match ledger.wipe().await {
		Ok(removed) => {
			tracing::warn!(%category, removed, reason, "Ledger wiped; starting a fresh cycle.");

			true
		},
		Err(err) => {
			tracing::error!(%category, reason, error = %err, "Failed to wipe ledger.");

			false
		},
	}
}
