use std::{future::Future, time::Duration};

use tokio::time::{self as tokio_time, MissedTickBehavior};

use arrsweep_config::CategoryConfig;
use arrsweep_service::{CycleEngine, CycleReport};

pub struct SchedulerState {
	pub engine: CycleEngine,
	pub categories: Vec<CategoryConfig>,
	pub interval: Duration,
}

/// Runs one cycle per enabled category, episodes before movies.
pub async fn run_job(state: &SchedulerState) -> Vec<CycleReport> {
	tracing::info!(categories = state.categories.len(), "Run started.");

	let mut reports = Vec::with_capacity(state.categories.len());

	for cfg in &state.categories {
		reports.push(state.engine.run_cycle(cfg).await);
	}

	tracing::info!(categories = reports.len(), "Run finished.");

	reports
}

/// Runs a job immediately and then once per interval until `shutdown` resolves.
///
/// Shutdown is only observed between jobs. Returns the number of jobs that ran.
pub async fn run_scheduler<F>(state: &SchedulerState, shutdown: F) -> usize
where
	F: Future<Output = ()>,
{
	let mut ticker = tokio_time::interval(state.interval);
	let mut jobs = 0;

	ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

	tokio::pin!(shutdown);

	loop {
		tokio::select! {
			biased;
			_ = &mut shutdown => {
				tracing::info!(jobs, "Shutdown requested; scheduler stopping.");

				break;
			},
			_ = ticker.tick() => {},
		}

		run_job(state).await;

		jobs += 1;
	}

	jobs
}
