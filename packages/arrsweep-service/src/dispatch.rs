use std::time::Duration;

use time::OffsetDateTime;
use tokio::time as tokio_time;

use arrsweep_config::CategoryConfig;
use arrsweep_storage::ledger::Ledger;

use crate::ArrProvider;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DispatchReport {
	/// Searches that were accepted and written to the ledger.
	pub recorded: Vec<i64>,
	/// Searches that were accepted but could not be written to the ledger.
	pub unrecorded: Vec<i64>,
	/// Searches the remote service did not accept.
	pub failed: Vec<i64>,
}
impl DispatchReport {
	pub fn triggered(&self) -> usize {
		self.recorded.len() + self.unrecorded.len()
	}
}

/// Triggers one search per ID, in order.
///
/// A successful search is recorded before the next ID is attempted. Every submission is
/// followed by `delay`; a zero delay disables pacing.
pub async fn trigger_searches(
	provider: &dyn ArrProvider,
	ledger: &Ledger,
	cfg: &CategoryConfig,
	ids: &[i64],
	delay: Duration,
) -> DispatchReport {
	let category = cfg.category;
	let mut report = DispatchReport::default();

	for &item_id in ids {
		match provider.trigger_search(cfg, item_id).await {
			Ok(()) => {
				tracing::info!(%category, item_id, "Triggered search.");

				match ledger.record_searched(item_id, OffsetDateTime::now_utc()).await {
					Ok(_) => report.recorded.push(item_id),
					Err(err) => {
						tracing::error!(
							%category,
							item_id,
							error = %err,
							"Failed to record triggered search."
						);

						report.unrecorded.push(item_id);
					},
				}
			},
			Err(err) => {
				tracing::error!(
					%category,
					item_id,
					kind = ?err.kind(),
					error = %err,
					"Search trigger failed."
				);

				report.failed.push(item_id);
			},
		}

		if !delay.is_zero() {
			tokio_time::sleep(delay).await;
		}
	}

	report
}
