use std::{collections::HashSet, time::Duration as StdDuration};

use time::OffsetDateTime;

use crate::candidates::CandidateSet;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CyclePlan {
	/// The remote services reported nothing to search.
	NoCandidates,
	/// Every known candidate was searched in this cycle; the ledger should be wiped.
	Complete,
	Dispatch { batch: Vec<i64>, remaining: usize },
}

/// Decides what a cycle does once candidates and the searched set are known.
pub fn plan_cycle(candidates: &CandidateSet, searched: &HashSet<i64>, limit: usize) -> CyclePlan {
	if candidates.is_empty() {
		return CyclePlan::NoCandidates;
	}

	let mut pending = candidates.pending(searched);

	// Candidates are non-empty here, so an empty pending list means every one is in `searched`.
	if pending.is_empty() {
		return CyclePlan::Complete;
	}

	let remaining = pending.len().saturating_sub(limit);

	pending.truncate(limit);

	CyclePlan::Dispatch { batch: pending, remaining }
}

/// True when the oldest ledger entry is strictly older than `max_age`.
pub fn safety_net_expired(
	oldest: OffsetDateTime,
	now: OffsetDateTime,
	max_age: StdDuration,
) -> bool {
	now - oldest > max_age
}
