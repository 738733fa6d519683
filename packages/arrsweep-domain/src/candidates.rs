use std::collections::HashSet;

/// Duplicate-free candidate IDs in first-discovery order.
///
/// Sources are merged in the order they are extended, so the missing listing is added before
/// the cutoff-unmet listing and an ID present in both keeps its earlier position.
#[derive(Clone, Debug, Default)]
pub struct CandidateSet {
	ids: Vec<i64>,
	seen: HashSet<i64>,
}
impl CandidateSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `true` when the ID was not seen before.
	pub fn insert(&mut self, id: i64) -> bool {
		if !self.seen.insert(id) {
			return false;
		}

		self.ids.push(id);

		true
	}

	pub fn contains(&self, id: i64) -> bool {
		self.seen.contains(&id)
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
		self.ids.iter().copied()
	}

	pub fn as_slice(&self) -> &[i64] {
		&self.ids
	}

	/// Candidates that are not in `searched`, discovery order preserved.
	pub fn pending(&self, searched: &HashSet<i64>) -> Vec<i64> {
		self.iter().filter(|id| !searched.contains(id)).collect()
	}
}
impl Extend<i64> for CandidateSet {
	fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
		for id in iter {
			self.insert(id);
		}
	}
}
impl FromIterator<i64> for CandidateSet {
	fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
		let mut set = Self::new();

		set.extend(iter);

		set
	}
}
