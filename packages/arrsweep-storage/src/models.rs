use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerEntry {
	pub item_id: i64,
	pub searched_at: OffsetDateTime,
}
