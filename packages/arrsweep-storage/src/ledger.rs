use std::collections::HashSet;

use time::OffsetDateTime;

use arrsweep_config::Category;

use crate::{Error, Result, db::Db, models::LedgerEntry};

#[derive(sqlx::FromRow)]
struct LedgerRow {
	item_id: i64,
	searched_at: i64,
}

/// Durable record of the items searched during the current cycle of one category.
///
/// Every query binds the category key, so categories never observe each other's entries.
#[derive(Clone, Debug)]
pub struct Ledger {
	db: Db,
	category: Category,
}
impl Ledger {
	pub fn new(db: Db, category: Category) -> Self {
		Self { db, category }
	}

	pub fn category(&self) -> Category {
		self.category
	}

	pub async fn load_searched_ids(&self) -> Result<HashSet<i64>> {
		let ids: Vec<i64> =
			sqlx::query_scalar("SELECT item_id FROM search_ledger WHERE category = ?1")
				.bind(self.category.as_str())
				.fetch_all(&self.db.pool)
				.await?;

		Ok(ids.into_iter().collect())
	}

	/// Inserts the entry unless it already exists; the first timestamp is kept.
	///
	/// Returns whether a new row was written.
	pub async fn record_searched(&self, item_id: i64, searched_at: OffsetDateTime) -> Result<bool> {
		let result = sqlx::query(
			"\
INSERT INTO search_ledger (category, item_id, searched_at)
VALUES (?1, ?2, ?3)
ON CONFLICT (category, item_id) DO NOTHING",
		)
		.bind(self.category.as_str())
		.bind(item_id)
		.bind(searched_at.unix_timestamp())
		.execute(&self.db.pool)
		.await?;

		Ok(result.rows_affected() == 1)
	}

	pub async fn oldest_timestamp(&self) -> Result<Option<OffsetDateTime>> {
		let oldest: Option<i64> =
			sqlx::query_scalar("SELECT MIN(searched_at) FROM search_ledger WHERE category = ?1")
				.bind(self.category.as_str())
				.fetch_one(&self.db.pool)
				.await?;

		oldest.map(to_datetime).transpose()
	}

	/// Deletes every entry of the category and returns how many were removed.
	pub async fn wipe(&self) -> Result<u64> {
		let result = sqlx::query("DELETE FROM search_ledger WHERE category = ?1")
			.bind(self.category.as_str())
			.execute(&self.db.pool)
			.await?;

		Ok(result.rows_affected())
	}

	/// All entries ordered by insertion time, then by ID.
	pub async fn entries(&self) -> Result<Vec<LedgerEntry>> {
		let rows: Vec<LedgerRow> = sqlx::query_as(
			"\
SELECT item_id, searched_at
FROM search_ledger
WHERE category = ?1
ORDER BY searched_at ASC, item_id ASC",
		)
		.bind(self.category.as_str())
		.fetch_all(&self.db.pool)
		.await?;

		rows.into_iter()
			.map(|row| {
				Ok(LedgerEntry { item_id: row.item_id, searched_at: to_datetime(row.searched_at)? })
			})
			.collect()
	}
}

fn to_datetime(value: i64) -> Result<OffsetDateTime> {
	OffsetDateTime::from_unix_timestamp(value).map_err(|err| Error::Timestamp { value, source: err })
}
