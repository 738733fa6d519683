mod error;

pub use error::{Error, Result};

use std::{env, fs, future::Future, io::ErrorKind, path::PathBuf};

use uuid::Uuid;

use arrsweep_config::Storage;
use arrsweep_storage::db::Db;

const SIDECAR_SUFFIXES: [&str; 3] = ["", "-wal", "-shm"];

/// A throwaway SQLite database file under the system temp directory.
pub struct TestDatabase {
	dir: PathBuf,
	path: PathBuf,
	cleaned: bool,
}
impl TestDatabase {
	pub fn new() -> Self {
		let dir = env::temp_dir().join(format!("arrsweep_test_{}", Uuid::new_v4().simple()));
		let path = dir.join("history.db");

		Self { dir, path, cleaned: false }
	}

	pub fn storage_config(&self) -> Storage {
		Storage { sqlite_path: self.path.clone(), pool_max_conns: 2 }
	}

	/// Connects and bootstraps the schema.
	pub async fn connect(&self) -> Result<Db> {
		let db = Db::connect(&self.storage_config()).await?;

		db.ensure_schema().await?;

		Ok(db)
	}

	pub fn cleanup(mut self) -> Result<()> {
		self.cleanup_inner()
	}

	fn cleanup_inner(&mut self) -> Result<()> {
		if self.cleaned {
			return Ok(());
		}

		for suffix in SIDECAR_SUFFIXES {
			let mut file = self.path.clone().into_os_string();

			file.push(suffix);

			match fs::remove_file(&file) {
				Ok(()) => {},
				Err(err) if err.kind() == ErrorKind::NotFound => {},
				Err(err) =>
					return Err(Error::Message(format!(
						"Failed to remove test database file {file:?}: {err}."
					))),
			}
		}
		match fs::remove_dir(&self.dir) {
			Ok(()) => {},
			Err(err) if err.kind() == ErrorKind::NotFound => {},
			Err(err) =>
				return Err(Error::Message(format!(
					"Failed to remove test database directory {:?}: {err}.",
					self.dir
				))),
		}

		self.cleaned = true;

		Ok(())
	}
}
impl Default for TestDatabase {
	fn default() -> Self {
		Self::new()
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if let Err(err) = self.cleanup_inner() {
			eprintln!("Test database cleanup failed: {err}.");
		}
	}
}

pub async fn with_test_db<F, Fut, T>(f: F) -> Result<T>
where
	F: FnOnce(Db) -> Fut,
	Fut: Future<Output = Result<T>>,
{
	let test_db = TestDatabase::new();
	let db = test_db.connect().await?;
	let result = f(db.clone()).await;

	db.close().await;

	if let Err(err) = test_db.cleanup() {
		eprintln!("Test database cleanup warning: {err}.");

		if result.is_ok() {
			return Err(err);
		}
	}

	result
}
