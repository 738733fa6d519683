#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Failed to create database directory {path:?}.")]
	CreateDir { path: std::path::PathBuf, source: std::io::Error },
	#[error("Stored timestamp {value} is out of range.")]
	Timestamp { value: i64, source: time::error::ComponentRange },
}
