pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse failure classes the cycle engine reacts to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
	/// Network failure, timeout or non-2xx status.
	Transport,
	/// The response body did not have the expected shape.
	Parse,
	/// The request could not be built from the configured values.
	Config,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("{message}")]
	InvalidResponse { message: String },
}
impl Error {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Reqwest(err) if err.is_decode() => ErrorKind::Parse,
			Self::Reqwest(err) if err.is_builder() => ErrorKind::Config,
			Self::Reqwest(_) => ErrorKind::Transport,
			Self::SerdeJson(_) | Self::InvalidResponse { .. } => ErrorKind::Parse,
			Self::InvalidHeaderValue(_) => ErrorKind::Config,
		}
	}
}
