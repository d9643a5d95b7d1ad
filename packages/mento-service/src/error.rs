use mento_domain::terms::TermError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<mento_storage::Error> for Error {
	fn from(err: mento_storage::Error) -> Self {
		match err {
			mento_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			mento_storage::Error::InvalidArgument(message) => Self::Storage { message },
		}
	}
}

impl From<mento_providers::Error> for Error {
	fn from(err: mento_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<TermError> for Error {
	fn from(err: TermError) -> Self {
		Self::InvalidRequest { message: err.to_string() }
	}
}
