pub mod embedding;
pub mod role_fit;

mod error;

pub use error::{Error, Result};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};

pub fn auth_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);
	insert_default_headers(&mut headers, default_headers)?;

	Ok(headers)
}

/// Like [`auth_headers`] but sends the key in a provider-specific header instead of a
/// bearer token.
pub fn api_key_headers(
	header: &str,
	api_key: &str,
	default_headers: &Map<String, Value>,
) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(HeaderName::from_bytes(header.as_bytes())?, HeaderValue::from_str(api_key)?);
	insert_default_headers(&mut headers, default_headers)?;

	Ok(headers)
}

fn insert_default_headers(headers: &mut HeaderMap, defaults: &Map<String, Value>) -> Result<()> {
	for (key, value) in defaults {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(())
}
