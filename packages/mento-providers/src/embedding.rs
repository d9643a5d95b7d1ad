use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

const GEMINI_PROVIDER_ID: &str = "gemini";
const GEMINI_API_KEY_HEADER: &str = "x-goog-api-key";

pub async fn embed(
	cfg: &mento_config::EmbeddingProviderConfig,
	texts: &[String],
) -> Result<Vec<Vec<f32>>> {
	if texts.is_empty() {
		return Ok(Vec::new());
	}

	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let request = if cfg.provider_id == GEMINI_PROVIDER_ID {
		client
			.post(url)
			.headers(crate::api_key_headers(
				GEMINI_API_KEY_HEADER,
				&cfg.api_key,
				&cfg.default_headers,
			)?)
			.json(&gemini_body(cfg, texts))
	} else {
		let body = serde_json::json!({
			"model": cfg.model,
			"input": texts,
			"dimensions": cfg.dimensions,
		});

		client.post(url).headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?).json(&body)
	};
	let json: Value = request.send().await?.error_for_status()?.json().await?;
	let vectors = parse_embedding_response(json)?;

	if vectors.len() != texts.len() {
		return Err(Error::InvalidResponse {
			message: format!(
				"Embedding provider returned {} vectors for {} inputs.",
				vectors.len(),
				texts.len()
			),
		});
	}

	Ok(vectors)
}

fn gemini_body(cfg: &mento_config::EmbeddingProviderConfig, texts: &[String]) -> Value {
	let model = if cfg.model.starts_with("models/") {
		cfg.model.clone()
	} else {
		format!("models/{}", cfg.model)
	};
	let requests: Vec<Value> = texts
		.iter()
		.map(|text| {
			serde_json::json!({
				"model": model,
				"content": { "parts": [{ "text": text }] },
				"outputDimensionality": cfg.dimensions,
			})
		})
		.collect();

	serde_json::json!({ "requests": requests })
}

/// Accepts the OpenAI-compatible `data[].embedding` shape as well as Gemini's
/// `embeddings[].values` and single `embedding.values` shapes.
fn parse_embedding_response(json: Value) -> Result<Vec<Vec<f32>>> {
	if let Some(data) = json.get("data").and_then(Value::as_array) {
		let mut indexed: Vec<(usize, Vec<f32>)> = Vec::with_capacity(data.len());

		for (fallback_index, item) in data.iter().enumerate() {
			let index = item
				.get("index")
				.and_then(Value::as_u64)
				.map(|v| v as usize)
				.unwrap_or(fallback_index);
			let embedding = item.get("embedding").ok_or_else(|| Error::InvalidResponse {
				message: "Embedding item missing embedding array.".to_string(),
			})?;

			indexed.push((index, parse_vector(embedding)?));
		}

		indexed.sort_by_key(|(index, _)| *index);

		return Ok(indexed.into_iter().map(|(_, vec)| vec).collect());
	}
	if let Some(embeddings) = json.get("embeddings").and_then(Value::as_array) {
		return embeddings
			.iter()
			.map(|item| {
				item.get("values").ok_or_else(|| Error::InvalidResponse {
					message: "Embedding item missing values array.".to_string(),
				})
			})
			.map(|values| values.and_then(parse_vector))
			.collect();
	}
	if let Some(values) = json.get("embedding").and_then(|v| v.get("values")) {
		return Ok(vec![parse_vector(values)?]);
	}

	Err(Error::InvalidResponse { message: "Embedding response is missing data array.".to_string() })
}

fn parse_vector(value: &Value) -> Result<Vec<f32>> {
	let array = value.as_array().ok_or_else(|| Error::InvalidResponse {
		message: "Embedding must be an array.".to_string(),
	})?;
	let mut vec = Vec::with_capacity(array.len());

	for value in array {
		let number = value.as_f64().ok_or_else(|| Error::InvalidResponse {
			message: "Embedding value must be numeric.".to_string(),
		})?;

		vec.push(number as f32);
	}

	Ok(vec)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_embeddings_in_index_order() {
		let json = serde_json::json!({
			"data": [
				{ "index": 1, "embedding": [2.0, 3.0] },
				{ "index": 0, "embedding": [0.5, 1.5] }
			]
		});
		let parsed = parse_embedding_response(json).expect("parse failed");

		assert_eq!(parsed, vec![vec![0.5, 1.5], vec![2.0, 3.0]]);
	}

	#[test]
	fn parses_gemini_batch_embeddings() {
		let json = serde_json::json!({
			"embeddings": [
				{ "values": [0.1, 0.2] },
				{ "values": [0.3, 0.4] }
			]
		});
		let parsed = parse_embedding_response(json).expect("parse failed");

		assert_eq!(parsed, vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
	}

	#[test]
	fn parses_gemini_single_embedding() {
		let json = serde_json::json!({ "embedding": { "values": [1.0, -1.0] } });
		let parsed = parse_embedding_response(json).expect("parse failed");

		assert_eq!(parsed, vec![vec![1.0, -1.0]]);
	}

	#[test]
	fn rejects_non_numeric_values() {
		let json = serde_json::json!({ "data": [{ "embedding": ["x"] }] });

		assert!(parse_embedding_response(json).is_err());
	}

	#[test]
	fn gemini_body_prefixes_model_name() {
		let cfg = mento_config::EmbeddingProviderConfig {
			provider_id: "gemini".to_string(),
			api_base: "http://localhost".to_string(),
			api_key: "key".to_string(),
			path: "/v1beta/models/text-embedding-004:batchEmbedContents".to_string(),
			model: "text-embedding-004".to_string(),
			dimensions: 3,
			timeout_ms: 1_000,
			default_headers: serde_json::Map::new(),
		};
		let body = gemini_body(&cfg, &["hello".to_string()]);

		assert_eq!(body["requests"][0]["model"], "models/text-embedding-004");
		assert_eq!(body["requests"][0]["content"]["parts"][0]["text"], "hello");
	}
}
