use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

pub async fn role_fit(
	cfg: &mento_config::RoleFitProviderConfig,
	user_id: i64,
	target_role: &str,
) -> Result<f64> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({ "user_id": user_id, "target_role": target_role });
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_role_fit_response(&json)
}

fn parse_role_fit_response(json: &Value) -> Result<f64> {
	let root = json.get("data").filter(|data| data.is_object()).unwrap_or(json);
	let score = root
		.get("role_fit_score")
		.or_else(|| root.get("roleFitScore"))
		.and_then(Value::as_f64)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Role fit response is missing role_fit_score.".to_string(),
		})?;

	if !score.is_finite() || !(0.0..=100.0).contains(&score) {
		return Err(Error::InvalidResponse {
			message: format!("Role fit score {score} is outside 0-100."),
		});
	}

	Ok(score)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_snake_and_camel_case_scores() {
		let snake = serde_json::json!({ "role_fit_score": 72.5 });
		let camel = serde_json::json!({ "data": { "roleFitScore": 40 } });

		assert_eq!(parse_role_fit_response(&snake).expect("parse failed"), 72.5);
		assert_eq!(parse_role_fit_response(&camel).expect("parse failed"), 40.0);
	}

	#[test]
	fn rejects_out_of_range_scores() {
		let json = serde_json::json!({ "role_fit_score": 130.0 });

		assert!(parse_role_fit_response(&json).is_err());
	}

	#[test]
	fn rejects_missing_score() {
		let json = serde_json::json!({ "target_role": "backend" });

		assert!(parse_role_fit_response(&json).is_err());
	}
}
