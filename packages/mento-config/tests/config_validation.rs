use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use mento_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn sample_value() -> Value {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.")
}

fn with_table<'a>(value: &'a mut Value, path: &[&str]) -> &'a mut toml::Table {
	let mut current = value.as_table_mut().expect("Template config must be a table.");

	for key in path {
		current = current
			.entry(key.to_string())
			.or_insert_with(|| Value::Table(toml::Table::new()))
			.as_table_mut()
			.expect("Template config section must be a table.");
	}

	current
}

fn write_temp_config(payload: &str) -> PathBuf {
	let nanos = SystemTime::now().duration_since(UNIX_EPOCH).expect("Clock drift.").as_nanos();
	let seq = COUNTER.fetch_add(1, Ordering::SeqCst);
	let path = env::temp_dir().join(format!("mento_config_{nanos}_{seq}.toml"));

	fs::write(&path, payload).expect("Failed to write temp config.");

	path
}

fn load_value(value: &Value) -> mento_config::Result<Config> {
	let payload = toml::to_string(value).expect("Failed to render config.");
	let path = write_temp_config(&payload);
	let result = mento_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove temp config.");

	result
}

fn expect_validation(result: mento_config::Result<Config>, needle: &str) {
	match result {
		Err(Error::Validation { message }) =>
			assert!(message.contains(needle), "Unexpected validation message: {message}"),
		Err(err) => panic!("Expected validation error, got {err:?}."),
		Ok(_) => panic!("Expected validation error containing {needle:?}."),
	}
}

#[test]
fn sample_config_fills_ranking_defaults() {
	let cfg = load_value(&sample_value()).expect("Sample config must load.");

	assert_eq!(cfg.search.default_limit, 10);
	assert_eq!(cfg.search.max_limit, 50);
	assert_eq!(cfg.search.embed_concurrency, 4);
	assert_eq!(cfg.search.content_prefix_chars, 500);
	assert!((cfg.search.similarity_threshold - 0.3).abs() < f64::EPSILON);
	assert_eq!(cfg.ranking.keyword.title_exact, 3.0);
	assert_eq!(cfg.ranking.affinity.interest_weight, 0.3);
	assert_eq!(cfg.ranking.recommend_blend.with_role_fit.embedding_weight, 0.5);
	assert_eq!(cfg.ranking.recommend_blend.without_role_fit.interest_weight, 0.3);
	assert_eq!(cfg.ranking.expected_increase.tagged_multiplier, 1.1);
	assert_eq!(cfg.synonyms.len(), 6);
	assert_eq!(cfg.synonyms[0].key, "개발");
	assert!(cfg.providers.embedding.default_headers.is_empty());
}

#[test]
fn custom_synonyms_replace_builtin_table() {
	let mut value = sample_value();
	let root = value.as_table_mut().expect("Template config must be a table.");
	let mut group = toml::Table::new();

	group.insert("key".to_string(), Value::String(" 데이터 ".to_string()));
	group.insert(
		"synonyms".to_string(),
		Value::Array(vec![Value::String("분석".to_string()), Value::String("AI".to_string())]),
	);
	root.insert("synonyms".to_string(), Value::Array(vec![Value::Table(group)]));

	let cfg = load_value(&value).expect("Config with custom synonyms must load.");

	assert_eq!(cfg.synonyms.len(), 1);
	assert_eq!(cfg.synonyms[0].key, "데이터");
	assert_eq!(cfg.synonyms[0].synonyms, vec!["분석".to_string(), "AI".to_string()]);
}

#[test]
fn blank_log_level_falls_back_to_info() {
	let mut value = sample_value();

	with_table(&mut value, &["service"])
		.insert("log_level".to_string(), Value::String("  ".to_string()));

	let cfg = load_value(&value).expect("Config must load.");

	assert_eq!(cfg.service.log_level, "info");
}

#[test]
fn rejects_blank_api_key() {
	let mut value = sample_value();

	with_table(&mut value, &["providers", "role_fit"])
		.insert("api_key".to_string(), Value::String(" ".to_string()));

	expect_validation(load_value(&value), "role_fit api_key");
}

#[test]
fn rejects_zero_dimensions() {
	let mut value = sample_value();

	with_table(&mut value, &["providers", "embedding"])
		.insert("dimensions".to_string(), Value::Integer(0));

	expect_validation(load_value(&value), "dimensions");
}

#[test]
fn rejects_default_limit_above_max_limit() {
	let mut value = sample_value();

	with_table(&mut value, &["search"]).insert("default_limit".to_string(), Value::Integer(80));

	expect_validation(load_value(&value), "search.max_limit");
}

#[test]
fn rejects_similarity_threshold_out_of_range() {
	let mut value = sample_value();

	with_table(&mut value, &["search"])
		.insert("similarity_threshold".to_string(), Value::Float(1.5));

	expect_validation(load_value(&value), "similarity_threshold");
}

#[test]
fn rejects_zero_embed_concurrency() {
	let mut value = sample_value();

	with_table(&mut value, &["search"]).insert("embed_concurrency".to_string(), Value::Integer(0));

	expect_validation(load_value(&value), "embed_concurrency");
}

#[test]
fn rejects_negative_blend_weight() {
	let mut value = sample_value();

	with_table(&mut value, &["ranking", "recommend_blend", "with_role_fit"])
		.insert("role_fit_weight".to_string(), Value::Float(-0.3));

	expect_validation(load_value(&value), "role_fit_weight");
}

#[test]
fn rejects_blank_synonym_key() {
	let mut value = sample_value();
	let root = value.as_table_mut().expect("Template config must be a table.");
	let mut group = toml::Table::new();

	group.insert("key".to_string(), Value::String("".to_string()));
	group.insert("synonyms".to_string(), Value::Array(vec![Value::String("x".to_string())]));
	root.insert("synonyms".to_string(), Value::Array(vec![Value::Table(group)]));

	expect_validation(load_value(&value), "synonyms.key");
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("mento_config_missing_file.toml");
	let err = mento_config::load(&path).expect_err("Missing file must fail.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}
