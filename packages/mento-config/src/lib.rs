mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	AffinityWeights, Config, EmbeddingProviderConfig, ExpectedIncrease, InterestBlend,
	KeywordWeights, Postgres, Providers, Ranking, RecommendBlend, RoleFitBlend,
	RoleFitProviderConfig, Search, SearchBlend, Service, Storage, SynonymGroup, default_synonyms,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}

	for (label, key) in [
		("embedding", &cfg.providers.embedding.api_key),
		("role_fit", &cfg.providers.role_fit.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	validate_search(cfg)?;
	validate_ranking(cfg)?;

	for group in &cfg.synonyms {
		if group.key.trim().is_empty() {
			return Err(Error::Validation {
				message: "synonyms.key must be non-empty.".to_string(),
			});
		}
		if group.synonyms.iter().any(|synonym| synonym.trim().is_empty()) {
			return Err(Error::Validation {
				message: format!("synonyms for {:?} must not contain blank terms.", group.key),
			});
		}
	}

	Ok(())
}

fn validate_search(cfg: &Config) -> Result<()> {
	let search = &cfg.search;

	if search.default_limit == 0 {
		return Err(Error::Validation {
			message: "search.default_limit must be greater than zero.".to_string(),
		});
	}
	if search.max_limit < search.default_limit {
		return Err(Error::Validation {
			message: "search.max_limit must be greater than or equal to search.default_limit."
				.to_string(),
		});
	}
	if !search.similarity_threshold.is_finite()
		|| !(-1.0..=1.0).contains(&search.similarity_threshold)
	{
		return Err(Error::Validation {
			message: "search.similarity_threshold must be in the range -1.0-1.0.".to_string(),
		});
	}
	if search.embedding_candidate_multiplier == 0 || search.keyword_candidate_multiplier == 0 {
		return Err(Error::Validation {
			message: "search candidate multipliers must be greater than zero.".to_string(),
		});
	}
	if search.embed_concurrency == 0 {
		return Err(Error::Validation {
			message: "search.embed_concurrency must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn validate_ranking(cfg: &Config) -> Result<()> {
	let ranking = &cfg.ranking;

	if ranking.recommend_blend.candidate_multiplier == 0 {
		return Err(Error::Validation {
			message: "ranking.recommend_blend.candidate_multiplier must be greater than zero."
				.to_string(),
		});
	}

	let weights = [
		("ranking.keyword.title_contains", ranking.keyword.title_contains),
		("ranking.keyword.content_contains", ranking.keyword.content_contains),
		("ranking.keyword.title_exact", ranking.keyword.title_exact),
		("ranking.keyword.tag_contains", ranking.keyword.tag_contains),
		("ranking.affinity.interest_weight", ranking.affinity.interest_weight),
		("ranking.affinity.study_bonus", ranking.affinity.study_bonus),
		("ranking.affinity.contest_bonus", ranking.affinity.contest_bonus),
		("ranking.affinity.campus_bonus", ranking.affinity.campus_bonus),
		("ranking.search_blend.embedding_weight", ranking.search_blend.embedding_weight),
		("ranking.search_blend.interest_scale", ranking.search_blend.interest_scale),
		("ranking.search_blend.interest_weight", ranking.search_blend.interest_weight),
		(
			"ranking.search_blend.keyword_interest_weight",
			ranking.search_blend.keyword_interest_weight,
		),
		("ranking.recommend_blend.interest_scale", ranking.recommend_blend.interest_scale),
		(
			"ranking.recommend_blend.with_role_fit.embedding_weight",
			ranking.recommend_blend.with_role_fit.embedding_weight,
		),
		(
			"ranking.recommend_blend.with_role_fit.role_fit_weight",
			ranking.recommend_blend.with_role_fit.role_fit_weight,
		),
		(
			"ranking.recommend_blend.with_role_fit.interest_weight",
			ranking.recommend_blend.with_role_fit.interest_weight,
		),
		(
			"ranking.recommend_blend.without_role_fit.embedding_weight",
			ranking.recommend_blend.without_role_fit.embedding_weight,
		),
		(
			"ranking.recommend_blend.without_role_fit.interest_weight",
			ranking.recommend_blend.without_role_fit.interest_weight,
		),
		("ranking.expected_increase.contest", ranking.expected_increase.contest),
		("ranking.expected_increase.study", ranking.expected_increase.study),
		("ranking.expected_increase.job", ranking.expected_increase.job),
		("ranking.expected_increase.other", ranking.expected_increase.other),
		(
			"ranking.expected_increase.tagged_multiplier",
			ranking.expected_increase.tagged_multiplier,
		),
	];

	for (label, value) in weights {
		if !value.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		if value < 0.0 {
			return Err(Error::Validation { message: format!("{label} must be zero or greater.") });
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.log_level = cfg.service.log_level.trim().to_string();

	if cfg.service.log_level.is_empty() {
		cfg.service.log_level = "info".to_string();
	}

	for group in &mut cfg.synonyms {
		group.key = group.key.trim().to_string();

		for synonym in &mut group.synonyms {
			*synonym = synonym.trim().to_string();
		}
	}
}
