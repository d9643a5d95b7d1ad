use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub ranking: Ranking,
	/// Synonym groups used by query term expansion. Defaults to the built-in table.
	#[serde(default = "default_synonyms")]
	pub synonyms: Vec<SynonymGroup>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub role_fit: RoleFitProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleFitProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Used when a request omits the limit or passes zero.
	pub default_limit: u32,
	pub max_limit: u32,
	/// Candidates at or below this cosine similarity are dropped from the embedding path.
	pub similarity_threshold: f64,
	pub embedding_candidate_multiplier: u32,
	pub keyword_candidate_multiplier: u32,
	/// Number of leading content characters included in an activity's embedding text.
	pub content_prefix_chars: usize,
	/// Upper bound on in-flight activity embedding calls per request.
	pub embed_concurrency: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Ranking {
	pub keyword: KeywordWeights,
	pub affinity: AffinityWeights,
	pub search_blend: SearchBlend,
	pub recommend_blend: RecommendBlend,
	pub expected_increase: ExpectedIncrease,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeywordWeights {
	pub title_contains: f64,
	pub content_contains: f64,
	pub title_exact: f64,
	pub tag_contains: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AffinityWeights {
	pub interest_weight: f64,
	pub study_bonus: f64,
	pub contest_bonus: f64,
	pub campus_bonus: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchBlend {
	pub embedding_weight: f64,
	/// Lifts raw affinity onto the embedding score range before weighting.
	pub interest_scale: f64,
	pub interest_weight: f64,
	/// Weight of raw affinity added to keyword scores.
	pub keyword_interest_weight: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecommendBlend {
	/// Over-fetch factor for interest-based candidate pages and for scored recommendations.
	pub candidate_multiplier: u32,
	pub interest_scale: f64,
	pub with_role_fit: RoleFitBlend,
	pub without_role_fit: InterestBlend,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoleFitBlend {
	pub embedding_weight: f64,
	pub role_fit_weight: f64,
	pub interest_weight: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InterestBlend {
	pub embedding_weight: f64,
	pub interest_weight: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExpectedIncrease {
	pub contest: f64,
	pub study: f64,
	pub job: f64,
	pub other: f64,
	pub tagged_multiplier: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SynonymGroup {
	pub key: String,
	pub synonyms: Vec<String>,
}

impl Default for Search {
	fn default() -> Self {
		Self {
			default_limit: 10,
			max_limit: 100,
			similarity_threshold: 0.3,
			embedding_candidate_multiplier: 3,
			keyword_candidate_multiplier: 2,
			content_prefix_chars: 500,
			embed_concurrency: 4,
		}
	}
}

impl Default for KeywordWeights {
	fn default() -> Self {
		Self { title_contains: 2.0, content_contains: 1.0, title_exact: 3.0, tag_contains: 1.5 }
	}
}

impl Default for AffinityWeights {
	fn default() -> Self {
		Self { interest_weight: 0.3, study_bonus: 0.2, contest_bonus: 0.1, campus_bonus: 0.1 }
	}
}

impl Default for SearchBlend {
	fn default() -> Self {
		Self {
			embedding_weight: 0.7,
			interest_scale: 30.0,
			interest_weight: 0.3,
			keyword_interest_weight: 0.3,
		}
	}
}

impl Default for RecommendBlend {
	fn default() -> Self {
		Self {
			candidate_multiplier: 2,
			interest_scale: 100.0,
			with_role_fit: RoleFitBlend::default(),
			without_role_fit: InterestBlend::default(),
		}
	}
}

impl Default for RoleFitBlend {
	fn default() -> Self {
		Self { embedding_weight: 0.5, role_fit_weight: 0.3, interest_weight: 0.2 }
	}
}

impl Default for InterestBlend {
	fn default() -> Self {
		Self { embedding_weight: 0.7, interest_weight: 0.3 }
	}
}

impl Default for ExpectedIncrease {
	fn default() -> Self {
		Self { contest: 3.0, study: 2.0, job: 1.5, other: 1.0, tagged_multiplier: 1.1 }
	}
}

impl SynonymGroup {
	pub fn new(key: &str, synonyms: &[&str]) -> Self {
		Self { key: key.to_string(), synonyms: synonyms.iter().map(|s| s.to_string()).collect() }
	}
}

pub fn default_synonyms() -> Vec<SynonymGroup> {
	vec![
		SynonymGroup::new("개발", &["프로그래밍", "코딩", "소프트웨어"]),
		SynonymGroup::new("디자인", &["UI", "UX", "그래픽"]),
		SynonymGroup::new("마케팅", &["홍보", "광고", "브랜딩"]),
		SynonymGroup::new("스터디", &["공부", "학습", "연구"]),
		SynonymGroup::new("취업", &["채용", "구직", "인턴"]),
		SynonymGroup::new("창업", &["스타트업", "사업", "비즈니스"]),
	]
}
