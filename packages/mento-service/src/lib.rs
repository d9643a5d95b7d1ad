pub mod recommend;
pub mod scored;
pub mod search;
pub mod similarity;

mod error;

pub use error::{Error, Result};
pub use mento_storage::BoxFuture;
pub use recommend::{RecommendRequest, SimilarRequest, TrendingRequest};
pub use scored::{ScoredRecommendRequest, ScoredRecommendation};
pub use search::{SearchHit, SearchRequest};

use std::sync::Arc;

use mento_config::{Config, EmbeddingProviderConfig, RoleFitProviderConfig};
use mento_domain::terms::SynonymTable;
use mento_providers::{embedding, role_fit};
use mento_storage::{Catalog, db::Db};

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		text: &'a str,
	) -> BoxFuture<'a, Result<Vec<f32>>>;
}

pub trait RoleFitProvider
where
	Self: Send + Sync,
{
	/// Fit between the user's profile and `target_role`, in `[0, 100]`.
	fn role_fit<'a>(
		&'a self,
		cfg: &'a RoleFitProviderConfig,
		user_id: i64,
		target_role: &'a str,
	) -> BoxFuture<'a, Result<f64>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub role_fit: Arc<dyn RoleFitProvider>,
}

/// Ranking and search over the activity catalog.
///
/// Stateless across requests; share one instance behind an `Arc`.
pub struct RankingService {
	pub cfg: Config,
	pub catalog: Arc<dyn Catalog>,
	pub providers: Providers,
	synonyms: SynonymTable,
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		text: &'a str,
	) -> BoxFuture<'a, Result<Vec<f32>>> {
		Box::pin(async move {
			let vectors = embedding::embed(cfg, &[text.to_string()]).await?;

			vectors.into_iter().next().ok_or_else(|| Error::Provider {
				message: "Embedding provider returned no vectors.".to_string(),
			})
		})
	}
}

impl RoleFitProvider for DefaultProviders {
	fn role_fit<'a>(
		&'a self,
		cfg: &'a RoleFitProviderConfig,
		user_id: i64,
		target_role: &'a str,
	) -> BoxFuture<'a, Result<f64>> {
		Box::pin(async move { Ok(role_fit::role_fit(cfg, user_id, target_role).await?) })
	}
}

impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingProvider>, role_fit: Arc<dyn RoleFitProvider>) -> Self {
		Self { embedding, role_fit }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { embedding: provider.clone(), role_fit: provider }
	}
}

impl RankingService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self::with_providers(cfg, Arc::new(db), Providers::default())
	}

	pub fn with_providers(cfg: Config, catalog: Arc<dyn Catalog>, providers: Providers) -> Self {
		let synonyms = SynonymTable::new(&cfg.synonyms);

		Self { cfg, catalog, providers, synonyms }
	}

	/// `None` and zero fall back to the configured default; larger values are capped.
	pub fn resolve_limit(&self, limit: Option<u32>) -> u32 {
		match limit {
			Some(limit) if limit > 0 => limit.min(self.cfg.search.max_limit),
			_ => self.cfg.search.default_limit,
		}
	}

	pub(crate) async fn require_user(&self, user_id: i64) -> Result<()> {
		if !self.catalog.user_exists(user_id).await? {
			return Err(Error::InvalidRequest { message: format!("User {user_id} not found.") });
		}

		Ok(())
	}
}
