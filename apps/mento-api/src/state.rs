use std::sync::Arc;

use mento_service::RankingService;
use mento_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<RankingService>,
}
impl AppState {
	pub async fn new(config: mento_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(RankingService::new(config, db)))
	}

	pub fn from_service(service: RankingService) -> Self {
		Self { service: Arc::new(service) }
	}
}
