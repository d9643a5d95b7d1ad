//! Builders for catalog fixtures.

use time::{Duration, OffsetDateTime, macros::datetime};

use mento_config::{
	Config, EmbeddingProviderConfig, Postgres, Providers, Ranking, RoleFitProviderConfig, Search,
	Service, Storage, default_synonyms,
};
use mento_domain::{Activity, ActivityTag, ActivityType, UserInterest};

/// Creation time of the fixture with id 0; each id is one hour newer than the last.
pub const EPOCH: OffsetDateTime = datetime!(2025-01-01 00:00 UTC);

#[derive(Debug, Clone)]
pub struct ActivityBuilder {
	activity: Activity,
}

impl ActivityBuilder {
	pub fn new(activity_id: i64, title: &str, activity_type: ActivityType) -> Self {
		Self {
			activity: Activity {
				activity_id,
				title: title.to_string(),
				summary: None,
				content: None,
				activity_type,
				is_campus: false,
				status: None,
				created_at: EPOCH + Duration::hours(activity_id),
				tags: Vec::new(),
			},
		}
	}

	pub fn content(mut self, content: &str) -> Self {
		self.activity.content = Some(content.to_string());

		self
	}

	pub fn campus(mut self) -> Self {
		self.activity.is_campus = true;

		self
	}

	pub fn status(mut self, status: &str) -> Self {
		self.activity.status = Some(status.to_string());

		self
	}

	pub fn tag(mut self, tag_id: i64, name: &str) -> Self {
		self.activity.tags.push(ActivityTag { tag_id, name: name.to_string() });

		self
	}

	pub fn build(self) -> Activity {
		self.activity
	}
}

pub fn activity(activity_id: i64, title: &str, activity_type: ActivityType) -> Activity {
	ActivityBuilder::new(activity_id, title, activity_type).build()
}

pub fn interest(user_id: i64, tag_id: i64, score: f64) -> UserInterest {
	UserInterest { user_id, tag_id, score }
}

/// Configuration with default ranking constants and unreachable provider endpoints.
pub fn config(dsn: &str) -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage { postgres: Postgres { dsn: dsn.to_string(), pool_max_conns: 2 } },
		providers: Providers {
			embedding: EmbeddingProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/embeddings".to_string(),
				model: "test".to_string(),
				dimensions: 2,
				timeout_ms: 1_000,
				default_headers: Default::default(),
			},
			role_fit: RoleFitProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/role-fit".to_string(),
				timeout_ms: 1_000,
				default_headers: Default::default(),
			},
		},
		search: Search::default(),
		ranking: Ranking::default(),
		synonyms: default_synonyms(),
	}
}
