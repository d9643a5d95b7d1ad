use time::OffsetDateTime;

use mento_domain::{Activity, ActivityTag, ActivityType, UserInterest};

use crate::{Error, Result};

#[derive(Debug, sqlx::FromRow)]
pub struct ActivityRow {
	pub activity_id: i64,
	pub title: String,
	pub summary: Option<String>,
	pub content: Option<String>,
	pub r#type: String,
	pub is_campus: bool,
	pub status: Option<String>,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ActivityTagRow {
	pub activity_id: i64,
	pub tag_id: i64,
	pub name: String,
}

#[derive(Debug, sqlx::FromRow)]
pub struct UserInterestRow {
	pub user_id: i64,
	pub tag_id: i64,
	pub score: f64,
}

/// Catalog entry to insert; tags keep the order of `tag_ids`.
#[derive(Debug, Clone)]
pub struct NewActivity {
	pub title: String,
	pub summary: Option<String>,
	pub content: Option<String>,
	pub activity_type: ActivityType,
	pub is_campus: bool,
	pub status: Option<String>,
	pub created_at: OffsetDateTime,
	pub tag_ids: Vec<i64>,
}

impl ActivityRow {
	pub fn into_activity(self, tags: Vec<ActivityTag>) -> Result<Activity> {
		let activity_type = self.r#type.parse::<ActivityType>().map_err(|err| {
			Error::InvalidArgument(format!("Activity {} has {err}", self.activity_id))
		})?;

		Ok(Activity {
			activity_id: self.activity_id,
			title: self.title,
			summary: self.summary,
			content: self.content,
			activity_type,
			is_campus: self.is_campus,
			status: self.status,
			created_at: self.created_at,
			tags,
		})
	}
}

impl From<UserInterestRow> for UserInterest {
	fn from(row: UserInterestRow) -> Self {
		Self { user_id: row.user_id, tag_id: row.tag_id, score: row.score }
	}
}
