use std::collections::HashMap;

use mento_domain::{Activity, ActivityTag, ActivityType, UserInterest};

use crate::{
	CandidateFilter, Page, PageRequest, Result,
	db::Db,
	models::{ActivityRow, ActivityTagRow, NewActivity, UserInterestRow},
};

const ACTIVITY_FILTER: &str = "\
WHERE ($1::text IS NULL OR title ILIKE $1)
	AND ($2::text IS NULL OR type = $2)
	AND ($3::boolean IS NULL OR is_campus = $3)
	AND ($4::text IS NULL OR status = $4)";

pub async fn fetch_candidates(
	db: &Db,
	filter: &CandidateFilter,
	page: PageRequest,
) -> Result<Page<Activity>> {
	let pattern = filter.text.as_deref().map(like_pattern);
	let activity_type = filter.activity_type.map(ActivityType::as_str);
	let select = format!(
		"\
SELECT activity_id, title, summary, content, type, is_campus, status, created_at
FROM activities
{ACTIVITY_FILTER}
ORDER BY created_at DESC, activity_id DESC
LIMIT $5 OFFSET $6"
	);
	let rows: Vec<ActivityRow> = sqlx::query_as(&select)
		.bind(pattern.as_deref())
		.bind(activity_type)
		.bind(filter.campus)
		.bind(filter.status.as_deref())
		.bind(i64::from(page.size))
		.bind(page.offset())
		.fetch_all(&db.pool)
		.await?;
	let count = format!("SELECT count(*) FROM activities {ACTIVITY_FILTER}");
	let total: i64 = sqlx::query_scalar(&count)
		.bind(pattern.as_deref())
		.bind(activity_type)
		.bind(filter.campus)
		.bind(filter.status.as_deref())
		.fetch_one(&db.pool)
		.await?;
	let items = attach_tags(db, rows).await?;

	Ok(Page { items, total: total.max(0) as u64 })
}

pub async fn fetch_activity(db: &Db, activity_id: i64) -> Result<Option<Activity>> {
	let row: Option<ActivityRow> = sqlx::query_as(
		"\
SELECT activity_id, title, summary, content, type, is_campus, status, created_at
FROM activities
WHERE activity_id = $1",
	)
	.bind(activity_id)
	.fetch_optional(&db.pool)
	.await?;
	let Some(row) = row else { return Ok(None) };

	Ok(attach_tags(db, vec![row]).await?.into_iter().next())
}

pub async fn user_exists(db: &Db, user_id: i64) -> Result<bool> {
	let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE user_id = $1)")
		.bind(user_id)
		.fetch_one(&db.pool)
		.await?;

	Ok(exists)
}

pub async fn fetch_user_interests(db: &Db, user_id: i64) -> Result<Vec<UserInterest>> {
	let rows: Vec<UserInterestRow> = sqlx::query_as(
		"\
SELECT user_id, tag_id, score
FROM user_interests
WHERE user_id = $1
ORDER BY score DESC, tag_id ASC",
	)
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(UserInterest::from).collect())
}

pub async fn fetch_tag_name(db: &Db, tag_id: i64) -> Result<Option<String>> {
	let name: Option<String> = sqlx::query_scalar("SELECT name FROM tags WHERE tag_id = $1")
		.bind(tag_id)
		.fetch_optional(&db.pool)
		.await?;

	Ok(name)
}

pub async fn insert_user(db: &Db, display_name: &str) -> Result<i64> {
	let user_id: i64 =
		sqlx::query_scalar("INSERT INTO users (display_name) VALUES ($1) RETURNING user_id")
			.bind(display_name)
			.fetch_one(&db.pool)
			.await?;

	Ok(user_id)
}

pub async fn insert_tag(db: &Db, name: &str) -> Result<i64> {
	let tag_id: i64 = sqlx::query_scalar(
		"\
INSERT INTO tags (name)
VALUES ($1)
ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
RETURNING tag_id",
	)
	.bind(name)
	.fetch_one(&db.pool)
	.await?;

	Ok(tag_id)
}

pub async fn insert_activity(db: &Db, activity: &NewActivity) -> Result<i64> {
	let mut tx = db.pool.begin().await?;
	let activity_id: i64 = sqlx::query_scalar(
		"\
INSERT INTO activities (title, summary, content, type, is_campus, status, created_at)
VALUES ($1, $2, $3, $4, $5, $6, $7)
RETURNING activity_id",
	)
	.bind(activity.title.as_str())
	.bind(activity.summary.as_deref())
	.bind(activity.content.as_deref())
	.bind(activity.activity_type.as_str())
	.bind(activity.is_campus)
	.bind(activity.status.as_deref())
	.bind(activity.created_at)
	.fetch_one(&mut *tx)
	.await?;

	for (position, tag_id) in activity.tag_ids.iter().enumerate() {
		sqlx::query(
			"\
INSERT INTO activity_tags (activity_id, tag_id, position)
VALUES ($1, $2, $3)
ON CONFLICT (activity_id, tag_id) DO NOTHING",
		)
		.bind(activity_id)
		.bind(*tag_id)
		.bind(position as i32)
		.execute(&mut *tx)
		.await?;
	}

	tx.commit().await?;

	Ok(activity_id)
}

pub async fn upsert_user_interest(db: &Db, user_id: i64, tag_id: i64, score: f64) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO user_interests (user_id, tag_id, score)
VALUES ($1, $2, $3)
ON CONFLICT (user_id, tag_id) DO UPDATE SET score = EXCLUDED.score",
	)
	.bind(user_id)
	.bind(tag_id)
	.bind(score)
	.execute(&db.pool)
	.await?;

	Ok(())
}

async fn attach_tags(db: &Db, rows: Vec<ActivityRow>) -> Result<Vec<Activity>> {
	if rows.is_empty() {
		return Ok(Vec::new());
	}

	let ids: Vec<i64> = rows.iter().map(|row| row.activity_id).collect();
	let tag_rows: Vec<ActivityTagRow> = sqlx::query_as(
		"\
SELECT at.activity_id, t.tag_id, t.name
FROM activity_tags at
JOIN tags t ON t.tag_id = at.tag_id
WHERE at.activity_id = ANY($1)
ORDER BY at.activity_id, at.position, t.tag_id",
	)
	.bind(ids.as_slice())
	.fetch_all(&db.pool)
	.await?;
	let mut tags_by_activity: HashMap<i64, Vec<ActivityTag>> = HashMap::new();

	for row in tag_rows {
		tags_by_activity
			.entry(row.activity_id)
			.or_default()
			.push(ActivityTag { tag_id: row.tag_id, name: row.name });
	}

	rows.into_iter()
		.map(|row| {
			let tags = tags_by_activity.remove(&row.activity_id).unwrap_or_default();

			row.into_activity(tags)
		})
		.collect()
}

/// Case-insensitive substring pattern with LIKE wildcards in `term` escaped.
fn like_pattern(term: &str) -> String {
	let mut out = String::with_capacity(term.len() + 2);

	out.push('%');

	for ch in term.chars() {
		if matches!(ch, '%' | '_' | '\\') {
			out.push('\\');
		}

		out.push(ch);
	}

	out.push('%');

	out
}
