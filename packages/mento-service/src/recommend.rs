use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use mento_domain::{
	Activity, ActivityType, UserInterest, affinity::interest_affinity, score::cmp_f64_desc,
};
use mento_storage::{CandidateFilter, PageRequest};

use crate::{Error, RankingService, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
	pub user_id: i64,
	pub limit: Option<u32>,
	#[serde(rename = "type")]
	pub activity_type: Option<ActivityType>,
	/// Filters on the campus flag when set, in either direction.
	pub campus_only: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingRequest {
	pub limit: Option<u32>,
	#[serde(rename = "type")]
	pub activity_type: Option<ActivityType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarRequest {
	pub activity_id: i64,
	pub limit: Option<u32>,
}

impl RankingService {
	/// Interest-based recommendations, topped up with trending activities when short.
	pub async fn recommend(&self, req: RecommendRequest) -> Result<Vec<Activity>> {
		let limit = self.resolve_limit(req.limit);

		self.recommend_activities(req.user_id, limit, req.activity_type, req.campus_only).await
	}

	pub async fn trending(&self, req: TrendingRequest) -> Result<Vec<Activity>> {
		let limit = self.resolve_limit(req.limit);

		self.trending_activities(limit, req.activity_type).await
	}

	/// Newest activities sharing the type and campus flag of `activity_id`, excluding itself.
	pub async fn similar_to(&self, req: SimilarRequest) -> Result<Vec<Activity>> {
		let limit = self.resolve_limit(req.limit);
		let Some(activity) = self.catalog.fetch_activity(req.activity_id).await? else {
			return Err(Error::InvalidRequest {
				message: format!("Activity {} not found.", req.activity_id),
			});
		};
		let filter = CandidateFilter {
			activity_type: Some(activity.activity_type),
			campus: Some(activity.is_campus),
			..Default::default()
		};
		let page = self
			.catalog
			.fetch_candidates(&filter, PageRequest::first(limit.saturating_add(1)))
			.await?;

		Ok(page
			.items
			.into_iter()
			.filter(|candidate| candidate.activity_id != req.activity_id)
			.take(limit as usize)
			.collect())
	}

	pub(crate) async fn recommend_activities(
		&self,
		user_id: i64,
		limit: u32,
		activity_type: Option<ActivityType>,
		campus: Option<bool>,
	) -> Result<Vec<Activity>> {
		self.require_user(user_id).await?;

		let interests = self.catalog.fetch_user_interests(user_id).await?;

		if interests.is_empty() {
			tracing::debug!(user_id, "User has no interests. Recommending trending activities.");

			return self.trending_activities(limit, activity_type).await;
		}

		let filter = CandidateFilter { activity_type, campus, ..Default::default() };
		let size = limit.saturating_mul(self.cfg.ranking.recommend_blend.candidate_multiplier);
		let page = self.catalog.fetch_candidates(&filter, PageRequest::first(size)).await?;
		let mut selected = self.rank_by_affinity(page.items, &interests, limit as usize);

		if selected.len() < limit as usize {
			let missing = limit as usize - selected.len();
			let fetch = u32::try_from(limit as usize + selected.len()).unwrap_or(u32::MAX);
			let seen: HashSet<i64> = selected.iter().map(|activity| activity.activity_id).collect();
			let backfill = self.trending_activities(fetch, activity_type).await?;
			let before = selected.len();

			selected.extend(
				backfill
					.into_iter()
					.filter(|activity| !seen.contains(&activity.activity_id))
					.take(missing),
			);

			tracing::debug!(
				user_id,
				scored = before,
				backfilled = selected.len() - before,
				"Backfilled recommendations from trending activities."
			);
		}

		Ok(selected)
	}

	pub(crate) async fn trending_activities(
		&self,
		limit: u32,
		activity_type: Option<ActivityType>,
	) -> Result<Vec<Activity>> {
		let filter = CandidateFilter { activity_type, ..Default::default() };
		let page = self.catalog.fetch_candidates(&filter, PageRequest::first(limit)).await?;

		Ok(page.items)
	}

	/// Keeps candidates with positive affinity, best first, ties in catalog order.
	fn rank_by_affinity(
		&self,
		candidates: Vec<Activity>,
		interests: &[UserInterest],
		limit: usize,
	) -> Vec<Activity> {
		let weights = &self.cfg.ranking.affinity;
		let mut scored: Vec<(f64, Activity)> = candidates
			.into_iter()
			.map(|activity| (interest_affinity(&activity, interests, weights), activity))
			.filter(|(score, _)| *score > 0.0)
			.collect();

		scored.sort_by(|left, right| cmp_f64_desc(left.0, right.0));

		scored.into_iter().take(limit).map(|(_, activity)| activity).collect()
	}
}
