use serde::{Deserialize, Serialize};

use mento_config::{ExpectedIncrease, RecommendBlend};
use mento_domain::{
	Activity, ActivityType, UserInterest,
	affinity::interest_affinity,
	score::{cmp_f64_desc, round_to_tenth},
};

use crate::{RankingService, Result, similarity::SIMILARITY_SCALE};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRecommendRequest {
	pub user_id: i64,
	pub limit: Option<u32>,
	#[serde(rename = "type")]
	pub activity_type: Option<ActivityType>,
	pub campus_only: Option<bool>,
	/// Enables role-fit blending and expected score increases when non-blank.
	pub target_role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecommendation {
	pub activity: Activity,
	/// Blended score rounded to one decimal.
	pub recommendation_score: f64,
	pub role_fit_score: Option<f64>,
	pub expected_score_increase: Option<f64>,
}

impl RankingService {
	/// Recommendations annotated with a blended embedding, role-fit and interest score.
	pub async fn recommend_with_scores(
		&self,
		req: ScoredRecommendRequest,
	) -> Result<Vec<ScoredRecommendation>> {
		let limit = self.resolve_limit(req.limit);
		let blend = &self.cfg.ranking.recommend_blend;
		let fetch = limit.saturating_mul(blend.candidate_multiplier);
		let candidates = self
			.recommend_activities(req.user_id, fetch, req.activity_type, req.campus_only)
			.await?;
		let interests = self.catalog.fetch_user_interests(req.user_id).await?;
		let target_role = req.target_role.as_deref().map(str::trim).filter(|role| !role.is_empty());
		let role_fit_score = match target_role {
			Some(role) => self.role_fit_score(req.user_id, role).await,
			None => None,
		};
		let user_query = self.user_query(target_role, &interests).await?;
		let embedding_scores = self.user_query_scores(req.user_id, &user_query, &candidates).await;
		let affinity_weights = &self.cfg.ranking.affinity;
		let mut scored = Vec::with_capacity(candidates.len());

		for (activity, embedding_score) in candidates.into_iter().zip(embedding_scores) {
			let interest_score =
				interest_affinity(&activity, &interests, affinity_weights) * blend.interest_scale;
			let recommendation_score =
				blend_recommendation_score(blend, embedding_score, role_fit_score, interest_score);

			if !recommendation_score.is_finite() {
				tracing::warn!(
					activity_id = activity.activity_id,
					embedding_score,
					interest_score,
					"Recommendation score is not finite. Skipping activity."
				);

				continue;
			}

			let expected_score_increase = target_role.map(|_| {
				expected_score_increase(&self.cfg.ranking.expected_increase, &activity)
			});

			scored.push(ScoredRecommendation {
				activity,
				recommendation_score,
				role_fit_score,
				expected_score_increase,
			});
		}

		scored.sort_by(|left, right| {
			cmp_f64_desc(left.recommendation_score, right.recommendation_score)
		});
		scored.truncate(limit as usize);

		Ok(scored)
	}

	async fn role_fit_score(&self, user_id: i64, target_role: &str) -> Option<f64> {
		match self.providers.role_fit.role_fit(&self.cfg.providers.role_fit, user_id, target_role).await
		{
			Ok(score) if score.is_finite() => Some(score),
			Ok(score) => {
				tracing::warn!(user_id, target_role, score, "Role fit score is not finite. Ignoring it.");

				None
			},
			Err(err) => {
				tracing::warn!(
					user_id,
					target_role,
					error = %err,
					"Failed to compute role fit score. Ranking without it."
				);

				None
			},
		}
	}

	/// Target role followed by the user's interest tag names, strongest interest first.
	async fn user_query(
		&self,
		target_role: Option<&str>,
		interests: &[UserInterest],
	) -> Result<String> {
		let mut parts: Vec<String> = target_role.map(str::to_string).into_iter().collect();

		for interest in interests {
			if let Some(name) = self.catalog.fetch_tag_name(interest.tag_id).await? {
				parts.push(name);
			}
		}

		Ok(parts.join(" ").trim().to_string())
	}

	/// Per-candidate `similarity * 100` against the user query. Any failure scores zero.
	async fn user_query_scores(
		&self,
		user_id: i64,
		user_query: &str,
		candidates: &[Activity],
	) -> Vec<f64> {
		if user_query.is_empty() || candidates.is_empty() {
			return vec![0.0; candidates.len()];
		}

		let query_vec = match self.embed_query(user_query).await {
			Ok(vector) => vector,
			Err(err) => {
				tracing::warn!(
					user_id,
					error = %err,
					"Failed to embed user query. Embedding scores are zero."
				);

				return vec![0.0; candidates.len()];
			},
		};

		self.activity_similarities(&query_vec, candidates)
			.await
			.into_iter()
			.map(|similarity| similarity.map_or(0.0, |similarity| similarity * SIMILARITY_SCALE))
			.collect()
	}
}

/// Blends component scores (each on a 0-100 scale) and rounds half-up to one decimal.
///
/// With a role fit score the role-fit weights apply; otherwise only embedding and interest.
pub fn blend_recommendation_score(
	blend: &RecommendBlend,
	embedding_score: f64,
	role_fit_score: Option<f64>,
	interest_score: f64,
) -> f64 {
	let raw = match role_fit_score {
		Some(role_fit_score) => {
			let weights = &blend.with_role_fit;

			weights.embedding_weight * embedding_score
				+ weights.role_fit_weight * role_fit_score
				+ weights.interest_weight * interest_score
		},
		None => {
			let weights = &blend.without_role_fit;

			weights.embedding_weight * embedding_score + weights.interest_weight * interest_score
		},
	};

	round_to_tenth(raw)
}

/// Heuristic gain from completing `activity`, by type, boosted when it carries tags.
pub fn expected_score_increase(weights: &ExpectedIncrease, activity: &Activity) -> f64 {
	let base = match activity.activity_type {
		ActivityType::Contest => weights.contest,
		ActivityType::Study => weights.study,
		ActivityType::Job => weights.job,
		ActivityType::Other => weights.other,
	};
	let increase = if activity.has_tags() { base * weights.tagged_multiplier } else { base };

	round_to_tenth(increase)
}

#[cfg(test)]
mod tests {
	use mento_domain::ActivityTag;

	use super::*;

	fn activity(activity_type: ActivityType, tagged: bool) -> Activity {
		Activity {
			activity_id: 1,
			title: "활동".to_string(),
			summary: None,
			content: None,
			activity_type,
			is_campus: false,
			status: None,
			created_at: time::OffsetDateTime::UNIX_EPOCH,
			tags: if tagged {
				vec![ActivityTag { tag_id: 1, name: "개발".to_string() }]
			} else {
				Vec::new()
			},
		}
	}

	#[test]
	fn blends_with_role_fit() {
		let blend = RecommendBlend::default();

		assert_eq!(blend_recommendation_score(&blend, 80.0, Some(60.0), 50.0), 68.0);
	}

	#[test]
	fn blends_without_role_fit() {
		let blend = RecommendBlend::default();

		// 0.7 * 80 + 0.3 * 50
		assert_eq!(blend_recommendation_score(&blend, 80.0, None, 50.0), 71.0);
	}

	#[test]
	fn expected_increase_by_type_and_tags() {
		let weights = ExpectedIncrease::default();

		assert_eq!(expected_score_increase(&weights, &activity(ActivityType::Contest, true)), 3.3);
		assert_eq!(expected_score_increase(&weights, &activity(ActivityType::Study, false)), 2.0);
		assert_eq!(expected_score_increase(&weights, &activity(ActivityType::Job, true)), 1.7);
		assert_eq!(expected_score_increase(&weights, &activity(ActivityType::Other, true)), 1.1);
	}
}
