use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use mento_domain::{
	Activity, UserInterest,
	affinity::interest_affinity,
	keyword::keyword_score_terms,
	score::{cmp_f64_desc, finite_or_zero},
};
use mento_storage::{CandidateFilter, PageRequest};

use crate::{Error, RankingService, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
	pub query: String,
	pub limit: Option<u32>,
	/// Re-weights results by this user's interests. Unknown users have no interests.
	pub user_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
	pub activity: Activity,
	pub score: f64,
}

/// Search degradation. Each transition is taken at most once per request.
#[derive(Debug)]
enum SearchState {
	TryEmbedding,
	TryKeyword,
	Done(Vec<SearchHit>),
}

impl RankingService {
	/// Embedding search with keyword fallback.
	///
	/// Embedding provider failures and empty embedding results never reach the caller; the
	/// request degrades to keyword matching over expanded terms instead.
	pub async fn search(&self, req: SearchRequest) -> Result<Vec<SearchHit>> {
		if req.query.trim().is_empty() {
			return Err(Error::InvalidRequest { message: "Query must be non-empty.".to_string() });
		}

		let limit = self.resolve_limit(req.limit);
		let mut state = SearchState::TryEmbedding;

		loop {
			state = match state {
				SearchState::TryEmbedding => {
					let size = limit.saturating_mul(self.cfg.search.embedding_candidate_multiplier);
					let page = self
						.catalog
						.fetch_candidates(&CandidateFilter::default(), PageRequest::first(size))
						.await?;

					match self.embedding_matches(&req.query, page.items).await {
						Ok(hits) if !hits.is_empty() => SearchState::Done(
							self.blend_embedding_hits(hits, req.user_id, limit).await?,
						),
						Ok(_) => {
							tracing::info!(
								reason = "no_matches",
								"Embedding search found no match. Falling back to keyword search."
							);

							SearchState::TryKeyword
						},
						Err(err) => {
							tracing::warn!(
								reason = "provider_error",
								error = %err,
								"Embedding search failed. Falling back to keyword search."
							);

							SearchState::TryKeyword
						},
					}
				},
				SearchState::TryKeyword =>
					SearchState::Done(self.keyword_search(&req.query, limit, req.user_id).await?),
				SearchState::Done(hits) => return Ok(hits),
			};
		}
	}

	/// [`RankingService::search`] without scores.
	pub async fn semantic_search(&self, req: SearchRequest) -> Result<Vec<Activity>> {
		Ok(self.search(req).await?.into_iter().map(|hit| hit.activity).collect())
	}

	/// Keyword matching over the expanded query terms.
	///
	/// Each term pulls its own title-filtered page; the union keeps first-seen order and every
	/// candidate is scored against every term.
	pub async fn keyword_search(
		&self,
		query: &str,
		limit: u32,
		user_id: Option<i64>,
	) -> Result<Vec<SearchHit>> {
		let terms = self.synonyms.expand(query)?;
		let size = limit.saturating_mul(self.cfg.search.keyword_candidate_multiplier);
		let mut seen = HashSet::new();
		let mut candidates = Vec::new();

		for term in &terms {
			let filter = CandidateFilter { text: Some(term.clone()), ..Default::default() };
			let page = self.catalog.fetch_candidates(&filter, PageRequest::first(size)).await?;

			candidates.extend(page.items.into_iter().filter(|item| seen.insert(item.activity_id)));
		}

		let interests = self.search_interests(user_id).await?;
		let keyword_weights = &self.cfg.ranking.keyword;
		let affinity_weights = &self.cfg.ranking.affinity;
		let interest_weight = self.cfg.ranking.search_blend.keyword_interest_weight;
		let mut hits: Vec<SearchHit> = candidates
			.into_iter()
			.map(|activity| {
				let mut score = keyword_score_terms(&activity, &terms, keyword_weights);

				if !interests.is_empty() {
					score += interest_affinity(&activity, &interests, affinity_weights)
						* interest_weight;
				}

				SearchHit { activity, score: finite_or_zero(score) }
			})
			.collect();

		tracing::debug!(terms = terms.len(), candidates = hits.len(), "Keyword search scored.");

		hits.sort_by(|left, right| cmp_f64_desc(left.score, right.score));
		hits.truncate(limit as usize);

		Ok(hits)
	}

	async fn blend_embedding_hits(
		&self,
		mut hits: Vec<SearchHit>,
		user_id: Option<i64>,
		limit: u32,
	) -> Result<Vec<SearchHit>> {
		let interests = self.search_interests(user_id).await?;

		if !interests.is_empty() {
			let blend = &self.cfg.ranking.search_blend;
			let weights = &self.cfg.ranking.affinity;

			for hit in &mut hits {
				let affinity = interest_affinity(&hit.activity, &interests, weights);

				hit.score = finite_or_zero(
					hit.score * blend.embedding_weight
						+ affinity * blend.interest_scale * blend.interest_weight,
				);
			}
		}

		hits.sort_by(|left, right| cmp_f64_desc(left.score, right.score));
		hits.truncate(limit as usize);

		Ok(hits)
	}

	async fn search_interests(&self, user_id: Option<i64>) -> Result<Vec<UserInterest>> {
		match user_id {
			Some(user_id) => Ok(self.catalog.fetch_user_interests(user_id).await?),
			None => Ok(Vec::new()),
		}
	}
}
