//! Embedding similarity between a query and candidate activities.

use futures::{FutureExt, StreamExt, stream};

use mento_domain::{Activity, similarity::cosine_similarity, text::compose_activity_text};

use crate::{Error, RankingService, Result, SearchHit};

/// Similarities are reported on a 0-100 scale.
pub const SIMILARITY_SCALE: f64 = 100.0;

impl RankingService {
	/// Embeds `text` for comparison against activities. An empty vector is a provider error.
	pub(crate) async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
		let vector = self.providers.embedding.embed(&self.cfg.providers.embedding, text).await?;

		if vector.is_empty() {
			return Err(Error::Provider {
				message: "Embedding provider returned an empty vector.".to_string(),
			});
		}

		Ok(vector)
	}

	/// Cosine similarity of every candidate to `query_vec`, in candidate order.
	///
	/// `None` marks a candidate whose embedding failed or could not be compared. Calls run
	/// concurrently up to `search.embed_concurrency`.
	pub(crate) async fn activity_similarities(
		&self,
		query_vec: &[f32],
		candidates: &[Activity],
	) -> Vec<Option<f64>> {
		let prefix_chars = self.cfg.search.content_prefix_chars;

		let pending: Vec<_> = candidates
			.iter()
			.map(|activity| {
				async move {
					let text = compose_activity_text(activity, prefix_chars);
					let vector =
						match self.providers.embedding.embed(&self.cfg.providers.embedding, &text).await {
							Ok(vector) => vector,
							Err(err) => {
								tracing::warn!(
									activity_id = activity.activity_id,
									error = %err,
									"Failed to embed activity. Skipping it."
								);

								return None;
							},
						};
					let similarity = cosine_similarity(query_vec, &vector);

					if similarity.is_none() {
						tracing::warn!(
							activity_id = activity.activity_id,
							query_dim = query_vec.len(),
							activity_dim = vector.len(),
							"Activity embedding is not comparable with the query embedding. Skipping it."
						);
					}

					similarity
				}
				.boxed()
			})
			.collect();

		stream::iter(pending)
			.buffered(self.cfg.search.embed_concurrency.max(1))
			.collect()
			.await
	}

	/// Candidates whose similarity to `query` exceeds the configured threshold, scored
	/// `similarity * 100`, in candidate order.
	///
	/// Fails only when the query itself cannot be embedded.
	pub(crate) async fn embedding_matches(
		&self,
		query: &str,
		candidates: Vec<Activity>,
	) -> Result<Vec<SearchHit>> {
		let query_vec = self.embed_query(query).await?;
		let similarities = self.activity_similarities(&query_vec, &candidates).await;
		let threshold = self.cfg.search.similarity_threshold;

		Ok(candidates
			.into_iter()
			.zip(similarities)
			.filter_map(|(activity, similarity)| {
				let similarity = similarity.filter(|similarity| *similarity > threshold)?;

				Some(SearchHit { activity, score: similarity * SIMILARITY_SCALE })
			})
			.collect())
	}
}
