use mento_config::KeywordWeights;

use crate::{Activity, text};

/// Scores one activity against one term with case-insensitive substring matching.
pub fn keyword_score(activity: &Activity, term: &str, weights: &KeywordWeights) -> f64 {
	let term = text::fold(term);
	let title = text::fold(&activity.title);
	let mut score = 0.0;

	if title.contains(term.as_str()) {
		score += weights.title_contains;
	}
	if activity.content.as_deref().is_some_and(|content| text::fold(content).contains(term.as_str()))
	{
		score += weights.content_contains;
	}
	if title == term {
		score += weights.title_exact;
	}

	for tag in &activity.tags {
		if text::fold(&tag.name).contains(term.as_str()) {
			score += weights.tag_contains;
		}
	}

	score
}

/// Sum of [`keyword_score`] over every term. Matching through several terms ranks higher.
pub fn keyword_score_terms(activity: &Activity, terms: &[String], weights: &KeywordWeights) -> f64 {
	terms.iter().map(|term| keyword_score(activity, term, weights)).sum()
}
