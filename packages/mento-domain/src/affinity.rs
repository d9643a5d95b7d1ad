use mento_config::AffinityWeights;

use crate::{Activity, ActivityType, UserInterest};

/// Raw interest affinity, roughly 0-2 for a typical user. Callers apply their own
/// multipliers, so the scale must stay stable.
pub fn interest_affinity(
	activity: &Activity,
	interests: &[UserInterest],
	weights: &AffinityWeights,
) -> f64 {
	if interests.is_empty() {
		return 0.0;
	}

	let mut score = 0.0;

	for tag in &activity.tags {
		for interest in interests.iter().filter(|interest| interest.tag_id == tag.tag_id) {
			score += interest.score * weights.interest_weight;
		}
	}

	match activity.activity_type {
		ActivityType::Study => score += weights.study_bonus,
		ActivityType::Contest => score += weights.contest_bonus,
		ActivityType::Job | ActivityType::Other => {},
	}

	if activity.is_campus {
		score += weights.campus_bonus;
	}

	crate::score::finite_or_zero(score)
}
