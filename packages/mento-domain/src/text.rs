use unicode_normalization::UnicodeNormalization;

use crate::Activity;

/// Case- and composition-insensitive form used for every substring comparison.
pub fn fold(text: &str) -> String {
	text.nfc().collect::<String>().to_lowercase()
}

/// Text sent to the embedding provider for an activity: title, summary, the leading
/// `content_prefix_chars` characters of content, then every tag name.
pub fn compose_activity_text(activity: &Activity, content_prefix_chars: usize) -> String {
	let mut parts: Vec<&str> = Vec::with_capacity(3 + activity.tags.len());

	parts.push(activity.title.as_str());

	if let Some(summary) = activity.summary.as_deref() {
		parts.push(summary);
	}

	let content_prefix = activity.content.as_deref().map(|content| {
		match content.char_indices().nth(content_prefix_chars) {
			Some((end, _)) => &content[..end],
			None => content,
		}
	});

	if let Some(prefix) = content_prefix {
		parts.push(prefix);
	}

	for tag in &activity.tags {
		parts.push(tag.name.as_str());
	}

	parts.join(" ").trim().to_string()
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;
	use crate::{ActivityTag, ActivityType};

	fn activity(content: Option<&str>) -> Activity {
		Activity {
			activity_id: 1,
			title: "Rust 스터디".to_string(),
			summary: Some("주간 모임".to_string()),
			content: content.map(str::to_string),
			activity_type: ActivityType::Study,
			is_campus: false,
			status: None,
			created_at: datetime!(2025-03-01 09:00 UTC),
			tags: vec![
				ActivityTag { tag_id: 7, name: "개발".to_string() },
				ActivityTag { tag_id: 8, name: "백엔드".to_string() },
			],
		}
	}

	#[test]
	fn composes_title_summary_content_and_tags() {
		let text = compose_activity_text(&activity(Some("매주 토요일")), 500);

		assert_eq!(text, "Rust 스터디 주간 모임 매주 토요일 개발 백엔드");
	}

	#[test]
	fn truncates_content_by_characters() {
		let text = compose_activity_text(&activity(Some("가나다라마")), 3);

		assert_eq!(text, "Rust 스터디 주간 모임 가나다 개발 백엔드");
	}

	#[test]
	fn skips_missing_content() {
		let text = compose_activity_text(&activity(None), 500);

		assert_eq!(text, "Rust 스터디 주간 모임 개발 백엔드");
	}

	#[test]
	fn folds_case_and_decomposed_hangul() {
		let decomposed = "\u{1100}\u{1161}\u{11A8}";

		assert_eq!(fold(decomposed), "\u{AC01}");
		assert_eq!(fold("UI Design"), "ui design");
	}
}
