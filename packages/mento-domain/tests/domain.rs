use time::macros::datetime;

use mento_config::{AffinityWeights, KeywordWeights, default_synonyms};
use mento_domain::{
	Activity, ActivityTag, ActivityType, UserInterest,
	affinity::interest_affinity,
	keyword::{keyword_score, keyword_score_terms},
	terms::{SynonymTable, TermError},
};

fn tag(tag_id: i64, name: &str) -> ActivityTag {
	ActivityTag { tag_id, name: name.to_string() }
}

fn activity(title: &str, activity_type: ActivityType, is_campus: bool) -> Activity {
	Activity {
		activity_id: 1,
		title: title.to_string(),
		summary: None,
		content: None,
		activity_type,
		is_campus,
		status: None,
		created_at: datetime!(2025-04-01 00:00 UTC),
		tags: Vec::new(),
	}
}

fn interest(tag_id: i64, score: f64) -> UserInterest {
	UserInterest { user_id: 42, tag_id, score }
}

#[test]
fn exact_title_match_scores_at_least_five() {
	let weights = KeywordWeights::default();

	for title in ["해커톤", "Rust Study", "AI 공모전"] {
		let item = activity(title, ActivityType::Other, false);

		assert!(keyword_score(&item, &title.to_uppercase(), &weights) >= 5.0);
		assert!(keyword_score(&item, title, &weights) >= 5.0);
	}
}

#[test]
fn keyword_components_stack() {
	let weights = KeywordWeights::default();
	let mut item = activity("Backend 개발 스터디", ActivityType::Study, false);

	item.content = Some("Spring과 개발 문화를 배웁니다".to_string());
	item.tags = vec![tag(1, "개발"), tag(2, "웹개발"), tag(3, "디자인")];

	// title 2.0 + content 1.0 + two tags 1.5 each
	assert_eq!(keyword_score(&item, "개발", &weights), 6.0);
	assert_eq!(keyword_score(&item, "마케팅", &weights), 0.0);
}

#[test]
fn keyword_scores_sum_across_terms() {
	let weights = KeywordWeights::default();
	let item = activity("코딩 테스트 스터디", ActivityType::Study, false);
	let terms = vec!["코딩".to_string(), "스터디".to_string(), "디자인".to_string()];

	assert_eq!(keyword_score_terms(&item, &terms, &weights), 4.0);
}

#[test]
fn affinity_is_zero_without_interests() {
	let weights = AffinityWeights::default();

	for (activity_type, is_campus) in [
		(ActivityType::Study, true),
		(ActivityType::Contest, false),
		(ActivityType::Job, true),
		(ActivityType::Other, false),
	] {
		let mut item = activity("any", activity_type, is_campus);

		item.tags = vec![tag(1, "개발")];

		assert_eq!(interest_affinity(&item, &[], &weights), 0.0);
	}
}

#[test]
fn affinity_sums_matching_tags_and_bonuses() {
	let weights = AffinityWeights::default();
	let mut item = activity("교내 알고리즘 스터디", ActivityType::Study, true);

	item.tags = vec![tag(1, "알고리즘"), tag(2, "개발"), tag(9, "기타")];

	let interests = vec![interest(2, 3.0), interest(1, 1.0), interest(5, 4.0)];
	let score = interest_affinity(&item, &interests, &weights);

	// (3.0 + 1.0) * 0.3 + study 0.2 + campus 0.1
	assert!((score - 1.5).abs() < 1e-9);
}

#[test]
fn affinity_contest_bonus_without_matching_tags() {
	let weights = AffinityWeights::default();
	let item = activity("공모전", ActivityType::Contest, false);
	let score = interest_affinity(&item, &[interest(3, 2.0)], &weights);

	assert!((score - 0.1).abs() < 1e-9);
}

#[test]
fn expands_development_hiring_query() {
	let table = SynonymTable::new(&default_synonyms());
	let terms = table.expand("개발자 채용").expect("expand failed");

	assert_eq!(terms[0], "개발자 채용");
	assert!(terms.iter().any(|term| term == "프로그래밍"));
	assert!(terms.iter().any(|term| term == "구직"));
	assert!(terms.iter().any(|term| term == "취업"));
	assert!(!terms.iter().any(|term| term == "홍보"));
}

#[test]
fn expansion_matches_latin_synonyms_case_insensitively() {
	let table = SynonymTable::new(&default_synonyms());
	let terms = table.expand("ui 포트폴리오").expect("expand failed");

	assert_eq!(terms, vec!["ui 포트폴리오", "디자인", "UI", "UX", "그래픽"]);
}

#[test]
fn blank_query_is_rejected() {
	let table = SynonymTable::new(&default_synonyms());

	assert_eq!(table.expand("   "), Err(TermError::BlankQuery));
	assert_eq!(table.expand(""), Err(TermError::BlankQuery));
}

#[test]
fn case_variants_of_the_query_are_not_repeated() {
	let table = SynonymTable::new(&default_synonyms());
	let terms = table.expand("ui").expect("expand failed");

	assert_eq!(terms, vec!["ui", "디자인", "UX", "그래픽"]);

	let item = activity("UI 워크숍", ActivityType::Other, false);

	assert_eq!(keyword_score_terms(&item, &terms, &KeywordWeights::default()), 2.0);
}
