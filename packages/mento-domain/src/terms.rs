use std::collections::HashSet;

use mento_config::SynonymGroup;

use crate::text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermError {
	BlankQuery,
}

/// Immutable synonym table; build once from configuration and share.
#[derive(Debug, Clone)]
pub struct SynonymTable {
	groups: Vec<FoldedGroup>,
}

#[derive(Debug, Clone)]
struct FoldedGroup {
	terms: Vec<String>,
	folded: Vec<String>,
}

impl SynonymTable {
	pub fn new(groups: &[SynonymGroup]) -> Self {
		let groups = groups
			.iter()
			.map(|group| {
				let terms: Vec<String> = std::iter::once(group.key.clone())
					.chain(group.synonyms.iter().cloned())
					.collect();
				let folded = terms.iter().map(|term| text::fold(term)).collect();

				FoldedGroup { terms, folded }
			})
			.collect();

		Self { groups }
	}

	/// Expands `query` into related terms. The query itself is always first; terms from
	/// every group whose key or synonyms occur in the query follow in table order. Terms that
	/// fold to an already emitted term are dropped.
	pub fn expand(&self, query: &str) -> Result<Vec<String>, TermError> {
		if query.trim().is_empty() {
			return Err(TermError::BlankQuery);
		}

		let folded_query = text::fold(query);
		let mut out = vec![query.to_string()];
		let mut seen = HashSet::from([folded_query.clone()]);

		for group in &self.groups {
			if !group.folded.iter().any(|term| folded_query.contains(term.as_str())) {
				continue;
			}

			for (term, folded) in group.terms.iter().zip(&group.folded) {
				if seen.insert(folded.clone()) {
					out.push(term.clone());
				}
			}
		}

		Ok(out)
	}
}

impl std::fmt::Display for TermError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::BlankQuery => f.write_str("Query must be non-empty."),
		}
	}
}

impl std::error::Error for TermError {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keeps_query_first_and_deduplicates() {
		let table = SynonymTable::new(&[
			SynonymGroup::new("개발", &["프로그래밍", "코딩"]),
			SynonymGroup::new("코딩", &["개발"]),
		]);
		let terms = table.expand("코딩 스터디").expect("expand failed");

		assert_eq!(terms, vec!["코딩 스터디", "개발", "프로그래밍", "코딩"]);
	}

	#[test]
	fn deduplicates_terms_that_differ_only_in_case() {
		let table = SynonymTable::new(&[
			SynonymGroup::new("디자인", &["UI", "ux"]),
			SynonymGroup::new("UX", &["Ui", "그래픽"]),
		]);
		let terms = table.expand("ui").expect("expand failed");

		assert_eq!(terms, vec!["ui", "디자인", "ux", "그래픽"]);
	}

	#[test]
	fn leaves_unmatched_query_alone() {
		let table = SynonymTable::new(&mento_config::default_synonyms());

		assert_eq!(table.expand("hackathon").expect("expand failed"), vec!["hackathon"]);
	}
}
