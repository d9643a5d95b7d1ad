use std::collections::{HashMap, HashSet};

use mento_domain::{Activity, UserInterest, text};
use mento_storage::{BoxFuture, CandidateFilter, Catalog, Page, PageRequest, Result};

/// In-memory catalog with the same ordering and filtering contract as the Postgres store.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
	activities: Vec<Activity>,
	users: HashSet<i64>,
	interests: Vec<UserInterest>,
	tags: HashMap<i64, String>,
	unavailable: bool,
}

impl MemoryCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// A catalog whose every call fails as if the database were down.
	pub fn unavailable() -> Self {
		Self { unavailable: true, ..Self::default() }
	}

	pub fn with_activity(mut self, activity: Activity) -> Self {
		for tag in &activity.tags {
			self.tags.entry(tag.tag_id).or_insert_with(|| tag.name.clone());
		}

		self.activities.push(activity);

		self
	}

	pub fn with_activities(self, activities: impl IntoIterator<Item = Activity>) -> Self {
		activities.into_iter().fold(self, Self::with_activity)
	}

	pub fn with_tag(mut self, tag_id: i64, name: &str) -> Self {
		self.tags.insert(tag_id, name.to_string());

		self
	}

	pub fn with_user(mut self, user_id: i64) -> Self {
		self.users.insert(user_id);

		self
	}

	/// Registers the user as well.
	pub fn with_interest(mut self, interest: UserInterest) -> Self {
		self.users.insert(interest.user_id);
		self.interests.retain(|existing| {
			existing.user_id != interest.user_id || existing.tag_id != interest.tag_id
		});
		self.interests.push(interest);

		self
	}

	fn check_available(&self) -> Result<()> {
		if self.unavailable {
			return Err(mento_storage::Error::Sqlx(sqlx::Error::PoolClosed));
		}

		Ok(())
	}

	fn candidates(&self, filter: &CandidateFilter, page: PageRequest) -> Result<Page<Activity>> {
		self.check_available()?;

		let needle = filter.text.as_deref().map(text::fold);
		let mut matches: Vec<&Activity> = self
			.activities
			.iter()
			.filter(|activity| {
				needle.as_deref().is_none_or(|needle| text::fold(&activity.title).contains(needle))
			})
			.filter(|activity| {
				filter.activity_type.is_none_or(|kind| activity.activity_type == kind)
			})
			.filter(|activity| filter.campus.is_none_or(|campus| activity.is_campus == campus))
			.filter(|activity| {
				filter
					.status
					.as_deref()
					.is_none_or(|status| activity.status.as_deref() == Some(status))
			})
			.collect();

		matches.sort_by(|left, right| {
			right
				.created_at
				.cmp(&left.created_at)
				.then_with(|| right.activity_id.cmp(&left.activity_id))
		});

		let total = matches.len() as u64;
		let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
		let items =
			matches.into_iter().skip(offset).take(page.size as usize).cloned().collect::<Vec<_>>();

		Ok(Page { items, total })
	}
}

impl Catalog for MemoryCatalog {
	fn fetch_candidates<'a>(
		&'a self,
		filter: &'a CandidateFilter,
		page: PageRequest,
	) -> BoxFuture<'a, Result<Page<Activity>>> {
		Box::pin(async move { self.candidates(filter, page) })
	}

	fn fetch_activity<'a>(&'a self, activity_id: i64) -> BoxFuture<'a, Result<Option<Activity>>> {
		Box::pin(async move {
			self.check_available()?;

			Ok(self.activities.iter().find(|activity| activity.activity_id == activity_id).cloned())
		})
	}

	fn user_exists<'a>(&'a self, user_id: i64) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move {
			self.check_available()?;

			Ok(self.users.contains(&user_id))
		})
	}

	fn fetch_user_interests<'a>(
		&'a self,
		user_id: i64,
	) -> BoxFuture<'a, Result<Vec<UserInterest>>> {
		Box::pin(async move {
			self.check_available()?;

			let mut interests: Vec<UserInterest> = self
				.interests
				.iter()
				.filter(|interest| interest.user_id == user_id)
				.cloned()
				.collect();

			interests.sort_by(|left, right| {
				right.score.total_cmp(&left.score).then_with(|| left.tag_id.cmp(&right.tag_id))
			});

			Ok(interests)
		})
	}

	fn fetch_tag_name<'a>(&'a self, tag_id: i64) -> BoxFuture<'a, Result<Option<String>>> {
		Box::pin(async move {
			self.check_available()?;

			Ok(self.tags.get(&tag_id).cloned())
		})
	}
}

#[cfg(test)]
mod tests {
	use mento_domain::ActivityType;

	use super::*;
	use crate::fixtures::{ActivityBuilder, activity};

	fn run<T>(future: BoxFuture<'_, T>) -> T {
		tokio::runtime::Builder::new_current_thread()
			.build()
			.expect("Failed to build runtime.")
			.block_on(future)
	}

	#[test]
	fn pages_newest_first_with_filters() {
		let catalog = MemoryCatalog::new().with_activities([
			activity(1, "Rust 스터디", ActivityType::Study),
			activity(2, "해커톤", ActivityType::Contest),
			ActivityBuilder::new(3, "rust 캠프", ActivityType::Study).campus().build(),
		]);
		let filter = CandidateFilter { text: Some("RUST".to_string()), ..Default::default() };
		let page = run(catalog.fetch_candidates(&filter, PageRequest::first(1)))
			.expect("fetch failed");

		assert_eq!(page.total, 2);
		assert_eq!(page.items.len(), 1);
		assert_eq!(page.items[0].activity_id, 3);

		let filter = CandidateFilter { campus: Some(false), ..Default::default() };
		let page = run(catalog.fetch_candidates(&filter, PageRequest::first(10)))
			.expect("fetch failed");
		let ids: Vec<i64> = page.items.iter().map(|item| item.activity_id).collect();

		assert_eq!(ids, vec![2, 1]);
	}

	#[test]
	fn filters_on_status() {
		let catalog = MemoryCatalog::new().with_activities([
			ActivityBuilder::new(1, "모집 중", ActivityType::Job).status("OPEN").build(),
			ActivityBuilder::new(2, "마감", ActivityType::Job).status("CLOSED").build(),
			activity(3, "상태 없음", ActivityType::Job),
		]);
		let filter = CandidateFilter { status: Some("OPEN".to_string()), ..Default::default() };
		let page = run(catalog.fetch_candidates(&filter, PageRequest::first(10)))
			.expect("fetch failed");

		assert_eq!(page.total, 1);
		assert_eq!(page.items[0].activity_id, 1);
	}

	#[test]
	fn unavailable_catalog_fails_every_call() {
		let catalog = MemoryCatalog::unavailable();

		assert!(run(catalog.user_exists(1)).is_err());
		assert!(run(catalog.fetch_tag_name(1)).is_err());
	}
}
