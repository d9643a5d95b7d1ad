//! Read access to the activity catalog and user interests.

use std::{future::Future, pin::Pin};

use mento_domain::{Activity, ActivityType, UserInterest};

use crate::{Result, db::Db, queries};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Filters applied to a candidate page. `None` means unfiltered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateFilter {
	/// Case-insensitive title substring.
	pub text: Option<String>,
	pub activity_type: Option<ActivityType>,
	pub campus: Option<bool>,
	pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
	/// Zero-based page index.
	pub page: u32,
	pub size: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
	pub items: Vec<T>,
	/// Total matches across all pages.
	pub total: u64,
}

/// Candidate source for the ranking engine.
///
/// Candidate pages are ordered newest first, ties broken by descending activity id.
pub trait Catalog
where
	Self: Send + Sync,
{
	fn fetch_candidates<'a>(
		&'a self,
		filter: &'a CandidateFilter,
		page: PageRequest,
	) -> BoxFuture<'a, Result<Page<Activity>>>;

	fn fetch_activity<'a>(&'a self, activity_id: i64) -> BoxFuture<'a, Result<Option<Activity>>>;

	fn user_exists<'a>(&'a self, user_id: i64) -> BoxFuture<'a, Result<bool>>;

	fn fetch_user_interests<'a>(&'a self, user_id: i64)
	-> BoxFuture<'a, Result<Vec<UserInterest>>>;

	fn fetch_tag_name<'a>(&'a self, tag_id: i64) -> BoxFuture<'a, Result<Option<String>>>;
}

impl PageRequest {
	pub fn first(size: u32) -> Self {
		Self { page: 0, size }
	}

	pub fn offset(self) -> i64 {
		i64::from(self.page) * i64::from(self.size)
	}
}

impl Catalog for Db {
	fn fetch_candidates<'a>(
		&'a self,
		filter: &'a CandidateFilter,
		page: PageRequest,
	) -> BoxFuture<'a, Result<Page<Activity>>> {
		Box::pin(queries::fetch_candidates(self, filter, page))
	}

	fn fetch_activity<'a>(&'a self, activity_id: i64) -> BoxFuture<'a, Result<Option<Activity>>> {
		Box::pin(queries::fetch_activity(self, activity_id))
	}

	fn user_exists<'a>(&'a self, user_id: i64) -> BoxFuture<'a, Result<bool>> {
		Box::pin(queries::user_exists(self, user_id))
	}

	fn fetch_user_interests<'a>(
		&'a self,
		user_id: i64,
	) -> BoxFuture<'a, Result<Vec<UserInterest>>> {
		Box::pin(queries::fetch_user_interests(self, user_id))
	}

	fn fetch_tag_name<'a>(&'a self, tag_id: i64) -> BoxFuture<'a, Result<Option<String>>> {
		Box::pin(queries::fetch_tag_name(self, tag_id))
	}
}
