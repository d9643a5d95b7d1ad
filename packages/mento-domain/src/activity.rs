use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
	Study,
	Contest,
	Job,
	Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownActivityType(pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTag {
	pub tag_id: i64,
	pub name: String,
}

/// A catalog item as seen by the ranking engine. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
	pub activity_id: i64,
	pub title: String,
	pub summary: Option<String>,
	pub content: Option<String>,
	#[serde(rename = "type")]
	pub activity_type: ActivityType,
	pub is_campus: bool,
	pub status: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	pub tags: Vec<ActivityTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInterest {
	pub user_id: i64,
	pub tag_id: i64,
	/// Affinity strength; higher is stronger.
	pub score: f64,
}

impl ActivityType {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Study => "STUDY",
			Self::Contest => "CONTEST",
			Self::Job => "JOB",
			Self::Other => "OTHER",
		}
	}
}

impl fmt::Display for ActivityType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ActivityType {
	type Err = UnknownActivityType;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_uppercase().as_str() {
			"STUDY" => Ok(Self::Study),
			"CONTEST" => Ok(Self::Contest),
			"JOB" => Ok(Self::Job),
			"OTHER" => Ok(Self::Other),
			_ => Err(UnknownActivityType(value.to_string())),
		}
	}
}

impl fmt::Display for UnknownActivityType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Unknown activity type {:?}.", self.0)
	}
}

impl std::error::Error for UnknownActivityType {}

impl Activity {
	pub fn has_tags(&self) -> bool {
		!self.tags.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_activity_type_case_insensitively() {
		assert_eq!("study".parse::<ActivityType>(), Ok(ActivityType::Study));
		assert_eq!(" Contest ".parse::<ActivityType>(), Ok(ActivityType::Contest));
		assert_eq!("JOB".parse::<ActivityType>(), Ok(ActivityType::Job));
		assert!("seminar".parse::<ActivityType>().is_err());
	}

	#[test]
	fn serializes_type_in_screaming_case() {
		let json = serde_json::to_value(ActivityType::Contest).expect("serialize failed");

		assert_eq!(json, serde_json::json!("CONTEST"));
	}
}
