pub mod activity;
pub mod affinity;
pub mod keyword;
pub mod score;
pub mod similarity;
pub mod terms;
pub mod text;

pub use activity::{Activity, ActivityTag, ActivityType, UserInterest};
