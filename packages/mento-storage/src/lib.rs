pub mod catalog;
pub mod db;
pub mod models;
pub mod queries;
pub mod schema;

mod error;

pub use catalog::{BoxFuture, CandidateFilter, Catalog, Page, PageRequest};
pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
