use axum::{
	Json, Router,
	extract::{
		Path, Query, State,
		rejection::{JsonRejection, PathRejection, QueryRejection},
	},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use mento_domain::{Activity, ActivityType};
use mento_service::{
	Error, RecommendRequest, ScoredRecommendRequest, ScoredRecommendation, SearchHit,
	SearchRequest, SimilarRequest, TrendingRequest,
};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecommendQuery {
	user_id: i64,
	limit: Option<u32>,
	#[serde(rename = "type")]
	activity_type: Option<String>,
	campus_only: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ScoredRecommendQuery {
	user_id: i64,
	limit: Option<u32>,
	#[serde(rename = "type")]
	activity_type: Option<String>,
	campus_only: Option<bool>,
	target_role: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TrendingQuery {
	limit: Option<u32>,
	#[serde(rename = "type")]
	activity_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LimitQuery {
	limit: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ItemsResponse<T> {
	items: Vec<T>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}

	fn invalid_request(message: impl Into<String>, fields: Option<Vec<String>>) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message, fields)
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } => Self::invalid_request(message, None),
			Error::Provider { message } => {
				tracing::error!(error = %message, "Provider error.");

				Self::new(StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", message, None)
			},
			Error::Storage { message } => {
				tracing::error!(error = %message, "Storage error.");

				Self::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"STORAGE_ERROR",
					"Storage is unavailable.",
					None,
				)
			},
		}
	}
}

impl From<QueryRejection> for ApiError {
	fn from(err: QueryRejection) -> Self {
		Self::invalid_request(err.body_text(), None)
	}
}

impl From<JsonRejection> for ApiError {
	fn from(err: JsonRejection) -> Self {
		Self::invalid_request(err.body_text(), None)
	}
}

impl From<PathRejection> for ApiError {
	fn from(err: PathRejection) -> Self {
		Self::invalid_request(err.body_text(), Some(vec!["activity_id".to_string()]))
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/recommendations", get(recommend))
		.route("/v1/recommendations/scored", get(recommend_scored))
		.route("/v1/search", post(search))
		.route("/v1/activities/trending", get(trending))
		.route("/v1/activities/{activity_id}/similar", get(similar))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn recommend(
	State(state): State<AppState>,
	query: Result<Query<RecommendQuery>, QueryRejection>,
) -> Result<Json<ItemsResponse<Activity>>, ApiError> {
	let Query(query) = query?;
	let items = state
		.service
		.recommend(RecommendRequest {
			user_id: query.user_id,
			limit: query.limit,
			activity_type: parse_activity_type(query.activity_type.as_deref())?,
			campus_only: query.campus_only,
		})
		.await?;

	Ok(Json(ItemsResponse { items }))
}

async fn recommend_scored(
	State(state): State<AppState>,
	query: Result<Query<ScoredRecommendQuery>, QueryRejection>,
) -> Result<Json<ItemsResponse<ScoredRecommendation>>, ApiError> {
	let Query(query) = query?;
	let items = state
		.service
		.recommend_with_scores(ScoredRecommendRequest {
			user_id: query.user_id,
			limit: query.limit,
			activity_type: parse_activity_type(query.activity_type.as_deref())?,
			campus_only: query.campus_only,
			target_role: query.target_role,
		})
		.await?;

	Ok(Json(ItemsResponse { items }))
}

async fn search(
	State(state): State<AppState>,
	payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<ItemsResponse<SearchHit>>, ApiError> {
	let Json(payload) = payload?;
	let items = state.service.search(payload).await?;

	Ok(Json(ItemsResponse { items }))
}

async fn trending(
	State(state): State<AppState>,
	query: Result<Query<TrendingQuery>, QueryRejection>,
) -> Result<Json<ItemsResponse<Activity>>, ApiError> {
	let Query(query) = query?;
	let items = state
		.service
		.trending(TrendingRequest {
			limit: query.limit,
			activity_type: parse_activity_type(query.activity_type.as_deref())?,
		})
		.await?;

	Ok(Json(ItemsResponse { items }))
}

async fn similar(
	State(state): State<AppState>,
	activity_id: Result<Path<i64>, PathRejection>,
	query: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<ItemsResponse<Activity>>, ApiError> {
	let Path(activity_id) = activity_id?;
	let Query(query) = query?;
	let items =
		state.service.similar_to(SimilarRequest { activity_id, limit: query.limit }).await?;

	Ok(Json(ItemsResponse { items }))
}

/// Blank means unfiltered; anything else must name a known type.
fn parse_activity_type(value: Option<&str>) -> Result<Option<ActivityType>, ApiError> {
	match value.map(str::trim).filter(|value| !value.is_empty()) {
		Some(value) => value
			.parse::<ActivityType>()
			.map(Some)
			.map_err(|err| {
				ApiError::invalid_request(err.to_string(), Some(vec!["type".to_string()]))
			}),
		None => Ok(None),
	}
}
