pub mod sheets;
pub mod topics;

use axum::{
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Json, Response},
  routing::{get, post},
  Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::engine::SheetError;
use crate::sheets::InvalidFilter;
use crate::state::AppState;

pub use sheets::{filter_sheets, sheet_types};
pub use topics::{mark_revision, revision_list, select_topic};

/// Build the application router.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", get(index))
    .route("/sheet-types", get(sheet_types))
    .route("/filter-sheets", post(filter_sheets))
    .route("/select-topic", post(select_topic))
    .route("/mark-revision", post(mark_revision))
    .route("/revision-list/{sheet_type}", get(revision_list))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}

pub async fn index() -> Json<serde_json::Value> {
  Json(json!({
    "status": "success",
    "message": "Sheet roulette is running",
  }))
}

/// Error response rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
  pub status: StatusCode,
  pub message: String,
}

impl ApiError {
  pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status,
      message: message.into(),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status, Json(json!({"error": self.message}))).into_response()
  }
}

impl From<SheetError> for ApiError {
  fn from(e: SheetError) -> Self {
    let status = match e {
      SheetError::UnknownSheetType(_) => StatusCode::BAD_REQUEST,
      SheetError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
    };
    ApiError::new(status, e.user_message())
  }
}

impl From<InvalidFilter> for ApiError {
  fn from(e: InvalidFilter) -> Self {
    let status = match e {
      InvalidFilter::NoMatches { .. } => StatusCode::NOT_FOUND,
      InvalidFilter::IndexOutOfRange { .. } => StatusCode::BAD_REQUEST,
    };
    ApiError::new(status, e.to_string())
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
  }
}
