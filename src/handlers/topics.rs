use axum::{
  extract::{rejection::JsonRejection, Path, State},
  http::StatusCode,
  response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::ApiError;
use crate::engine::{SelectedTopic, Selection};
use crate::sheets::{self, SelectionHints};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MarkRevisionRequest {
  pub sheet_type: String,
  #[serde(default)]
  pub topic_id: String,
}

#[derive(Debug, Serialize)]
pub struct RevisionListResponse {
  pub revision_ids: Vec<String>,
}

/// Resolve the hints to one sheet and hand out a random unsolved topic.
pub async fn select_topic(
  State(state): State<AppState>,
  payload: Result<Json<SelectionHints>, JsonRejection>,
) -> Result<Json<SelectedTopic>, ApiError> {
  let Json(hints) = payload?;
  let sheet_type = hints.resolve(&sheets::list_sheet_types())?;
  let handler = state.factory.create(sheet_type)?;

  match handler.select_topic()? {
    Selection::Selected(topic) => Ok(Json(topic)),
    Selection::NoTopicsRemaining => Err(ApiError::new(
      StatusCode::NOT_FOUND,
      format!("No unsolved topics remaining for {}", sheet_type),
    )),
  }
}

pub async fn mark_revision(
  State(state): State<AppState>,
  payload: Result<Json<MarkRevisionRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
  let Json(request) = payload?;
  let handler = state.factory.create(&request.sheet_type)?;

  if !handler.mark_for_revision(&request.topic_id)? {
    return Err(ApiError::new(StatusCode::BAD_REQUEST, "A topic_id is required"));
  }

  Ok(Json(json!({
    "status": "success",
    "message": format!("Topic {} marked for revision", request.topic_id.trim()),
  })))
}

pub async fn revision_list(
  State(state): State<AppState>,
  Path(sheet_type): Path<String>,
) -> Result<Json<RevisionListResponse>, ApiError> {
  let handler = state.factory.create(&sheet_type)?;
  Ok(Json(RevisionListResponse {
    revision_ids: handler.revision_list()?,
  }))
}
