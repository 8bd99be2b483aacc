use axum::{extract::rejection::JsonRejection, response::Json};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::sheets::{self, SheetFilter};

#[derive(Debug, Serialize)]
pub struct SheetTypesResponse {
  pub sheet_types: Vec<&'static str>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterRequest {
  #[serde(default)]
  pub filter_text: Option<String>,
}

pub async fn sheet_types() -> Json<SheetTypesResponse> {
  Json(SheetTypesResponse {
    sheet_types: sheets::list_sheet_types(),
  })
}

/// Narrow the sheet list by text. No matches is an empty list here, not an
/// error.
pub async fn filter_sheets(
  payload: Result<Json<FilterRequest>, JsonRejection>,
) -> Result<Json<SheetTypesResponse>, ApiError> {
  let Json(request) = payload?;
  let all = sheets::list_sheet_types();
  let filter = match request.filter_text.as_deref().map(str::trim) {
    Some(text) if !text.is_empty() => SheetFilter::Text(text.to_string()),
    _ => SheetFilter::All,
  };

  let sheet_types = sheets::filter_sheet_types(&all, &filter).unwrap_or_else(|e| {
    tracing::debug!("{}", e);
    Vec::new()
  });
  Ok(Json(SheetTypesResponse { sheet_types }))
}
