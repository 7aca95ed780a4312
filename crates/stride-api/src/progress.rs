//! Handlers for the progress ledger.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/streak/:id/progress` | `?userId` required; optional `start`, `end` |
//! | `POST`   | `/streak/:id/progress` | Body: `{"userId", "date"?}`; date defaults to today |
//! | `DELETE` | `/streak/:id/progress` | `?userId,date` required |
//!
//! Marking done and deleting are both idempotent; repeating either call
//! leaves the ledger in the same state and returns the same body.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use stride_core::{progress::DateRange, store::StreakStore};

use crate::error::ApiError;

fn today() -> NaiveDate {
  Utc::now().date_naive()
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  pub user_id: Option<i64>,
  pub start:   Option<NaiveDate>,
  pub end:     Option<NaiveDate>,
}

/// `GET /streak/:id/progress?userId=9[&start=..][&end=..]`
///
/// With no range, returns the trailing 90-day window ending today. A bound
/// supplied alone replaces only its side of that window. Dates come back
/// ascending.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Path(streak_id): Path<i64>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<NaiveDate>>, ApiError>
where
  S: StreakStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let user_id = params
    .user_id
    .ok_or_else(|| ApiError::BadRequest("userId is required".to_owned()))?;

  let default = DateRange::trailing_90_days(today());
  let range = DateRange {
    start: params.start.unwrap_or(default.start),
    end:   params.end.unwrap_or(default.end),
  };

  let dates = store
    .progress_dates(user_id, streak_id, range)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(dates))
}

// ─── Mark done ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkBody {
  pub user_id: Option<i64>,
  pub date:    Option<NaiveDate>,
}

/// `POST /streak/:id/progress` — body: `{"userId": 9, "date": "2025-10-01"}`.
///
/// `date` defaults to today. Never raises a uniqueness conflict; an existing
/// entry is updated in place.
pub async fn mark<S>(
  State(store): State<Arc<S>>,
  Path(streak_id): Path<i64>,
  Json(body): Json<MarkBody>,
) -> Result<Json<Value>, ApiError>
where
  S: StreakStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let user_id = body
    .user_id
    .ok_or_else(|| ApiError::BadRequest("userId is required".to_owned()))?;
  let date = body.date.unwrap_or_else(today);

  store
    .mark_done(user_id, streak_id, date)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(json!({ "message": "Marked done", "date": date })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParams {
  pub user_id: Option<i64>,
  pub date:    Option<NaiveDate>,
}

/// `DELETE /streak/:id/progress?userId=9&date=2025-10-01`
///
/// Succeeds whether or not the entry existed.
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(streak_id): Path<i64>,
  Query(params): Query<DeleteParams>,
) -> Result<Json<Value>, ApiError>
where
  S: StreakStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let user_id = params
    .user_id
    .ok_or_else(|| ApiError::BadRequest("userId is required".to_owned()))?;
  let date = params
    .date
    .ok_or_else(|| ApiError::BadRequest("date is required".to_owned()))?;

  store
    .delete_progress(user_id, streak_id, date)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(json!({ "success": true })))
}
