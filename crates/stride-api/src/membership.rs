//! Handlers for streak membership.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/streak/:id/join` | Body: `{"userId": 9}` |
//! | `GET`  | `/user/:user_id/streaks` | Joined streaks, newest join first |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use stride_core::{
  membership::{JoinOutcome, JoinedStreak},
  store::StreakStore,
};

use crate::error::ApiError;

// ─── Join ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinBody {
  pub user_id: Option<i64>,
}

/// `POST /streak/:id/join`
///
/// The store resolves the outcome atomically; the handler only maps it onto
/// the wire contract. A repeat join is a 400, per the pre-existing contract.
pub async fn join<S>(
  State(store): State<Arc<S>>,
  Path(streak_id): Path<i64>,
  Json(body): Json<JoinBody>,
) -> Result<Json<Value>, ApiError>
where
  S: StreakStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let user_id = body
    .user_id
    .ok_or_else(|| ApiError::BadRequest("userId is required".to_owned()))?;

  let outcome = store
    .join_streak(user_id, streak_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  match outcome {
    JoinOutcome::Joined => {
      tracing::info!(user_id, streak_id, "streak joined");
      Ok(Json(json!({ "message": "Streak joined successfully" })))
    }
    JoinOutcome::AlreadyJoined => Err(ApiError::Conflict(
      "User already joined this streak".to_owned(),
    )),
    JoinOutcome::StreakNotFound => {
      Err(ApiError::NotFound("Streak not found".to_owned()))
    }
  }
}

// ─── User streaks ─────────────────────────────────────────────────────────────

/// `GET /user/:user_id/streaks`
pub async fn user_streaks<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<i64>,
) -> Result<Json<Vec<JoinedStreak>>, ApiError>
where
  S: StreakStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let joined = store
    .user_streaks(user_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(joined))
}
