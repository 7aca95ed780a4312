//! Handlers for the streak catalog.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/streaks` | Optional `?offset,limit,difficulty` |
//! | `POST` | `/streaks` | Body: [`CreateBody`]; returns 201 + stored streak |
//! | `GET`  | `/streak/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use stride_core::{
  store::{StreakQuery, StreakStore},
  streak::{Difficulty, NewStreak, Streak},
};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub offset:     Option<usize>,
  pub limit:      Option<usize>,
  pub difficulty: Option<Difficulty>,
}

/// `GET /streaks[?offset=..][&limit=..][&difficulty=easy|medium|hard]`
///
/// Ordered by descending participant count. Empty result is a 200 with `[]`.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Streak>>, ApiError>
where
  S: StreakStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = StreakQuery {
    difficulty: params.difficulty,
    limit:      params.limit,
    offset:     params.offset,
  };

  let streaks = store
    .list_streaks(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(streaks))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /streak/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Streak>, ApiError>
where
  S: StreakStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let streak = store
    .get_streak(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("Streak not found".to_owned()))?;
  Ok(Json(streak))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /streaks`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub title:             String,
  pub author:            String,
  pub difficulty:        Difficulty,
  pub description:       String,
  pub emoji:             Option<String>,
  pub participant_count: Option<i64>,
}

impl From<CreateBody> for NewStreak {
  fn from(b: CreateBody) -> Self {
    let mut input = NewStreak::new(b.title, b.author, b.difficulty, b.description);
    if let Some(emoji) = b.emoji {
      input.emoji = emoji;
    }
    input.participant_count = b.participant_count.unwrap_or(0);
    input
  }
}

/// `POST /streaks` — returns 201 + the stored [`Streak`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StreakStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let streak = store
    .create_streak(NewStreak::from(body))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(streak)))
}
