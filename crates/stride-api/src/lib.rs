//! JSON REST API for Stride.
//!
//! Exposes an axum [`Router`] backed by any [`stride_core::store::StreakStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = stride_api::api_router(store.clone());
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod error;
pub mod membership;
pub mod progress;
pub mod streaks;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use stride_core::store::StreakStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type. Path shapes (`/streaks` vs `/streak/:id`) follow
/// the pre-existing wire contract.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: StreakStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Credentials
    .route("/signup", post(auth::signup::<S>))
    .route("/signin", post(auth::signin::<S>))
    // Streak catalog
    .route("/streaks", get(streaks::list::<S>).post(streaks::create::<S>))
    .route("/streak/{id}", get(streaks::get_one::<S>))
    // Membership
    .route("/streak/{id}/join", post(membership::join::<S>))
    .route("/user/{user_id}/streaks", get(membership::user_streaks::<S>))
    // Progress ledger
    .route(
      "/streak/{id}/progress",
      get(progress::list::<S>)
        .post(progress::mark::<S>)
        .delete(progress::delete::<S>),
    )
    .with_state(store)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use stride_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let req = builder.body(body).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  async fn create_streak(app: &Router, title: &str, difficulty: &str) -> i64 {
    let (status, body) = send(
      app,
      "POST",
      "/streaks",
      Some(json!({
        "title": title,
        "author": "tester",
        "difficulty": difficulty,
        "description": "test streak",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
  }

  // ── Credentials ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn signup_returns_user_and_token() {
    let app = app().await;
    let (status, body) = send(
      &app,
      "POST",
      "/signup",
      Some(json!({
        "name": "Alice",
        "email": "alice@example.com",
        "password": "hunter2",
      })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["user"]["id"].is_i64());
    assert!(!body["token"].as_str().unwrap().is_empty());
    // The hash must never cross the boundary.
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());
  }

  #[tokio::test]
  async fn signup_missing_field_is_400() {
    let app = app().await;
    let (status, body) = send(
      &app,
      "POST",
      "/signup",
      Some(json!({ "name": "Alice", "email": "alice@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "name, email and password are required");
  }

  #[tokio::test]
  async fn signup_duplicate_email_is_400() {
    let app = app().await;
    let payload = json!({
      "name": "Alice",
      "email": "alice@example.com",
      "password": "hunter2",
    });

    let (first, _) = send(&app, "POST", "/signup", Some(payload.clone())).await;
    assert_eq!(first, StatusCode::OK);

    let (second, body) = send(&app, "POST", "/signup", Some(payload)).await;
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already registered");
  }

  #[tokio::test]
  async fn signin_round_trip() {
    let app = app().await;
    send(
      &app,
      "POST",
      "/signup",
      Some(json!({
        "name": "Bob",
        "email": "bob@example.com",
        "password": "correct horse",
      })),
    )
    .await;

    let (status, body) = send(
      &app,
      "POST",
      "/signin",
      Some(json!({ "email": "bob@example.com", "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Bob");
    assert!(!body["token"].as_str().unwrap().is_empty());
  }

  #[tokio::test]
  async fn signin_wrong_password_is_400() {
    let app = app().await;
    send(
      &app,
      "POST",
      "/signup",
      Some(json!({
        "name": "Bob",
        "email": "bob@example.com",
        "password": "correct horse",
      })),
    )
    .await;

    let (status, body) = send(
      &app,
      "POST",
      "/signin",
      Some(json!({ "email": "bob@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");
  }

  #[tokio::test]
  async fn signin_unknown_email_same_message() {
    let app = app().await;
    let (status, body) = send(
      &app,
      "POST",
      "/signin",
      Some(json!({ "email": "ghost@example.com", "password": "whatever" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");
  }

  // ── Streak catalog ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_streak_returns_201_with_defaults() {
    let app = app().await;
    let (status, body) = send(
      &app,
      "POST",
      "/streaks",
      Some(json!({
        "title": "No sugar",
        "author": "nutritionist",
        "difficulty": "medium",
        "description": "skip added sugar",
      })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "No sugar");
    assert_eq!(body["difficulty"], "medium");
    assert_eq!(body["participantCount"], 0);
    assert_eq!(body["emoji"], "🔥");
    assert!(body["createdAt"].is_string());
  }

  #[tokio::test]
  async fn get_streak_missing_is_404() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/streak/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Streak not found");
  }

  #[tokio::test]
  async fn list_streaks_filters_and_orders() {
    let app = app().await;
    let easy = create_streak(&app, "Walk", "easy").await;
    let hard = create_streak(&app, "Cold showers", "hard").await;
    create_streak(&app, "Marathon prep", "hard").await;

    // Make "Cold showers" the most popular hard streak.
    for user_id in 1..=2 {
      send(
        &app,
        "POST",
        &format!("/streak/{hard}/join"),
        Some(json!({ "userId": user_id })),
      )
      .await;
    }

    let (status, body) = send(&app, "GET", "/streaks?difficulty=hard", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"].as_i64().unwrap(), hard);
    assert!(listed.iter().all(|s| s["difficulty"] == "hard"));
    assert!(listed.iter().all(|s| s["id"].as_i64().unwrap() != easy));
  }

  #[tokio::test]
  async fn list_streaks_paginates() {
    let app = app().await;
    for i in 0..4 {
      create_streak(&app, &format!("Streak {i}"), "easy").await;
    }

    let (status, body) = send(&app, "GET", "/streaks?limit=2&offset=3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
  }

  // ── Membership ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn join_then_repeat_join() {
    let app = app().await;
    let id = create_streak(&app, "Read 10 pages", "easy").await;

    let (status, body) = send(
      &app,
      "POST",
      &format!("/streak/{id}/join"),
      Some(json!({ "userId": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Streak joined successfully");

    let (status, body) = send(
      &app,
      "POST",
      &format!("/streak/{id}/join"),
      Some(json!({ "userId": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already joined this streak");

    // Counter increased by exactly 1 total, not 2.
    let (_, streak) = send(&app, "GET", &format!("/streak/{id}"), None).await;
    assert_eq!(streak["participantCount"], 1);
  }

  #[tokio::test]
  async fn join_missing_user_id_is_400() {
    let app = app().await;
    let id = create_streak(&app, "Read 10 pages", "easy").await;

    let (status, body) = send(
      &app,
      "POST",
      &format!("/streak/{id}/join"),
      Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "userId is required");
  }

  #[tokio::test]
  async fn join_missing_streak_is_404() {
    let app = app().await;
    let (status, body) = send(
      &app,
      "POST",
      "/streak/424242/join",
      Some(json!({ "userId": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Streak not found");
  }

  #[tokio::test]
  async fn user_streaks_newest_join_first() {
    let app = app().await;
    let first = create_streak(&app, "First", "easy").await;
    let second = create_streak(&app, "Second", "easy").await;

    for id in [first, second] {
      send(
        &app,
        "POST",
        &format!("/streak/{id}/join"),
        Some(json!({ "userId": 7 })),
      )
      .await;
    }

    let (status, body) = send(&app, "GET", "/user/7/streaks", None).await;
    assert_eq!(status, StatusCode::OK);
    let joined = body.as_array().unwrap();
    assert_eq!(joined.len(), 2);
    assert_eq!(joined[0]["id"].as_i64().unwrap(), second);
    assert_eq!(joined[1]["id"].as_i64().unwrap(), first);
    assert!(joined[0]["joinedAt"].is_string());
  }

  // ── Progress ledger ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn mark_done_twice_yields_one_entry() {
    let app = app().await;
    let id = create_streak(&app, "Meditate", "easy").await;
    let payload = json!({ "userId": 9, "date": "2025-10-01" });

    for _ in 0..2 {
      let (status, body) = send(
        &app,
        "POST",
        &format!("/streak/{id}/progress"),
        Some(payload.clone()),
      )
      .await;
      assert_eq!(status, StatusCode::OK);
      assert_eq!(body["message"], "Marked done");
      assert_eq!(body["date"], "2025-10-01");
    }

    let (status, body) = send(
      &app,
      "GET",
      &format!("/streak/{id}/progress?userId=9&start=2025-10-01&end=2025-10-01"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["2025-10-01"]));
  }

  #[tokio::test]
  async fn mark_done_defaults_to_today() {
    let app = app().await;
    let id = create_streak(&app, "Meditate", "easy").await;

    let (status, body) = send(
      &app,
      "POST",
      &format!("/streak/{id}/progress"),
      Some(json!({ "userId": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let marked = body["date"].as_str().unwrap().to_owned();

    // The default (rangeless) query covers today, so the entry shows up.
    let (_, dates) = send(
      &app,
      "GET",
      &format!("/streak/{id}/progress?userId=9"),
      None,
    )
    .await;
    assert_eq!(dates, json!([marked]));
  }

  #[tokio::test]
  async fn progress_requires_user_id() {
    let app = app().await;
    let id = create_streak(&app, "Meditate", "easy").await;

    let (status, body) =
      send(&app, "GET", &format!("/streak/{id}/progress"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "userId is required");

    let (status, _) = send(
      &app,
      "POST",
      &format!("/streak/{id}/progress"),
      Some(json!({ "date": "2025-10-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn progress_range_is_inclusive_and_ascending() {
    let app = app().await;
    let id = create_streak(&app, "Meditate", "easy").await;

    for d in ["2025-09-03", "2025-09-01", "2025-08-30", "2025-09-05"] {
      send(
        &app,
        "POST",
        &format!("/streak/{id}/progress"),
        Some(json!({ "userId": 9, "date": d })),
      )
      .await;
    }

    let (status, body) = send(
      &app,
      "GET",
      &format!("/streak/{id}/progress?userId=9&start=2025-09-01&end=2025-09-05"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["2025-09-01", "2025-09-03", "2025-09-05"]));
  }

  #[tokio::test]
  async fn rangeless_progress_excludes_old_entries() {
    let app = app().await;
    let id = create_streak(&app, "Meditate", "easy").await;

    let today = chrono::Utc::now().date_naive();
    let today_str = today.format("%Y-%m-%d").to_string();
    let old = (today - chrono::Duration::days(120))
      .format("%Y-%m-%d")
      .to_string();
    for date in [old.as_str(), today_str.as_str()] {
      send(
        &app,
        "POST",
        &format!("/streak/{id}/progress"),
        Some(json!({ "userId": 9, "date": date })),
      )
      .await;
    }

    // Only the entry inside the trailing 90-day window comes back.
    let (_, dates) = send(
      &app,
      "GET",
      &format!("/streak/{id}/progress?userId=9"),
      None,
    )
    .await;
    assert_eq!(dates, json!([today_str]));
  }

  #[tokio::test]
  async fn delete_progress_is_idempotent() {
    let app = app().await;
    let id = create_streak(&app, "Meditate", "easy").await;

    send(
      &app,
      "POST",
      &format!("/streak/{id}/progress"),
      Some(json!({ "userId": 9, "date": "2025-10-01" })),
    )
    .await;

    for _ in 0..2 {
      let (status, body) = send(
        &app,
        "DELETE",
        &format!("/streak/{id}/progress?userId=9&date=2025-10-01"),
        None,
      )
      .await;
      assert_eq!(status, StatusCode::OK);
      assert_eq!(body, json!({ "success": true }));
    }

    let (_, dates) = send(
      &app,
      "GET",
      &format!("/streak/{id}/progress?userId=9&start=2025-10-01&end=2025-10-01"),
      None,
    )
    .await;
    assert_eq!(dates, json!([]));
  }

  #[tokio::test]
  async fn delete_progress_requires_date() {
    let app = app().await;
    let id = create_streak(&app, "Meditate", "easy").await;

    let (status, body) = send(
      &app,
      "DELETE",
      &format!("/streak/{id}/progress?userId=9"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "date is required");
  }
}
