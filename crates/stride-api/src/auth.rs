//! Handlers for `/signup` and `/signin`, plus the argon2 helpers backing
//! them.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/signup` | Body: `{"name","email","password"}` |
//! | `POST` | `/signin` | Body: `{"email","password"}` |
//!
//! Both return `{"user": {...}, "token": "..."}`. Tokens are opaque UUIDs,
//! persisted on issuance; the streak routes identify users by explicit
//! `userId`, so no route requires a token.

use std::sync::Arc;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{Json, extract::State};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use stride_core::{
  store::StreakStore,
  user::{NewUser, User},
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── Password helpers ────────────────────────────────────────────────────────

/// Hash a password into an argon2 PHC string.
fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| ApiError::Credential(e.to_string()))
}

/// Verify a presented password against a stored PHC string.
fn verify_password(hash: &str, password: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(hash) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

fn issue_token() -> String {
  Uuid::new_v4().to_string()
}

// ─── Response shape ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AuthResponse {
  pub user:  User,
  pub token: String,
}

// ─── Signup ──────────────────────────────────────────────────────────────────

/// All fields optional so a missing field yields the contract's 400 body
/// rather than a deserialization reject.
#[derive(Debug, Deserialize)]
pub struct SignupBody {
  pub name:     Option<String>,
  pub email:    Option<String>,
  pub password: Option<String>,
}

/// `POST /signup`
pub async fn signup<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<SignupBody>,
) -> Result<Json<AuthResponse>, ApiError>
where
  S: StreakStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let (Some(name), Some(email), Some(password)) =
    (body.name, body.email, body.password)
  else {
    return Err(ApiError::BadRequest(
      "name, email and password are required".to_owned(),
    ));
  };

  let input = NewUser {
    name,
    email,
    password_hash: hash_password(&password)?,
  };

  let user = store
    .create_user(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| {
      ApiError::Conflict("Email already registered".to_owned())
    })?;

  let token = issue_token();
  store
    .record_session(user.id, token.clone())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(user_id = user.id, "account created");
  Ok(Json(AuthResponse { user, token }))
}

// ─── Signin ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SigninBody {
  pub email:    Option<String>,
  pub password: Option<String>,
}

/// `POST /signin`
///
/// Unknown email and wrong password produce the same message, so the
/// response does not reveal which one was wrong.
pub async fn signin<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<SigninBody>,
) -> Result<Json<AuthResponse>, ApiError>
where
  S: StreakStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let (Some(email), Some(password)) = (body.email, body.password) else {
    return Err(ApiError::BadRequest(
      "email and password are required".to_owned(),
    ));
  };

  let invalid =
    || ApiError::BadRequest("Invalid email or password".to_owned());

  let record = store
    .user_by_email(&email)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(invalid)?;

  if !verify_password(&record.password_hash, &password) {
    return Err(invalid());
  }

  let token = issue_token();
  store
    .record_session(record.user.id, token.clone())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(AuthResponse { user: record.user, token }))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_verify_round_trip() {
    let hash = hash_password("hunter2").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password(&hash, "hunter2"));
    assert!(!verify_password(&hash, "hunter3"));
  }

  #[test]
  fn verify_rejects_malformed_hash() {
    assert!(!verify_password("not-a-phc-string", "hunter2"));
  }
}
