//! Account types for the credential service.
//!
//! Password hashes never appear in `User`, the only shape that crosses the
//! API boundary. `UserRecord` exists solely so the signin path can verify a
//! presented password against the stored hash.

use serde::{Deserialize, Serialize};

/// A registered account, as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id:    i64,
  pub name:  String,
  pub email: String,
}

/// Input for registration. `password_hash` is an argon2 PHC string; hashing
/// happens above the store layer.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name:          String,
  pub email:         String,
  pub password_hash: String,
}

/// A stored account row including its credential hash.
#[derive(Debug, Clone)]
pub struct UserRecord {
  pub user:          User,
  pub password_hash: String,
}
