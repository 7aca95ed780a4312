//! The `StreakStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `stride-store-sqlite`).
//! The HTTP layer (`stride-api`) depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  membership::{JoinOutcome, JoinedStreak},
  progress::DateRange,
  streak::{Difficulty, NewStreak, Streak},
  user::{NewUser, User, UserRecord},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`StreakStore::list_streaks`].
#[derive(Debug, Clone, Default)]
pub struct StreakQuery {
  /// Restrict to a single difficulty tier.
  pub difficulty: Option<Difficulty>,
  /// Page size; backends default to 50.
  pub limit:      Option<usize>,
  pub offset:     Option<usize>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Stride storage backend.
///
/// The store is the single point of serialization for conflicting writes:
/// join uniqueness and the participant counter are enforced there, inside
/// one transaction, never by a handler-level check-then-act.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait StreakStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Streak catalog ────────────────────────────────────────────────────

  /// Create and persist a new streak; the store assigns the id and
  /// creation timestamp.
  fn create_streak(
    &self,
    input: NewStreak,
  ) -> impl Future<Output = Result<Streak, Self::Error>> + Send + '_;

  /// Retrieve a streak by id. Returns `None` if not found.
  fn get_streak(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Streak>, Self::Error>> + Send + '_;

  /// List streaks ordered by descending participant count (most popular
  /// first), tie-broken by recency. Empty result is not an error.
  fn list_streaks<'a>(
    &'a self,
    query: &'a StreakQuery,
  ) -> impl Future<Output = Result<Vec<Streak>, Self::Error>> + Send + 'a;

  // ── Membership tracker ────────────────────────────────────────────────

  /// Enroll a user in a streak.
  ///
  /// The membership insert and the participant-counter increment are one
  /// atomic unit; a duplicate pair yields [`JoinOutcome::AlreadyJoined`]
  /// with no counter change.
  fn join_streak(
    &self,
    user_id: i64,
    streak_id: i64,
  ) -> impl Future<Output = Result<JoinOutcome, Self::Error>> + Send + '_;

  /// All streaks a user has joined, most-recent join first.
  fn user_streaks(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Vec<JoinedStreak>, Self::Error>> + Send + '_;

  // ── Progress ledger ───────────────────────────────────────────────────

  /// Idempotent upsert: record completion for (user, streak, date).
  /// An existing entry is updated in place; no uniqueness conflict ever
  /// reaches the caller.
  fn mark_done(
    &self,
    user_id: i64,
    streak_id: i64,
    date: NaiveDate,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// All completed dates for (user, streak) within `range`, inclusive on
  /// both ends, ascending.
  fn progress_dates(
    &self,
    user_id: i64,
    streak_id: i64,
    range: DateRange,
  ) -> impl Future<Output = Result<Vec<NaiveDate>, Self::Error>> + Send + '_;

  /// Delete the entry for (user, streak, date). Deleting an absent entry
  /// is a no-op, not an error.
  fn delete_progress(
    &self,
    user_id: i64,
    streak_id: i64,
    date: NaiveDate,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Credentials ───────────────────────────────────────────────────────

  /// Register an account. Returns `None` if the email is already taken
  /// (derived from the unique index, not a prior read).
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Look up an account by email, including its stored credential hash.
  fn user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<UserRecord>, Self::Error>> + Send + 'a;

  /// Persist an issued session token for a user.
  fn record_session(
    &self,
    user_id: i64,
    token: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
