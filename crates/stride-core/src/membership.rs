//! Membership — a user's enrollment in a streak.
//!
//! At most one membership row exists per (user, streak) pair. A second join
//! is rejected, not merged, and leaves the participant counter untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::streak::Streak;

/// A streak a user has joined, paired with the join timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedStreak {
  #[serde(flatten)]
  pub streak:    Streak,
  pub joined_at: DateTime<Utc>,
}

/// Result of a join attempt.
///
/// The store derives `AlreadyJoined` from the unique constraint on
/// (user_id, streak_id) — not from a prior read, which can race with a
/// concurrent join on the same pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
  /// Membership inserted and the participant counter incremented, as one
  /// atomic unit.
  Joined,
  /// A membership row already existed; nothing changed.
  AlreadyJoined,
  /// No streak with the given id exists.
  StreakNotFound,
}
