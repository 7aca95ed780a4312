//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, progress dates as `YYYY-MM-DD`
//! (which orders lexicographically the same as chronologically), and
//! difficulty tiers as their lowercase names.

use chrono::{DateTime, NaiveDate, Utc};
use stride_core::{
  membership::JoinedStreak,
  streak::Streak,
  user::{User, UserRecord},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `streaks` row.
pub struct RawStreak {
  pub id:                i64,
  pub title:             String,
  pub author:            String,
  pub difficulty:        String,
  pub description:       String,
  pub emoji:             String,
  pub participant_count: i64,
  pub created_at:        String,
}

impl RawStreak {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      title:             row.get(1)?,
      author:            row.get(2)?,
      difficulty:        row.get(3)?,
      description:       row.get(4)?,
      emoji:             row.get(5)?,
      participant_count: row.get(6)?,
      created_at:        row.get(7)?,
    })
  }

  pub fn into_streak(self) -> Result<Streak> {
    Ok(Streak {
      id:                self.id,
      title:             self.title,
      author:            self.author,
      difficulty:        self.difficulty.parse().map_err(Error::Core)?,
      description:       self.description,
      emoji:             self.emoji,
      participant_count: self.participant_count,
      created_at:        decode_dt(&self.created_at)?,
    })
  }
}

/// A `streaks` row joined with its `user_streaks.joined_at`.
pub struct RawJoinedStreak {
  pub streak:    RawStreak,
  pub joined_at: String,
}

impl RawJoinedStreak {
  pub fn into_joined(self) -> Result<JoinedStreak> {
    Ok(JoinedStreak {
      streak:    self.streak.into_streak()?,
      joined_at: decode_dt(&self.joined_at)?,
    })
  }
}

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub id:            i64,
  pub name:          String,
  pub email:         String,
  pub password_hash: String,
}

impl RawUser {
  pub fn into_record(self) -> UserRecord {
    UserRecord {
      user: User {
        id:    self.id,
        name:  self.name,
        email: self.email,
      },
      password_hash: self.password_hash,
    }
  }
}

/// The column list matching [`RawStreak::from_row`]. Keep the two in sync.
pub const STREAK_COLUMNS: &str =
  "id, title, author, difficulty, description, emoji, participant_count, created_at";
