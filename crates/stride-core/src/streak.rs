//! Streak — a trackable habit/challenge definition.
//!
//! A streak row carries a denormalized `participant_count`; the membership
//! tracker is the only writer of that counter, and it mutates it in the same
//! transaction as the membership insert so the two can never diverge.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Difficulty tier of a streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  pub fn as_str(self) -> &'static str {
    match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    }
  }
}

impl FromStr for Difficulty {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "easy" => Ok(Difficulty::Easy),
      "medium" => Ok(Difficulty::Medium),
      "hard" => Ok(Difficulty::Hard),
      other => Err(Error::UnknownDifficulty(other.to_owned())),
    }
  }
}

/// A habit challenge users can join and record daily completion against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
  pub id:                i64,
  pub title:             String,
  pub author:            String,
  pub difficulty:        Difficulty,
  pub description:       String,
  pub emoji:             String,
  pub participant_count: i64,
  pub created_at:        DateTime<Utc>,
}

/// Input for creating a streak. Titles carry no uniqueness constraint;
/// creation always succeeds given well-formed input.
#[derive(Debug, Clone)]
pub struct NewStreak {
  pub title:             String,
  pub author:            String,
  pub difficulty:        Difficulty,
  pub description:       String,
  pub emoji:             String,
  pub participant_count: i64,
}

impl NewStreak {
  pub fn new(
    title: impl Into<String>,
    author: impl Into<String>,
    difficulty: Difficulty,
    description: impl Into<String>,
  ) -> Self {
    Self {
      title: title.into(),
      author: author.into(),
      difficulty,
      description: description.into(),
      emoji: "🔥".to_owned(),
      participant_count: 0,
    }
  }
}
