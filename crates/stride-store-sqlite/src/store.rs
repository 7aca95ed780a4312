//! [`SqliteStore`] — the SQLite implementation of [`StreakStore`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::OptionalExtension as _;

use stride_core::{
  membership::{JoinOutcome, JoinedStreak},
  progress::DateRange,
  store::{StreakQuery, StreakStore},
  streak::{NewStreak, Streak},
  user::{NewUser, User, UserRecord},
};

use crate::{
  Error, Result,
  encode::{
    RawJoinedStreak, RawStreak, RawUser, STREAK_COLUMNS, decode_date,
    encode_date, encode_dt,
  },
  schema::SCHEMA,
};

/// Default page size for [`StreakStore::list_streaks`].
const DEFAULT_LIST_LIMIT: usize = 50;

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(err, _)
      if err.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Stride store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── StreakStore impl ────────────────────────────────────────────────────────

impl StreakStore for SqliteStore {
  type Error = Error;

  // ── Streak catalog ────────────────────────────────────────────────────────

  async fn create_streak(&self, input: NewStreak) -> Result<Streak> {
    let created_at = Utc::now();
    let at_str = encode_dt(created_at);

    let title = input.title.clone();
    let author = input.author.clone();
    let difficulty_str = input.difficulty.as_str().to_owned();
    let description = input.description.clone();
    let emoji = input.emoji.clone();
    let participant_count = input.participant_count;

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO streaks (
             title, author, difficulty, description, emoji,
             participant_count, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            title,
            author,
            difficulty_str,
            description,
            emoji,
            participant_count,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Streak {
      id,
      title: input.title,
      author: input.author,
      difficulty: input.difficulty,
      description: input.description,
      emoji: input.emoji,
      participant_count: input.participant_count,
      created_at,
    })
  }

  async fn get_streak(&self, id: i64) -> Result<Option<Streak>> {
    let raw: Option<RawStreak> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {STREAK_COLUMNS} FROM streaks WHERE id = ?1"),
              rusqlite::params![id],
              RawStreak::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawStreak::into_streak).transpose()
  }

  async fn list_streaks(&self, query: &StreakQuery) -> Result<Vec<Streak>> {
    let difficulty_str =
      query.difficulty.map(|d| d.as_str().to_owned());
    let limit_val = query.limit.unwrap_or(DEFAULT_LIST_LIMIT) as i64;
    let offset_val = query.offset.unwrap_or(0) as i64;

    let raws: Vec<RawStreak> = self
      .conn
      .call(move |conn| {
        let where_clause = if difficulty_str.is_some() {
          "WHERE difficulty = ?1"
        } else {
          ""
        };

        let sql = format!(
          "SELECT {STREAK_COLUMNS} FROM streaks
           {where_clause}
           ORDER BY participant_count DESC, created_at DESC
           LIMIT ?2 OFFSET ?3"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![difficulty_str.as_deref(), limit_val, offset_val],
            RawStreak::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStreak::into_streak).collect()
  }

  // ── Membership tracker ────────────────────────────────────────────────────

  async fn join_streak(&self, user_id: i64, streak_id: i64) -> Result<JoinOutcome> {
    let joined_at_str = encode_dt(Utc::now());

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let exists: bool = tx
          .query_row(
            "SELECT 1 FROM streaks WHERE id = ?1",
            rusqlite::params![streak_id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !exists {
          return Ok(JoinOutcome::StreakNotFound);
        }

        // The primary key on (user_id, streak_id) is the authoritative
        // duplicate check; a prior read can race with a concurrent join.
        match tx.execute(
          "INSERT INTO user_streaks (user_id, streak_id, joined_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![user_id, streak_id, joined_at_str],
        ) {
          Ok(_) => {}
          Err(e) if is_constraint_violation(&e) => {
            return Ok(JoinOutcome::AlreadyJoined);
          }
          Err(e) => return Err(e.into()),
        }

        tx.execute(
          "UPDATE streaks SET participant_count = participant_count + 1
           WHERE id = ?1",
          rusqlite::params![streak_id],
        )?;

        tx.commit()?;
        Ok(JoinOutcome::Joined)
      })
      .await?;

    Ok(outcome)
  }

  async fn user_streaks(&self, user_id: i64) -> Result<Vec<JoinedStreak>> {
    let raws: Vec<RawJoinedStreak> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT
             s.id, s.title, s.author, s.difficulty, s.description,
             s.emoji, s.participant_count, s.created_at,
             us.joined_at
           FROM user_streaks us
           JOIN streaks s ON s.id = us.streak_id
           WHERE us.user_id = ?1
           ORDER BY us.joined_at DESC",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![user_id], |row| {
            Ok(RawJoinedStreak {
              streak:    RawStreak::from_row(row)?,
              joined_at: row.get(8)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawJoinedStreak::into_joined).collect()
  }

  // ── Progress ledger ───────────────────────────────────────────────────────

  async fn mark_done(
    &self,
    user_id: i64,
    streak_id: i64,
    date: NaiveDate,
  ) -> Result<()> {
    let date_str = encode_date(date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO streak_progress (user_id, streak_id, date, done)
           VALUES (?1, ?2, ?3, 1)
           ON CONFLICT (user_id, streak_id, date) DO UPDATE SET done = 1",
          rusqlite::params![user_id, streak_id, date_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn progress_dates(
    &self,
    user_id: i64,
    streak_id: i64,
    range: DateRange,
  ) -> Result<Vec<NaiveDate>> {
    let start_str = encode_date(range.start);
    let end_str = encode_date(range.end);

    let date_strs: Vec<String> = self
      .conn
      .call(move |conn| {
        // YYYY-MM-DD strings order lexicographically, so the comparisons
        // and ORDER BY below are chronological.
        let mut stmt = conn.prepare(
          "SELECT date FROM streak_progress
           WHERE user_id = ?1 AND streak_id = ?2 AND done = 1
             AND date >= ?3 AND date <= ?4
           ORDER BY date ASC",
        )?;

        let rows = stmt
          .query_map(
            rusqlite::params![user_id, streak_id, start_str, end_str],
            |row| row.get(0),
          )?
          .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(rows)
      })
      .await?;

    date_strs.iter().map(|s| decode_date(s)).collect()
  }

  async fn delete_progress(
    &self,
    user_id: i64,
    streak_id: i64,
    date: NaiveDate,
  ) -> Result<()> {
    let date_str = encode_date(date);

    // Idempotent: deleting an absent entry affects zero rows, which is fine.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM streak_progress
           WHERE user_id = ?1 AND streak_id = ?2 AND date = ?3",
          rusqlite::params![user_id, streak_id, date_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Credentials ───────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<Option<User>> {
    let at_str = encode_dt(Utc::now());
    let name = input.name.clone();
    let email = input.email.clone();
    let password_hash = input.password_hash;

    let id: Option<i64> = self
      .conn
      .call(move |conn| {
        // The unique index on email is the authoritative duplicate check.
        match conn.execute(
          "INSERT INTO users (name, email, password_hash, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![name, email, password_hash, at_str],
        ) {
          Ok(_) => Ok(Some(conn.last_insert_rowid())),
          Err(e) if is_constraint_violation(&e) => Ok(None),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    Ok(id.map(|id| User {
      id,
      name: input.name,
      email: input.email,
    }))
  }

  async fn user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
    let email = email.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, email, password_hash FROM users
               WHERE email = ?1",
              rusqlite::params![email],
              |row| {
                Ok(RawUser {
                  id:            row.get(0)?,
                  name:          row.get(1)?,
                  email:         row.get(2)?,
                  password_hash: row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawUser::into_record))
  }

  async fn record_session(&self, user_id: i64, token: String) -> Result<()> {
    let at_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sessions (token, user_id, created_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![token, user_id, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
