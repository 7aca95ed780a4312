//! SQL schema for the Stride SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,    -- argon2 PHC string
    created_at    TEXT NOT NULL     -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS sessions (
    token      TEXT PRIMARY KEY,
    user_id    INTEGER NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS streaks (
    id                INTEGER PRIMARY KEY,
    title             TEXT NOT NULL,
    author            TEXT NOT NULL,
    difficulty        TEXT NOT NULL,    -- 'easy' | 'medium' | 'hard'
    description       TEXT NOT NULL,
    emoji             TEXT NOT NULL DEFAULT '🔥',
    participant_count INTEGER NOT NULL DEFAULT 0,
    created_at        TEXT NOT NULL
);

-- One membership row per (user, streak). The primary key is the
-- authoritative duplicate-join guard; the membership insert and the
-- participant_count increment always commit in the same transaction.
CREATE TABLE IF NOT EXISTS user_streaks (
    user_id   INTEGER NOT NULL,
    streak_id INTEGER NOT NULL REFERENCES streaks(id),
    joined_at TEXT NOT NULL,
    PRIMARY KEY (user_id, streak_id)
);

-- One entry per (user, streak, date); mark-done upserts in place, so the
-- constraint never surfaces to callers.
CREATE TABLE IF NOT EXISTS streak_progress (
    user_id   INTEGER NOT NULL,
    streak_id INTEGER NOT NULL,
    date      TEXT NOT NULL,    -- ISO calendar date, YYYY-MM-DD
    done      INTEGER NOT NULL DEFAULT 1,
    PRIMARY KEY (user_id, streak_id, date)
);

CREATE INDEX IF NOT EXISTS streaks_popularity_idx ON streaks(participant_count DESC);
CREATE INDEX IF NOT EXISTS user_streaks_user_idx  ON user_streaks(user_id);

PRAGMA user_version = 1;
";
