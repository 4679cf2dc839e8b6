//! SQL schema for the clientele SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout revision.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS clients (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT    NOT NULL,
    email           TEXT    NOT NULL,
    phone_extension TEXT    NOT NULL,   -- '0' | '972'
    phone_number    TEXT    NOT NULL,   -- local number without extension
    email_status    INTEGER NOT NULL DEFAULT 1,   -- 0 removed, 1 active
    sms_status      INTEGER NOT NULL DEFAULT 1,
    created_at      TEXT    NOT NULL,   -- RFC 3339 UTC
    updated_at      TEXT    NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_clients_email
    ON clients(email);

CREATE UNIQUE INDEX IF NOT EXISTS idx_clients_email_phone
    ON clients(email, phone_number);

-- SMS status is shared by every client with the same number.
CREATE INDEX IF NOT EXISTS idx_clients_phone
    ON clients(phone_number);

PRAGMA user_version = 1;
";
