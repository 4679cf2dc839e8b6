//! The SQLite implementation of [`ClientStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};
use tracing::debug;

use clientele_core::{
  client::{Client, ClientId, ContactStatus, NewClient},
  store::ClientStore,
};

use crate::{
  Result,
  encode::{CLIENT_COLUMNS, RawClient, decode_status, encode_dt, encode_status},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A client store backed by a single SQLite file.
///
/// Clones share one connection thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    debug!(path = %path.display(), "opened sqlite store");
    Ok(store)
  }

  /// Open a private in-memory database.
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

  /// Run a `SELECT 1 ... LIMIT 1` style probe.
  async fn probe(&self, sql: &'static str, args: Vec<Value>) -> Result<bool> {
    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(sql, rusqlite::params_from_iter(args), |_| Ok(()))
            .optional()?
            .is_some(),
        )
      })
      .await?;
    Ok(found)
  }

  /// Fetch the single client matching `filter`, a `WHERE` clause over `?1`.
  async fn find_one(&self, filter: &'static str, arg: Value) -> Result<Option<Client>> {
    let raw: Option<RawClient> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE {filter}");
        Ok(
          conn
            .query_row(&sql, rusqlite::params![arg], RawClient::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawClient::into_client).transpose()
  }
}

// ─── ClientStore impl ────────────────────────────────────────────────────────

impl ClientStore for SqliteStore {
  type Error = crate::Error;

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn list(&self) -> Result<Vec<Client>> {
    let raws: Vec<RawClient> = self
      .conn
      .call(|conn| {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients ORDER BY id");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawClient::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawClient::into_client).collect()
  }

  async fn get_by_id(&self, id: ClientId) -> Result<Option<Client>> {
    self.find_one("id = ?1", id.into()).await
  }

  async fn get_by_email(&self, email: &str) -> Result<Option<Client>> {
    self.find_one("email = ?1", email.to_owned().into()).await
  }

  async fn exists(&self, id: ClientId) -> Result<bool> {
    self
      .probe("SELECT 1 FROM clients WHERE id = ?1", vec![id.into()])
      .await
  }

  // ── Uniqueness checks ─────────────────────────────────────────────────────

  async fn is_email_taken(&self, email: &str) -> Result<bool> {
    self
      .probe("SELECT 1 FROM clients WHERE email = ?1 LIMIT 1", vec![email.to_owned().into()])
      .await
  }

  async fn is_email_and_phone_taken(&self, email: &str, phone_number: &str) -> Result<bool> {
    self
      .probe(
        "SELECT 1 FROM clients WHERE email = ?1 AND phone_number = ?2 LIMIT 1",
        vec![email.to_owned().into(), phone_number.to_owned().into()],
      )
      .await
  }

  async fn is_phone_taken(&self, phone_number: &str) -> Result<bool> {
    self
      .probe(
        "SELECT 1 FROM clients WHERE phone_number = ?1 LIMIT 1",
        vec![phone_number.to_owned().into()],
      )
      .await
  }

  async fn sms_status_for_phone(&self, phone_number: &str) -> Result<Option<ContactStatus>> {
    let phone_number = phone_number.to_owned();

    let raw: Option<i64> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT sms_status FROM clients WHERE phone_number = ?1 ORDER BY id LIMIT 1",
              rusqlite::params![phone_number],
              |r| r.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(decode_status).transpose()
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert(&self, client: NewClient) -> Result<ClientId> {
    let now          = encode_dt(Utc::now());
    let email_status = encode_status(client.email_status);
    let sms_status   = encode_status(client.sms_status);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO clients (
             name, email, phone_extension, phone_number,
             email_status, sms_status, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
          rusqlite::params![
            client.name,
            client.email,
            client.phone.extension,
            client.phone.number,
            email_status,
            sms_status,
            now,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(id)
  }

  async fn update(&self, client: &Client) -> Result<()> {
    let id           = client.id;
    let name         = client.name.clone();
    let email        = client.email.clone();
    let extension    = client.phone.extension.clone();
    let number       = client.phone.number.clone();
    let email_status = encode_status(client.email_status);
    let sms_status   = encode_status(client.sms_status);
    let updated_at   = encode_dt(client.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE clients SET
             name = ?2, email = ?3, phone_extension = ?4, phone_number = ?5,
             email_status = ?6, sms_status = ?7, updated_at = ?8
           WHERE id = ?1",
          rusqlite::params![
            id,
            name,
            email,
            extension,
            number,
            email_status,
            sms_status,
            updated_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_sms_status_for_phone(
    &self,
    phone_number: &str,
    status: ContactStatus,
  ) -> Result<()> {
    let phone_number = phone_number.to_owned();
    let status       = encode_status(status);
    let now          = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE clients SET sms_status = ?2, updated_at = ?3 WHERE phone_number = ?1",
          rusqlite::params![phone_number, status, now],
        )?)
      })
      .await?;

    debug!(changed, "propagated sms status");
    Ok(())
  }

  async fn delete(&self, id: ClientId) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM clients WHERE id = ?1", rusqlite::params![id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
