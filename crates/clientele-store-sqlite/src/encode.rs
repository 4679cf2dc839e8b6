//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and statuses as their integer
//! discriminants.

use chrono::{DateTime, Utc};
use clientele_core::{
  client::{Client, ClientId, ContactStatus},
  phone::Phone,
};

use crate::{Error, Result};

/// Column list shared by every `SELECT` that builds a [`RawClient`].
pub const CLIENT_COLUMNS: &str = "id, name, email, phone_extension, phone_number, \
                                  email_status, sms_status, created_at, updated_at";

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── ContactStatus ───────────────────────────────────────────────────────────

pub fn encode_status(status: ContactStatus) -> i64 { status.as_i64() }

pub fn decode_status(n: i64) -> Result<ContactStatus> { Ok(ContactStatus::try_from(n)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `clients` row.
pub struct RawClient {
  pub id:              ClientId,
  pub name:            String,
  pub email:           String,
  pub phone_extension: String,
  pub phone_number:    String,
  pub email_status:    i64,
  pub sms_status:      i64,
  pub created_at:      String,
  pub updated_at:      String,
}

impl RawClient {
  /// Read a row selected with [`CLIENT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      name:            row.get(1)?,
      email:           row.get(2)?,
      phone_extension: row.get(3)?,
      phone_number:    row.get(4)?,
      email_status:    row.get(5)?,
      sms_status:      row.get(6)?,
      created_at:      row.get(7)?,
      updated_at:      row.get(8)?,
    })
  }

  pub fn into_client(self) -> Result<Client> {
    Ok(Client {
      id:           self.id,
      name:         self.name,
      email:        self.email,
      phone:        Phone {
        extension: self.phone_extension,
        number:    self.phone_number,
      },
      email_status: decode_status(self.email_status)?,
      sms_status:   decode_status(self.sms_status)?,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn datetime_survives_text_column() {
    let now = Utc::now();
    assert_eq!(decode_dt(&encode_dt(now)).unwrap(), now);
  }

  #[test]
  fn garbage_datetime_is_rejected() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }

  #[test]
  fn unknown_status_is_rejected() {
    assert!(matches!(
      decode_status(7),
      Err(Error::Core(clientele_core::Error::UnknownStatus(7)))
    ));
  }
}
