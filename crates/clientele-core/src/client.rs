//! The persisted client record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, phone::Phone};

/// Store-assigned client identifier.
pub type ClientId = i64;

/// Opt-in state of a notification channel.
///
/// Serialised as its integer discriminant (`0` = removed, `1` = active).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ContactStatus {
  Removed,
  #[default]
  Active,
}

impl ContactStatus {
  pub fn as_i64(self) -> i64 {
    match self {
      Self::Removed => 0,
      Self::Active => 1,
    }
  }
}

impl TryFrom<i64> for ContactStatus {
  type Error = Error;

  fn try_from(value: i64) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(Self::Removed),
      1 => Ok(Self::Active),
      other => Err(Error::UnknownStatus(other)),
    }
  }
}

impl From<ContactStatus> for i64 {
  fn from(status: ContactStatus) -> Self { status.as_i64() }
}

/// A stored client.
///
/// `email` is unique across the store, as is the `(email, phone.number)`
/// pair. `sms_status` is shared by every client with the same phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
  pub id:           ClientId,
  pub name:         String,
  pub email:        String,
  pub phone:        Phone,
  pub email_status: ContactStatus,
  pub sms_status:   ContactStatus,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

/// Input for [`ClientStore::insert`](crate::store::ClientStore::insert).
/// The id and both timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
  pub name:         String,
  pub email:        String,
  pub phone:        Phone,
  pub email_status: ContactStatus,
  pub sms_status:   ContactStatus,
}
