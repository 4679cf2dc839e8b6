//! In-process [`ClientStore`] backend.
//!
//! Keeps every client in a map behind a lock. The lock is never held across
//! an await point. Unique constraints mirror the SQLite schema.

use std::{
  collections::BTreeMap,
  sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::Utc;
use thiserror::Error;

use crate::{
  client::{Client, ClientId, ContactStatus, NewClient},
  store::ClientStore,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("unique constraint violated: {0}")]
  UniqueViolation(&'static str),

  #[error("store lock poisoned")]
  Poisoned,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Default)]
struct Inner {
  last_id: ClientId,
  clients: BTreeMap<ClientId, Client>,
}

impl Inner {
  /// Unique email implies a unique `(email, phone_number)` pair.
  fn check_unique(&self, id: Option<ClientId>, email: &str) -> Result<()> {
    if self.clients.values().any(|c| Some(c.id) != id && c.email == email) {
      return Err(Error::UniqueViolation("clients.email"));
    }
    Ok(())
  }
}

/// Clones share one map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
    self.inner.read().map_err(|_| Error::Poisoned)
  }

  fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
    self.inner.write().map_err(|_| Error::Poisoned)
  }
}

impl ClientStore for MemoryStore {
  type Error = Error;

  async fn list(&self) -> Result<Vec<Client>> {
    Ok(self.read()?.clients.values().cloned().collect())
  }

  async fn get_by_id(&self, id: ClientId) -> Result<Option<Client>> {
    Ok(self.read()?.clients.get(&id).cloned())
  }

  async fn get_by_email(&self, email: &str) -> Result<Option<Client>> {
    Ok(self.read()?.clients.values().find(|c| c.email == email).cloned())
  }

  async fn exists(&self, id: ClientId) -> Result<bool> {
    Ok(self.read()?.clients.contains_key(&id))
  }

  async fn is_email_taken(&self, email: &str) -> Result<bool> {
    Ok(self.read()?.clients.values().any(|c| c.email == email))
  }

  async fn is_email_and_phone_taken(&self, email: &str, phone_number: &str) -> Result<bool> {
    Ok(
      self
        .read()?
        .clients
        .values()
        .any(|c| c.email == email && c.phone.number == phone_number),
    )
  }

  async fn is_phone_taken(&self, phone_number: &str) -> Result<bool> {
    Ok(self.read()?.clients.values().any(|c| c.phone.number == phone_number))
  }

  async fn sms_status_for_phone(&self, phone_number: &str) -> Result<Option<ContactStatus>> {
    Ok(
      self
        .read()?
        .clients
        .values()
        .find(|c| c.phone.number == phone_number)
        .map(|c| c.sms_status),
    )
  }

  async fn insert(&self, client: NewClient) -> Result<ClientId> {
    let mut inner = self.write()?;
    inner.check_unique(None, &client.email)?;

    inner.last_id += 1;
    let id = inner.last_id;
    let now = Utc::now();
    inner.clients.insert(id, Client {
      id,
      name: client.name,
      email: client.email,
      phone: client.phone,
      email_status: client.email_status,
      sms_status: client.sms_status,
      created_at: now,
      updated_at: now,
    });
    Ok(id)
  }

  async fn update(&self, client: &Client) -> Result<()> {
    let mut inner = self.write()?;
    inner.check_unique(Some(client.id), &client.email)?;

    if let Some(stored) = inner.clients.get_mut(&client.id) {
      let created_at = stored.created_at;
      *stored = Client { created_at, ..client.clone() };
    }
    Ok(())
  }

  async fn update_sms_status_for_phone(
    &self,
    phone_number: &str,
    status: ContactStatus,
  ) -> Result<()> {
    let mut inner = self.write()?;
    let now = Utc::now();
    for client in inner.clients.values_mut().filter(|c| c.phone.number == phone_number) {
      client.sms_status = status;
      client.updated_at = now;
    }
    Ok(())
  }

  async fn delete(&self, id: ClientId) -> Result<()> {
    self.write()?.clients.remove(&id);
    Ok(())
  }
}
