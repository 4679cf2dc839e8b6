//! The `ClientStore` trait: persistence seam for [`ClientService`].
//!
//! Backends: `clientele-store-sqlite` and [`crate::memory::MemoryStore`].
//!
//! [`ClientService`]: crate::service::ClientService

use std::future::Future;

use crate::client::{Client, ClientId, ContactStatus, NewClient};

/// Abstraction over a client persistence backend.
///
/// Backends carry no business rules; they must however enforce the unique
/// constraints on `email` and `(email, phone.number)` atomically.
///
/// All phone lookups are keyed on [`Phone::number`](crate::phone::Phone).
///
/// Futures are `Send` so handlers can await them on a work-stealing runtime.
pub trait ClientStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every stored client, ordered by id.
  fn list(&self) -> impl Future<Output = Result<Vec<Client>, Self::Error>> + Send + '_;

  fn get_by_id(
    &self,
    id: ClientId,
  ) -> impl Future<Output = Result<Option<Client>, Self::Error>> + Send + '_;

  fn get_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Client>, Self::Error>> + Send + 'a;

  fn exists(&self, id: ClientId) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Uniqueness checks ─────────────────────────────────────────────────

  fn is_email_taken<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  fn is_email_and_phone_taken<'a>(
    &'a self,
    email: &'a str,
    phone_number: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  fn is_phone_taken<'a>(
    &'a self,
    phone_number: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// SMS status currently recorded for `phone_number`, or `None` if no client
  /// uses it.
  fn sms_status_for_phone<'a>(
    &'a self,
    phone_number: &'a str,
  ) -> impl Future<Output = Result<Option<ContactStatus>, Self::Error>> + Send + 'a;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new client and return its assigned id. Both timestamps are
  /// set by the store.
  fn insert(
    &self,
    client: NewClient,
  ) -> impl Future<Output = Result<ClientId, Self::Error>> + Send + '_;

  /// Overwrite every mutable column of `client` (matched by id).
  fn update<'a>(
    &'a self,
    client: &'a Client,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Set `sms_status` on every client sharing `phone_number`.
  fn update_sms_status_for_phone<'a>(
    &'a self,
    phone_number: &'a str,
    status: ContactStatus,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn delete(&self, id: ClientId) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
