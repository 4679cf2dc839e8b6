//! [`ClientService`]: validation, duplicate detection and store orchestration.
//!
//! Every operation returns a [`ServiceResponse`]. User-correctable problems
//! become validation errors; store failures are logged and become internal
//! errors tagged with the operation's location. Nothing escapes as a raw
//! error.

use std::{fmt::Display, sync::Arc};

use chrono::Utc;
use tracing::{debug, error, info};

use crate::{
  client::{ClientId, ContactStatus, NewClient},
  dto::{ClientView, InsertClientRequest, UpdateClientRequest},
  envelope::{ServiceResponse, ValidationErrors},
  phone::Phone,
  store::ClientStore,
  validation::{check_name, validate_cellphone, validate_email},
};

pub const LIST: &str = "ClientService::list";
pub const GET_BY_ID: &str = "ClientService::get_by_id";
pub const INSERT: &str = "ClientService::insert";
pub const UPDATE: &str = "ClientService::update";
pub const DELETE: &str = "ClientService::delete";

const NAME: &str = "Name";
const EMAIL: &str = "Email";
const CELLPHONE: &str = "Cellphone";

const INVALID_EMAIL: &str = "Invalid email format";
const INVALID_CELLPHONE: &str = "Invalid phone number format";
const EMAIL_TAKEN: &str = "Client already exists with this email";
const EMAIL_AND_PHONE_TAKEN: &str =
  "Client already exists with this pair of email and phone number";

/// Client operations over an injected [`ClientStore`].
///
/// Clones share the store.
pub struct ClientService<S> {
  store: Arc<S>,
}

impl<S> Clone for ClientService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: ClientStore> ClientService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  /// All clients in display form. An empty store is a successful empty list.
  pub async fn list(&self) -> ServiceResponse<Vec<ClientView>> {
    recover(LIST, self.try_list().await)
  }

  /// One client in display form, or a not-found validation error.
  pub async fn get_by_id(&self, id: ClientId) -> ServiceResponse<ClientView> {
    recover(GET_BY_ID, self.try_get_by_id(id).await)
  }

  /// Create a client and return its id.
  ///
  /// The email and `(email, phone)` duplicate checks both run and both
  /// report. A phone number already on file passes its SMS status on to the
  /// new client.
  pub async fn insert(&self, request: InsertClientRequest) -> ServiceResponse<ClientId> {
    recover(INSERT, self.try_insert(request).await)
  }

  /// Overwrite a client's fields.
  ///
  /// Duplicate checks only run when the email changes, and the pair check
  /// only runs once the email check has failed. A client moved onto a number
  /// already on file takes that number's SMS status first; a requested status
  /// that differs is then applied to every client sharing the number.
  pub async fn update(
    &self,
    id: ClientId,
    request: UpdateClientRequest,
  ) -> ServiceResponse<bool> {
    recover(UPDATE, self.try_update(id, request).await)
  }

  pub async fn delete(&self, id: ClientId) -> ServiceResponse<bool> {
    recover(DELETE, self.try_delete(id).await)
  }

  async fn try_list(&self) -> Result<ServiceResponse<Vec<ClientView>>, S::Error> {
    let clients = self.store.list().await?;
    Ok(ServiceResponse::success(clients.into_iter().map(ClientView::from).collect()))
  }

  async fn try_get_by_id(&self, id: ClientId) -> Result<ServiceResponse<ClientView>, S::Error> {
    Ok(match self.store.get_by_id(id).await? {
      Some(client) => ServiceResponse::success(client.into()),
      None => ServiceResponse::not_found(),
    })
  }

  async fn try_insert(
    &self,
    request: InsertClientRequest,
  ) -> Result<ServiceResponse<ClientId>, S::Error> {
    if let Some(rejection) =
      check_format(&request.name, &request.email, &request.cellphone).into_rejection()
    {
      debug!(location = INSERT, "rejected malformed client");
      return Ok(rejection);
    }

    let phone = Phone::normalize(&request.cellphone);

    let mut errors = ValidationErrors::new();
    if self.store.is_email_taken(&request.email).await? {
      errors.push(EMAIL, EMAIL_TAKEN);
    }
    if self.store.is_email_and_phone_taken(&request.email, &phone.number).await? {
      errors.push(EMAIL, EMAIL_AND_PHONE_TAKEN);
    }
    if let Some(rejection) = errors.into_rejection() {
      debug!(location = INSERT, email = %request.email, "rejected duplicate client");
      return Ok(rejection);
    }

    let sms_status = self
      .shared_sms_status(&phone.number)
      .await?
      .unwrap_or(ContactStatus::Active);

    let id = self
      .store
      .insert(NewClient {
        name: request.name,
        email: request.email,
        phone,
        email_status: ContactStatus::Active,
        sms_status,
      })
      .await?;

    info!(id, "client created");
    Ok(ServiceResponse::success(id))
  }

  async fn try_update(
    &self,
    id: ClientId,
    request: UpdateClientRequest,
  ) -> Result<ServiceResponse<bool>, S::Error> {
    let Some(mut client) = self.store.get_by_id(id).await? else {
      return Ok(ServiceResponse::not_found());
    };

    if let Some(rejection) =
      check_format(&request.name, &request.email, &request.cellphone).into_rejection()
    {
      debug!(location = UPDATE, id, "rejected malformed client");
      return Ok(rejection);
    }

    let phone = Phone::normalize(&request.cellphone);

    let mut errors = ValidationErrors::new();
    if client.email != request.email && self.store.is_email_taken(&request.email).await? {
      errors.push(EMAIL, EMAIL_TAKEN);
      if self.store.is_email_and_phone_taken(&request.email, &phone.number).await? {
        errors.push(EMAIL, EMAIL_AND_PHONE_TAKEN);
      }
    }
    if let Some(rejection) = errors.into_rejection() {
      debug!(location = UPDATE, id, email = %request.email, "rejected duplicate email");
      return Ok(rejection);
    }

    // Moving onto a number in use joins that number's SMS status.
    if phone.number != client.phone.number
      && let Some(shared) = self.shared_sms_status(&phone.number).await?
    {
      client.sms_status = shared;
    }

    client.name = request.name;
    client.email = request.email;
    client.phone = phone;
    client.email_status = request.email_status;
    client.updated_at = Utc::now();

    if client.sms_status != request.sms_status {
      client.sms_status = request.sms_status;
      self
        .store
        .update_sms_status_for_phone(&client.phone.number, request.sms_status)
        .await?;
    }

    self.store.update(&client).await?;

    info!(id, "client updated");
    Ok(ServiceResponse::success(true))
  }

  /// SMS status already recorded for `phone_number`, if any client uses it.
  async fn shared_sms_status(
    &self,
    phone_number: &str,
  ) -> Result<Option<ContactStatus>, S::Error> {
    if !self.store.is_phone_taken(phone_number).await? {
      return Ok(None);
    }
    self.store.sms_status_for_phone(phone_number).await
  }

  async fn try_delete(&self, id: ClientId) -> Result<ServiceResponse<bool>, S::Error> {
    if !self.store.exists(id).await? {
      return Ok(ServiceResponse::not_found());
    }

    self.store.delete(id).await?;

    info!(id, "client deleted");
    Ok(ServiceResponse::success(true))
  }
}

/// Format rules re-checked on the server before anything is normalised.
fn check_format(name: &str, email: &str, cellphone: &str) -> ValidationErrors {
  let mut errors = ValidationErrors::new();
  if let Some(detail) = check_name(name) {
    errors.push(NAME, detail);
  }
  if !validate_email(email) {
    errors.push(EMAIL, INVALID_EMAIL);
  }
  if !validate_cellphone(cellphone) {
    errors.push(CELLPHONE, INVALID_CELLPHONE);
  }
  errors
}

/// Turn a store failure into an internal-error envelope.
fn recover<T, E: Display>(
  location: &'static str,
  result: Result<ServiceResponse<T>, E>,
) -> ServiceResponse<T> {
  result.unwrap_or_else(|e| {
    error!(location, error = %e, "store operation failed");
    ServiceResponse::internal(location, e.to_string())
  })
}
