//! Request and view shapes exchanged with callers of the service.
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::client::{Client, ClientId, ContactStatus};

/// Body of `POST /clients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertClientRequest {
  pub name:      String,
  pub email:     String,
  pub cellphone: String,
}

/// Body of `PUT /clients/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
  pub name:         String,
  pub email:        String,
  pub cellphone:    String,
  pub email_status: ContactStatus,
  pub sms_status:   ContactStatus,
}

/// A client as shown to callers, with the phone in display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientView {
  pub id:           ClientId,
  pub name:         String,
  pub email:        String,
  pub cellphone:    String,
  pub email_status: ContactStatus,
  pub sms_status:   ContactStatus,
}

impl From<Client> for ClientView {
  fn from(client: Client) -> Self {
    Self {
      id:           client.id,
      cellphone:    client.phone.to_string(),
      name:         client.name,
      email:        client.email,
      email_status: client.email_status,
      sms_status:   client.sms_status,
    }
  }
}
