//! The result envelope returned by every [`ClientService`] operation.
//!
//! [`ClientService`]: crate::service::ClientService

use serde::{Deserialize, Serialize};

/// A user-correctable problem with one field of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
  pub field_name:   String,
  pub error_detail: String,
}

impl ValidationError {
  pub fn new(field_name: impl Into<String>, error_detail: impl Into<String>) -> Self {
    Self { field_name: field_name.into(), error_detail: error_detail.into() }
  }

  /// The error reported for an unknown client id.
  pub fn not_found() -> Self { Self::new("id", "Client not found") }
}

/// An unexpected failure, tagged with the operation it happened in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalError {
  pub location: String,
  pub message:  String,
}

/// Accumulates validation errors across several checks.
#[derive(Debug, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
  pub fn new() -> Self { Self::default() }

  pub fn push(&mut self, field_name: &str, error_detail: &str) {
    self.0.push(ValidationError::new(field_name, error_detail));
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// `None` when nothing was recorded, otherwise the rejection envelope.
  pub fn into_rejection<T>(self) -> Option<ServiceResponse<T>> {
    if self.is_empty() {
      None
    } else {
      Some(ServiceResponse::Rejected(self.0))
    }
  }
}

/// Exactly one of: a payload, a non-empty list of validation errors, or an
/// internal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceResponse<T> {
  Success(T),
  Rejected(Vec<ValidationError>),
  Failed(InternalError),
}

impl<T> ServiceResponse<T> {
  pub fn success(payload: T) -> Self { Self::Success(payload) }

  pub fn not_found() -> Self { Self::Rejected(vec![ValidationError::not_found()]) }

  pub fn internal(location: impl Into<String>, message: impl Into<String>) -> Self {
    Self::Failed(InternalError { location: location.into(), message: message.into() })
  }

  pub fn is_successful(&self) -> bool { matches!(self, Self::Success(_)) }

  pub fn is_exception(&self) -> bool { matches!(self, Self::Failed(_)) }

  pub fn payload(&self) -> Option<&T> {
    match self {
      Self::Success(payload) => Some(payload),
      _ => None,
    }
  }

  pub fn into_payload(self) -> Option<T> {
    match self {
      Self::Success(payload) => Some(payload),
      _ => None,
    }
  }

  /// Validation errors; empty unless the request was rejected.
  pub fn errors(&self) -> &[ValidationError] {
    match self {
      Self::Rejected(errors) => errors,
      _ => &[],
    }
  }

  pub fn exception(&self) -> Option<&InternalError> {
    match self {
      Self::Failed(error) => Some(error),
      _ => None,
    }
  }
}
