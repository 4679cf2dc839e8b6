//! Error types for `clientele-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("unknown contact status discriminant: {0}")]
  UnknownStatus(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
