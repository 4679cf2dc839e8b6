//! Maps a [`ServiceResponse`] onto an HTTP response.
//!
//! | Envelope    | Status | Body                  |
//! |-------------|--------|-----------------------|
//! | `Success`   | 200    | payload, or empty     |
//! | `Rejected`  | 400    | `[ValidationError]`   |
//! | `Failed`    | 500    | `InternalError`       |

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use clientele_core::envelope::ServiceResponse;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Body {
  Json,
  Empty,
}

/// A service envelope on its way out of a handler.
#[derive(Debug)]
pub struct Reply<T> {
  envelope: ServiceResponse<T>,
  body:     Body,
}

impl<T> Reply<T> {
  /// Serialise the success payload as the JSON body.
  pub fn json(envelope: ServiceResponse<T>) -> Self { Self { envelope, body: Body::Json } }

  /// Answer success with an empty body.
  pub fn empty(envelope: ServiceResponse<T>) -> Self { Self { envelope, body: Body::Empty } }
}

impl<T: Serialize> IntoResponse for Reply<T> {
  fn into_response(self) -> Response {
    match self.envelope {
      ServiceResponse::Success(payload) => match self.body {
        Body::Json => (StatusCode::OK, Json(payload)).into_response(),
        Body::Empty => StatusCode::OK.into_response(),
      },
      ServiceResponse::Rejected(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
      ServiceResponse::Failed(error) => {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
      }
    }
  }
}
