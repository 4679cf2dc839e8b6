//! JSON REST API for clientele.
//!
//! Exposes an axum [`Router`] backed by a [`ClientService`] over any
//! [`ClientStore`]. TLS and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! Router::new().merge(clientele_api::api_router(service))
//! ```

pub mod clients;
pub mod response;

use axum::{Router, routing::get};
use clientele_core::{service::ClientService, store::ClientStore};

pub use response::Reply;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: ClientService<S>) -> Router<()>
where
  S: ClientStore + 'static,
{
  Router::new()
    .route("/clients", get(clients::list::<S>).post(clients::insert::<S>))
    .route(
      "/clients/{id}",
      get(clients::get_one::<S>)
        .put(clients::update::<S>)
        .delete(clients::delete::<S>),
    )
    .with_state(service)
}
