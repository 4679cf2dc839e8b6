//! Handlers for `/clients` endpoints.
//!
//! | Method   | Path            | Body                                                   |
//! |----------|-----------------|--------------------------------------------------------|
//! | `GET`    | `/clients`      |                                                        |
//! | `POST`   | `/clients`      | `{"name","email","cellphone"}`                         |
//! | `GET`    | `/clients/{id}` |                                                        |
//! | `PUT`    | `/clients/{id}` | `{"name","email","cellphone","emailStatus","smsStatus"}` |
//! | `DELETE` | `/clients/{id}` |                                                        |
//!
//! Not-found is a validation error and answers 400.

use axum::{
  Json,
  extract::{Path, State},
};
use clientele_core::{
  client::ClientId,
  dto::{ClientView, InsertClientRequest, UpdateClientRequest},
  service::ClientService,
  store::ClientStore,
};
use tracing::debug;

use crate::response::Reply;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /clients`
pub async fn list<S: ClientStore>(
  State(service): State<ClientService<S>>,
) -> Reply<Vec<ClientView>> {
  Reply::json(service.list().await)
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /clients/{id}`
pub async fn get_one<S: ClientStore>(
  State(service): State<ClientService<S>>,
  Path(id): Path<ClientId>,
) -> Reply<ClientView> {
  Reply::json(service.get_by_id(id).await)
}

// ─── Insert ───────────────────────────────────────────────────────────────────

/// `POST /clients`, answering with the new id.
pub async fn insert<S: ClientStore>(
  State(service): State<ClientService<S>>,
  Json(body): Json<InsertClientRequest>,
) -> Reply<ClientId> {
  debug!(email = %body.email, "insert client");
  Reply::json(service.insert(body).await)
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /clients/{id}`
pub async fn update<S: ClientStore>(
  State(service): State<ClientService<S>>,
  Path(id): Path<ClientId>,
  Json(body): Json<UpdateClientRequest>,
) -> Reply<bool> {
  debug!(id, "update client");
  Reply::empty(service.update(id, body).await)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /clients/{id}`
pub async fn delete<S: ClientStore>(
  State(service): State<ClientService<S>>,
  Path(id): Path<ClientId>,
) -> Reply<bool> {
  debug!(id, "delete client");
  Reply::empty(service.delete(id).await)
}
