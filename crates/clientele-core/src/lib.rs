//! Core types, rules and the client service for Clientele.
//!
//! No HTTP or SQL lives here. Storage backends implement
//! [`store::ClientStore`]; transports drive [`service::ClientService`] and
//! render its [`envelope::ServiceResponse`].

// `ClientStore` spells out `Send` futures by hand.
#![allow(async_fn_in_trait)]

pub mod client;
pub mod dto;
pub mod envelope;
pub mod error;
pub mod memory;
pub mod phone;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{Error, Result};
