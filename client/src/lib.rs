//! Browser-independent core of the inventory console: the resilient HTTP
//! client, typed resource APIs and the controllers that drive each page.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod transport;

#[cfg(test)]
mod testing;

pub use cache::{Clock, SystemClock};
pub use client::{ApiClient, ConnectionCheck};
pub use config::ClientConfig;
pub use controller::{AuxService, CrudService, Dispatch, ListController, Liveness, NoAux, SectionController};
pub use error::ApiError;
pub use transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};
