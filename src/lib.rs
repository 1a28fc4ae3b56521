//! gRPC service for managing rocket records.
//!
//! Requests flow through three layers:
//! - [`api`]: the tonic endpoint. Validates ids and maps failures to statuses.
//! - [`rocket`]: the service contract and its store-backed implementation.
//! - [`db`]: the SQLite store.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod rocket;

pub mod proto {
    //! Generated protobuf types and service traits.
    tonic::include_proto!("rocket.v1");
}

pub use error::{Error, Result};
