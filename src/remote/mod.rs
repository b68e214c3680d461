//! Remote service client module
//!
//! Provides the HTTP client for the Smart FAQ service.

mod client;
mod types;

pub use client::{RemoteClient, DEFAULT_SERVER_URL};
pub use types::*;
