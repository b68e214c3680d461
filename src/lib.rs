//! smartfaq - Smart FAQ admin client
//!
//! Curates the question/answer entries of a Smart FAQ service, probes its
//! answer endpoint, and shows its usage analytics.
//!
//! ## Key Concepts
//!
//! - **Three modes**: curation, probe and analytics panels over one session
//! - **Reload after every mutation**: the entry store mirrors the service, never merges
//! - **Per-flow busy state**: each flow disables only its own submit control
//! - **Remote intelligence**: search, ranking and answer generation live server-side

pub mod cli;
pub mod config;
pub mod core;
pub mod remote;

pub use crate::core::entry::Entry;
pub use crate::core::flow::{FlowKind, Outcome};
pub use crate::core::mode::Mode;
pub use crate::core::service::{FaqService, ServiceError};
pub use crate::core::session::Session;
pub use crate::remote::RemoteClient;
