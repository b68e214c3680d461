//! Core module - Client-side session state model

pub mod analytics;
pub mod draft;
pub mod entries;
pub mod entry;
pub mod flow;
pub mod mode;
pub mod probe;
pub mod service;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
