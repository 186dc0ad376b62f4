//! Core, DOM-free primitives for the catalog controller.
pub mod config;
pub mod coordinator;
pub mod error;
pub mod pagination;
pub mod query;
pub mod store;
