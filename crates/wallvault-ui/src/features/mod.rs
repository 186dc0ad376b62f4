//! Feature slices of the catalog controller.

pub mod catalog;
