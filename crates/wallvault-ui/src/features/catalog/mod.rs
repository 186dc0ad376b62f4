//! Catalog feature surface: state, reducer, selection, bulk operations and export.

pub mod actions;
pub mod bulk;
pub mod export;
pub mod selection;
pub mod state;
