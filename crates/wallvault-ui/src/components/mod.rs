//! Yew components for the catalog shell.

pub(crate) mod catalog_table;
pub(crate) mod detail;
pub(crate) mod pagination;
pub(crate) mod settings;
pub(crate) mod toast;
pub(crate) mod toolbar;
