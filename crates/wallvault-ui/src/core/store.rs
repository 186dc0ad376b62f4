//! App-wide yewdux store.
//!
//! # Design
//! - The catalog state is the only shared slice; reducers in
//!   [`crate::features::catalog::actions`] are the only writers.

use yewdux::prelude::Store;

use crate::features::catalog::state::CatalogState;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Catalog partitions, filters, selection and notifications.
    pub catalog: CatalogState,
}
