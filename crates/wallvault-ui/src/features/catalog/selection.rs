//! Multi-select over the unsubscribed partition.
//!
//! Selection is keyed by item id and persists across pagination. The
//! select-all control only ever looks at the rows rendered on the current page.

use crate::core::error::CatalogError;
use crate::features::catalog::state::{CatalogState, SelectionSet};
use crate::models::CatalogRow;

/// Visual state of the select-all checkbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriState {
    /// Every rendered row is selected.
    Checked,
    /// No rendered row is selected.
    Unchecked,
    /// Some, but not all, rendered rows are selected.
    Indeterminate,
}

/// Compute the select-all state from the rows rendered on the current page.
#[must_use]
pub fn select_all_tri_state(selected: &SelectionSet, rendered: &[CatalogRow]) -> TriState {
    let hits = rendered
        .iter()
        .filter(|row| selected.contains(&row.id))
        .count();
    match hits {
        0 => TriState::Unchecked,
        n if n == rendered.len() => TriState::Checked,
        _ => TriState::Indeterminate,
    }
}

/// Add or remove one id.
///
/// # Errors
///
/// Returns [`CatalogError::Validation`] when selecting an id that no
/// unsubscribed response has reported since the last filter change.
pub fn toggle(state: &mut CatalogState, id: &str, selected: bool) -> Result<(), CatalogError> {
    if !selected {
        state.selected.remove(id);
        return Ok(());
    }
    if !state.known_unsubscribed.contains(id) {
        return Err(CatalogError::validation(format!(
            "wallpaper {id} is not in the unsubscribed list"
        )));
    }
    state.selected.insert(id.to_string());
    Ok(())
}

/// Select or deselect every row rendered on the current unsubscribed page.
///
/// Rows still on screen from before a filter change are not selectable until
/// the new filter's response replaces them.
pub fn select_all(state: &mut CatalogState, selected: bool) {
    let ids = state.unsubscribed.rows.iter().map(|row| row.id.clone());
    if selected {
        let known: Vec<String> = ids
            .filter(|id| state.known_unsubscribed.contains(id))
            .collect();
        state.selected.extend(known);
    } else {
        for id in ids {
            state.selected.remove(&id);
        }
    }
}

/// Drop the whole selection, including ids on other pages.
pub fn clear(state: &mut CatalogState) {
    state.selected.clear();
}

impl CatalogState {
    /// Select-all state for the current unsubscribed page.
    #[must_use]
    pub fn select_all_tri_state(&self) -> TriState {
        select_all_tri_state(&self.selected, &self.unsubscribed.rows)
    }
}
