//! Configuration state transitions.
//!
//! A [`BuildConfig`] is never edited in place by callers: every selection
//! produces a new snapshot.

use crate::domain::{BuildConfig, Component, ConfiguratorError, Result, Slot};

/// Return a copy of `config` with `slot` set to `component` (or cleared with `None`).
///
/// Fails with [`ConfiguratorError::SlotMismatch`] when the component's
/// `subCategory` is not `slot`; `config` is left untouched either way.
pub fn select_component(
    config: &BuildConfig,
    slot: Slot,
    component: Option<Component>,
) -> Result<BuildConfig> {
    if let Some(part) = &component {
        if !part.fits(slot) {
            return Err(ConfiguratorError::SlotMismatch {
                slot,
                sub_category: part.sub_category.clone(),
                component_id: part.id.clone(),
            });
        }
    }

    let mut next = config.clone();
    *next.slot_mut(slot) = component;
    Ok(next)
}

/// Return a copy of `config` with `slot` emptied.
pub fn clear_slot(config: &BuildConfig, slot: Slot) -> BuildConfig {
    let mut next = config.clone();
    *next.slot_mut(slot) = None;
    next
}
