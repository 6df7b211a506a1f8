//! The in-progress build: one component or nothing per slot.

use serde::{Deserialize, Serialize};

use super::component::Component;
use super::error::{ConfiguratorError, Result};
use super::slot::Slot;

/// Snapshot of a build's selections.
///
/// Serializes as an object with all seven slot keys, `null` for empty slots.
/// Fields are private: the only way to place a component is
/// [`crate::select_component`], which guards the slot taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default)]
    cpu: Option<Component>,
    #[serde(default)]
    motherboard: Option<Component>,
    #[serde(default)]
    ram: Option<Component>,
    #[serde(default)]
    gpu: Option<Component>,
    #[serde(default)]
    storage: Option<Component>,
    #[serde(default)]
    case: Option<Component>,
    #[serde(default)]
    psu: Option<Component>,
}

impl BuildConfig {
    /// A build with every slot empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&Component> {
        self.slot_ref(slot).as_ref()
    }

    pub fn is_filled(&self, slot: Slot) -> bool {
        self.get(slot).is_some()
    }

    /// Filled slots and their components, in wizard order.
    pub fn selected(&self) -> Vec<(Slot, &Component)> {
        Slot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|c| (slot, c)))
            .collect()
    }

    /// Selected components in wizard order.
    pub fn components(&self) -> impl Iterator<Item = &Component> + '_ {
        Slot::ALL.into_iter().filter_map(move |slot| self.get(slot))
    }

    pub fn selected_count(&self) -> usize {
        self.components().count()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_count() == 0
    }

    /// Which of `slots` are empty, preserving the given order.
    pub fn missing(&self, slots: &[Slot]) -> Vec<Slot> {
        slots
            .iter()
            .copied()
            .filter(|slot| !self.is_filled(*slot))
            .collect()
    }

    /// Verify every filled slot holds a component of that slot's category.
    ///
    /// Selection already enforces this; configs arriving from outside
    /// (deserialized documents) are checked with it.
    pub fn check_taxonomy(&self) -> Result<()> {
        for (slot, component) in self.selected() {
            if !component.fits(slot) {
                return Err(ConfiguratorError::SlotMismatch {
                    slot,
                    sub_category: component.sub_category.clone(),
                    component_id: component.id.clone(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn slot_mut(&mut self, slot: Slot) -> &mut Option<Component> {
        match slot {
            Slot::Cpu => &mut self.cpu,
            Slot::Motherboard => &mut self.motherboard,
            Slot::Ram => &mut self.ram,
            Slot::Gpu => &mut self.gpu,
            Slot::Storage => &mut self.storage,
            Slot::Case => &mut self.case,
            Slot::Psu => &mut self.psu,
        }
    }

    fn slot_ref(&self, slot: Slot) -> &Option<Component> {
        match slot {
            Slot::Cpu => &self.cpu,
            Slot::Motherboard => &self.motherboard,
            Slot::Ram => &self.ram,
            Slot::Gpu => &self.gpu,
            Slot::Storage => &self.storage,
            Slot::Case => &self.case,
            Slot::Psu => &self.psu,
        }
    }
}
