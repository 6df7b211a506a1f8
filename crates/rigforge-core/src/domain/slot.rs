//! The seven fixed component slots of a build.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ConfiguratorError;

/// A component category a build can fill. Declaration order is wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Cpu,
    Motherboard,
    Ram,
    Gpu,
    Storage,
    Case,
    Psu,
}

impl Slot {
    /// Every slot, in wizard order.
    pub const ALL: [Slot; 7] = [
        Slot::Cpu,
        Slot::Motherboard,
        Slot::Ram,
        Slot::Gpu,
        Slot::Storage,
        Slot::Case,
        Slot::Psu,
    ];

    /// Slots that must be filled before a build may go to checkout.
    pub const REQUIRED: [Slot; 6] = [
        Slot::Cpu,
        Slot::Motherboard,
        Slot::Ram,
        Slot::Gpu,
        Slot::Storage,
        Slot::Psu,
    ];

    /// Wire name, identical to a catalog component's `subCategory`.
    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Cpu => "cpu",
            Slot::Motherboard => "motherboard",
            Slot::Ram => "ram",
            Slot::Gpu => "gpu",
            Slot::Storage => "storage",
            Slot::Case => "case",
            Slot::Psu => "psu",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Slot::Cpu => "Processor (CPU)",
            Slot::Motherboard => "Motherboard",
            Slot::Ram => "Memory (RAM)",
            Slot::Gpu => "Graphics Card (GPU)",
            Slot::Storage => "Storage",
            Slot::Case => "Case",
            Slot::Psu => "Power Supply (PSU)",
        }
    }

    /// Position in [`Slot::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_required(self) -> bool {
        self != Slot::Case
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = ConfiguratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| ConfiguratorError::UnknownSlot(s.to_string()))
    }
}
