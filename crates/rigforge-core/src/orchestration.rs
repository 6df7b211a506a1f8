//! Wizard step sequencing over the fixed slot order.
//!
//! Purely positional: moving between steps never touches the build.

use crate::domain::Slot;

/// Tracks the active wizard step (`0..=6`) over [`Slot::ALL`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOrchestrator {
    current: usize,
}

impl StepOrchestrator {
    pub const STEP_COUNT: usize = Slot::ALL.len();

    /// Start at the first step.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn current_slot(&self) -> Slot {
        Slot::ALL[self.current]
    }

    /// The slot order the wizard walks.
    pub fn steps(&self) -> &'static [Slot] {
        &Slot::ALL
    }

    /// Advance one step, staying on the last step at the end.
    pub fn next(&mut self) -> Slot {
        self.go_to(self.current.saturating_add(1))
    }

    /// Go back one step, staying on the first step at the start.
    pub fn previous(&mut self) -> Slot {
        self.go_to(self.current.saturating_sub(1))
    }

    /// Jump to `index`, clamped into `0..STEP_COUNT`.
    pub fn go_to(&mut self, index: usize) -> Slot {
        self.current = index.min(Self::STEP_COUNT - 1);
        self.current_slot()
    }

    /// Jump to the step for `slot`.
    pub fn go_to_slot(&mut self, slot: Slot) -> Slot {
        self.go_to(slot.index())
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == Self::STEP_COUNT - 1
    }
}
