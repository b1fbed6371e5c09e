/// Lifecycle phase of the rotation engine.
///
/// The engine starts in `Idle` and moves to `Cycling` once every item has a
/// recorded height. The transition is one-way for a given item set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Idle,
    Cycling,
}

/// One display slot in the rotation stack.
///
/// The stack always holds `2 * count` slots (two concatenated copies of the
/// item sequence); `display_index` addresses the slot, `original_index` is the
/// item it renders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slot {
    pub display_index: usize,
    pub original_index: usize,
    /// Start offset within the unscrolled stack (sum of the heights above).
    pub start: f32,
    /// Measured height; `0.0` while the item is still unmeasured.
    pub height: f32,
    /// `1.0` for the active slot, `0.25` for dimmed slots.
    pub opacity: f32,
}

/// Endpoints of one step's scroll-offset interpolation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepMotion {
    pub from: f32,
    pub to: f32,
}

impl StepMotion {
    pub fn delta(&self) -> f32 {
        self.to - self.from
    }
}

/// What a completed step did to the rotation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepOutcome {
    /// The step advanced within the current cycle.
    Advanced,
    /// The step closed the cycle: the buffer was regenerated and the offset
    /// corrected back by the full cycle displacement.
    CycleCompleted,
}
