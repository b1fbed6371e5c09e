use crate::Phase;

/// A lightweight, serializable snapshot of the rotation state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
/// Measured heights are not part of the snapshot; they are re-reported by the
/// host's layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationState {
    pub phase: Phase,
    pub current_index: usize,
    pub messages_seen: usize,
    pub scroll_offset: f32,
}

impl Default for RotationState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            current_index: 0,
            messages_seen: 0,
            scroll_offset: 0.0,
        }
    }
}
