use alloc::sync::Arc;

use crate::rotator::Rotator;

/// A callback fired when the rotator's internal state changes.
pub type OnChangeCallback = Arc<dyn Fn(&Rotator) + Send + Sync>;

/// Configuration for [`crate::Rotator`].
///
/// This type is designed to be cheap to clone: the callback is stored in an
/// `Arc` so adapters can update a few fields and call `Rotator::set_options`
/// without reallocating closures.
pub struct RotatorOptions {
    /// Number of distinct items in the rotation (N).
    pub count: usize,

    /// How many items the host viewport shows at once.
    ///
    /// Intended to be `<= count`. Larger values are accepted but the visible
    /// window then asks for more items than one cycle provides; the engine
    /// warns at construction and keeps rotating (the index math does not
    /// depend on this field).
    pub display_count: usize,

    /// Milliseconds between rotation steps.
    pub rotation_interval_ms: u64,

    /// Viewport height reported until every item has been measured.
    ///
    /// Hosts typically pass a generously large value (e.g. the window height)
    /// so all slots render and get measured before the fade-in.
    pub placeholder_height: f32,

    /// Enables/disables the rotator. When disabled, the rotation state is
    /// reset and steps are refused; recorded heights are kept.
    pub enabled: bool,

    /// Optional callback fired when the rotator's internal state changes.
    pub on_change: Option<OnChangeCallback>,
}

impl RotatorOptions {
    pub fn new(count: usize, display_count: usize, rotation_interval_ms: u64) -> Self {
        Self {
            count,
            display_count,
            rotation_interval_ms,
            placeholder_height: 0.0,
            enabled: true,
            on_change: None,
        }
    }

    pub fn with_placeholder_height(mut self, placeholder_height: f32) -> Self {
        self.placeholder_height = placeholder_height;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_rotation_interval_ms(mut self, rotation_interval_ms: u64) -> Self {
        self.rotation_interval_ms = rotation_interval_ms;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Rotator) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl Clone for RotatorOptions {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            display_count: self.display_count,
            rotation_interval_ms: self.rotation_interval_ms,
            placeholder_height: self.placeholder_height,
            enabled: self.enabled,
            on_change: self.on_change.clone(),
        }
    }
}

impl core::fmt::Debug for RotatorOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RotatorOptions")
            .field("count", &self.count)
            .field("display_count", &self.display_count)
            .field("rotation_interval_ms", &self.rotation_interval_ms)
            .field("placeholder_height", &self.placeholder_height)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
