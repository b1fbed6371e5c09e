use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::buffer::RotationBuffer;
use crate::heights::HeightRegistry;
use crate::{Phase, RotationState, RotatorOptions, Slot, StepMotion, StepOutcome};

const DIMMED_OPACITY: f32 = 0.25;

/// A headless content rotation engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold the renderable items, only their indexes and heights.
/// - Your adapter drives it by reporting layout measurements and by calling
///   `begin_step` / `set_scroll_offset` / `complete_step` around each
///   animated step.
/// - Rendering is exposed via a zero-allocation iteration API
///   (`for_each_slot`).
///
/// For tween-driven animation and scheduling, see the `rotator-adapter`
/// crate.
#[derive(Clone, Debug)]
pub struct Rotator {
    options: RotatorOptions,
    heights: HeightRegistry,
    buffer: RotationBuffer,
    phase: Phase,
    current_index: usize,
    messages_seen: usize,
    scroll_offset: f32,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Rotator {
    /// Creates a new rotator from options.
    ///
    /// Misconfiguration does not fail construction; it is reported through
    /// the `tracing` feature and the engine degrades per field docs.
    pub fn new(options: RotatorOptions) -> Self {
        warn_on_misconfiguration(&options);
        rdebug!(
            count = options.count,
            display_count = options.display_count,
            rotation_interval_ms = options.rotation_interval_ms,
            "Rotator::new"
        );
        Self {
            heights: HeightRegistry::new(options.count),
            buffer: RotationBuffer::new(options.count),
            phase: Phase::Idle,
            current_index: 0,
            messages_seen: 0,
            scroll_offset: 0.0,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &RotatorOptions {
        &self.options
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn display_count(&self) -> usize {
        self.options.display_count
    }

    pub fn rotation_interval_ms(&self) -> u64 {
        self.options.rotation_interval_ms
    }

    pub fn enabled(&self) -> bool {
        self.options.enabled
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// `true` once every item has a recorded height (and the rotation can
    /// leave `Idle`).
    pub fn is_ready(&self) -> bool {
        self.options.count > 0 && self.heights.is_complete()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn messages_seen(&self) -> usize {
        self.messages_seen
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Buffer regeneration counter; bumps once per completed cycle.
    pub fn generation(&self) -> u64 {
        self.buffer.generation()
    }

    /// Number of display slots. Always `2 * count`.
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    // --- measurement ----------------------------------------------------

    /// Records a layout measurement for an original item index.
    ///
    /// First write wins; repeated or invalid measurements are ignored. The
    /// `Idle -> Cycling` transition happens here, once the last missing
    /// height arrives.
    pub fn record_height(&mut self, index: usize, height: f32) {
        if !self.heights.record(index, height) {
            return;
        }
        self.after_measurement();
        self.notify();
    }

    /// Records a batch of layout measurements with a single notification.
    pub fn record_heights(&mut self, measurements: impl IntoIterator<Item = (usize, f32)>) {
        if self.heights.record_many(measurements) == 0 {
            return;
        }
        self.after_measurement();
        self.notify();
    }

    fn after_measurement(&mut self) {
        if self.options.enabled && self.phase == Phase::Idle && self.is_ready() {
            self.phase = Phase::Cycling;
            rdebug!(
                cycle_height = self.cycle_height(),
                "all items measured, cycling"
            );
        }
    }

    pub fn height_of(&self, original_index: usize) -> Option<f32> {
        self.heights.get(original_index)
    }

    pub fn is_measured(&self, original_index: usize) -> bool {
        self.heights.is_measured(original_index)
    }

    pub fn measured_len(&self) -> usize {
        self.heights.measured_len()
    }

    /// Sum of the first `k` recorded heights, missing entries counting as 0.
    pub fn sum_of_first(&self, k: usize) -> f32 {
        self.heights.sum_of_first(k)
    }

    /// Total height of one full copy of the item sequence.
    ///
    /// This is the per-cycle scroll displacement and the correction applied
    /// back at the cycle boundary.
    pub fn cycle_height(&self) -> f32 {
        self.heights.sum_of_first(self.options.count)
    }

    // --- stepping -------------------------------------------------------

    /// Begins one rotation step, advancing the active slot.
    ///
    /// Returns the offset interpolation the animation driver should run, or
    /// `None` when the rotator is disabled or not yet cycling. An unmeasured
    /// height (possible only before readiness) contributes a zero delta
    /// instead of failing.
    ///
    /// The caller animates `scroll_offset` from `from` to `to` (feeding
    /// samples back via [`Self::set_scroll_offset`]) and calls
    /// [`Self::complete_step`] when the interpolation finishes.
    pub fn begin_step(&mut self) -> Option<StepMotion> {
        if !self.options.enabled || self.phase != Phase::Cycling {
            return None;
        }

        let original = self
            .buffer
            .original_index(self.current_index)
            .unwrap_or(self.current_index % self.options.count.max(1));
        let delta = self.heights.get(original).unwrap_or(0.0);

        let motion = StepMotion {
            from: self.scroll_offset,
            to: self.scroll_offset - delta,
        };
        self.current_index += 1;
        rtrace!(
            current_index = self.current_index,
            delta,
            to = motion.to,
            "begin_step"
        );
        self.notify();
        Some(motion)
    }

    /// Writes the animated scroll offset back into the engine.
    ///
    /// Owned by the animation driver while a step is in flight; everyone else
    /// only reads it.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        if self.scroll_offset == offset {
            return;
        }
        self.scroll_offset = offset;
        self.notify();
    }

    /// Completes the step whose interpolation just finished.
    ///
    /// At the cycle boundary (`messages_seen == count - 1`) this regenerates
    /// the buffer, resets the indexes, and applies the cycle-boundary offset
    /// correction in the same state transition, so the swap and the snap-back
    /// are perceived as simultaneous by the renderer.
    ///
    /// Returns `None` when the rotator is disabled or not cycling, matching
    /// [`Self::begin_step`].
    pub fn complete_step(&mut self) -> Option<StepOutcome> {
        if !self.options.enabled || self.phase != Phase::Cycling {
            return None;
        }

        if self.messages_seen >= self.options.count.saturating_sub(1) {
            self.scroll_offset += self.cycle_height();
            self.buffer.regenerate();
            self.current_index = 0;
            self.messages_seen = 0;
            rdebug!(
                generation = self.buffer.generation(),
                offset = self.scroll_offset,
                "cycle completed"
            );
            self.notify();
            Some(StepOutcome::CycleCompleted)
        } else {
            self.messages_seen += 1;
            rtrace!(messages_seen = self.messages_seen, "complete_step");
            self.notify();
            Some(StepOutcome::Advanced)
        }
    }

    // --- layout queries -------------------------------------------------

    /// Container height for the host viewport: the placeholder height until
    /// every item is measured, then the sum of the first `display_count`
    /// heights.
    pub fn viewport_height(&self) -> f32 {
        if self.is_ready() {
            self.heights.sum_of_first(self.options.display_count)
        } else {
            self.options.placeholder_height
        }
    }

    /// Target opacity for the whole container: 0 until ready, 1 after.
    ///
    /// Adapters animate the 0 -> 1 transition exactly once (see
    /// `rotator-adapter`); this is the settled value.
    pub fn container_opacity_target(&self) -> f32 {
        if self.is_ready() { 1.0 } else { 0.0 }
    }

    /// Whether the slot at `display_index` is the active (fully opaque) one.
    ///
    /// Besides `display_index == current_index`, slot 0 counts as active
    /// whenever the active slot is not slot 1. This keeps the top slot opaque
    /// across the regeneration/index-reset race at the cycle boundary (the
    /// two updates may land on different render passes) while releasing it as
    /// soon as slot 1 takes focus. Best-effort: a residual one-frame flicker
    /// is possible if several regenerations race within a single frame.
    pub fn is_active(&self, display_index: usize) -> bool {
        self.current_index == display_index || (display_index == 0 && self.current_index != 1)
    }

    /// Per-slot opacity: 1.0 for the active slot, 0.25 otherwise.
    pub fn opacity_of(&self, display_index: usize) -> f32 {
        if self.is_active(display_index) {
            1.0
        } else {
            DIMMED_OPACITY
        }
    }

    /// Iterates all `2 * count` display slots with their layout data.
    ///
    /// Slots are emitted in display order with cumulative start offsets, so a
    /// host can lay out the stack top-to-bottom and apply `scroll_offset` as
    /// a vertical translation of the whole stack.
    pub fn for_each_slot(&self, mut f: impl FnMut(Slot)) {
        let mut start = 0.0f32;
        for display_index in 0..self.buffer.len() {
            let original_index = self
                .buffer
                .original_index(display_index)
                .unwrap_or(display_index % self.options.count.max(1));
            let height = self.heights.get(original_index).unwrap_or(0.0);
            f(Slot {
                display_index,
                original_index,
                start,
                height,
                opacity: self.opacity_of(display_index),
            });
            start += height;
        }
    }

    /// Collects display slots into `out` (clears `out` first).
    ///
    /// Convenience wrapper around [`Self::for_each_slot`]; prefer the
    /// iteration API and a reused scratch buffer in hot adapters.
    pub fn collect_slots(&self, out: &mut Vec<Slot>) {
        out.clear();
        self.for_each_slot(|slot| out.push(slot));
    }

    // --- snapshots ------------------------------------------------------

    /// Returns a lightweight snapshot of the rotation state.
    pub fn snapshot(&self) -> RotationState {
        RotationState {
            phase: self.phase,
            current_index: self.current_index,
            messages_seen: self.messages_seen,
            scroll_offset: self.scroll_offset,
        }
    }

    /// Restores rotation state from a previously captured snapshot.
    ///
    /// Heights are not part of the snapshot; the phase settles on `Cycling`
    /// only once the host has re-reported all measurements.
    pub fn restore(&mut self, state: RotationState) {
        // Valid display indexes are 0..buffer_len.
        self.current_index = state
            .current_index
            .min(self.buffer.len().saturating_sub(1));
        self.messages_seen = state
            .messages_seen
            .min(self.options.count.saturating_sub(1));
        self.scroll_offset = state.scroll_offset;
        self.phase = if self.is_ready() {
            state.phase
        } else {
            Phase::Idle
        };
        self.notify();
    }

    // --- reconfiguration ------------------------------------------------

    /// Replaces the options wholesale.
    ///
    /// A changed item count rebuilds the buffer and registry (overlapping
    /// heights survive); a changed interval or enabled flag restarts the
    /// rotation from the top with the heights intact.
    pub fn set_options(&mut self, options: RotatorOptions) {
        let prev_count = self.options.count;
        let prev_interval = self.options.rotation_interval_ms;
        let was_enabled = self.options.enabled;
        self.options = options;
        warn_on_misconfiguration(&self.options);
        rtrace!(
            count = self.options.count,
            display_count = self.options.display_count,
            enabled = self.options.enabled,
            "Rotator::set_options"
        );

        if self.options.count != prev_count {
            self.rebuild_for_count();
        } else if self.options.enabled != was_enabled
            || self.options.rotation_interval_ms != prev_interval
        {
            self.reset_rotation();
        }

        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to
    /// `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut RotatorOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Rotator) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.options.enabled == enabled {
            return;
        }
        self.options.enabled = enabled;
        self.reset_rotation();
        self.notify();
    }

    /// Rebuilds for a changed item count.
    ///
    /// Heights for indexes that still exist are kept (the items themselves
    /// are immutable); indexes past the new count are dropped. The rotation
    /// restarts from the top of a fresh buffer.
    fn rebuild_for_count(&mut self) {
        let mut heights = HeightRegistry::new(self.options.count);
        for index in 0..self.options.count {
            if let Some(height) = self.heights.get(index) {
                heights.record(index, height);
            }
        }
        self.heights = heights;
        self.buffer.reset(self.options.count);
        self.reset_rotation();
    }

    fn reset_rotation(&mut self) {
        self.current_index = 0;
        self.messages_seen = 0;
        self.scroll_offset = 0.0;
        self.phase = if self.options.enabled && self.is_ready() {
            Phase::Cycling
        } else {
            Phase::Idle
        };
    }

    // --- notification ---------------------------------------------------

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// Recommended when a host delivers several measurements or mutations in
    /// one frame and `on_change` drives rendering.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }
}

fn warn_on_misconfiguration(options: &RotatorOptions) {
    if options.count == 0 {
        rwarn!("count is 0; the rotator will never become ready");
    }
    if options.display_count > options.count {
        rwarn!(
            display_count = options.display_count,
            count = options.count,
            "display_count greater than count will break the visible window"
        );
    }
    if options.rotation_interval_ms == 0 {
        rwarn!("rotation_interval_ms is 0; adapters will clamp it to 1ms");
    }
}
