use alloc::vec::Vec;

/// The fixed-size display buffer: two concatenated copies of the item
/// sequence.
///
/// Two copies let a full cycle play out contiguously: while the first copy
/// scrolls off the top, the second copy keeps the viewport full. Regenerating
/// the buffer at the cycle boundary (instead of appending per step) keeps the
/// slot count bounded at exactly `2 * count` forever.
#[derive(Clone, Debug)]
pub struct RotationBuffer {
    count: usize,
    slots: Vec<usize>,
    generation: u64,
}

impl RotationBuffer {
    pub fn new(count: usize) -> Self {
        let mut buffer = Self {
            count,
            slots: Vec::new(),
            generation: 0,
        };
        buffer.rebuild();
        buffer
    }

    /// Number of display slots. Always `2 * count`.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// How many times the buffer has been regenerated. Hosts can key their
    /// rendered views off this to rebuild the stack at cycle boundaries.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Maps a display index to the original item index (`display mod count`).
    pub fn original_index(&self, display_index: usize) -> Option<usize> {
        self.slots.get(display_index).copied()
    }

    /// Replaces the buffer wholesale with a fresh `[items, items]` sequence.
    ///
    /// Called only at cycle boundaries.
    pub fn regenerate(&mut self) {
        self.rebuild();
        self.generation = self.generation.saturating_add(1);
        rdebug!(generation = self.generation, len = self.slots.len(), "regenerate");
    }

    /// Replaces the buffer for a new item count (reconfiguration).
    pub fn reset(&mut self, count: usize) {
        self.count = count;
        self.rebuild();
        self.generation = 0;
    }

    fn rebuild(&mut self) {
        self.slots.clear();
        self.slots.reserve_exact(self.count * 2);
        for _ in 0..2 {
            self.slots.extend(0..self.count);
        }
    }
}
