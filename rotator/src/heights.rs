use alloc::vec::Vec;

/// First-write-wins store of measured item heights, keyed by original index.
///
/// Layout measurement arrives asynchronously and may be reported more than
/// once per item (the host renders each item in two display slots). Only the
/// first valid measurement for an index is kept; later writes are ignored, so
/// writes are idempotent and commutative and no ordering is required from the
/// host.
#[derive(Clone, Debug)]
pub struct HeightRegistry {
    heights: Vec<Option<f32>>,
    measured: usize,
}

impl HeightRegistry {
    pub fn new(count: usize) -> Self {
        Self {
            heights: alloc::vec![None; count],
            measured: 0,
        }
    }

    /// Number of original indexes this registry covers.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Records a measured height for `index`.
    ///
    /// Returns `true` if the measurement was recorded. Out-of-range indexes,
    /// already-measured indexes, and non-positive or non-finite heights are
    /// ignored (treated as "not yet measured").
    pub fn record(&mut self, index: usize, height: f32) -> bool {
        if index >= self.heights.len() {
            rtrace!(index, count = self.heights.len(), "record: out of range");
            return false;
        }
        if !(height.is_finite() && height > 0.0) {
            rtrace!(index, height, "record: invalid height ignored");
            return false;
        }
        if self.heights[index].is_some() {
            return false;
        }
        self.heights[index] = Some(height);
        self.measured += 1;
        rtrace!(index, height, measured = self.measured, "record");
        true
    }

    /// Records a batch of measurements. Returns how many were newly recorded.
    pub fn record_many(&mut self, measurements: impl IntoIterator<Item = (usize, f32)>) -> usize {
        let mut recorded = 0usize;
        for (index, height) in measurements {
            if self.record(index, height) {
                recorded += 1;
            }
        }
        recorded
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.heights.get(index).copied().flatten()
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Number of indexes with a recorded height.
    pub fn measured_len(&self) -> usize {
        self.measured
    }

    /// Returns `true` once every index has a recorded height.
    pub fn is_complete(&self) -> bool {
        self.measured == self.heights.len()
    }

    /// Sum of recorded heights for indexes `0..k`.
    ///
    /// Missing entries contribute `0.0`; callers gate on [`Self::is_complete`]
    /// before relying on the sum for layout.
    pub fn sum_of_first(&self, k: usize) -> f32 {
        self.heights
            .iter()
            .take(k)
            .map(|h| h.unwrap_or(0.0))
            .sum()
    }

    /// Sum of all recorded heights.
    pub fn total(&self) -> f32 {
        self.sum_of_first(self.heights.len())
    }
}
