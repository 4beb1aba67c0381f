use alloc::vec::Vec;

use crate::PositionEntry;

/// Cumulative per-item layout used in dynamic-height mode.
///
/// Every entry starts out at the estimated height and is corrected by [`Self::reconcile`] once
/// the item has actually been rendered and measured. Entries are dense (`entries[i].index == i`)
/// and contiguous (`entries[i].top == entries[i - 1].bottom`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionTable {
    entries: Vec<PositionEntry>,
    estimate: u32,
}

impl PositionTable {
    pub fn new(estimate: u32) -> Self {
        Self {
            entries: Vec::new(),
            estimate,
        }
    }

    /// Creates a table with `len` estimated entries.
    pub fn with_len(len: usize, estimate: u32) -> Self {
        let mut table = Self::new(estimate);
        table.rebuild(len);
        table
    }

    pub fn estimate(&self) -> u32 {
        self.estimate
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PositionEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&PositionEntry> {
        self.entries.get(index)
    }

    pub fn last(&self) -> Option<&PositionEntry> {
        self.entries.last()
    }

    /// Top of `index`, or the total height when `index` is past the end.
    pub fn top_of(&self, index: usize) -> u64 {
        match self.entries.get(index) {
            Some(entry) => entry.top,
            None => self.total_height(),
        }
    }

    pub fn total_height(&self) -> u64 {
        self.entries.last().map_or(0, |entry| entry.bottom)
    }

    /// Recomputes every entry from scratch using the estimated height.
    pub fn rebuild(&mut self, len: usize) {
        vdebug!(len, estimate = self.estimate, "PositionTable::rebuild");
        self.entries.clear();
        self.entries.reserve_exact(len);
        self.push_estimates(0, len, 0);
    }

    /// Recomputes entries `[from_index, len)` while keeping `[0, from_index)` as they are.
    ///
    /// New entries are stacked after `anchor.bottom`, so measured heights in the preserved prefix
    /// stay intact. `anchor` is expected to be the entry at `from_index - 1`. Without an anchor,
    /// or when the prefix is not available, this falls back to [`Self::rebuild`].
    pub fn rebuild_from(&mut self, len: usize, from_index: usize, anchor: Option<PositionEntry>) {
        let Some(anchor) = anchor else {
            self.rebuild(len);
            return;
        };
        if from_index == 0 || from_index > self.entries.len() || from_index > len {
            self.rebuild(len);
            return;
        }
        debug_assert_eq!(
            anchor.index + 1,
            from_index,
            "anchor must be the entry right before from_index"
        );

        vdebug!(len, from_index, anchor_bottom = anchor.bottom, "PositionTable::rebuild_from");
        self.entries.truncate(from_index);
        self.entries.reserve_exact(len - from_index);
        self.push_estimates(from_index, len, anchor.bottom);
    }

    fn push_estimates(&mut self, from_index: usize, len: usize, mut top: u64) {
        let estimate = self.estimate;
        for index in from_index..len {
            let entry = PositionEntry::new(index, top, estimate);
            top = entry.bottom;
            self.entries.push(entry);
        }
    }

    /// Applies measured heights for the items rendered starting at `start_index`.
    ///
    /// Every entry after the measured run is shifted by the accumulated height delta. That tail
    /// shift is `O(len - start_index)` per call, which bounds how large a list can get before
    /// reconciliation starts to dominate a frame.
    ///
    /// Returns the total height delta (positive when items grew).
    pub fn reconcile(&mut self, start_index: usize, measured: &[u32]) -> i64 {
        let len = self.entries.len();
        if start_index >= len || measured.is_empty() {
            return 0;
        }
        let end = start_index + measured.len().min(len - start_index);

        let mut shift = 0i64;
        for (entry, &height) in self.entries[start_index..end].iter_mut().zip(measured) {
            entry.top = shift_by(entry.top, shift);
            shift += height as i64 - entry.height as i64;
            entry.height = height;
            entry.bottom = entry.top.saturating_add(height as u64);
        }

        if shift == 0 {
            return 0;
        }

        vtrace!(start_index, end, shift, "PositionTable::reconcile");
        for entry in &mut self.entries[end..] {
            entry.top = shift_by(entry.top, shift);
            entry.bottom = shift_by(entry.bottom, shift);
        }
        shift
    }
}

fn shift_by(value: u64, delta: i64) -> u64 {
    if delta >= 0 {
        value.saturating_add(delta as u64)
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}
