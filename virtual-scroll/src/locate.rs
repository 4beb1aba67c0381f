use crate::{PositionEntry, PositionTable, RenderWindow};

/// Returns the smallest index whose key is strictly greater than `value`.
///
/// `items` must be sorted ascending by `key`. Returns `None` when every key is `<= value`
/// (including the empty slice).
pub fn first_exceeding<T>(items: &[T], value: u64, key: impl Fn(&T) -> u64) -> Option<usize> {
    let index = items.partition_point(|item| key(item) <= value);
    (index < items.len()).then_some(index)
}

/// Maps scroll offsets to item indexes.
///
/// Fixed-height lists use closed-form arithmetic; dynamic-height lists search the
/// [`PositionTable`].
#[derive(Clone, Copy, Debug)]
pub enum IndexLocator<'a> {
    Fixed { item_height: u32, len: usize },
    Dynamic(&'a PositionTable),
}

impl IndexLocator<'_> {
    pub fn len(&self) -> usize {
        match self {
            Self::Fixed { len, .. } => *len,
            Self::Dynamic(table) => table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the first item whose bottom edge is below `offset`.
    ///
    /// Returns `None` for an empty list. Offsets past the end clamp to the last item.
    pub fn first_visible_index(&self, offset: u64) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let index = match self {
            Self::Fixed { item_height, .. } => {
                let index = offset / (*item_height).max(1) as u64;
                usize::try_from(index).unwrap_or(usize::MAX)
            }
            Self::Dynamic(table) => {
                first_exceeding(table.entries(), offset, |entry: &PositionEntry| entry.bottom)
                    .unwrap_or(len)
            }
        };
        Some(index.min(len - 1))
    }

    /// `first + capacity`, clamped to the list length.
    pub fn last_visible_index(&self, first: usize, capacity: usize) -> usize {
        first.saturating_add(capacity).min(self.len())
    }

    /// The unbuffered window covering a viewport of `capacity` items at `offset`.
    pub fn visible_window(&self, offset: u64, capacity: usize) -> RenderWindow {
        match self.first_visible_index(offset) {
            Some(first) => RenderWindow::new(first, self.last_visible_index(first, capacity)),
            None => RenderWindow::empty(),
        }
    }

    pub fn top_of(&self, index: usize) -> u64 {
        match self {
            Self::Fixed { item_height, len } => {
                (index.min(*len) as u64).saturating_mul(*item_height as u64)
            }
            Self::Dynamic(table) => table.top_of(index),
        }
    }

    pub fn total_height(&self) -> u64 {
        match self {
            Self::Fixed { item_height, len } => (*len as u64).saturating_mul(*item_height as u64),
            Self::Dynamic(table) => table.total_height(),
        }
    }
}
