use virtual_scroll::{ScrollbarThumb, offset_for_thumb_top};

/// An in-progress drag of the custom scrollbar thumb.
///
/// Pointer positions are in track coordinates (the same space as [`ScrollbarThumb::top`]) and
/// may fall outside the track while the pointer is held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThumbDrag {
    /// Distance from the thumb's top edge to where it was grabbed.
    grab_offset: i64,
}

impl ThumbDrag {
    /// Starts a drag with the pointer at `pointer_y` on `thumb`.
    pub fn press(thumb: &ScrollbarThumb, pointer_y: i64) -> Self {
        Self {
            grab_offset: pointer_y.saturating_sub(i64::from(thumb.top)),
        }
    }

    pub fn grab_offset(&self) -> i64 {
        self.grab_offset
    }

    /// Thumb top for a pointer at `pointer_y`, clamped to the thumb's travel.
    pub fn thumb_top(&self, thumb: &ScrollbarThumb, pointer_y: i64) -> u32 {
        let travel = i64::from(thumb.travel());
        pointer_y.saturating_sub(self.grab_offset).clamp(0, travel) as u32
    }

    /// Scroll offset for a pointer at `pointer_y` on a list `total_height` tall.
    pub fn offset_for(&self, thumb: &ScrollbarThumb, pointer_y: i64, total_height: u64) -> u64 {
        let top = self.thumb_top(thumb, pointer_y);
        offset_for_thumb_top(top, total_height, thumb.track, thumb.length)
    }
}
