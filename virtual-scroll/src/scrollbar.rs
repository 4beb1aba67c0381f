use crate::{ScrollbarStyle, ScrollbarThumb};

/// Computes the custom scrollbar thumb for a viewport showing `offset..offset + viewport` of a
/// `total`-high list.
///
/// Returns `None` when the content fits in the viewport: there is nothing to scroll and the
/// thumb position would be undefined.
pub fn thumb_for(
    total: u64,
    viewport: u32,
    offset: u64,
    style: &ScrollbarStyle,
) -> Option<ScrollbarThumb> {
    let view = viewport as u64;
    if view == 0 || total <= view {
        return None;
    }

    let natural = view * view / total;
    let length = natural.max(style.min_thumb_length as u64).min(view) as u32;
    let travel = viewport - length;
    let scrollable = total - view;
    let top = (offset as u128 * travel as u128)
        .div_ceil(scrollable as u128)
        .min(travel as u128) as u32;

    Some(ScrollbarThumb {
        length,
        top,
        track: viewport,
    })
}

/// Maps a thumb position back to the scroll offset it represents.
///
/// `thumb_top` is clamped to the thumb's travel.
pub fn offset_for_thumb_top(thumb_top: u32, total: u64, viewport: u32, thumb_length: u32) -> u64 {
    let view = viewport as u64;
    if total <= view {
        return 0;
    }
    let travel = viewport.saturating_sub(thumb_length);
    if travel == 0 {
        return 0;
    }
    let scrollable = total - view;
    let top = thumb_top.min(travel);
    (scrollable as u128 * top as u128)
        .div_ceil(travel as u128)
        .min(scrollable as u128) as u64
}
