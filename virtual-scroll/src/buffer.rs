use crate::config::validate_buffer_scale;
use crate::{ConfigError, RenderWindow};

/// Number of items added on each side of a window: `ceil(capacity * buffer_scale)`.
pub fn buffer_len(capacity: usize, buffer_scale: f32) -> Result<usize, ConfigError> {
    let scale = validate_buffer_scale(buffer_scale)?;
    Ok(ceil_to_usize(capacity as f32 * scale))
}

/// Widens `window` by [`buffer_len`] items on each side, clamped to `[0, len]`.
///
/// A scale of `0.0` returns the window unchanged (apart from clamping).
pub fn expand(
    window: RenderWindow,
    capacity: usize,
    buffer_scale: f32,
    len: usize,
) -> Result<RenderWindow, ConfigError> {
    let extra = buffer_len(capacity, buffer_scale)?;
    let start = window.start_index.saturating_sub(extra);
    let end = window.end_index.saturating_add(extra);
    Ok(RenderWindow::new(start, end).clamp_to(len))
}

// `f32::ceil` is not available without `std`.
fn ceil_to_usize(value: f32) -> usize {
    if value <= 0.0 {
        return 0;
    }
    // Float-to-int casts saturate.
    let truncated = value as usize;
    if (truncated as f32) < value {
        truncated.saturating_add(1)
    } else {
        truncated
    }
}
