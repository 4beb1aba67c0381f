use crate::ConfigError;

/// How scroll and resize signals are rate-limited before they reach the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThrottleMode {
    /// Coalesce bursts and fire once `delay_ms` of quiescence has elapsed.
    Delay { delay_ms: u64 },
    /// Fire at most once per display refresh tick.
    Frame,
}

impl ThrottleMode {
    pub const DEFAULT_DELAY_MS: u64 = 10;
}

impl Default for ThrottleMode {
    fn default() -> Self {
        Self::Delay {
            delay_ms: Self::DEFAULT_DELAY_MS,
        }
    }
}

/// Cosmetics of the custom scrollbar thumb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollbarStyle {
    pub thumb_width: u32,
    pub border_radius: u32,
    /// The thumb never gets shorter than this (unless the viewport itself is shorter).
    pub min_thumb_length: u32,
}

impl Default for ScrollbarStyle {
    fn default() -> Self {
        Self {
            thumb_width: 6,
            border_radius: 6,
            min_thumb_length: 150,
        }
    }
}

impl ScrollbarStyle {
    pub fn with_thumb_width(mut self, thumb_width: u32) -> Self {
        self.thumb_width = thumb_width;
        self
    }

    pub fn with_border_radius(mut self, border_radius: u32) -> Self {
        self.border_radius = border_radius;
        self
    }

    pub fn with_min_thumb_length(mut self, min_thumb_length: u32) -> Self {
        self.min_thumb_length = min_thumb_length;
        self
    }
}

/// Configuration for [`crate::VirtualScroll`].
///
/// The configuration is fixed once the list is constructed. Values are not validated eagerly:
/// call [`Self::validate`] to check them up front, otherwise the engine reports problems through
/// its diagnostics and degrades to safe defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualScrollConfig {
    /// Row height in fixed mode; the initial estimate for unmeasured rows in dynamic mode.
    pub item_height: u32,
    pub dynamic_height: bool,
    /// Fraction of the viewport capacity pre-rendered on each side of the visible window.
    pub buffer_scale: f32,
    pub throttle: ThrottleMode,
    pub custom_scrollbar: bool,
    pub scrollbar: ScrollbarStyle,
}

impl Default for VirtualScrollConfig {
    fn default() -> Self {
        Self {
            item_height: 50,
            dynamic_height: false,
            buffer_scale: 0.1,
            throttle: ThrottleMode::default(),
            custom_scrollbar: true,
            scrollbar: ScrollbarStyle::default(),
        }
    }
}

impl VirtualScrollConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item_height(mut self, item_height: u32) -> Self {
        self.item_height = item_height;
        self
    }

    pub fn with_dynamic_height(mut self, dynamic_height: bool) -> Self {
        self.dynamic_height = dynamic_height;
        self
    }

    pub fn with_buffer_scale(mut self, buffer_scale: f32) -> Self {
        self.buffer_scale = buffer_scale;
        self
    }

    pub fn with_throttle(mut self, throttle: ThrottleMode) -> Self {
        self.throttle = throttle;
        self
    }

    /// Selects refresh-tick throttling (`true`) or the default fixed-delay throttle (`false`).
    pub fn with_frame_optimize(mut self, use_frame: bool) -> Self {
        self.throttle = if use_frame {
            ThrottleMode::Frame
        } else {
            ThrottleMode::default()
        };
        self
    }

    pub fn with_custom_scrollbar(mut self, custom_scrollbar: bool) -> Self {
        self.custom_scrollbar = custom_scrollbar;
        self
    }

    pub fn with_scrollbar_style(mut self, scrollbar: ScrollbarStyle) -> Self {
        self.scrollbar = scrollbar;
        self
    }

    /// The item height used for arithmetic: never zero.
    pub fn effective_item_height(&self) -> u32 {
        self.item_height.max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_height == 0 {
            return Err(ConfigError::ZeroItemHeight);
        }
        validate_buffer_scale(self.buffer_scale)?;
        Ok(())
    }
}

pub(crate) fn validate_buffer_scale(buffer_scale: f32) -> Result<f32, ConfigError> {
    if !buffer_scale.is_finite() || buffer_scale < 0.0 {
        return Err(ConfigError::InvalidBufferScale(buffer_scale));
    }
    Ok(buffer_scale)
}
