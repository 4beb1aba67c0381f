use crate::ConfigError;

/// Cumulative layout of a single item in dynamic-height mode.
///
/// `bottom - top == height` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionEntry {
    pub index: usize,
    pub height: u32,
    pub top: u64,
    pub bottom: u64,
}

impl PositionEntry {
    pub fn new(index: usize, top: u64, height: u32) -> Self {
        Self {
            index,
            height,
            top,
            bottom: top.saturating_add(height as u64),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderWindow {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl RenderWindow {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index: end_index.max(start_index),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    /// Clamps both bounds into `[0, len]`.
    pub fn clamp_to(self, len: usize) -> Self {
        let end = self.end_index.min(len);
        Self::new(self.start_index.min(end), end)
    }
}

/// Geometry of the custom scrollbar thumb, in pixels along the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollbarThumb {
    pub length: u32,
    pub top: u32,
    /// Length of the track the thumb travels in (the viewport height).
    pub track: u32,
}

impl ScrollbarThumb {
    /// Maximum value `top` can take.
    pub fn travel(&self) -> u32 {
        self.track.saturating_sub(self.length)
    }

    pub fn length_fraction(&self) -> f32 {
        if self.track == 0 {
            return 0.0;
        }
        self.length as f32 / self.track as f32
    }

    pub fn top_fraction(&self) -> f32 {
        if self.track == 0 {
            return 0.0;
        }
        self.top as f32 / self.track as f32
    }
}

/// One item produced by the render callback, ready to be committed to the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedItem<N> {
    pub index: usize,
    pub node: N,
    /// Set in fixed-height mode: the surface must lay the node out at exactly this height.
    pub forced_height: Option<u32>,
}

/// Steps of a single render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderPhase {
    #[default]
    Idle,
    Locating,
    Slicing,
    Painting,
    Reconciling,
    RepositioningChrome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassKind {
    /// Items were re-rendered and committed.
    Full,
    /// Only the total extent and the scrollbar were refreshed.
    ChromeOnly,
}

/// Outcome of a render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPass {
    pub kind: PassKind,
    /// Indexes covering the viewport, without buffer.
    pub visible: RenderWindow,
    /// Indexes materialized into the visible container.
    pub window: RenderWindow,
    pub total_height: u64,
    /// Translation applied to the visible container.
    pub visible_offset: u64,
    pub thumb: Option<ScrollbarThumb>,
    /// Set when the buffer scale was rejected and buffering was skipped for this pass.
    pub buffer_error: Option<ConfigError>,
}

impl RenderPass {
    pub fn rendered_indexes(&self) -> core::ops::Range<usize> {
        self.window.start_index..self.window.end_index
    }
}

