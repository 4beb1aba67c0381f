use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{RenderedItem, ScrollbarThumb};

/// The host-side scroll container a [`crate::VirtualScroll`] paints into.
///
/// The engine only ever talks to the host through this trait, so it can drive a DOM, a GPU
/// scene, or a terminal grid alike. Conceptually the surface has three parts: a scroll viewport,
/// a spacer whose height is the full list height, and a visible container holding the rendered
/// slice, translated to where that slice sits in the full list.
pub trait RenderSurface {
    /// Whatever the item render callback produces (a widget, a DOM node, a line of text).
    type Node;

    /// Height of the scroll viewport, in pixels.
    fn viewport_height(&self) -> u32;

    /// Replaces the content of the visible container with `items` in one step.
    fn commit_visible_items(&mut self, items: Vec<RenderedItem<Self::Node>>);

    /// Pushes the laid-out height of every committed item into `out`, in commit order.
    ///
    /// Only called in dynamic-height mode, right after [`Self::commit_visible_items`]. `out` is
    /// empty on entry.
    fn measure_visible_items(&mut self, out: &mut Vec<u32>);

    /// Sets the height of the spacer that gives the viewport its scroll range.
    fn set_total_extent(&mut self, extent: u64);

    /// Translates the visible container to `offset` within the scroll range.
    fn set_visible_offset(&mut self, offset: u64);

    /// Shows/moves the custom scrollbar thumb, or removes it when `None`.
    fn set_scrollbar_thumb(&mut self, thumb: Option<ScrollbarThumb>);
}

/// A callback that reports the laid-out height of a committed node.
pub type NodeMeasure<N> = Arc<dyn Fn(&N) -> u32 + Send + Sync>;

/// An in-memory [`RenderSurface`] for headless hosts and tests.
///
/// It keeps the last committed batch and chrome state. Measurements come from a user-supplied
/// function; nodes committed with a forced height report that height instead.
pub struct HeadlessSurface<N> {
    viewport_height: u32,
    items: Vec<RenderedItem<N>>,
    total_extent: u64,
    visible_offset: u64,
    thumb: Option<ScrollbarThumb>,
    commits: usize,
    measure: NodeMeasure<N>,
}

impl<N> HeadlessSurface<N> {
    /// Creates a surface whose nodes all measure `default_height` unless forced otherwise.
    pub fn new(viewport_height: u32, default_height: u32) -> Self {
        Self::with_measure(viewport_height, move |_| default_height)
    }

    pub fn with_measure(
        viewport_height: u32,
        measure: impl Fn(&N) -> u32 + Send + Sync + 'static,
    ) -> Self {
        Self {
            viewport_height,
            items: Vec::new(),
            total_extent: 0,
            visible_offset: 0,
            thumb: None,
            commits: 0,
            measure: Arc::new(measure),
        }
    }

    /// Simulates a resize of the host viewport. The engine picks it up on its next resize pass.
    pub fn set_viewport_height(&mut self, viewport_height: u32) {
        self.viewport_height = viewport_height;
    }

    pub fn items(&self) -> &[RenderedItem<N>] {
        &self.items
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.items.iter().map(|item| &item.node)
    }

    pub fn total_extent(&self) -> u64 {
        self.total_extent
    }

    pub fn visible_offset(&self) -> u64 {
        self.visible_offset
    }

    pub fn thumb(&self) -> Option<ScrollbarThumb> {
        self.thumb
    }

    /// Number of times the visible container content has been replaced.
    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl<N> RenderSurface for HeadlessSurface<N> {
    type Node = N;

    fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    fn commit_visible_items(&mut self, items: Vec<RenderedItem<N>>) {
        self.items = items;
        self.commits = self.commits.saturating_add(1);
    }

    fn measure_visible_items(&mut self, out: &mut Vec<u32>) {
        out.extend(
            self.items
                .iter()
                .map(|item| item.forced_height.unwrap_or_else(|| (self.measure)(&item.node))),
        );
    }

    fn set_total_extent(&mut self, extent: u64) {
        self.total_extent = extent;
    }

    fn set_visible_offset(&mut self, offset: u64) {
        self.visible_offset = offset;
    }

    fn set_scrollbar_thumb(&mut self, thumb: Option<ScrollbarThumb>) {
        self.thumb = thumb;
    }
}

impl<N: core::fmt::Debug> core::fmt::Debug for HeadlessSurface<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HeadlessSurface")
            .field("viewport_height", &self.viewport_height)
            .field("items", &self.items)
            .field("total_extent", &self.total_extent)
            .field("visible_offset", &self.visible_offset)
            .field("thumb", &self.thumb)
            .field("commits", &self.commits)
            .finish_non_exhaustive()
    }
}
