use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::buffer;
use crate::scrollbar;
use crate::{
    ConfigError, IndexLocator, PassKind, PositionTable, RenderPass, RenderPhase, RenderSurface,
    RenderWindow, RenderedItem, ScrollbarThumb, ViewportState, VirtualScrollConfig,
};

/// Upper bound on paint/measure rounds in one dynamic-height render pass.
const MAX_LAYOUT_ROUNDS: usize = 8;

/// Turns one data item into a renderable node.
pub type ItemRenderer<T, N> = Arc<dyn Fn(&T) -> N + Send + Sync>;

/// A virtual-scrolling list.
///
/// The list owns its data, the per-item layout (in dynamic-height mode) and the viewport state,
/// and paints into a host-provided [`RenderSurface`]. Only the items covering the viewport, plus
/// a buffer on each side, are ever rendered; the surface's total extent is kept equal to the
/// height a full render would have.
///
/// Everything is synchronous: each call to [`Self::render`] runs a complete pass. Hosts that
/// receive bursts of scroll/resize events should rate-limit them first (see the
/// `virtual-scroll-adapter` crate).
pub struct VirtualScroll<T, S: RenderSurface> {
    config: VirtualScrollConfig,
    config_error: Option<ConfigError>,
    data: Vec<T>,
    render_item: ItemRenderer<T, S::Node>,
    surface: Option<S>,

    positions: PositionTable,
    viewport: ViewportState,
    visible: Option<RenderWindow>,
    window: Option<RenderWindow>,
    thumb: Option<ScrollbarThumb>,
    phase: RenderPhase,

    heights: Vec<u32>, // scratch buffer for measurements
}

impl<T, S: RenderSurface> VirtualScroll<T, S> {
    /// Creates a list and, when `target` is present, renders its first frame.
    ///
    /// Without a target the list is fully functional (data, positions, loading) but every render
    /// is a no-op until [`Self::mount`] supplies a surface.
    pub fn new(
        target: Option<S>,
        data: Vec<T>,
        render_item: impl Fn(&T) -> S::Node + Send + Sync + 'static,
        config: VirtualScrollConfig,
    ) -> Self {
        let config_error = config.validate().err();
        if config_error.is_some() {
            vwarn!(error = ?config_error, "VirtualScroll::new: invalid configuration, using fallbacks");
        }

        let item_height = config.effective_item_height();
        let positions = if config.dynamic_height {
            PositionTable::with_len(data.len(), item_height)
        } else {
            PositionTable::new(item_height)
        };
        let viewport_height = target.as_ref().map_or(0, |s| s.viewport_height());
        vdebug!(
            len = data.len(),
            dynamic_height = config.dynamic_height,
            mounted = target.is_some(),
            viewport_height,
            "VirtualScroll::new"
        );

        let mut list = Self {
            viewport: ViewportState::with_height(0, viewport_height, item_height),
            config,
            config_error,
            data,
            render_item: Arc::new(render_item),
            surface: target,
            positions,
            visible: None,
            window: None,
            thumb: None,
            phase: RenderPhase::Idle,
            heights: Vec::new(),
        };
        list.render();
        list
    }

    pub fn config(&self) -> &VirtualScrollConfig {
        &self.config
    }

    /// The problem found in the configuration at construction time, if any.
    pub fn config_error(&self) -> Option<ConfigError> {
        self.config_error
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Attaches a surface (replacing any previous one), picks up its viewport height and renders.
    pub fn mount(&mut self, surface: S) -> Option<RenderPass> {
        self.surface = Some(surface);
        self.refresh_viewport();
        self.render()
    }

    /// Detaches the surface. Later renders are no-ops until a new one is mounted.
    pub fn unmount(&mut self) -> Option<S> {
        self.visible = None;
        self.window = None;
        self.thumb = None;
        self.surface.take()
    }

    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn offset(&self) -> u64 {
        self.viewport.offset
    }

    pub fn client_capacity(&self) -> usize {
        self.viewport.client_capacity
    }

    /// The window committed by the last full pass.
    pub fn render_window(&self) -> Option<RenderWindow> {
        self.window
    }

    /// The unbuffered window of the last full pass.
    pub fn visible_window(&self) -> Option<RenderWindow> {
        self.visible
    }

    pub fn scrollbar_thumb(&self) -> Option<ScrollbarThumb> {
        self.thumb
    }

    /// The per-item layout, only maintained in dynamic-height mode.
    pub fn position_table(&self) -> Option<&PositionTable> {
        self.config.dynamic_height.then_some(&self.positions)
    }

    pub fn total_height(&self) -> u64 {
        self.locator().total_height()
    }

    pub fn first_visible_index(&self, offset: u64) -> Option<usize> {
        self.locator().first_visible_index(offset)
    }

    pub fn last_visible_index(&self, first_index: usize) -> usize {
        self.locator()
            .last_visible_index(first_index, self.viewport.client_capacity)
    }

    /// Records a new scroll offset without rendering.
    pub fn set_scroll_offset(&mut self, offset: u64) {
        self.viewport.offset = offset;
    }

    /// Scroll handler: records `offset` and renders.
    pub fn handle_scroll(&mut self, offset: u64) -> Option<RenderPass> {
        vtrace!(offset, "handle_scroll");
        self.set_scroll_offset(offset);
        self.render()
    }

    /// Re-reads the viewport height from the surface and recomputes the client capacity.
    pub fn refresh_viewport(&mut self) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        let height = surface.viewport_height();
        self.viewport
            .resize(height, self.config.effective_item_height());
        vtrace!(
            viewport_height = height,
            client_capacity = self.viewport.client_capacity,
            "refresh_viewport"
        );
    }

    /// Resize handler: refreshes the viewport geometry and renders.
    pub fn handle_resize(&mut self) -> Option<RenderPass> {
        self.refresh_viewport();
        self.render()
    }

    /// Runs one render pass against the mounted surface.
    ///
    /// Returns `None` when no surface is mounted. In dynamic-height mode the surface may receive
    /// more than one commit while newly measured rows settle; the last one is the frame.
    pub fn render(&mut self) -> Option<RenderPass> {
        let Some(mut surface) = self.surface.take() else {
            vtrace!("render skipped: no surface mounted");
            return None;
        };
        let pass = self.render_into(&mut surface);
        self.surface = Some(surface);
        Some(pass)
    }

    /// Replaces the data after rows were spliced in at `insertion_index`, and re-renders.
    ///
    /// Rows before `insertion_index` must be unchanged. In dynamic-height mode their measured
    /// layout is kept and only the rows from `insertion_index` on are re-estimated.
    ///
    /// When the insertion lies past the rendered window, that window is still the one the current
    /// offset and capacity locate, and it did not reach the end of the old data, nothing on screen
    /// changed: only the total extent and the scrollbar are refreshed, and a
    /// [`PassKind::ChromeOnly`] pass is returned.
    pub fn load_more(&mut self, data: Vec<T>, insertion_index: usize) -> Option<RenderPass> {
        let old_len = self.data.len();
        self.data = data;
        let len = self.data.len();
        let insertion_index = insertion_index.min(len);

        if self.config.dynamic_height {
            let anchor = insertion_index
                .checked_sub(1)
                .and_then(|i| self.positions.get(i))
                .copied();
            self.positions.rebuild_from(len, insertion_index, anchor);
        }
        vdebug!(old_len, len, insertion_index, "load_more");

        // The last committed window only stands in for the screen if the offset and capacity
        // still locate it.
        let off_screen = self.window.is_some_and(|w| {
            let (_, current, _) = self.locate_window();
            current == w && insertion_index >= w.end_index && w.end_index < old_len
        });
        if off_screen {
            return self.refresh_chrome();
        }
        self.render()
    }

    fn locator(&self) -> IndexLocator<'_> {
        if self.config.dynamic_height {
            IndexLocator::Dynamic(&self.positions)
        } else {
            IndexLocator::Fixed {
                item_height: self.config.effective_item_height(),
                len: self.data.len(),
            }
        }
    }

    fn enter(&mut self, phase: RenderPhase) {
        vtrace!(from = ?self.phase, to = ?phase, "render phase");
        self.phase = phase;
    }

    fn compute_thumb(&self, total_height: u64) -> Option<ScrollbarThumb> {
        if !self.config.custom_scrollbar {
            return None;
        }
        scrollbar::thumb_for(
            total_height,
            self.viewport.viewport_height,
            self.viewport.offset,
            &self.config.scrollbar,
        )
    }

    /// The visible window at the current offset and capacity, and its buffered expansion.
    fn locate_window(&self) -> (RenderWindow, RenderWindow, Option<ConfigError>) {
        let capacity = self.viewport.client_capacity;
        let visible = self
            .locator()
            .visible_window(self.viewport.offset, capacity);
        match buffer::expand(visible, capacity, self.config.buffer_scale, self.data.len()) {
            Ok(window) => (visible, window, None),
            Err(err) => (visible, visible, Some(err)),
        }
    }

    /// Builds the nodes for `window` and commits them in one step.
    fn paint(&mut self, surface: &mut S, window: RenderWindow) {
        self.enter(RenderPhase::Slicing);
        let slice = &self.data[window.start_index..window.end_index];

        // Every node is built before anything is committed, so the surface only ever shows a
        // complete frame.
        let forced_height =
            (!self.config.dynamic_height).then_some(self.config.effective_item_height());
        let items: Vec<RenderedItem<S::Node>> = slice
            .iter()
            .enumerate()
            .map(|(i, item)| RenderedItem {
                index: window.start_index + i,
                node: (self.render_item)(item),
                forced_height,
            })
            .collect();

        self.enter(RenderPhase::Painting);
        surface.commit_visible_items(items);
    }

    fn render_into(&mut self, surface: &mut S) -> RenderPass {
        self.enter(RenderPhase::Locating);
        let (mut visible, mut window, buffer_error) = self.locate_window();
        if buffer_error.is_some() {
            vwarn!(error = ?buffer_error, "buffering disabled for this pass");
        }

        // In dynamic-height mode, measuring buffered rows above the viewport moves the bottoms
        // the locator searches. Re-locate after each reconcile and repaint until the window
        // settles, so the committed frame matches what the next pass at this offset would pick.
        let mut rounds = 1;
        loop {
            self.paint(surface, window);
            if !self.config.dynamic_height {
                break;
            }

            self.enter(RenderPhase::Reconciling);
            self.heights.clear();
            surface.measure_visible_items(&mut self.heights);
            let delta = self.positions.reconcile(window.start_index, &self.heights);
            if delta == 0 {
                break;
            }
            vtrace!(delta, total = self.positions.total_height(), "reconciled heights");

            self.enter(RenderPhase::Locating);
            let (next_visible, next_window, _) = self.locate_window();
            if next_visible == visible && next_window == window {
                break;
            }
            if rounds == MAX_LAYOUT_ROUNDS {
                vdebug!(rounds, "layout did not settle, committing last window");
                break;
            }
            visible = next_visible;
            window = next_window;
            rounds += 1;
        }

        self.enter(RenderPhase::RepositioningChrome);
        let locator = self.locator();
        let total_height = locator.total_height();
        let visible_offset = locator.top_of(window.start_index);
        let thumb = self.compute_thumb(total_height);
        surface.set_total_extent(total_height);
        surface.set_visible_offset(visible_offset);
        if self.config.custom_scrollbar {
            surface.set_scrollbar_thumb(thumb);
        }

        self.visible = Some(visible);
        self.window = Some(window);
        self.thumb = thumb;
        self.enter(RenderPhase::Idle);
        vtrace!(
            start = window.start_index,
            end = window.end_index,
            total_height,
            visible_offset,
            "render pass complete"
        );

        RenderPass {
            kind: PassKind::Full,
            visible,
            window,
            total_height,
            visible_offset,
            thumb,
            buffer_error,
        }
    }

    fn refresh_chrome(&mut self) -> Option<RenderPass> {
        let window = self.window?;
        let visible = self.visible.unwrap_or(window);
        let total_height = self.total_height();
        let visible_offset = self.locator().top_of(window.start_index);
        let thumb = self.compute_thumb(total_height);

        let surface = self.surface.as_mut()?;
        surface.set_total_extent(total_height);
        if self.config.custom_scrollbar {
            surface.set_scrollbar_thumb(thumb);
        }
        self.thumb = thumb;
        vtrace!(total_height, "load_more: insertion off screen, chrome refreshed");

        Some(RenderPass {
            kind: PassKind::ChromeOnly,
            visible,
            window,
            total_height,
            visible_offset,
            thumb,
            buffer_error: None,
        })
    }
}

impl<T, S: RenderSurface + core::fmt::Debug> core::fmt::Debug for VirtualScroll<T, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualScroll")
            .field("config", &self.config)
            .field("len", &self.data.len())
            .field("surface", &self.surface)
            .field("viewport", &self.viewport)
            .field("window", &self.window)
            .field("thumb", &self.thumb)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
