use alloc::vec::Vec;

use virtual_scroll::{RenderPass, RenderSurface, VirtualScroll};

use crate::{RateLimiter, ThumbDrag};

/// A framework-neutral controller that wraps a `virtual_scroll::VirtualScroll` and rate-limits
/// the UI events that drive it.
///
/// This type does not hold any timers. Adapters drive it by calling:
/// - `on_scroll` / `on_resize` when UI events occur
/// - `on_thumb_press` / `on_thumb_move` / `on_thumb_release` for the custom scrollbar
/// - `tick(now_ms)` on every timer or frame tick, which applies due events and renders
///
/// Both limiters follow the list's configured [`virtual_scroll::ThrottleMode`].
pub struct Controller<T, S: RenderSurface> {
    list: VirtualScroll<T, S>,
    scroll: RateLimiter<u64>,
    resize: RateLimiter<()>,
    drag: Option<ThumbDrag>,
}

impl<T, S: RenderSurface> Controller<T, S> {
    pub fn new(list: VirtualScroll<T, S>) -> Self {
        let mode = list.config().throttle;
        Self {
            list,
            scroll: RateLimiter::new(mode),
            resize: RateLimiter::new(mode),
            drag: None,
        }
    }

    pub fn list(&self) -> &VirtualScroll<T, S> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut VirtualScroll<T, S> {
        &mut self.list
    }

    pub fn into_list(self) -> VirtualScroll<T, S> {
        self.list
    }

    /// Whether a scroll or resize event is waiting for a tick.
    pub fn has_pending(&self) -> bool {
        self.scroll.is_pending() || self.resize.is_pending()
    }

    /// Earliest deadline among pending events, for hosts that arm a one-shot timer.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        match (self.scroll.deadline_ms(), self.resize.deadline_ms()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Call this when the UI reports a scroll offset change (wheel, keyboard, native scrollbar).
    pub fn on_scroll(&mut self, offset: u64, now_ms: u64) {
        vtrace!(offset, now_ms, "on_scroll");
        self.scroll.schedule(offset, now_ms);
    }

    /// Call this when the host viewport may have changed size.
    pub fn on_resize(&mut self, now_ms: u64) {
        vtrace!(now_ms, "on_resize");
        self.resize.schedule((), now_ms);
    }

    /// Applies every event due at `now_ms` and renders once.
    ///
    /// A due resize is applied before a due scroll so the pass uses the new capacity. Returns
    /// `None` when nothing was due (or no surface is mounted).
    pub fn tick(&mut self, now_ms: u64) -> Option<RenderPass> {
        let resized = self.resize.poll(now_ms).is_some();
        let offset = self.scroll.poll(now_ms);
        self.apply(resized, offset)
    }

    /// Applies all pending events immediately, ignoring their deadlines.
    pub fn flush(&mut self) -> Option<RenderPass> {
        let resized = self.resize.cancel().is_some();
        let offset = self.scroll.cancel();
        self.apply(resized, offset)
    }

    fn apply(&mut self, resized: bool, offset: Option<u64>) -> Option<RenderPass> {
        if !resized && offset.is_none() {
            return None;
        }
        if resized {
            self.list.refresh_viewport();
        }
        if let Some(offset) = offset {
            self.list.set_scroll_offset(offset);
        }
        vdebug!(resized, offset = ?offset, "controller render");
        self.list.render()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Starts a thumb drag with the pointer at `pointer_y` (track coordinates).
    ///
    /// Returns `false` when there is no thumb to drag.
    pub fn on_thumb_press(&mut self, pointer_y: i64) -> bool {
        let Some(thumb) = self.list.scrollbar_thumb() else {
            return false;
        };
        self.drag = Some(ThumbDrag::press(&thumb, pointer_y));
        true
    }

    /// Moves an active thumb drag and schedules the matching scroll offset.
    ///
    /// Returns the offset so the host can move its real scroll position; `None` when no drag is
    /// active.
    pub fn on_thumb_move(&mut self, pointer_y: i64, now_ms: u64) -> Option<u64> {
        let drag = self.drag?;
        let thumb = self.list.scrollbar_thumb()?;
        let offset = drag.offset_for(&thumb, pointer_y, self.list.total_height());
        self.on_scroll(offset, now_ms);
        Some(offset)
    }

    /// Ends a thumb drag. Returns `false` when none was active.
    pub fn on_thumb_release(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Forwards to [`VirtualScroll::load_more`].
    pub fn load_more(&mut self, data: Vec<T>, insertion_index: usize) -> Option<RenderPass> {
        self.list.load_more(data, insertion_index)
    }
}

impl<T, S: RenderSurface + core::fmt::Debug> core::fmt::Debug for Controller<T, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("list", &self.list)
            .field("scroll", &self.scroll)
            .field("resize", &self.resize)
            .field("drag", &self.drag)
            .finish()
    }
}
