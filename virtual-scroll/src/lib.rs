//! A headless virtual-scrolling list engine.
//!
//! For event plumbing (scroll/resize rate limiting, custom scrollbar dragging), see the
//! `virtual-scroll-adapter` crate.
//!
//! Given a large ordered data source, the engine renders only the items covering the viewport
//! plus a configurable buffer, while keeping the scroll surface as tall as a full render would
//! be. It keeps a consistent mapping between scroll offset, visible index range and cumulative
//! item positions, including items whose height is only known after they are rendered.
//!
//! It is UI-agnostic. A host implements [`RenderSurface`] to provide:
//! - the viewport height
//! - a place to commit rendered nodes and (in dynamic-height mode) measure them
//! - a spacer for the total scroll extent, a translation for the visible slice, and
//!   optionally a scrollbar thumb
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod buffer;
mod config;
mod engine;
mod error;
mod locate;
mod position;
mod scrollbar;
mod state;
mod surface;
mod types;

#[cfg(test)]
mod tests;

pub use buffer::{buffer_len, expand};
pub use config::{ScrollbarStyle, ThrottleMode, VirtualScrollConfig};
pub use engine::{ItemRenderer, VirtualScroll};
pub use error::ConfigError;
pub use locate::{IndexLocator, first_exceeding};
pub use position::PositionTable;
pub use scrollbar::{offset_for_thumb_top, thumb_for};
pub use state::{ViewportState, client_capacity};
pub use surface::{HeadlessSurface, NodeMeasure, RenderSurface};
pub use types::{
    PassKind, PositionEntry, RenderPass, RenderPhase, RenderWindow, RenderedItem, ScrollbarThumb,
};
