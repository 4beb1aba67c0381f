//! Adapter utilities for the `virtual-scroll` crate.
//!
//! The `virtual-scroll` crate is synchronous and timer-free: every call renders immediately.
//! This crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - Tick-driven rate limiting of scroll and resize events (delay or per-frame)
//! - Custom scrollbar thumb dragging
//! - A [`Controller`] bundling both around a list
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/ratatui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod drag;
mod rate_limit;


pub use controller::Controller;
pub use drag::ThumbDrag;
pub use rate_limit::RateLimiter;
