// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for segue.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomElement`]: [`DomNode`] over `web_sys::Element`, with timing read
//!   from `getComputedStyle`
//! - [`next_frame`] / [`delay`]: `requestAnimationFrame` and `setTimeout`
//!   as futures
//! - [`WebTransition`]: a [`CssTransition`](segue_core::modifier::CssTransition)
//!   whose waits are driven on the browser event loop
//! - [`FunctionHooks`]: completion hooks backed by JavaScript functions

#![no_std]

extern crate alloc;

mod driver;
mod element;
mod frame;

pub use driver::{FunctionHooks, WebTransition};
pub use element::DomElement;
pub use frame::{delay, next_frame, wait};
pub use segue_core::backend::DomNode;

use segue_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(frame::performance_now())
}
