// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Segue splits platform-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Element handle**: Implements [`DomNode`] for the platform's element
//!   type (a `web_sys::Element` wrapper on the web, an in-memory node in the
//!   test harness).
//!
//! - **Frame and timer primitives**: Satisfy the
//!   [`Wait`](crate::frame::Wait) requests returned by
//!   [`CssTransition`](crate::modifier::CssTransition): resume a job after the
//!   next painted frame, or after a delay. Not abstracted by a trait because
//!   the scheduling mechanism (callbacks, futures, a virtual clock) differs
//!   fundamentally across hosts.
//!
//! - **Time**: A `now() -> HostTime` free function passed into lifecycle
//!   calls.
//!
//! # Crate boundaries
//!
//! `segue_core` owns the state machine, timeout computation and clone
//! bookkeeping. Backend crates depend on `segue_core` and provide platform
//! glue. Application code (or the host UI framework) calls the lifecycle
//! entry points and wires the returned waits to the backend primitives.

use alloc::string::String;

use crate::style::TimingStyle;

/// A handle to an element the core can mutate.
///
/// Handles are cheap to clone and compare by identity: two handles are equal
/// when they refer to the same element. All operations take `&self`; element
/// trees have shared ownership and interior mutability on every platform the
/// core targets.
///
/// Operations on detached elements must not fail: mutating the class list of
/// an element that is no longer in a tree is a harmless no-op side effect.
pub trait DomNode: Clone + PartialEq {
    /// Adds a single class token.
    fn add_class(&self, token: &str);

    /// Removes a single class token.
    fn remove_class(&self, token: &str);

    /// Returns `true` if the class list contains `token`.
    fn has_class(&self, token: &str) -> bool;

    /// Returns the element identifier, or an empty string when unset.
    fn id(&self) -> String;

    /// Sets the element identifier.
    fn set_id(&self, id: &str);

    /// Returns the parent element, if attached to one.
    fn parent(&self) -> Option<Self>;

    /// Returns the next element sibling, if any.
    fn next_sibling(&self) -> Option<Self>;

    /// Returns a detached deep copy of this element, or `None` if the
    /// platform refuses to clone it.
    fn deep_clone(&self) -> Option<Self>;

    /// Inserts `child` into `self` immediately before `reference`, or as the
    /// last child when `reference` is `None`.
    fn insert_before(&self, child: &Self, reference: Option<&Self>);

    /// Removes `child` from `self`.
    fn remove_child(&self, child: &Self);

    /// Forces the style engine to apply pending class changes, e.g. by
    /// reading a layout-dependent property.
    fn force_reflow(&self);

    /// Returns the computed timing longhands of this element.
    fn timing_style(&self) -> TimingStyle;
}
