// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic host for exercising segue without a browser.
//!
//! - [`MemDocument`] is a small in-memory DOM whose computed timing comes
//!   from a class-keyed stylesheet and which logs every mutation.
//! - [`VirtualHost`] satisfies [`Wait`](segue_core::frame::Wait) requests on
//!   a virtual clock: frames are ticked explicitly and delays fire when the
//!   clock passes them.
//! - [`HookLog`] and [`EventLog`] record hook calls and trace events.
//!
//! ```text
//! let doc = MemDocument::new().with_rule("fade-enter-active", TimingStyle::transition("200ms", "0s"));
//! let el = doc.create_element("card");
//! doc.body().append(&el);
//! let mut t = CssTransition::new(el, TransitionArgs::named("fade"))?;
//! let mut host = VirtualHost::default();
//! host.schedule(t.did_install(host.now()));
//! host.settle(&mut t);
//! ```

#![no_std]

extern crate alloc;

mod dom;
mod host;
mod record;

#[cfg(test)]
mod scenarios;

pub use dom::{MemDocument, MemNode, Mutation};
pub use host::{DEFAULT_FRAME_INTERVAL, VirtualHost};
pub use record::{EventLog, HookCall, HookLog, TraceRecord};
