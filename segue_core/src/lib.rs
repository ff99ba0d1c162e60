// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sans-IO core for paint-synchronized CSS class transitions.
//!
//! `segue_core` sequences the class-list mutations that make CSS transitions
//! visible: a "from" class, a forced style recalculation after the next
//! frame, an "active" class held for as long as the computed style says the
//! transition lasts, and a final cleanup. It is `no_std` compatible (with
//! `alloc`) and never touches a clock, a timer or the DOM directly: backends
//! supply those through [`DomNode`](backend::DomNode) and by satisfying the
//! [`Wait`](frame::Wait) requests the core hands back.
//!
//! # Architecture
//!
//! ```text
//!   host lifecycle (install / update / remove)
//!       │
//!       ▼
//!   CssTransition ──► Pending { job, Wait } ──► host frame/timer primitive
//!       ▲                                              │
//!       └──────────── CssTransition::resume(job) ◄─────┘
//! ```
//!
//! **[`modifier`]**: [`CssTransition`](modifier::CssTransition), the
//! per-element instance with the three lifecycle entry points, tracked state
//! and hooks.
//!
//! **[`transition`]**: The five-step class sequencing state machine shared
//! by enter, leave, add and remove transitions.
//!
//! **[`style`]**: Timeout computation from computed `transition-*` and
//! `animation-*` values.
//!
//! **[`clone`]**: The stand-in element that animates a removal after the
//! real element has been detached.
//!
//! **[`frame`]**: The wait requests (next frame, delay) exchanged with the
//! host.
//!
//! **[`backend`]**: The [`DomNode`](backend::DomNode) trait that platform
//! backends implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! transition instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod class_name;
pub mod clone;
pub mod error;
pub mod frame;
pub mod modifier;
pub mod style;
pub mod time;
pub mod trace;
pub mod transition;

#[cfg(test)]
mod testing;
