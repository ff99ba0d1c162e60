// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for transition jobs.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! orchestrator calls as jobs move through their phases. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use core::time::Duration;

use crate::frame::JobId;
use crate::time::HostTime;
use crate::transition::{Phase, TargetKind, TransitionKind};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted each time a transition enters a new [`Phase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseEvent {
    /// Job that owns the transition.
    pub job: JobId,
    /// Which lifecycle transition this is.
    pub kind: TransitionKind,
    /// Whether the live element or the clone is being mutated.
    pub target: TargetKind,
    /// The phase just entered.
    pub phase: Phase,
    /// Host time of the step that entered the phase.
    pub at: HostTime,
}

/// Emitted when the timeout for the active class has been computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeoutEvent {
    /// Job that owns the transition.
    pub job: JobId,
    /// Which lifecycle transition this is.
    pub kind: TransitionKind,
    /// The computed timeout; `None` means the wait is skipped.
    pub timeout: Option<Duration>,
    /// Host time of the computation.
    pub at: HostTime,
}

/// What happened to a leave clone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CloneAction {
    /// A clone was inserted next to the original element.
    Created,
    /// The clone was removed after its leave transition.
    Destroyed,
    /// A live clone was destroyed early because a second removal started.
    Replaced,
}

impl CloneAction {
    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Destroyed => "destroyed",
            Self::Replaced => "replaced",
        }
    }
}

/// Emitted on clone creation and destruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloneEvent {
    /// The leave job the clone belongs to.
    pub job: JobId,
    /// What happened.
    pub action: CloneAction,
    /// Host time of the action.
    pub at: HostTime,
}

/// Emitted when a completion hook is invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallbackEvent {
    /// The job that completed.
    pub job: JobId,
    /// Which lifecycle transition completed.
    pub kind: TransitionKind,
    /// Whether the hook received a class name.
    pub with_class: bool,
    /// Host time of the call.
    pub at: HostTime,
}

/// Emitted when an in-flight job is cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CancelEvent {
    /// The cancelled job.
    pub job: JobId,
    /// Which lifecycle transition was cancelled.
    pub kind: TransitionKind,
    /// The phase the transition was in when cancelled.
    pub phase: Phase,
    /// Host time of the cancellation.
    pub at: HostTime,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from transition jobs.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a transition enters a phase.
    fn on_phase(&mut self, e: &PhaseEvent) {
        _ = e;
    }

    /// Called when the active-class timeout is computed.
    fn on_timeout(&mut self, e: &TimeoutEvent) {
        _ = e;
    }

    /// Called when a leave clone is created or destroyed.
    fn on_clone(&mut self, e: &CloneEvent) {
        _ = e;
    }

    /// Called when a completion hook is invoked.
    fn on_callback(&mut self, e: &CallbackEvent) {
        _ = e;
    }

    /// Called when an in-flight job is cancelled.
    fn on_cancel(&mut self, e: &CancelEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PhaseEvent`].
    #[inline]
    pub fn phase(&mut self, e: &PhaseEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_phase(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TimeoutEvent`].
    #[inline]
    pub fn timeout(&mut self, e: &TimeoutEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_timeout(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CloneEvent`].
    #[inline]
    pub fn clone_event(&mut self, e: &CloneEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_clone(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CallbackEvent`].
    #[inline]
    pub fn callback(&mut self, e: &CallbackEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_callback(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CancelEvent`].
    #[inline]
    pub fn cancel(&mut self, e: &CancelEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_cancel(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
