// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The class sequencing state machine.
//!
//! Every lifecycle transition (enter, leave, add, remove) is the same five
//! steps on one target element; only the classes differ:
//!
//! ```text
//!   Idle ──add from──► FromApplied ──(next frame)──► RepaintForced
//!                                                        │ add active,
//!                                                        ▼ remove from
//!   Done ◄──remove both── Waiting ◄──(timeout)── ActiveApplied
//! ```
//!
//! The forced style read between the frame wait and the active class is what
//! makes the browser commit the "from" state; without it both class changes
//! can land in one style recalculation and nothing animates.

use alloc::string::String;

use crate::backend::DomNode;
use crate::class_name::{add_classes, remove_classes};
use crate::frame::{JobId, Step, Wait};
use crate::style::compute_timeout;
use crate::time::HostTime;
use crate::trace::{PhaseEvent, TimeoutEvent, Tracer};

/// Which lifecycle moment a transition belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// The element was inserted.
    Enter,
    /// The element is being removed (runs on the clone).
    Leave,
    /// A tracked value became truthy.
    Add,
    /// A tracked value became falsy.
    Remove,
}

impl TransitionKind {
    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enter => "enter",
            Self::Leave => "leave",
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

/// Which element a transition mutates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// The element the instance is attached to.
    Live,
    /// The stand-in created for a leave transition.
    Clone,
}

impl TargetKind {
    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Clone => "clone",
        }
    }
}

/// Position of a [`Transition`] in the five-step sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing applied yet.
    Idle,
    /// The "from" class is on the target; waiting for the next frame.
    FromApplied,
    /// A style read has forced the "from" class to be committed.
    RepaintForced,
    /// The active class replaced the "from" class.
    ActiveApplied,
    /// Waiting out the computed timeout.
    Waiting,
    /// Both classes removed.
    Done,
}

impl Phase {
    /// Returns a short kebab-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FromApplied => "from-applied",
            Self::RepaintForced => "repaint-forced",
            Self::ActiveApplied => "active-applied",
            Self::Waiting => "waiting",
            Self::Done => "done",
        }
    }
}

/// The class pair for one transition.
///
/// Either string may hold several whitespace-separated class tokens.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionRequest {
    /// Applied immediately, removed once the active class is on.
    pub from_class: String,
    /// Applied after the next frame, held for the computed timeout.
    pub active_class: String,
}

impl TransitionRequest {
    /// Creates a request from a class pair.
    #[must_use]
    pub fn new(from_class: impl Into<String>, active_class: impl Into<String>) -> Self {
        Self {
            from_class: from_class.into(),
            active_class: active_class.into(),
        }
    }
}

/// One run of the five-step sequence against a single target.
///
/// Drive it by calling [`advance`](Self::advance) once to start and again
/// each time the returned [`Wait`] is satisfied, until it returns
/// [`Step::Done`].
#[derive(Debug)]
pub struct Transition<N> {
    job: JobId,
    kind: TransitionKind,
    target_kind: TargetKind,
    target: N,
    request: TransitionRequest,
    phase: Phase,
}

impl<N: DomNode> Transition<N> {
    /// Creates an idle transition.
    #[must_use]
    pub fn new(
        job: JobId,
        kind: TransitionKind,
        target_kind: TargetKind,
        target: N,
        request: TransitionRequest,
    ) -> Self {
        Self {
            job,
            kind,
            target_kind,
            target,
            request,
            phase: Phase::Idle,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the lifecycle kind.
    #[must_use]
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Returns which element this transition mutates.
    #[must_use]
    pub fn target_kind(&self) -> TargetKind {
        self.target_kind
    }

    /// Returns the element being mutated.
    #[must_use]
    pub fn target(&self) -> &N {
        &self.target
    }

    /// Returns the class pair.
    #[must_use]
    pub fn request(&self) -> &TransitionRequest {
        &self.request
    }

    /// Runs the sequence up to its next suspension point.
    ///
    /// Calling this on a finished transition returns [`Step::Done`] without
    /// touching the target.
    pub fn advance(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> Step {
        match self.phase {
            Phase::Idle => {
                add_classes(&self.target, &self.request.from_class);
                self.enter(Phase::FromApplied, now, tracer);
                Step::Wait(Wait::NextFrame)
            }
            Phase::FromApplied => {
                self.target.force_reflow();
                self.enter(Phase::RepaintForced, now, tracer);

                add_classes(&self.target, &self.request.active_class);
                remove_classes(&self.target, &self.request.from_class);
                self.enter(Phase::ActiveApplied, now, tracer);

                let timeout = compute_timeout(&self.target.timing_style());
                tracer.timeout(&TimeoutEvent {
                    job: self.job,
                    kind: self.kind,
                    timeout,
                    at: now,
                });
                self.enter(Phase::Waiting, now, tracer);
                match timeout {
                    Some(d) => Step::Wait(Wait::Delay(d)),
                    None => {
                        self.finish(now, tracer);
                        Step::Done
                    }
                }
            }
            // RepaintForced and ActiveApplied never outlive a single call.
            Phase::RepaintForced | Phase::ActiveApplied | Phase::Waiting => {
                self.finish(now, tracer);
                Step::Done
            }
            Phase::Done => Step::Done,
        }
    }

    /// Abandons the sequence, stripping whatever scaffolding classes it
    /// applied. Returns the phase it was in.
    pub fn cancel(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> Phase {
        let was = self.phase;
        if !matches!(was, Phase::Idle | Phase::Done) {
            self.finish(now, tracer);
        }
        self.phase = Phase::Done;
        was
    }

    fn finish(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        remove_classes(&self.target, &self.request.from_class);
        remove_classes(&self.target, &self.request.active_class);
        self.enter(Phase::Done, now, tracer);
    }

    fn enter(&mut self, phase: Phase, now: HostTime, tracer: &mut Tracer<'_>) {
        self.phase = phase;
        tracer.phase(&PhaseEvent {
            job: self.job,
            kind: self.kind,
            target: self.target_kind,
            phase,
            at: now,
        });
    }
}
