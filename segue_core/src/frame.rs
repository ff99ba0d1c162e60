// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Suspension points exchanged with the host.
//!
//! The core never blocks or sleeps. When a job needs to wait it returns a
//! [`Pending`] naming the job and the [`Wait`] it is blocked on; the host
//! satisfies the wait with its own frame or timer primitive and then calls
//! [`CssTransition::resume`](crate::modifier::CssTransition::resume).
//!
//! # Usage
//!
//! ```text
//! let pending = instance.did_install(now());
//! for p in pending {
//!     host.after(p.wait, move || {
//!         if let Some(next) = instance.resume(p.job, now()) {
//!             // schedule `next` the same way
//!         }
//!     });
//! }
//! ```

use core::fmt;
use core::time::Duration;

/// What a suspended job is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wait {
    /// Resume after the host has committed pending DOM and style mutations
    /// and painted a frame.
    NextFrame,
    /// Resume after roughly this long. Never zero: a zero timeout finishes
    /// the transition without suspending.
    Delay(Duration),
}

/// Identifies one in-flight job of a
/// [`CssTransition`](crate::modifier::CssTransition).
///
/// Ids are unique per instance and never reused.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct JobId(pub u64);

impl fmt::Debug for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JobId({})", self.0)
    }
}

/// A job suspended on a [`Wait`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pending {
    /// The job to resume.
    pub job: JobId,
    /// What must happen before resuming it.
    pub wait: Wait,
}

/// Result of advancing a [`Transition`](crate::transition::Transition).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// The transition is suspended until the wait is satisfied.
    Wait(Wait),
    /// The transition has finished; no scaffolding classes remain.
    Done,
}
