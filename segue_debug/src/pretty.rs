// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Times are
//! printed in milliseconds.

use std::io::Write;

use segue_core::time::HostTime;
use segue_core::trace::{
    CallbackEvent, CancelEvent, CloneEvent, PhaseEvent, TimeoutEvent, TraceSink,
};
use segue_core::transition::TransitionKind;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.micros() as f64 / 1000.0
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_phase(&mut self, e: &PhaseEvent) {
        let _ = writeln!(
            self.writer,
            "[phase] job={} {}/{} -> {} at {:.3}ms",
            e.job.0,
            e.kind.as_str(),
            e.target.as_str(),
            e.phase.as_str(),
            ms(e.at),
        );
    }

    fn on_timeout(&mut self, e: &TimeoutEvent) {
        match e.timeout {
            Some(d) => {
                let _ = writeln!(
                    self.writer,
                    "[timeout] job={} {} wait={:.3}ms at {:.3}ms",
                    e.job.0,
                    e.kind.as_str(),
                    d.as_secs_f64() * 1000.0,
                    ms(e.at),
                );
            }
            None => {
                let _ = writeln!(
                    self.writer,
                    "[timeout] job={} {} none at {:.3}ms",
                    e.job.0,
                    e.kind.as_str(),
                    ms(e.at),
                );
            }
        }
    }

    fn on_clone(&mut self, e: &CloneEvent) {
        let _ = writeln!(
            self.writer,
            "[clone] job={} {} at {:.3}ms",
            e.job.0,
            e.action.as_str(),
            ms(e.at),
        );
    }

    fn on_callback(&mut self, e: &CallbackEvent) {
        let hook = match e.kind {
            TransitionKind::Enter | TransitionKind::Add => "did_transition_in",
            TransitionKind::Leave | TransitionKind::Remove => "did_transition_out",
        };
        let arg = if e.with_class { "class" } else { "-" };
        let _ = writeln!(
            self.writer,
            "[hook] job={} {hook}({arg}) at {:.3}ms",
            e.job.0,
            ms(e.at),
        );
    }

    fn on_cancel(&mut self, e: &CancelEvent) {
        let _ = writeln!(
            self.writer,
            "[cancel] job={} {} in {} at {:.3}ms",
            e.job.0,
            e.kind.as_str(),
            e.phase.as_str(),
            ms(e.at),
        );
    }
}
