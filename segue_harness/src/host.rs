// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual frame clock and timer queue.

use alloc::vec::Vec;
use core::time::Duration;

use segue_core::backend::DomNode;
use segue_core::frame::{JobId, Pending, Wait};
use segue_core::modifier::CssTransition;
use segue_core::time::HostTime;

use crate::dom::MemDocument;

/// Frame interval of a 60 Hz display.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

#[derive(Clone, Copy, Debug)]
struct Timer {
    due: HostTime,
    seq: u64,
    job: JobId,
}

/// Satisfies the waits of one [`CssTransition`] on a virtual clock.
///
/// Nothing happens on its own: [`frame`](Self::frame) paints one frame,
/// [`advance`](Self::advance) moves the clock frame by frame, and
/// [`settle`](Self::settle) runs until no job is left waiting.
///
/// Within a frame, timers that came due fire first, then the frame is
/// painted, then jobs waiting for a frame resume. Waits returned by resumed
/// jobs are queued for later frames, never the current one.
#[derive(Debug)]
pub struct VirtualHost {
    now: HostTime,
    frame_interval: Duration,
    frames: u64,
    on_frame: Vec<JobId>,
    timers: Vec<Timer>,
    seq: u64,
    document: Option<MemDocument>,
}

impl Default for VirtualHost {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl VirtualHost {
    /// Creates a host at time zero.
    #[must_use]
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            now: HostTime::ZERO,
            frame_interval,
            frames: 0,
            on_frame: Vec::new(),
            timers: Vec::new(),
            seq: 0,
            document: None,
        }
    }

    /// Logs a [`Mutation::Frame`](crate::Mutation::Frame) into `document`
    /// on every painted frame.
    #[must_use]
    pub fn with_document(mut self, document: &MemDocument) -> Self {
        self.document = Some(document.clone());
        self
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> HostTime {
        self.now
    }

    /// Frames painted so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Returns `true` when no job is waiting.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.on_frame.is_empty() && self.timers.is_empty()
    }

    /// Jobs waiting for the next frame.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.on_frame.len()
    }

    /// Jobs waiting on a timer.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Queues a wait returned by a lifecycle call or by `resume`.
    pub fn schedule(&mut self, pending: Option<Pending>) {
        let Some(Pending { job, wait }) = pending else {
            return;
        };
        match wait {
            Wait::NextFrame => self.on_frame.push(job),
            Wait::Delay(d) => {
                self.timers.push(Timer {
                    due: self.now + d,
                    seq: self.seq,
                    job,
                });
                self.seq += 1;
            }
        }
    }

    /// Queues every wait in `pending`.
    pub fn schedule_all(&mut self, pending: impl IntoIterator<Item = Pending>) {
        for p in pending {
            self.schedule(Some(p));
        }
    }

    /// Advances the clock by one frame interval and paints a frame.
    ///
    /// Returns the number of jobs resumed.
    pub fn frame<N: DomNode>(&mut self, instance: &mut CssTransition<N>) -> usize {
        self.now = self.now + self.frame_interval;
        self.frames += 1;
        let mut resumed = self.fire_timers(instance);
        if let Some(document) = &self.document {
            document.mark_frame();
        }
        for job in core::mem::take(&mut self.on_frame) {
            let next = instance.resume(job, self.now);
            self.schedule(next);
            resumed += 1;
        }
        resumed
    }

    /// Paints frames until `d` has elapsed, then fires the timers due at
    /// the exact end time.
    ///
    /// Returns the number of jobs resumed.
    pub fn advance<N: DomNode>(&mut self, d: Duration, instance: &mut CssTransition<N>) -> usize {
        let end = self.now + d;
        let mut resumed = 0;
        while self.now + self.frame_interval <= end {
            resumed += self.frame(instance);
        }
        self.now = end;
        resumed + self.fire_timers(instance)
    }

    /// Runs until no job is waiting.
    ///
    /// Pending frames are painted one at a time; when only timers remain the
    /// clock jumps straight to the earliest one. Returns the number of jobs
    /// resumed.
    pub fn settle<N: DomNode>(&mut self, instance: &mut CssTransition<N>) -> usize {
        let mut resumed = 0;
        loop {
            if !self.on_frame.is_empty() {
                resumed += self.frame(instance);
            } else if let Some(due) = self.timers.iter().map(|t| t.due).min() {
                if due > self.now {
                    self.now = due;
                }
                resumed += self.fire_timers(instance);
            } else {
                return resumed;
            }
        }
    }

    fn fire_timers<N: DomNode>(&mut self, instance: &mut CssTransition<N>) -> usize {
        let mut resumed = 0;
        while let Some(index) = self.next_due() {
            let timer = self.timers.swap_remove(index);
            let next = instance.resume(timer.job, self.now);
            self.schedule(next);
            resumed += 1;
        }
        resumed
    }

    fn next_due(&self) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= self.now)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(index, _)| index)
    }
}
