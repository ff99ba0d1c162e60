// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Timeouts are stored in whole microseconds.

use std::time::Duration;

use segue_core::frame::JobId;
use segue_core::time::HostTime;
use segue_core::trace::{
    CallbackEvent, CancelEvent, CloneAction, CloneEvent, PhaseEvent, TimeoutEvent, TraceSink,
};
use segue_core::transition::{Phase, TargetKind, TransitionKind};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_PHASE: u8 = 1;
const TAG_TIMEOUT: u8 = 2;
const TAG_CLONE: u8 = 3;
const TAG_CALLBACK: u8 = 4;
const TAG_CANCEL: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_option_u64(&mut self, v: Option<u64>) {
        match v {
            Some(val) => {
                self.write_u8(1);
                self.write_u64(val);
            }
            None => {
                self.write_u8(0);
                self.write_u64(0);
            }
        }
    }

    fn write_header(&mut self, tag: u8, job: JobId) {
        self.write_u8(tag);
        self.write_u64(job.0);
    }

    fn write_kind(&mut self, k: TransitionKind) {
        self.write_u8(match k {
            TransitionKind::Enter => 0,
            TransitionKind::Leave => 1,
            TransitionKind::Add => 2,
            TransitionKind::Remove => 3,
        });
    }

    fn write_phase(&mut self, p: Phase) {
        self.write_u8(match p {
            Phase::Idle => 0,
            Phase::FromApplied => 1,
            Phase::RepaintForced => 2,
            Phase::ActiveApplied => 3,
            Phase::Waiting => 4,
            Phase::Done => 5,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_phase(&mut self, e: &PhaseEvent) {
        self.write_header(TAG_PHASE, e.job);
        self.write_kind(e.kind);
        self.write_u8(match e.target {
            TargetKind::Live => 0,
            TargetKind::Clone => 1,
        });
        self.write_phase(e.phase);
        self.write_u64(e.at.micros());
    }

    fn on_timeout(&mut self, e: &TimeoutEvent) {
        self.write_header(TAG_TIMEOUT, e.job);
        self.write_kind(e.kind);
        self.write_option_u64(
            e.timeout
                .map(|d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX)),
        );
        self.write_u64(e.at.micros());
    }

    fn on_clone(&mut self, e: &CloneEvent) {
        self.write_header(TAG_CLONE, e.job);
        self.write_u8(match e.action {
            CloneAction::Created => 0,
            CloneAction::Destroyed => 1,
            CloneAction::Replaced => 2,
        });
        self.write_u64(e.at.micros());
    }

    fn on_callback(&mut self, e: &CallbackEvent) {
        self.write_header(TAG_CALLBACK, e.job);
        self.write_kind(e.kind);
        self.write_u8(u8::from(e.with_class));
        self.write_u64(e.at.micros());
    }

    fn on_cancel(&mut self, e: &CancelEvent) {
        self.write_header(TAG_CANCEL, e.job);
        self.write_kind(e.kind);
        self.write_phase(e.phase);
        self.write_u64(e.at.micros());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`PhaseEvent`].
    Phase(PhaseEvent),
    /// A [`TimeoutEvent`].
    Timeout(TimeoutEvent),
    /// A [`CloneEvent`].
    Clone(CloneEvent),
    /// A [`CallbackEvent`].
    Callback(CallbackEvent),
    /// A [`CancelEvent`].
    Cancel(CancelEvent),
}

impl RecordedEvent {
    /// Returns the job the event belongs to.
    #[must_use]
    pub fn job(&self) -> JobId {
        match self {
            Self::Phase(e) => e.job,
            Self::Timeout(e) => e.job,
            Self::Clone(e) => e.job,
            Self::Callback(e) => e.job,
            Self::Cancel(e) => e.job,
        }
    }

    /// Returns the event's timestamp.
    #[must_use]
    pub fn at(&self) -> HostTime {
        match self {
            Self::Phase(e) => e.at,
            Self::Timeout(e) => e.at,
            Self::Clone(e) => e.at,
            Self::Callback(e) => e.at,
            Self::Cancel(e) => e.at,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
///
/// Stops at the first unknown tag, unknown enum value, or truncated record.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn read_u8(&mut self) -> Option<u8> {
        let v = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        let bytes = self.data.get(self.pos..self.pos + 8)?;
        let v = u64::from_le_bytes(bytes.try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_option_u64(&mut self) -> Option<Option<u64>> {
        let present = self.read_u8()?;
        let val = self.read_u64()?;
        Some((present != 0).then_some(val))
    }

    fn read_job(&mut self) -> Option<JobId> {
        self.read_u64().map(JobId)
    }

    fn read_time(&mut self) -> Option<HostTime> {
        self.read_u64().map(HostTime)
    }

    fn read_kind(&mut self) -> Option<TransitionKind> {
        Some(match self.read_u8()? {
            0 => TransitionKind::Enter,
            1 => TransitionKind::Leave,
            2 => TransitionKind::Add,
            3 => TransitionKind::Remove,
            _ => return None,
        })
    }

    fn read_target(&mut self) -> Option<TargetKind> {
        Some(match self.read_u8()? {
            0 => TargetKind::Live,
            1 => TargetKind::Clone,
            _ => return None,
        })
    }

    fn read_phase(&mut self) -> Option<Phase> {
        Some(match self.read_u8()? {
            0 => Phase::Idle,
            1 => Phase::FromApplied,
            2 => Phase::RepaintForced,
            3 => Phase::ActiveApplied,
            4 => Phase::Waiting,
            5 => Phase::Done,
            _ => return None,
        })
    }

    fn read_action(&mut self) -> Option<CloneAction> {
        Some(match self.read_u8()? {
            0 => CloneAction::Created,
            1 => CloneAction::Destroyed,
            2 => CloneAction::Replaced,
            _ => return None,
        })
    }

    fn decode_phase(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Phase(PhaseEvent {
            job: self.read_job()?,
            kind: self.read_kind()?,
            target: self.read_target()?,
            phase: self.read_phase()?,
            at: self.read_time()?,
        }))
    }

    fn decode_timeout(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Timeout(TimeoutEvent {
            job: self.read_job()?,
            kind: self.read_kind()?,
            timeout: self.read_option_u64()?.map(Duration::from_micros),
            at: self.read_time()?,
        }))
    }

    fn decode_clone(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Clone(CloneEvent {
            job: self.read_job()?,
            action: self.read_action()?,
            at: self.read_time()?,
        }))
    }

    fn decode_callback(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Callback(CallbackEvent {
            job: self.read_job()?,
            kind: self.read_kind()?,
            with_class: self.read_u8()? != 0,
            at: self.read_time()?,
        }))
    }

    fn decode_cancel(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Cancel(CancelEvent {
            job: self.read_job()?,
            kind: self.read_kind()?,
            phase: self.read_phase()?,
            at: self.read_time()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_PHASE => self.decode_phase(),
            TAG_TIMEOUT => self.decode_timeout(),
            TAG_CLONE => self.decode_clone(),
            TAG_CALLBACK => self.decode_callback(),
            TAG_CANCEL => self.decode_cancel(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
