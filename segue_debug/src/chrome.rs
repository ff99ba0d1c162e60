// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Each job gets its own track (`tid` = job id). A transition is a duration
//! span from its first phase to `Done`; every other event is an instant on
//! the job's track.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use segue_core::transition::Phase;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Timestamps are already microseconds and are written unchanged.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Phase(e) => {
                let ph = match e.phase {
                    Phase::FromApplied => "B",
                    Phase::Done => "E",
                    _ => "i",
                };
                let name = if ph == "i" {
                    e.phase.as_str()
                } else {
                    e.kind.as_str()
                };
                let mut event = json!({
                    "ph": ph,
                    "name": name,
                    "cat": "Transition",
                    "ts": e.at.micros(),
                    "pid": 0,
                    "tid": e.job.0,
                    "args": {
                        "kind": e.kind.as_str(),
                        "target": e.target.as_str(),
                        "phase": e.phase.as_str(),
                    }
                });
                if ph == "i" {
                    event["s"] = json!("t");
                }
                events.push(event);
            }
            RecordedEvent::Timeout(e) => {
                let timeout_us = e
                    .timeout
                    .map(|d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX));
                events.push(json!({
                    "ph": "i",
                    "name": "Timeout",
                    "cat": "Style",
                    "ts": e.at.micros(),
                    "pid": 0,
                    "tid": e.job.0,
                    "s": "t",
                    "args": {
                        "kind": e.kind.as_str(),
                        "timeout_us": timeout_us,
                    }
                }));
            }
            RecordedEvent::Clone(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("Clone {}", e.action.as_str()),
                    "cat": "Clone",
                    "ts": e.at.micros(),
                    "pid": 0,
                    "tid": e.job.0,
                    "s": "t",
                }));
            }
            RecordedEvent::Callback(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Hook",
                    "cat": "Hook",
                    "ts": e.at.micros(),
                    "pid": 0,
                    "tid": e.job.0,
                    "s": "t",
                    "args": {
                        "kind": e.kind.as_str(),
                        "with_class": e.with_class,
                    }
                }));
            }
            RecordedEvent::Cancel(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Cancel",
                    "cat": "Transition",
                    "ts": e.at.micros(),
                    "pid": 0,
                    "tid": e.job.0,
                    "s": "t",
                    "args": {
                        "kind": e.kind.as_str(),
                        "phase": e.phase.as_str(),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}
