// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared recorders for hook calls and trace events.
//!
//! Both recorders are cheap handles around shared storage: pass one clone to
//! the instance and keep another to inspect afterwards.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use segue_core::frame::JobId;
use segue_core::modifier::TransitionHooks;
use segue_core::trace::{
    CallbackEvent, CancelEvent, CloneAction, CloneEvent, PhaseEvent, TimeoutEvent, TraceSink,
};
use segue_core::transition::Phase;

/// One completion hook invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HookCall {
    /// `did_transition_in` with its class argument.
    In(Option<String>),
    /// `did_transition_out` with its class argument.
    Out(Option<String>),
}

/// Records completion hook calls.
#[derive(Clone, Debug, Default)]
pub struct HookLog(Rc<RefCell<Vec<HookCall>>>);

impl HookLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the calls so far.
    #[must_use]
    pub fn calls(&self) -> Vec<HookCall> {
        self.0.borrow().clone()
    }
}

impl TransitionHooks for HookLog {
    fn did_transition_in(&mut self, class_name: Option<&str>) {
        self.0.borrow_mut().push(HookCall::In(class_name.map(String::from)));
    }

    fn did_transition_out(&mut self, class_name: Option<&str>) {
        self.0
            .borrow_mut()
            .push(HookCall::Out(class_name.map(String::from)));
    }
}

/// One trace event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceRecord {
    /// See [`TraceSink::on_phase`].
    Phase(PhaseEvent),
    /// See [`TraceSink::on_timeout`].
    Timeout(TimeoutEvent),
    /// See [`TraceSink::on_clone`].
    Clone(CloneEvent),
    /// See [`TraceSink::on_callback`].
    Callback(CallbackEvent),
    /// See [`TraceSink::on_cancel`].
    Cancel(CancelEvent),
}

/// Records trace events in arrival order.
#[derive(Clone, Debug, Default)]
pub struct EventLog(Rc<RefCell<Vec<TraceRecord>>>);

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every event so far.
    #[must_use]
    pub fn records(&self) -> Vec<TraceRecord> {
        self.0.borrow().clone()
    }

    /// Returns the phases entered by `job`, in order.
    #[must_use]
    pub fn phases_of(&self, job: JobId) -> Vec<Phase> {
        self.0
            .borrow()
            .iter()
            .filter_map(|r| match r {
                TraceRecord::Phase(e) if e.job == job => Some(e.phase),
                _ => None,
            })
            .collect()
    }

    /// Returns every clone action, in order.
    #[must_use]
    pub fn clone_actions(&self) -> Vec<CloneAction> {
        self.0
            .borrow()
            .iter()
            .filter_map(|r| match r {
                TraceRecord::Clone(e) => Some(e.action),
                _ => None,
            })
            .collect()
    }

    /// Returns every cancellation, in order.
    #[must_use]
    pub fn cancellations(&self) -> Vec<CancelEvent> {
        self.0
            .borrow()
            .iter()
            .filter_map(|r| match r {
                TraceRecord::Cancel(e) => Some(*e),
                _ => None,
            })
            .collect()
    }

    fn push(&self, record: TraceRecord) {
        self.0.borrow_mut().push(record);
    }
}

impl TraceSink for EventLog {
    fn on_phase(&mut self, e: &PhaseEvent) {
        self.push(TraceRecord::Phase(*e));
    }

    fn on_timeout(&mut self, e: &TimeoutEvent) {
        self.push(TraceRecord::Timeout(*e));
    }

    fn on_clone(&mut self, e: &CloneEvent) {
        self.push(TraceRecord::Clone(*e));
    }

    fn on_callback(&mut self, e: &CallbackEvent) {
        self.push(TraceRecord::Callback(*e));
    }

    fn on_cancel(&mut self, e: &CancelEvent) {
        self.push(TraceRecord::Cancel(*e));
    }
}
