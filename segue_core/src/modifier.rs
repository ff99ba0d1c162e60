// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element transition instance and its lifecycle entry points.
//!
//! A [`CssTransition`] is attached to one element for that element's whole
//! life. The host calls three entry points at well-defined moments:
//!
//! - [`did_install`](CssTransition::did_install) once the element is in the
//!   tree: runs the enter transition.
//! - [`did_update_arguments`](CssTransition::did_update_arguments) whenever
//!   the arguments change: runs add/remove transitions when the tracked value
//!   flips.
//! - [`will_remove`](CssTransition::will_remove) when the host is about to
//!   drop the element: runs the leave transition on a clone.
//!
//! Each entry point starts zero or more *jobs* and returns a [`Pending`] for
//! each job still suspended. The host satisfies the wait and calls
//! [`resume`](CssTransition::resume) with the job id; jobs of an instance that
//! no longer knows them resume as no-ops.
//!
//! # Tracked value
//!
//! The tracked value is the `state` argument when given, otherwise the
//! `name` argument (present = truthy). Its class is the dasherized text of a
//! [`TrackedValue::Text`], or the dasherized name for a
//! [`TrackedValue::Flag`].
//!
//! # Removal while other jobs run
//!
//! Starting a leave transition cancels every in-flight job on the live
//! element: their scaffolding classes are stripped before the clone is taken
//! and their completion hooks never fire. A tracked-value change cancels the
//! add and remove jobs of the previous change the same way, so an element
//! never runs two attribute sequences at once.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use crate::backend::DomNode;
use crate::class_name::{add_classes, dasherize, remove_classes};
use crate::clone::{CloneHandle, PositionMemo};
use crate::error::{ConfigError, TransitionError};
use crate::frame::{JobId, Pending, Step, Wait};
use crate::time::HostTime;
use crate::trace::{CallbackEvent, CancelEvent, CloneAction, CloneEvent, TraceSink, Tracer};
use crate::transition::{TargetKind, Transition, TransitionKind, TransitionRequest};

/// A watched argument value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TrackedValue {
    /// A boolean condition; its class comes from the transition name.
    Flag(bool),
    /// A text value; its class is the dasherized text. Empty text is falsy.
    Text(String),
}

impl TrackedValue {
    /// Returns `true` for `Flag(true)` and non-empty `Text`.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Text(text) => !text.is_empty(),
        }
    }
}

impl From<bool> for TrackedValue {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl From<&str> for TrackedValue {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for TrackedValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Arguments of a [`CssTransition`].
///
/// Every class override may hold several whitespace-separated tokens. The
/// enter overrides also replace the add pair and the leave overrides the
/// remove pair. An empty override counts as unset and falls back to the
/// derived class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionArgs {
    /// Base name; enter/leave classes default to `"{name}-enter"` etc.
    pub name: Option<String>,
    /// Overrides `"{name}-enter"` and `"{class}-add"`.
    pub enter_class: Option<String>,
    /// Overrides `"{name}-enter-active"` and `"{class}-add-active"`.
    pub enter_active_class: Option<String>,
    /// Overrides `"{name}-leave"` and `"{class}-remove"`.
    pub leave_class: Option<String>,
    /// Overrides `"{name}-leave-active"` and `"{class}-remove-active"`.
    pub leave_active_class: Option<String>,
    /// Explicit tracked value; when absent the name is tracked.
    pub state: Option<TrackedValue>,
}

impl TransitionArgs {
    /// Empty arguments: no transitions configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments with a base name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the tracked value.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<TrackedValue>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Overrides the enter (and add) class pair.
    #[must_use]
    pub fn with_enter_classes(mut self, from: &str, active: &str) -> Self {
        self.enter_class = Some(from.into());
        self.enter_active_class = Some(active.into());
        self
    }

    /// Overrides the leave (and remove) class pair.
    #[must_use]
    pub fn with_leave_classes(mut self, from: &str, active: &str) -> Self {
        self.leave_class = Some(from.into());
        self.leave_active_class = Some(active.into());
        self
    }

    /// Checks that every tracked value can derive a class.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FlagWithoutName`] for a boolean `state`
    /// without a `name`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.state, Some(TrackedValue::Flag(_))) && self.base_name().is_none() {
            return Err(ConfigError::FlagWithoutName);
        }
        Ok(())
    }

    /// The enter pair, if a name or an explicit enter class is set.
    #[must_use]
    pub fn enter_request(&self) -> Option<TransitionRequest> {
        self.lifecycle_request(
            class_override(&self.enter_class),
            class_override(&self.enter_active_class),
            "enter",
        )
    }

    /// The leave pair, if a name or an explicit leave class is set.
    #[must_use]
    pub fn leave_request(&self) -> Option<TransitionRequest> {
        self.lifecycle_request(
            class_override(&self.leave_class),
            class_override(&self.leave_active_class),
            "leave",
        )
    }

    /// The pair run when `class` is added.
    #[must_use]
    pub fn add_request(&self, class: &str) -> TransitionRequest {
        TransitionRequest::new(
            class_override(&self.enter_class).map_or_else(|| format!("{class}-add"), String::from),
            class_override(&self.enter_active_class)
                .map_or_else(|| format!("{class}-add-active"), String::from),
        )
    }

    /// The pair run when `class` is removed.
    #[must_use]
    pub fn remove_request(&self, class: &str) -> TransitionRequest {
        TransitionRequest::new(
            class_override(&self.leave_class)
                .map_or_else(|| format!("{class}-remove"), String::from),
            class_override(&self.leave_active_class)
                .map_or_else(|| format!("{class}-remove-active"), String::from),
        )
    }

    /// The value watched for add/remove transitions.
    #[must_use]
    pub fn tracked(&self) -> Option<TrackedValue> {
        match &self.state {
            Some(state) => Some(state.clone()),
            None => self.base_name().map(TrackedValue::from),
        }
    }

    /// The class a truthy `value` stands for; `None` when `value` is falsy.
    #[must_use]
    pub fn class_for(&self, value: &TrackedValue) -> Option<String> {
        if !value.is_truthy() {
            return None;
        }
        match value {
            TrackedValue::Text(text) => Some(dasherize(text)),
            TrackedValue::Flag(_) => self.base_name().map(dasherize),
        }
    }

    fn base_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    fn lifecycle_request(
        &self,
        from: Option<&str>,
        active: Option<&str>,
        role: &str,
    ) -> Option<TransitionRequest> {
        let name = self.base_name();
        if name.is_none() && from.is_none() {
            return None;
        }
        let derived = |suffix: &str| name.map(|n| format!("{n}-{suffix}")).unwrap_or_default();
        Some(TransitionRequest::new(
            from.map_or_else(|| derived(role), String::from),
            active.map_or_else(|| derived(&format!("{role}-active")), String::from),
        ))
    }
}

/// An explicit class argument; empty strings count as unset.
fn class_override(class: &Option<String>) -> Option<&str> {
    class.as_deref().filter(|c| !c.is_empty())
}

/// Completion hooks.
///
/// Enter and leave completions pass `None`; add and remove completions pass
/// the affected class name. Both methods default to no-ops.
pub trait TransitionHooks {
    /// An enter or add transition finished.
    fn did_transition_in(&mut self, class_name: Option<&str>) {
        _ = class_name;
    }

    /// A leave or remove transition finished.
    fn did_transition_out(&mut self, class_name: Option<&str>) {
        _ = class_name;
    }
}

/// [`TransitionHooks`] from a pair of closures.
pub struct FnHooks<I, O> {
    /// Called on enter/add completion.
    pub on_in: I,
    /// Called on leave/remove completion.
    pub on_out: O,
}

impl<I, O> core::fmt::Debug for FnHooks<I, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnHooks").finish_non_exhaustive()
    }
}

impl<I, O> TransitionHooks for FnHooks<I, O>
where
    I: FnMut(Option<&str>),
    O: FnMut(Option<&str>),
{
    fn did_transition_in(&mut self, class_name: Option<&str>) {
        (self.on_in)(class_name);
    }

    fn did_transition_out(&mut self, class_name: Option<&str>) {
        (self.on_out)(class_name);
    }
}

#[derive(Debug)]
struct Job<N> {
    id: JobId,
    /// Class passed to the completion hook (add/remove only).
    class_name: Option<String>,
    transition: Transition<N>,
}

/// Drives CSS transitions for one element across its lifecycle.
pub struct CssTransition<N> {
    element: N,
    args: TransitionArgs,
    prev: Option<TrackedValue>,
    memo: Option<PositionMemo<N>>,
    /// The live clone and the leave job that owns it.
    clone: Option<(JobId, CloneHandle<N>)>,
    jobs: Vec<Job<N>>,
    next_job: u64,
    installed: bool,
    detached: bool,
    hooks: Option<Box<dyn TransitionHooks>>,
    sink: Option<Box<dyn TraceSink>>,
}

impl<N: core::fmt::Debug> core::fmt::Debug for CssTransition<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CssTransition")
            .field("element", &self.element)
            .field("args", &self.args)
            .field("prev", &self.prev)
            .field("memo", &self.memo)
            .field("clone", &self.clone)
            .field("jobs", &self.jobs)
            .field("next_job", &self.next_job)
            .field("installed", &self.installed)
            .field("detached", &self.detached)
            .field("hooks", &self.hooks.is_some())
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

fn tracer(sink: &mut Option<Box<dyn TraceSink>>) -> Tracer<'_> {
    match sink {
        Some(sink) => Tracer::new(&mut **sink),
        None => Tracer::none(),
    }
}

impl<N: DomNode> CssTransition<N> {
    /// Creates an instance for `element`. Nothing happens until
    /// [`did_install`](Self::did_install).
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`TransitionArgs::validate`].
    pub fn new(element: N, args: TransitionArgs) -> Result<Self, ConfigError> {
        args.validate()?;
        Ok(Self {
            element,
            args,
            prev: None,
            memo: None,
            clone: None,
            jobs: Vec::new(),
            next_job: 0,
            installed: false,
            detached: false,
            hooks: None,
            sink: None,
        })
    }

    /// Binds completion hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: impl TransitionHooks + 'static) -> Self {
        self.hooks = Some(Box::new(hooks));
        self
    }

    /// Replaces (or clears) the completion hooks.
    pub fn set_hooks(&mut self, hooks: Option<Box<dyn TransitionHooks>>) {
        self.hooks = hooks;
    }

    /// Routes trace events to `sink`.
    #[must_use]
    pub fn with_trace_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Replaces (or clears) the trace sink.
    pub fn set_trace_sink(&mut self, sink: Option<Box<dyn TraceSink>>) {
        self.sink = sink;
    }

    /// Returns the live element.
    #[must_use]
    pub fn element(&self) -> &N {
        &self.element
    }

    /// Returns the leave clone while one exists.
    #[must_use]
    pub fn clone_element(&self) -> Option<&N> {
        self.clone.as_ref().map(|(_, handle)| handle.node())
    }

    /// Returns the element transitions currently act on: the clone during a
    /// leave transition, the live element otherwise.
    #[must_use]
    pub fn target(&self) -> &N {
        self.clone_element().unwrap_or(&self.element)
    }

    /// Returns the current arguments.
    #[must_use]
    pub fn args(&self) -> &TransitionArgs {
        &self.args
    }

    /// Returns the tracked value seen by the last install or update.
    #[must_use]
    pub fn tracked(&self) -> Option<&TrackedValue> {
        self.prev.as_ref()
    }

    /// Returns the remembered position of the live element.
    #[must_use]
    pub fn position_memo(&self) -> Option<&PositionMemo<N>> {
        self.memo.as_ref()
    }

    /// Returns the number of jobs that have not finished.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.jobs.len()
    }

    /// Returns `true` once [`will_remove`](Self::will_remove) was called.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Lifecycle: the element has been inserted.
    ///
    /// Applies the class of an initially truthy tracked value without a
    /// transition, remembers the element's position, and starts the enter
    /// transition if one is configured. Calling it again is a no-op.
    pub fn did_install(&mut self, now: HostTime) -> Option<Pending> {
        if self.installed || self.detached {
            return None;
        }
        self.installed = true;

        self.prev = self.args.tracked();
        if let Some(class) = self.prev.as_ref().and_then(|v| self.args.class_for(v)) {
            add_classes(&self.element, &class);
        }
        self.memo = Some(PositionMemo::capture(&self.element));

        let request = self.args.enter_request()?;
        let target = self.element.clone();
        self.start(TransitionKind::Enter, TargetKind::Live, target, request, None, now)
    }

    /// Lifecycle: the arguments changed.
    ///
    /// The tracked value is recorded before it is compared. A falsy → truthy
    /// flip adds the class at once and runs the add pair; truthy → falsy
    /// removes it and runs the remove pair; a change between two truthy
    /// values does both. Add and remove jobs still running from an earlier
    /// change are cancelled first, without their hooks. Anything else is a
    /// no-op, as is every update after [`will_remove`](Self::will_remove).
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`TransitionArgs::validate`]; the
    /// previous arguments stay in place.
    pub fn did_update_arguments(
        &mut self,
        args: TransitionArgs,
        now: HostTime,
    ) -> Result<Vec<Pending>, ConfigError> {
        args.validate()?;
        let previous_args = mem::replace(&mut self.args, args);
        let mut pending = Vec::new();
        if self.detached {
            return Ok(pending);
        }

        let value = self.args.tracked();
        let previous = mem::replace(&mut self.prev, value.clone());
        if !self.installed {
            return Ok(pending);
        }

        let old_class = previous.and_then(|v| previous_args.class_for(&v));
        let new_class = value.and_then(|v| self.args.class_for(&v));
        if old_class == new_class {
            return Ok(pending);
        }

        // One add/remove sequence per change: a stale job would strip the
        // scaffolding classes of the jobs started below.
        self.cancel_jobs(now, |job| {
            job.transition.target_kind() == TargetKind::Live
                && matches!(
                    job.transition.kind(),
                    TransitionKind::Add | TransitionKind::Remove
                )
        });

        if let Some(class) = old_class {
            remove_classes(&self.element, &class);
            let request = self.args.remove_request(&class);
            let target = self.element.clone();
            pending.extend(self.start(
                TransitionKind::Remove,
                TargetKind::Live,
                target,
                request,
                Some(class),
                now,
            ));
        }
        if let Some(class) = new_class {
            add_classes(&self.element, &class);
            let request = self.args.add_request(&class);
            let target = self.element.clone();
            pending.extend(self.start(
                TransitionKind::Add,
                TargetKind::Live,
                target,
                request,
                Some(class),
                now,
            ));
        }
        Ok(pending)
    }

    /// Lifecycle: the host is about to detach the element.
    ///
    /// Without a leave pair nothing is touched. Otherwise in-flight jobs on
    /// the live element are cancelled, a clone is inserted at the element's
    /// position, and the leave job waits one frame before its first step.
    /// A clone left over from an earlier removal is destroyed first.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::MissingParent`] when there is nowhere to
    /// put the clone, and [`TransitionError::CloneFailed`] when the backend
    /// cannot copy the element.
    pub fn will_remove(&mut self, now: HostTime) -> Result<Option<Pending>, TransitionError> {
        self.detached = true;
        let Some(request) = self.args.leave_request() else {
            return Ok(None);
        };

        self.cancel_jobs(now, |job| job.transition.target_kind() == TargetKind::Live);
        self.replace_clone(now);

        let handle = CloneHandle::create(&self.element, self.memo.as_ref())?;
        let id = self.allocate_job();
        tracer(&mut self.sink).clone_event(&CloneEvent {
            job: id,
            action: CloneAction::Created,
            at: now,
        });

        let target = handle.node().clone();
        self.jobs.push(Job {
            id,
            class_name: None,
            transition: Transition::new(id, TransitionKind::Leave, TargetKind::Clone, target, request),
        });
        self.clone = Some((id, handle));
        Ok(Some(Pending {
            job: id,
            wait: Wait::NextFrame,
        }))
    }

    /// Resumes `job` after its wait was satisfied.
    ///
    /// Returns the job's next wait, or `None` when it finished (its hook has
    /// then been called) or is unknown to this instance.
    pub fn resume(&mut self, job: JobId, now: HostTime) -> Option<Pending> {
        let index = self.jobs.iter().position(|j| j.id == job)?;
        self.drive(index, now)
    }

    /// Cancels every job and destroys the clone, for hosts that tear the
    /// instance down mid-transition. No hooks are called.
    pub fn teardown(&mut self, now: HostTime) {
        self.detached = true;
        self.cancel_jobs(now, |_| true);
        if let Some((owner, handle)) = self.clone.take() {
            handle.destroy();
            tracer(&mut self.sink).clone_event(&CloneEvent {
                job: owner,
                action: CloneAction::Destroyed,
                at: now,
            });
        }
    }

    fn allocate_job(&mut self) -> JobId {
        let id = JobId(self.next_job);
        self.next_job += 1;
        id
    }

    fn start(
        &mut self,
        kind: TransitionKind,
        target_kind: TargetKind,
        target: N,
        request: TransitionRequest,
        class_name: Option<String>,
        now: HostTime,
    ) -> Option<Pending> {
        let id = self.allocate_job();
        self.jobs.push(Job {
            id,
            class_name,
            transition: Transition::new(id, kind, target_kind, target, request),
        });
        self.drive(self.jobs.len() - 1, now)
    }

    fn drive(&mut self, index: usize, now: HostTime) -> Option<Pending> {
        let job = &mut self.jobs[index];
        let step = job.transition.advance(now, &mut tracer(&mut self.sink));
        match step {
            Step::Wait(wait) => Some(Pending { job: job.id, wait }),
            Step::Done => {
                let job = self.jobs.remove(index);
                self.complete(job, now);
                None
            }
        }
    }

    fn complete(&mut self, job: Job<N>, now: HostTime) {
        let kind = job.transition.kind();
        if kind == TransitionKind::Leave
            && self.clone.as_ref().is_some_and(|(owner, _)| *owner == job.id)
            && let Some((_, handle)) = self.clone.take()
        {
            handle.destroy();
            tracer(&mut self.sink).clone_event(&CloneEvent {
                job: job.id,
                action: CloneAction::Destroyed,
                at: now,
            });
        }

        if let Some(hooks) = &mut self.hooks {
            let class_name = job.class_name.as_deref();
            match kind {
                TransitionKind::Enter | TransitionKind::Add => hooks.did_transition_in(class_name),
                TransitionKind::Leave | TransitionKind::Remove => {
                    hooks.did_transition_out(class_name);
                }
            }
            tracer(&mut self.sink).callback(&CallbackEvent {
                job: job.id,
                kind,
                with_class: class_name.is_some(),
                at: now,
            });
        }

        if kind == TransitionKind::Enter {
            self.memo = Some(PositionMemo::capture(&self.element));
        }
    }

    fn cancel_jobs(&mut self, now: HostTime, mut select: impl FnMut(&Job<N>) -> bool) {
        let mut tracer = tracer(&mut self.sink);
        self.jobs.retain_mut(|job| {
            if !select(job) {
                return true;
            }
            let phase = job.transition.cancel(now, &mut tracer);
            tracer.cancel(&CancelEvent {
                job: job.id,
                kind: job.transition.kind(),
                phase,
                at: now,
            });
            false
        });
    }

    fn replace_clone(&mut self, now: HostTime) {
        let Some((owner, handle)) = self.clone.take() else {
            return;
        };
        self.jobs.retain(|job| job.id != owner);
        handle.destroy();
        tracer(&mut self.sink).clone_event(&CloneEvent {
            job: owner,
            action: CloneAction::Replaced,
            at: now,
        });
    }
}
