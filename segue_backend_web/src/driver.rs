// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser-driven transition instances.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use js_sys::Function;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use segue_core::backend::DomNode as _;
use segue_core::error::{ConfigError, TransitionError};
use segue_core::frame::Pending;
use segue_core::modifier::{CssTransition, TransitionArgs, TransitionHooks};
use segue_core::trace::TraceSink;

use crate::element::DomElement;
use crate::frame::wait;
use crate::now;

/// A [`CssTransition`] on a live element, with every wait satisfied on the
/// browser event loop.
///
/// Each started job runs as its own `spawn_local` task that awaits its wait
/// and resumes the instance until the job finishes. Cloning the handle
/// shares the instance.
///
/// Hooks run after the instance has been released, so a hook may call back
/// into the same `WebTransition` (for example to tear it down).
#[derive(Clone)]
pub struct WebTransition {
    inner: Rc<RefCell<CssTransition<DomElement>>>,
    completed: Completions,
    hooks: Rc<RefCell<Option<Box<dyn TransitionHooks>>>>,
    /// Bumped by `set_hooks` so a hook that replaces the hooks is not undone.
    hooks_epoch: Rc<Cell<u64>>,
}

#[derive(Clone, Debug)]
enum Completion {
    In(Option<String>),
    Out(Option<String>),
}

/// Queues completions reported by the core until the instance is released.
#[derive(Clone, Default)]
struct Completions(Rc<RefCell<Vec<Completion>>>);

impl TransitionHooks for Completions {
    fn did_transition_in(&mut self, class_name: Option<&str>) {
        self.0
            .borrow_mut()
            .push(Completion::In(class_name.map(String::from)));
    }

    fn did_transition_out(&mut self, class_name: Option<&str>) {
        self.0
            .borrow_mut()
            .push(Completion::Out(class_name.map(String::from)));
    }
}

impl core::fmt::Debug for WebTransition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("WebTransition")
                .field("element", &inner.element().id())
                .field("in_flight", &inner.in_flight())
                .field("detached", &inner.is_detached())
                .field("hooks", &self.hooks.try_borrow().map(|h| h.is_some()).ok())
                .finish_non_exhaustive(),
            Err(_) => f.debug_struct("WebTransition").finish_non_exhaustive(),
        }
    }
}

impl WebTransition {
    /// Creates an instance for `element`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`TransitionArgs::validate`].
    pub fn new(element: Element, args: TransitionArgs) -> Result<Self, ConfigError> {
        let completed = Completions::default();
        let instance = CssTransition::new(DomElement(element), args)?.with_hooks(completed.clone());
        Ok(Self {
            inner: Rc::new(RefCell::new(instance)),
            completed,
            hooks: Rc::new(RefCell::new(None)),
            hooks_epoch: Rc::new(Cell::new(0)),
        })
    }

    /// Binds (or clears) the completion hooks.
    pub fn set_hooks(&self, hooks: Option<Box<dyn TransitionHooks>>) {
        self.hooks_epoch.set(self.hooks_epoch.get() + 1);
        *self.hooks.borrow_mut() = hooks;
    }

    /// Routes trace events to `sink`, or stops tracing.
    pub fn set_trace_sink(&self, sink: Option<Box<dyn TraceSink>>) {
        self.inner.borrow_mut().set_trace_sink(sink);
    }

    /// Lifecycle: the element has been inserted.
    pub fn did_install(&self) {
        let pending = self.inner.borrow_mut().did_install(now());
        self.spawn(pending);
        self.dispatch();
    }

    /// Lifecycle: the arguments changed.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`TransitionArgs::validate`].
    pub fn did_update_arguments(&self, args: TransitionArgs) -> Result<(), ConfigError> {
        let pending = self.inner.borrow_mut().did_update_arguments(args, now())?;
        for p in pending {
            self.spawn(Some(p));
        }
        self.dispatch();
        Ok(())
    }

    /// Lifecycle: the element is about to be removed.
    ///
    /// The host may detach the element as soon as this returns.
    ///
    /// # Errors
    ///
    /// Returns the [`TransitionError`] from
    /// [`CssTransition::will_remove`].
    pub fn will_remove(&self) -> Result<(), TransitionError> {
        let pending = self.inner.borrow_mut().will_remove(now())?;
        self.spawn(pending);
        self.dispatch();
        Ok(())
    }

    /// Cancels every job and removes any leave clone.
    pub fn teardown(&self) {
        self.inner.borrow_mut().teardown(now());
    }

    /// Returns the number of jobs that have not finished.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inner.borrow().in_flight()
    }

    fn spawn(&self, pending: Option<Pending>) {
        let Some(mut pending) = pending else {
            return;
        };
        let this = self.clone();
        spawn_local(async move {
            loop {
                wait(pending.wait).await;
                let next = this.inner.borrow_mut().resume(pending.job, now());
                this.dispatch();
                match next {
                    Some(p) => pending = p,
                    None => break,
                }
            }
        });
    }

    /// Delivers queued completions to the user hooks.
    ///
    /// Neither the instance nor the hook slot is borrowed while a hook runs.
    fn dispatch(&self) {
        loop {
            let batch = core::mem::take(&mut *self.completed.0.borrow_mut());
            if batch.is_empty() {
                return;
            }
            for completion in batch {
                let Some(mut hooks) = self.hooks.borrow_mut().take() else {
                    continue;
                };
                let epoch = self.hooks_epoch.get();
                match &completion {
                    Completion::In(class_name) => hooks.did_transition_in(class_name.as_deref()),
                    Completion::Out(class_name) => hooks.did_transition_out(class_name.as_deref()),
                }
                if self.hooks_epoch.get() == epoch {
                    *self.hooks.borrow_mut() = Some(hooks);
                }
            }
        }
    }
}

/// [`TransitionHooks`] that call JavaScript functions.
///
/// Enter and leave completions call with no arguments; add and remove
/// completions pass the class name as a string. Exceptions thrown by the
/// functions are ignored.
#[derive(Clone, Debug, Default)]
pub struct FunctionHooks {
    /// Called on enter/add completion.
    pub did_transition_in: Option<Function>,
    /// Called on leave/remove completion.
    pub did_transition_out: Option<Function>,
}

fn call(f: Option<&Function>, class_name: Option<&str>) {
    let Some(f) = f else {
        return;
    };
    let _ = match class_name {
        Some(class_name) => f.call1(&JsValue::NULL, &JsValue::from_str(class_name)),
        None => f.call0(&JsValue::NULL),
    };
}

impl TransitionHooks for FunctionHooks {
    fn did_transition_in(&mut self, class_name: Option<&str>) {
        call(self.did_transition_in.as_ref(), class_name);
    }

    fn did_transition_out(&mut self, class_name: Option<&str>) {
        call(self.did_transition_out.as_ref(), class_name);
    }
}
