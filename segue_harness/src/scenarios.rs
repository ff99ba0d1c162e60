// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end lifecycle scenarios on the in-memory document.

use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;

use segue_core::backend::DomNode;
use segue_core::error::TransitionError;
use segue_core::frame::JobId;
use segue_core::modifier::{CssTransition, TrackedValue, TransitionArgs};
use segue_core::style::TimingStyle;
use segue_core::time::HostTime;
use segue_core::trace::{CancelEvent, CloneAction};
use segue_core::transition::{Phase, TransitionKind};

use crate::{EventLog, HookCall, HookLog, MemDocument, MemNode, Mutation, TraceRecord, VirtualHost};

struct Fixture {
    doc: MemDocument,
    host: VirtualHost,
    hooks: HookLog,
    events: EventLog,
}

impl Fixture {
    fn new(rules: &[(&str, TimingStyle)]) -> Self {
        let doc = MemDocument::new();
        for (class, style) in rules {
            doc.add_rule(class, style.clone());
        }
        let host = VirtualHost::default().with_document(&doc);
        Self {
            doc,
            host,
            hooks: HookLog::new(),
            events: EventLog::new(),
        }
    }

    fn mount(&self, id: &str) -> MemNode {
        let el = self.doc.create_element(id);
        self.doc.body().append(&el);
        el
    }

    fn attach(&self, el: &MemNode, args: TransitionArgs) -> CssTransition<MemNode> {
        CssTransition::new(el.clone(), args)
            .unwrap()
            .with_hooks(self.hooks.clone())
            .with_trace_sink(self.events.clone())
    }

    fn install(&mut self, t: &mut CssTransition<MemNode>) {
        let pending = t.did_install(self.host.now());
        self.host.schedule(pending);
    }

    fn update(&mut self, t: &mut CssTransition<MemNode>, args: TransitionArgs) {
        let pending = t.did_update_arguments(args, self.host.now()).unwrap();
        self.host.schedule_all(pending);
    }

    fn remove(&mut self, t: &mut CssTransition<MemNode>) {
        let pending = t.will_remove(self.host.now()).unwrap();
        self.host.schedule(pending);
        // The host framework drops the element right away.
        t.element().detach();
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn added(node: &str, class: &str) -> Mutation {
    Mutation::ClassAdded {
        node: node.into(),
        class: class.into(),
    }
}

fn removed(node: &str, class: &str) -> Mutation {
    Mutation::ClassRemoved {
        node: node.into(),
        class: class.into(),
    }
}

#[test]
fn enter_classes_follow_paint_and_timeout() {
    let mut fx = Fixture::new(&[("fade-enter-active", TimingStyle::transition("300ms", "0s"))]);
    let el = fx.mount("card");
    let mut t = fx.attach(&el, TransitionArgs::named("fade"));
    fx.doc.take_log();

    fx.install(&mut t);
    assert!(el.has_class("fade-enter"));
    assert!(!el.has_class("fade-enter-active"));

    fx.host.frame(&mut t);
    assert!(el.has_class("fade-enter-active"));
    assert!(!el.has_class("fade-enter"));

    fx.host.advance(ms(299), &mut t);
    assert!(el.has_class("fade-enter-active"));
    fx.host.advance(ms(1), &mut t);
    assert!(!el.has_class("fade-enter-active"));
    assert!(!el.has_class("fade-enter"));

    let log: Vec<Mutation> = fx
        .doc
        .take_log()
        .into_iter()
        .filter(|m| *m != Mutation::Frame)
        .collect();
    assert_eq!(
        log,
        [
            added("card", "fade"),
            added("card", "fade-enter"),
            Mutation::Reflow {
                node: "card".into()
            },
            added("card", "fade-enter-active"),
            removed("card", "fade-enter"),
            removed("card", "fade-enter-active"),
        ]
    );
    assert_eq!(fx.hooks.calls(), [HookCall::In(None)]);
}

#[test]
fn from_class_is_painted_before_the_active_class() {
    let mut fx = Fixture::new(&[]);
    let el = fx.mount("card");
    let mut t = fx.attach(&el, TransitionArgs::new().with_enter_classes("in", "in-go"));
    fx.doc.take_log();
    fx.install(&mut t);
    fx.host.frame(&mut t);

    let log = fx.doc.take_log();
    let from = log.iter().position(|m| *m == added("card", "in"));
    let frame = log.iter().position(|m| *m == Mutation::Frame);
    let reflow = log.iter().position(|m| matches!(m, Mutation::Reflow { .. }));
    let active = log.iter().position(|m| *m == added("card", "in-go"));
    assert!(from < frame && frame < reflow && reflow < active);
}

#[test]
fn enter_phases_are_traced_in_order() {
    let mut fx = Fixture::new(&[("fade-enter-active", TimingStyle::transition("50ms", "0s"))]);
    let el = fx.mount("card");
    let mut t = fx.attach(&el, TransitionArgs::named("fade"));
    fx.install(&mut t);
    fx.host.settle(&mut t);
    assert_eq!(
        fx.events.phases_of(JobId(0)),
        [
            Phase::FromApplied,
            Phase::RepaintForced,
            Phase::ActiveApplied,
            Phase::Waiting,
            Phase::Done,
        ]
    );
}

#[test]
fn leave_runs_on_a_positioned_clone() {
    let mut fx = Fixture::new(&[("fade-leave-active", TimingStyle::transition("200ms", "0s"))]);
    let a = fx.mount("a");
    let el = fx.mount("card");
    let _c = fx.mount("c");
    let mut t = fx.attach(&el, TransitionArgs::named("fade"));
    fx.install(&mut t);
    fx.host.settle(&mut t);

    fx.remove(&mut t);
    let body = fx.doc.body();
    assert!(!el.is_connected());
    assert_eq!(body.child_ids(), ["a", "card_clone", "c"]);
    let clone = t.clone_element().unwrap().clone();
    assert_eq!(clone.parent(), Some(body.clone()));
    assert_eq!(a.next_sibling(), Some(clone.clone()));
    assert!(clone.has_class("fade"), "the clone keeps the semantic classes");
    assert!(!clone.has_class("fade-leave"));

    fx.host.frame(&mut t);
    assert!(clone.has_class("fade-leave"));
    fx.host.frame(&mut t);
    assert!(clone.has_class("fade-leave-active"));
    assert!(!clone.has_class("fade-leave"));
    assert_eq!(body.child_ids(), ["a", "card_clone", "c"]);

    fx.host.advance(ms(200), &mut t);
    assert_eq!(body.child_ids(), ["a", "c"]);
    assert!(t.clone_element().is_none());
    assert_eq!(fx.hooks.calls(), [HookCall::In(None), HookCall::Out(None)]);
    assert_eq!(
        fx.events.clone_actions(),
        [CloneAction::Created, CloneAction::Destroyed]
    );
}

#[test]
fn clone_falls_back_to_the_remembered_position() {
    let mut fx = Fixture::new(&[]);
    let _a = fx.mount("a");
    let el = fx.mount("card");
    let _c = fx.mount("c");
    let mut t = fx.attach(&el, TransitionArgs::named("fade"));
    fx.install(&mut t);
    fx.host.settle(&mut t);

    // Detached before the removal hook runs.
    el.detach();
    let pending = t.will_remove(fx.host.now()).unwrap();
    fx.host.schedule(pending);
    assert_eq!(fx.doc.body().child_ids(), ["a", "card_clone", "c"]);
    fx.host.settle(&mut t);
    assert_eq!(fx.doc.body().child_ids(), ["a", "c"]);
}

#[test]
fn removal_without_a_parent_fails_loudly() {
    let fx = Fixture::new(&[]);
    let el = fx.doc.create_element("orphan");
    let mut t = fx.attach(&el, TransitionArgs::named("fade"));
    t.did_install(HostTime::ZERO);
    assert_eq!(
        t.will_remove(HostTime::ZERO),
        Err(TransitionError::MissingParent)
    );
}

#[test]
fn removal_without_leave_classes_is_inert() {
    let mut fx = Fixture::new(&[]);
    let el = fx.mount("card");
    let mut t = fx.attach(&el, TransitionArgs::new().with_enter_classes("in", "in-go"));
    fx.install(&mut t);
    fx.host.settle(&mut t);
    fx.doc.take_log();

    assert_eq!(t.will_remove(fx.host.now()), Ok(None));
    assert!(fx.doc.log().is_empty());
    assert!(t.clone_element().is_none());
    assert!(fx.host.is_idle());
    assert!(fx.events.clone_actions().is_empty());
}

#[test]
fn tracked_text_calls_hooks_with_the_class() {
    let mut fx = Fixture::new(&[(
        "is-important-add-active",
        TimingStyle::transition("100ms", "0s"),
    )]);
    let el = fx.mount("card");
    let args = |s: &str| TransitionArgs::new().with_state(s);
    let mut t = fx.attach(&el, args(""));
    fx.install(&mut t);
    assert!(fx.host.is_idle());

    fx.update(&mut t, args("isImportant"));
    assert!(el.has_class("is-important"));
    assert!(el.has_class("is-important-add"));
    fx.host.settle(&mut t);
    assert_eq!(el.class_names(), ["is-important"]);
    assert_eq!(
        fx.hooks.calls(),
        [HookCall::In(Some("is-important".into()))]
    );

    fx.update(&mut t, args("isImportant"));
    assert!(fx.host.is_idle());
    assert_eq!(fx.hooks.calls().len(), 1);

    fx.update(&mut t, args(""));
    assert!(!el.has_class("is-important"));
    fx.host.settle(&mut t);
    assert!(el.class_names().is_empty());
    assert_eq!(
        fx.hooks.calls()[1],
        HookCall::Out(Some("is-important".into()))
    );
}

#[test]
fn flag_state_derives_the_class_from_the_name() {
    let mut fx = Fixture::new(&[]);
    let el = fx.mount("card");
    let args = |on: bool| TransitionArgs::named("isOpen").with_state(on);
    let mut t = fx.attach(&el, args(false));
    fx.install(&mut t);
    fx.host.settle(&mut t);
    assert!(el.class_names().is_empty());

    fx.update(&mut t, args(true));
    assert!(el.has_class("is-open"));
    assert!(el.has_class("is-open-add"));
    fx.host.settle(&mut t);

    fx.update(&mut t, args(false));
    fx.host.settle(&mut t);
    assert!(el.class_names().is_empty());
    assert_eq!(
        fx.hooks.calls(),
        [
            HookCall::In(None),
            HookCall::In(Some("is-open".into())),
            HookCall::Out(Some("is-open".into())),
        ]
    );
}

#[test]
fn initially_truthy_state_is_applied_without_transition() {
    let mut fx = Fixture::new(&[]);
    let el = fx.mount("card");
    let mut t = fx.attach(&el, TransitionArgs::new().with_state("selected"));
    fx.doc.take_log();
    fx.install(&mut t);
    assert!(fx.host.is_idle());
    assert_eq!(fx.doc.take_log(), [added("card", "selected")]);
    assert!(fx.hooks.calls().is_empty());
    assert_eq!(t.tracked(), Some(&TrackedValue::from("selected")));
}

#[test]
fn swapping_truthy_values_runs_remove_then_add() {
    let mut fx = Fixture::new(&[]);
    let el = fx.mount("card");
    let args = |s: &str| TransitionArgs::new().with_state(s);
    let mut t = fx.attach(&el, args("warm"));
    fx.install(&mut t);

    fx.update(&mut t, args("cool"));
    assert_eq!(fx.host.pending_frames(), 2);
    fx.host.settle(&mut t);
    assert_eq!(el.class_names(), ["cool"]);
    assert_eq!(
        fx.hooks.calls(),
        [
            HookCall::Out(Some("warm".into())),
            HookCall::In(Some("cool".into())),
        ]
    );
}

#[test]
fn toggling_back_within_the_timeout_restarts_the_add() {
    let mut fx = Fixture::new(&[("x-add-active", TimingStyle::transition("300ms", "0s"))]);
    let el = fx.mount("card");
    let args = |s: &str| TransitionArgs::new().with_state(s);
    let mut t = fx.attach(&el, args(""));
    fx.install(&mut t);

    fx.update(&mut t, args("x"));
    fx.host.frame(&mut t);
    assert!(el.has_class("x-add-active"));

    fx.update(&mut t, args(""));
    fx.update(&mut t, args("x"));
    assert_eq!(el.class_names(), ["x", "x-add"]);
    assert_eq!(t.in_flight(), 1);
    let cancelled: Vec<TransitionKind> = fx.events.cancellations().iter().map(|e| e.kind).collect();
    assert_eq!(cancelled, [TransitionKind::Add, TransitionKind::Remove]);

    // The first add's timer fires here and must not touch the second add.
    fx.host.frame(&mut t);
    fx.host.advance(ms(290), &mut t);
    assert_eq!(el.class_names(), ["x", "x-add-active"]);

    fx.host.settle(&mut t);
    assert_eq!(el.class_names(), ["x"]);
    assert_eq!(fx.hooks.calls(), [HookCall::In(Some("x".into()))]);
}

#[test]
fn class_overrides_replace_add_and_remove_pairs() {
    let mut fx = Fixture::new(&[]);
    let el = fx.mount("card");
    let args = |on: bool| {
        TransitionArgs::named("open")
            .with_state(on)
            .with_enter_classes("grow", "grow-go")
            .with_leave_classes("shrink", "shrink-go")
    };
    let mut t = fx.attach(&el, args(false));
    fx.install(&mut t);
    fx.host.settle(&mut t);
    fx.doc.take_log();

    fx.update(&mut t, args(true));
    fx.host.settle(&mut t);
    fx.update(&mut t, args(false));
    fx.host.settle(&mut t);

    let added_classes: Vec<_> = fx
        .doc
        .take_log()
        .into_iter()
        .filter_map(|m| match m {
            Mutation::ClassAdded { class, .. } => Some(class),
            _ => None,
        })
        .collect();
    assert_eq!(
        added_classes,
        ["open", "grow", "grow-go", "shrink", "shrink-go"]
    );
}

#[test]
fn multi_token_classes_are_split() {
    let mut fx = Fixture::new(&[]);
    let el = fx.mount("card");
    let mut t = fx.attach(
        &el,
        TransitionArgs::new().with_enter_classes("opacity-0 scale-90", "transition duration-200"),
    );
    fx.install(&mut t);
    assert_eq!(el.class_names(), ["opacity-0", "scale-90"]);
    fx.host.frame(&mut t);
    assert!(el.class_names().is_empty());
}

#[test]
fn combined_lists_use_the_longest_entry() {
    let mut fx = Fixture::new(&[(
        "slide-enter-active",
        TimingStyle::transition("1s, 200ms", "0s, 0.1s"),
    )]);
    let el = fx.mount("card");
    let mut t = fx.attach(&el, TransitionArgs::named("slide"));
    fx.install(&mut t);
    fx.host.frame(&mut t);

    let timeout = fx.events.records().into_iter().find_map(|r| match r {
        TraceRecord::Timeout(e) => Some(e.timeout),
        _ => None,
    });
    assert_eq!(timeout, Some(Some(ms(1000))));
    fx.host.advance(ms(999), &mut t);
    assert!(el.has_class("slide-enter-active"));
    fx.host.advance(ms(1), &mut t);
    assert!(!el.has_class("slide-enter-active"));
}

#[test]
fn animations_count_toward_the_timeout() {
    let mut fx = Fixture::new(&[(
        "pop-enter-active",
        TimingStyle::animation("pulse", "300ms", "0s").with_iteration_count("2"),
    )]);
    let el = fx.mount("card");
    let mut t = fx.attach(&el, TransitionArgs::named("pop"));
    fx.install(&mut t);
    fx.host.frame(&mut t);
    fx.host.advance(ms(599), &mut t);
    assert_eq!(t.in_flight(), 1);
    fx.host.advance(ms(1), &mut t);
    assert_eq!(t.in_flight(), 0);
}

#[test]
fn zero_duration_finishes_on_the_active_frame() {
    let mut fx = Fixture::new(&[("fade-enter-active", TimingStyle::transition("0s", "0s"))]);
    let el = fx.mount("card");
    let mut t = fx.attach(&el, TransitionArgs::named("fade"));
    fx.install(&mut t);
    fx.host.frame(&mut t);
    assert!(fx.host.is_idle());
    assert_eq!(el.class_names(), ["fade"]);
    assert_eq!(fx.hooks.calls(), [HookCall::In(None)]);
}

#[test]
fn removal_cancels_an_in_flight_enter() {
    let mut fx = Fixture::new(&[
        ("fade-enter-active", TimingStyle::transition("1s", "0s")),
        ("fade-leave-active", TimingStyle::transition("100ms", "0s")),
    ]);
    let el = fx.mount("card");
    let mut t = fx.attach(&el, TransitionArgs::named("fade"));
    fx.install(&mut t);
    fx.host.frame(&mut t);
    assert!(el.has_class("fade-enter-active"));

    fx.remove(&mut t);
    assert!(!el.has_class("fade-enter-active"));
    let clone = t.clone_element().unwrap().clone();
    assert!(!clone.has_class("fade-enter-active"));
    assert_eq!(
        fx.events.cancellations(),
        [CancelEvent {
            job: JobId(0),
            kind: TransitionKind::Enter,
            phase: Phase::Waiting,
            at: fx.host.now(),
        }]
    );

    fx.host.settle(&mut t);
    assert_eq!(fx.hooks.calls(), [HookCall::Out(None)]);
    assert!(fx.doc.body().child_ids().is_empty());
}

#[test]
fn second_removal_replaces_the_clone() {
    let mut fx = Fixture::new(&[("fade-leave-active", TimingStyle::transition("1s", "0s"))]);
    let el = fx.mount("card");
    let mut t = fx.attach(&el, TransitionArgs::named("fade"));
    fx.install(&mut t);
    fx.host.settle(&mut t);

    let first = t.will_remove(fx.host.now()).unwrap();
    fx.host.schedule(first);
    fx.host.frame(&mut t);
    let second = t.will_remove(fx.host.now()).unwrap();
    fx.host.schedule(second);
    el.detach();

    let clones = |doc: &MemDocument| {
        doc.body()
            .child_ids()
            .into_iter()
            .filter(|id| id == "card_clone")
            .count()
    };
    assert_eq!(clones(&fx.doc), 1);
    fx.host.settle(&mut t);
    assert_eq!(clones(&fx.doc), 0);
    assert_eq!(
        fx.events.clone_actions(),
        [
            CloneAction::Created,
            CloneAction::Replaced,
            CloneAction::Created,
            CloneAction::Destroyed,
        ]
    );
    assert_eq!(
        fx.hooks.calls(),
        [HookCall::In(None), HookCall::Out(None)],
        "the replaced leave never completes"
    );
}

#[test]
fn updates_after_removal_are_ignored() {
    let mut fx = Fixture::new(&[]);
    let el = fx.mount("card");
    let mut t = fx.attach(&el, TransitionArgs::new().with_state("warm"));
    fx.install(&mut t);
    fx.remove(&mut t);
    fx.update(&mut t, TransitionArgs::new().with_state("cool"));
    assert!(fx.host.is_idle());
    assert_eq!(el.class_names(), ["warm"]);
}

#[test]
fn teardown_mid_leave_removes_the_clone_silently() {
    let mut fx = Fixture::new(&[("fade-leave-active", TimingStyle::transition("1s", "0s"))]);
    let el = fx.mount("card");
    let mut t = fx.attach(&el, TransitionArgs::named("fade"));
    fx.install(&mut t);
    fx.host.settle(&mut t);
    fx.remove(&mut t);
    fx.host.frame(&mut t);
    fx.host.frame(&mut t);

    t.teardown(fx.host.now());
    assert!(fx.doc.body().child_ids().is_empty());
    // Waits already handed to the host resume as no-ops.
    fx.host.settle(&mut t);
    assert_eq!(fx.hooks.calls(), [HookCall::In(None)]);
}

#[test]
fn anonymous_element_gets_degenerate_clone_id() {
    let mut fx = Fixture::new(&[]);
    let el = fx.mount("");
    let mut t = fx.attach(&el, TransitionArgs::named("fade"));
    fx.install(&mut t);
    fx.host.settle(&mut t);
    fx.remove(&mut t);
    assert_eq!(fx.doc.body().child_ids(), vec!["_clone"]);
}
