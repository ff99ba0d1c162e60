// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal in-memory [`DomNode`] for unit tests.

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::backend::DomNode;
use crate::style::TimingStyle;

#[derive(Default)]
struct Data {
    id: String,
    classes: Vec<String>,
    style: TimingStyle,
    reflows: u32,
    parent: Weak<RefCell<Data>>,
    children: Vec<TestNode>,
}

#[derive(Clone)]
pub(crate) struct TestNode(Rc<RefCell<Data>>);

impl PartialEq for TestNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl core::fmt::Debug for TestNode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("TestNode")
            .field("id", &data.id)
            .field("classes", &data.classes)
            .finish_non_exhaustive()
    }
}

impl TestNode {
    pub(crate) fn new(id: &str) -> Self {
        Self(Rc::new(RefCell::new(Data {
            id: id.into(),
            ..Data::default()
        })))
    }

    pub(crate) fn set_style(&self, style: TimingStyle) {
        self.0.borrow_mut().style = style;
    }

    pub(crate) fn reflows(&self) -> u32 {
        self.0.borrow().reflows
    }

    pub(crate) fn class_names(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    pub(crate) fn child_ids(&self) -> Vec<String> {
        self.0.borrow().children.iter().map(DomNode::id).collect()
    }

    fn index_in_parent(&self) -> Option<(Self, usize)> {
        let parent = Self(self.0.borrow().parent.upgrade()?);
        let index = parent.0.borrow().children.iter().position(|c| c == self)?;
        Some((parent, index))
    }
}

impl DomNode for TestNode {
    fn add_class(&self, token: &str) {
        let mut data = self.0.borrow_mut();
        if !data.classes.iter().any(|c| c == token) {
            data.classes.push(token.into());
        }
    }

    fn remove_class(&self, token: &str) {
        self.0.borrow_mut().classes.retain(|c| c != token);
    }

    fn has_class(&self, token: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == token)
    }

    fn id(&self) -> String {
        self.0.borrow().id.clone()
    }

    fn set_id(&self, id: &str) {
        self.0.borrow_mut().id = id.into();
    }

    fn parent(&self) -> Option<Self> {
        self.0.borrow().parent.upgrade().map(Self)
    }

    fn next_sibling(&self) -> Option<Self> {
        let (parent, index) = self.index_in_parent()?;
        parent.0.borrow().children.get(index + 1).cloned()
    }

    fn deep_clone(&self) -> Option<Self> {
        let data = self.0.borrow();
        let copy = Self(Rc::new(RefCell::new(Data {
            id: data.id.clone(),
            classes: data.classes.clone(),
            style: data.style.clone(),
            ..Data::default()
        })));
        for child in &data.children {
            copy.insert_before(&child.deep_clone()?, None);
        }
        Some(copy)
    }

    fn insert_before(&self, child: &Self, reference: Option<&Self>) {
        if let Some(old) = child.parent() {
            old.remove_child(child);
        }
        let mut data = self.0.borrow_mut();
        let index = reference
            .and_then(|r| data.children.iter().position(|c| c == r))
            .unwrap_or(data.children.len());
        data.children.insert(index, child.clone());
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
    }

    fn remove_child(&self, child: &Self) {
        let mut data = self.0.borrow_mut();
        if let Some(index) = data.children.iter().position(|c| c == child) {
            data.children.remove(index);
            child.0.borrow_mut().parent = Weak::new();
        }
    }

    fn force_reflow(&self) {
        self.0.borrow_mut().reflows += 1;
    }

    fn timing_style(&self) -> TimingStyle {
        self.0.borrow().style.clone()
    }
}
