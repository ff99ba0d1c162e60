// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory document with a class-keyed stylesheet.

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use segue_core::backend::DomNode;
use segue_core::style::TimingStyle;

/// One observable change to a [`MemDocument`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// A class token was added to the element with id `node`.
    ClassAdded {
        /// Element id.
        node: String,
        /// Class token.
        class: String,
    },
    /// A class token was removed.
    ClassRemoved {
        /// Element id.
        node: String,
        /// Class token.
        class: String,
    },
    /// Layout was read on the element.
    Reflow {
        /// Element id.
        node: String,
    },
    /// The element was inserted under `parent`.
    Inserted {
        /// Element id.
        node: String,
        /// Parent id.
        parent: String,
    },
    /// The element was removed from its parent.
    Detached {
        /// Element id.
        node: String,
    },
    /// The host painted a frame.
    Frame,
}

#[derive(Debug, Default)]
struct Sheet {
    rules: Vec<(String, TimingStyle)>,
    log: Vec<Mutation>,
}

#[derive(Debug, Default)]
struct NodeData {
    id: String,
    classes: Vec<String>,
    inline: Option<TimingStyle>,
    is_root: bool,
    parent: Weak<RefCell<NodeData>>,
    children: Vec<Rc<RefCell<NodeData>>>,
}

/// A document: a root element plus the stylesheet and mutation log its
/// elements share.
#[derive(Clone, Debug)]
pub struct MemDocument {
    sheet: Rc<RefCell<Sheet>>,
    body: MemNode,
}

impl Default for MemDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemDocument {
    /// Creates an empty document whose root has id `"body"`.
    #[must_use]
    pub fn new() -> Self {
        let sheet = Rc::new(RefCell::new(Sheet::default()));
        let body = MemNode {
            data: Rc::new(RefCell::new(NodeData {
                id: "body".into(),
                is_root: true,
                ..NodeData::default()
            })),
            sheet: Rc::clone(&sheet),
        };
        Self { sheet, body }
    }

    /// Appends a stylesheet rule applying `style` to elements with `class`.
    ///
    /// Later rules override earlier ones field by field; empty fields do not
    /// override.
    #[must_use]
    pub fn with_rule(self, class: &str, style: TimingStyle) -> Self {
        self.add_rule(class, style);
        self
    }

    /// Appends a stylesheet rule.
    pub fn add_rule(&self, class: &str, style: TimingStyle) {
        self.sheet.borrow_mut().rules.push((class.into(), style));
    }

    /// Returns the root element.
    #[must_use]
    pub fn body(&self) -> MemNode {
        self.body.clone()
    }

    /// Creates a detached element.
    #[must_use]
    pub fn create_element(&self, id: &str) -> MemNode {
        MemNode {
            data: Rc::new(RefCell::new(NodeData {
                id: id.into(),
                ..NodeData::default()
            })),
            sheet: Rc::clone(&self.sheet),
        }
    }

    /// Records that a frame was painted.
    pub fn mark_frame(&self) {
        self.sheet.borrow_mut().log.push(Mutation::Frame);
    }

    /// Returns and clears the mutation log.
    pub fn take_log(&self) -> Vec<Mutation> {
        core::mem::take(&mut self.sheet.borrow_mut().log)
    }

    /// Returns the mutation log.
    #[must_use]
    pub fn log(&self) -> Vec<Mutation> {
        self.sheet.borrow().log.clone()
    }
}

/// An element of a [`MemDocument`]. Clones are handles to the same element.
#[derive(Clone)]
pub struct MemNode {
    data: Rc<RefCell<NodeData>>,
    sheet: Rc<RefCell<Sheet>>,
}

impl PartialEq for MemNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl core::fmt::Debug for MemNode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let data = self.data.borrow();
        f.debug_struct("MemNode")
            .field("id", &data.id)
            .field("classes", &data.classes)
            .field("children", &data.children.len())
            .finish_non_exhaustive()
    }
}

impl MemNode {
    fn wrap(&self, data: Rc<RefCell<NodeData>>) -> Self {
        Self {
            data,
            sheet: Rc::clone(&self.sheet),
        }
    }

    fn log(&self, mutation: Mutation) {
        self.sheet.borrow_mut().log.push(mutation);
    }

    /// Appends `child` as the last child.
    pub fn append(&self, child: &Self) {
        self.insert_before(child, None);
    }

    /// Removes this element from its parent, if any.
    pub fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent.remove_child(self);
        }
    }

    /// Sets the inline style, which overrides every stylesheet rule.
    pub fn set_inline_style(&self, style: TimingStyle) {
        self.data.borrow_mut().inline = Some(style);
    }

    /// Returns the class tokens in insertion order.
    #[must_use]
    pub fn class_names(&self) -> Vec<String> {
        self.data.borrow().classes.clone()
    }

    /// Returns the children's ids in order.
    #[must_use]
    pub fn child_ids(&self) -> Vec<String> {
        self.data
            .borrow()
            .children
            .iter()
            .map(|c| c.borrow().id.clone())
            .collect()
    }

    /// Returns the children.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.data
            .borrow()
            .children
            .iter()
            .map(|c| self.wrap(Rc::clone(c)))
            .collect()
    }

    /// Returns `true` if the element is reachable from the document root.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let mut current = Rc::clone(&self.data);
        loop {
            if current.borrow().is_root {
                return true;
            }
            let parent = current.borrow().parent.upgrade();
            match parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}

fn overlay(base: &mut TimingStyle, layer: &TimingStyle) {
    let fields = [
        (&mut base.transition_property, &layer.transition_property),
        (&mut base.transition_duration, &layer.transition_duration),
        (&mut base.transition_delay, &layer.transition_delay),
        (&mut base.animation_name, &layer.animation_name),
        (&mut base.animation_duration, &layer.animation_duration),
        (&mut base.animation_delay, &layer.animation_delay),
        (
            &mut base.animation_iteration_count,
            &layer.animation_iteration_count,
        ),
    ];
    for (field, value) in fields {
        if !value.is_empty() {
            field.clone_from(value);
        }
    }
}

fn deep_copy(data: &NodeData) -> Rc<RefCell<NodeData>> {
    let copy = Rc::new(RefCell::new(NodeData {
        id: data.id.clone(),
        classes: data.classes.clone(),
        inline: data.inline.clone(),
        ..NodeData::default()
    }));
    let children = data
        .children
        .iter()
        .map(|child| {
            let child = deep_copy(&child.borrow());
            child.borrow_mut().parent = Rc::downgrade(&copy);
            child
        })
        .collect();
    copy.borrow_mut().children = children;
    copy
}

impl DomNode for MemNode {
    fn add_class(&self, token: &str) {
        let mut data = self.data.borrow_mut();
        if data.classes.iter().any(|c| c == token) {
            return;
        }
        data.classes.push(token.into());
        let node = data.id.clone();
        drop(data);
        self.log(Mutation::ClassAdded {
            node,
            class: token.into(),
        });
    }

    fn remove_class(&self, token: &str) {
        let mut data = self.data.borrow_mut();
        let Some(index) = data.classes.iter().position(|c| c == token) else {
            return;
        };
        data.classes.remove(index);
        let node = data.id.clone();
        drop(data);
        self.log(Mutation::ClassRemoved {
            node,
            class: token.into(),
        });
    }

    fn has_class(&self, token: &str) -> bool {
        self.data.borrow().classes.iter().any(|c| c == token)
    }

    fn id(&self) -> String {
        self.data.borrow().id.clone()
    }

    fn set_id(&self, id: &str) {
        self.data.borrow_mut().id = id.into();
    }

    fn parent(&self) -> Option<Self> {
        let parent = self.data.borrow().parent.upgrade()?;
        Some(self.wrap(parent))
    }

    fn next_sibling(&self) -> Option<Self> {
        let parent = self.data.borrow().parent.upgrade()?;
        let parent = parent.borrow();
        let index = parent
            .children
            .iter()
            .position(|c| Rc::ptr_eq(c, &self.data))?;
        let next = parent.children.get(index + 1)?;
        Some(self.wrap(Rc::clone(next)))
    }

    fn deep_clone(&self) -> Option<Self> {
        let copy = deep_copy(&self.data.borrow());
        Some(self.wrap(copy))
    }

    fn insert_before(&self, child: &Self, reference: Option<&Self>) {
        child.detach();
        {
            let mut data = self.data.borrow_mut();
            let index = reference
                .and_then(|r| data.children.iter().position(|c| Rc::ptr_eq(c, &r.data)))
                .unwrap_or(data.children.len());
            data.children.insert(index, Rc::clone(&child.data));
        }
        child.data.borrow_mut().parent = Rc::downgrade(&self.data);
        self.log(Mutation::Inserted {
            node: child.id(),
            parent: self.id(),
        });
    }

    fn remove_child(&self, child: &Self) {
        let mut data = self.data.borrow_mut();
        let Some(index) = data
            .children
            .iter()
            .position(|c| Rc::ptr_eq(c, &child.data))
        else {
            return;
        };
        data.children.remove(index);
        drop(data);
        child.data.borrow_mut().parent = Weak::new();
        self.log(Mutation::Detached { node: child.id() });
    }

    fn force_reflow(&self) {
        self.log(Mutation::Reflow { node: self.id() });
    }

    fn timing_style(&self) -> TimingStyle {
        let data = self.data.borrow();
        let sheet = self.sheet.borrow();
        let mut style = TimingStyle::default();
        for (class, rule) in &sheet.rules {
            if data.classes.iter().any(|c| c == class) {
                overlay(&mut style, rule);
            }
        }
        if let Some(inline) = &data.inline {
            overlay(&mut style, inline);
        }
        style
    }
}
