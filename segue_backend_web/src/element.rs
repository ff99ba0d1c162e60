// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`DomNode`] for live DOM elements.

use alloc::string::String;

use segue_core::backend::DomNode;
use segue_core::style::TimingStyle;
use wasm_bindgen::JsCast as _;
use web_sys::{CssStyleDeclaration, Element, Node};

/// A `web_sys::Element` the core can drive.
///
/// Equality is identity of the underlying JS object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomElement(pub Element);

impl DomElement {
    /// Wraps an element.
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self(element)
    }

    /// Returns the wrapped element.
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.0
    }

    /// Returns `true` if the element is in a document.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.0.is_connected()
    }
}

impl From<Element> for DomElement {
    fn from(element: Element) -> Self {
        Self(element)
    }
}

fn property(style: &CssStyleDeclaration, name: &str) -> String {
    style.get_property_value(name).unwrap_or_default()
}

impl DomNode for DomElement {
    fn add_class(&self, token: &str) {
        let _ = self.0.class_list().add_1(token);
    }

    fn remove_class(&self, token: &str) {
        let _ = self.0.class_list().remove_1(token);
    }

    fn has_class(&self, token: &str) -> bool {
        self.0.class_list().contains(token)
    }

    fn id(&self) -> String {
        self.0.id()
    }

    fn set_id(&self, id: &str) {
        self.0.set_id(id);
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(Self)
    }

    fn next_sibling(&self) -> Option<Self> {
        self.0.next_element_sibling().map(Self)
    }

    fn deep_clone(&self) -> Option<Self> {
        let node = self.0.clone_node_with_deep(true).ok()?;
        node.dyn_into::<Element>().ok().map(Self)
    }

    fn insert_before(&self, child: &Self, reference: Option<&Self>) {
        let reference: Option<&Node> = reference.map(|r| r.0.as_ref());
        let _ = self.0.insert_before(&child.0, reference);
    }

    fn remove_child(&self, child: &Self) {
        let _ = self.0.remove_child(&child.0);
    }

    fn force_reflow(&self) {
        // Reading a layout property flushes pending style changes.
        let _ = self.0.scroll_top();
    }

    fn timing_style(&self) -> TimingStyle {
        let Some(window) = web_sys::window() else {
            return TimingStyle::default();
        };
        let Ok(Some(style)) = window.get_computed_style(&self.0) else {
            return TimingStyle::default();
        };
        TimingStyle {
            transition_property: property(&style, "transition-property"),
            transition_duration: property(&style, "transition-duration"),
            transition_delay: property(&style, "transition-delay"),
            animation_name: property(&style, "animation-name"),
            animation_duration: property(&style, "animation-duration"),
            animation_delay: property(&style, "animation-delay"),
            animation_iteration_count: property(&style, "animation-iteration-count"),
        }
    }
}
