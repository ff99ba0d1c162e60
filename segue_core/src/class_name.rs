// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class-name helpers.
//!
//! Class arguments may hold several whitespace-separated tokens
//! (`"fade slow"`); every token is added or removed individually.

use alloc::string::String;

use crate::backend::DomNode;

/// Converts a tracked value into a CSS class name.
///
/// Lowercases, splits camel case at lower-to-upper boundaries, and turns
/// spaces and underscores into dashes: `"isImportant"` → `"is-important"`,
/// `"foo_bar baz"` → `"foo-bar-baz"`.
#[must_use]
pub fn dasherize(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    let mut prev_is_lower_or_digit = false;
    for c in value.chars() {
        if c.is_ascii_uppercase() && prev_is_lower_or_digit {
            out.push('-');
        }
        match c {
            ' ' | '_' => out.push('-'),
            c => out.extend(c.to_lowercase()),
        }
        prev_is_lower_or_digit = c.is_ascii_lowercase() || c.is_ascii_digit();
    }
    out
}

/// Iterates over the class tokens in a class argument.
pub fn tokens(classes: &str) -> impl Iterator<Item = &str> {
    classes.split_ascii_whitespace()
}

/// Adds every token of `classes` to `node`.
pub fn add_classes<N: DomNode>(node: &N, classes: &str) {
    for token in tokens(classes) {
        node.add_class(token);
    }
}

/// Removes every token of `classes` from `node`.
pub fn remove_classes<N: DomNode>(node: &N, classes: &str) {
    for token in tokens(classes) {
        node.remove_class(token);
    }
}
