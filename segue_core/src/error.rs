// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Almost nothing in the core fails: malformed style values time out at
//! zero, missing ids produce a degenerate clone id, and unconfigured phases
//! are skipped. The errors here mark genuine invariant violations.

use core::fmt;

/// Errors from the removal path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionError {
    /// The element has no parent and no parent was remembered at install, so
    /// there is nowhere to insert the clone.
    MissingParent,
    /// The backend could not deep-clone the element.
    CloneFailed,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParent => {
                write!(f, "no parent element to insert the leave clone into")
            }
            Self::CloneFailed => write!(f, "element could not be cloned"),
        }
    }
}

impl core::error::Error for TransitionError {}

/// Errors from validating [`TransitionArgs`](crate::modifier::TransitionArgs).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A boolean `state` was given without a `name` to derive its class from.
    FlagWithoutName,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlagWithoutName => {
                write!(f, "boolean state requires a transition name for its class")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_are_lowercase_sentences() {
        assert_eq!(
            TransitionError::MissingParent.to_string(),
            "no parent element to insert the leave clone into"
        );
        assert!(ConfigError::FlagWithoutName.to_string().starts_with("boolean state"));
    }
}
