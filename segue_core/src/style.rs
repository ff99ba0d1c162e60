// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition timeout computation from computed style.
//!
//! A [`TimingStyle`] is a snapshot of the computed `transition-*` and
//! `animation-*` longhands of an element, as strings exactly as the style
//! engine reports them (e.g. `"1s, 200ms"`). [`compute_timeout`] turns the
//! snapshot into the time the active class has to stay on the element.
//!
//! # List semantics
//!
//! Each longhand is a comma-separated list with one entry per transitioned
//! property (or per animation). The number of entries is given by
//! `transition-property` (or `animation-name`); shorter duration and delay
//! lists are repeated from the start, as CSS does. Without a property list
//! the longer of the two timing lists decides.
//!
//! An entry contributes `delay + duration` (times the iteration count for
//! animations), clamped at zero so that negative delays cannot produce a
//! negative wait. The timeout is the maximum over all entries.

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

/// Computed timing longhands of an element.
///
/// Empty strings are treated as empty lists. Backends fill this from
/// `getComputedStyle`; tests usually build it with [`TimingStyle::transition`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TimingStyle {
    /// `transition-property`, e.g. `"opacity, transform"` or `"all"`.
    pub transition_property: String,
    /// `transition-duration`, e.g. `"1s, 200ms"`.
    pub transition_duration: String,
    /// `transition-delay`, e.g. `"0s, 0.1s"`.
    pub transition_delay: String,
    /// `animation-name`, e.g. `"fade-in"` or `"none"`.
    pub animation_name: String,
    /// `animation-duration`.
    pub animation_duration: String,
    /// `animation-delay`.
    pub animation_delay: String,
    /// `animation-iteration-count`, e.g. `"2"` or `"infinite"`.
    pub animation_iteration_count: String,
}

impl TimingStyle {
    /// A style with only transition duration and delay set.
    #[must_use]
    pub fn transition(duration: &str, delay: &str) -> Self {
        Self {
            transition_duration: duration.into(),
            transition_delay: delay.into(),
            ..Self::default()
        }
    }

    /// A style with only animation name, duration and delay set.
    #[must_use]
    pub fn animation(name: &str, duration: &str, delay: &str) -> Self {
        Self {
            animation_name: name.into(),
            animation_duration: duration.into(),
            animation_delay: delay.into(),
            ..Self::default()
        }
    }

    /// Sets `transition-property`.
    #[must_use]
    pub fn with_transition_property(mut self, property: &str) -> Self {
        self.transition_property = property.into();
        self
    }

    /// Sets `animation-iteration-count`.
    #[must_use]
    pub fn with_iteration_count(mut self, count: &str) -> Self {
        self.animation_iteration_count = count.into();
        self
    }
}

/// Parses one CSS `<time>` token into milliseconds.
///
/// Accepts `s` and `ms` units (case-insensitive) on any finite number,
/// including signed and leading-dot forms (`"-0.1s"`, `".5s"`). Returns
/// `None` for anything else, including unitless numbers other than `0`.
#[must_use]
pub fn parse_time(token: &str) -> Option<f64> {
    let token = token.trim();
    let (number, scale) = if let Some(n) = strip_suffix_ignore_case(token, "ms") {
        (n, 1.0)
    } else if let Some(n) = strip_suffix_ignore_case(token, "s") {
        (n, 1000.0)
    } else if token == "0" {
        return Some(0.0);
    } else {
        return None;
    };
    // `f64::from_str` also accepts "inf" and "NaN"; CSS does not.
    if !number.bytes().all(|b| b.is_ascii_digit() || b"+-.eE".contains(&b)) {
        return None;
    }
    let value: f64 = number.parse().ok()?;
    value.is_finite().then_some(value * scale)
}

/// Computes how long the active class must stay applied.
///
/// Returns `None` when neither transitions nor animations would run (every
/// entry is zero, `none`, malformed, or infinite). The orchestrator treats
/// `None` as "finish immediately" rather than waiting.
#[must_use]
pub fn compute_timeout(style: &TimingStyle) -> Option<Duration> {
    let transitions = longest_entry(
        &style.transition_property,
        &style.transition_duration,
        &style.transition_delay,
        None,
    );
    let animations = longest_entry(
        &style.animation_name,
        &style.animation_duration,
        &style.animation_delay,
        Some(&style.animation_iteration_count),
    );
    let ms = transitions.max(animations);
    if ms <= 0.0 {
        return None;
    }
    // Round to whole microseconds so that `0.9s` is exactly 900ms. `ms` is
    // positive, so adding one half rounds to nearest without `f64::round`
    // (unavailable in `core`).
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "positive finite f64; `as` saturates at u64::MAX"
    )]
    let us = (ms * 1000.0 + 0.5) as u64;
    Some(Duration::from_micros(us))
}

/// Returns the longest `delay + duration × iterations` over all entries of
/// one family of longhands, in milliseconds.
fn longest_entry(names: &str, durations: &str, delays: &str, iterations: Option<&str>) -> f64 {
    let names = split_list(names);
    let durations = split_list(durations);
    let delays = split_list(delays);
    let iterations = iterations.map(split_list).unwrap_or_default();

    if durations.is_empty() {
        return 0.0;
    }
    let count = if names.is_empty() {
        durations.len().max(delays.len())
    } else {
        names.len()
    };

    (0..count)
        .filter(|&i| {
            names
                .get(i)
                .is_none_or(|name| !name.eq_ignore_ascii_case("none"))
        })
        .map(|i| {
            let duration = cycled(&durations, i).and_then(parse_time).unwrap_or(0.0);
            let delay = cycled(&delays, i).and_then(parse_time).unwrap_or(0.0);
            let repeat = match cycled(&iterations, i) {
                None => 1.0,
                Some(count) => parse_iteration_count(count),
            };
            (delay + duration * repeat).max(0.0)
        })
        .fold(0.0, f64::max)
}

/// Parses `animation-iteration-count`.
///
/// `infinite` yields zero: an animation that never ends must not hold the
/// transition open. Malformed values count as a single iteration.
fn parse_iteration_count(token: &str) -> f64 {
    if token.eq_ignore_ascii_case("infinite") {
        return 0.0;
    }
    match token.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => n,
        _ => 1.0,
    }
}

fn cycled<'a>(list: &[&'a str], i: usize) -> Option<&'a str> {
    if list.is_empty() {
        None
    } else {
        Some(list[i % list.len()])
    }
}

fn split_list(value: &str) -> Vec<&str> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    value.split(',').map(str::trim).collect()
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    if s.is_char_boundary(split) && s[split..].eq_ignore_ascii_case(suffix) {
        Some(&s[..split])
    } else {
        None
    }
}
