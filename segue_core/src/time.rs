// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic host time.
//!
//! [`HostTime`] is a point in time in microsecond ticks, the resolution the
//! web backend gets from `performance.now()`. The core never reads a clock:
//! hosts pass `now` into every lifecycle call so that trace events can be
//! stamped. Durations use [`core::time::Duration`].

use core::fmt;
use core::ops::Add;
use core::time::Duration;

/// A point in time expressed as monotonic microsecond ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// The zero time, used by hosts that do not track time.
    pub const ZERO: Self = Self(0);

    /// Returns the raw tick value in microseconds.
    #[inline]
    #[must_use]
    pub const fn micros(self) -> u64 {
        self.0
    }

    /// Creates a [`HostTime`] from a millisecond timestamp such as
    /// `performance.now()` or a `requestAnimationFrame` argument.
    ///
    /// Negative and non-finite inputs map to [`HostTime::ZERO`].
    #[must_use]
    pub fn from_millis_f64(ms: f64) -> Self {
        if !ms.is_finite() || ms <= 0.0 {
            return Self::ZERO;
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "positive finite f64; µs saturates at u64::MAX"
        )]
        let us = (ms * 1000.0) as u64;
        Self(us)
    }

    /// Returns the duration between `self` and an earlier time, or zero if
    /// `earlier` is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration::from_micros(self.0.saturating_sub(earlier.0))
    }

    /// Checked addition of a duration.
    #[must_use]
    pub fn checked_add(self, duration: Duration) -> Option<Self> {
        let us = u64::try_from(duration.as_micros()).ok()?;
        self.0.checked_add(us).map(Self)
    }
}

impl Add<Duration> for HostTime {
    type Output = Self;

    /// Saturating addition; a host clock never wraps.
    #[inline]
    fn add(self, rhs: Duration) -> Self {
        self.checked_add(rhs).unwrap_or(Self(u64::MAX))
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({}µs)", self.0)
    }
}
