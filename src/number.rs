//! A `f32` wrapper that uses `NaN` as the "undefined" sentinel, matching the
//! source algorithm's convention of passing a single float through the whole
//! solver instead of an `Option<f32>`.
//!
//! Code in this crate must never compare a [`Number`] with `==`/`!=` against
//! `f32::NAN` directly (`NAN != NAN`, so that comparison is always false and
//! silently wrong). Use [`Number::is_defined`]/[`Number::is_undefined`].

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Sub};

/// An `f32` where [`f32::NAN`] means "undefined" rather than "not a number".
#[derive(Copy, Clone)]
pub struct Number(pub f32);

impl Number {
    /// The undefined value.
    pub const UNDEFINED: Number = Number(f32::NAN);
    /// Shorthand for a defined zero.
    pub const ZERO: Number = Number(0.0);

    #[inline(always)]
    pub const fn defined(value: f32) -> Number {
        Number(value)
    }

    #[inline(always)]
    pub fn is_defined(self) -> bool {
        !self.0.is_nan()
    }

    #[inline(always)]
    pub fn is_undefined(self) -> bool {
        self.0.is_nan()
    }

    /// Returns the value if defined, else `default`.
    #[inline(always)]
    pub fn or(self, default: f32) -> f32 {
        if self.is_defined() {
            self.0
        } else {
            default
        }
    }

    pub fn into_option(self) -> Option<f32> {
        if self.is_defined() {
            Some(self.0)
        } else {
            None
        }
    }

    /// `self` clamped between `min` and `max`, both of which may themselves be undefined.
    /// An undefined `self` has nothing to clamp and stays undefined (§9: short-circuit on
    /// undefined bounds rather than comparing against `NaN`).
    ///
    /// Applies `max` before `min`, matching the source's `YGNodeBoundAxisWithinMinAndMax`: when
    /// a style sets `min_size > max_size`, `min` wins the conflict rather than `max`.
    pub fn maybe_clamp(self, min: Number, max: Number) -> Number {
        if self.is_undefined() {
            return self;
        }
        let mut v = self.0;
        if max.is_defined() {
            v = v.min(max.0);
        }
        if min.is_defined() {
            v = v.max(min.0);
        }
        Number(v)
    }

    /// `min(self, other)` treating undefined as "no constraint" rather than `NaN`-propagating.
    pub fn maybe_min(self, other: Number) -> Number {
        match (self.is_defined(), other.is_defined()) {
            (true, true) => Number(self.0.min(other.0)),
            (true, false) => self,
            (false, true) => other,
            (false, false) => Number::UNDEFINED,
        }
    }

    /// `max(self, other)` treating undefined as "no constraint".
    pub fn maybe_max(self, other: Number) -> Number {
        match (self.is_defined(), other.is_defined()) {
            (true, true) => Number(self.0.max(other.0)),
            (true, false) => self,
            (false, true) => other,
            (false, false) => Number::UNDEFINED,
        }
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number(value)
    }
}

impl From<Option<f32>> for Number {
    fn from(value: Option<f32>) -> Self {
        match value {
            Some(v) => Number(v),
            None => Number::UNDEFINED,
        }
    }
}

impl Add for Number {
    type Output = Number;
    fn add(self, rhs: Number) -> Number {
        if self.is_undefined() || rhs.is_undefined() {
            Number::UNDEFINED
        } else {
            Number(self.0 + rhs.0)
        }
    }
}

impl Sub for Number {
    type Output = Number;
    fn sub(self, rhs: Number) -> Number {
        if self.is_undefined() || rhs.is_undefined() {
            Number::UNDEFINED
        } else {
            Number(self.0 - rhs.0)
        }
    }
}

impl PartialEq for Number {
    /// Two undefined values are equal; otherwise compared within the `1e-4` tolerance from §3.1.
    fn eq(&self, other: &Self) -> bool {
        match (self.is_defined(), other.is_defined()) {
            (false, false) => true,
            (true, true) => (self.0 - other.0).abs() < 1e-4,
            _ => false,
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_undefined() || other.is_undefined() {
            None
        } else {
            self.0.partial_cmp(&other.0)
        }
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            write!(f, "undefined")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::UNDEFINED
    }
}
