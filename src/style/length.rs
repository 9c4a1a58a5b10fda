//! Length values with units (§3.1).

use crate::number::Number;

/// A length value: a number paired with a unit. Resolution against a container size follows
/// §3.1 exactly. `Auto` and `Undefined` both resolve to undefined, except for margins, where
/// callers resolve `Auto` to `0` explicitly via [`StyleLength::resolve_or_zero`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleLength {
    Undefined,
    Point(f32),
    Percent(f32),
    Auto,
}

impl Default for StyleLength {
    fn default() -> Self {
        StyleLength::Undefined
    }
}

impl StyleLength {
    pub const ZERO: StyleLength = StyleLength::Point(0.0);

    pub fn is_auto(self) -> bool {
        matches!(self, StyleLength::Auto)
    }

    pub fn is_defined(self) -> bool {
        matches!(self, StyleLength::Point(_) | StyleLength::Percent(_))
    }

    /// Resolve against a container size, per §3.1.
    pub fn resolve(self, container_size: Number) -> Number {
        match self {
            StyleLength::Undefined | StyleLength::Auto => Number::UNDEFINED,
            StyleLength::Point(v) => Number::defined(v),
            StyleLength::Percent(v) => {
                if container_size.is_defined() {
                    Number::defined(v * container_size.0 / 100.0)
                } else {
                    Number::UNDEFINED
                }
            }
        }
    }

    /// Resolve for margin use: `Auto` resolves to `0` rather than undefined (§3.1).
    pub fn resolve_or_zero(self, container_size: Number) -> f32 {
        if self.is_auto() {
            0.0
        } else {
            self.resolve(container_size).or(0.0)
        }
    }
}

impl PartialEq<f32> for StyleLength {
    fn eq(&self, other: &f32) -> bool {
        matches!(self, StyleLength::Point(v) if (*v - *other).abs() < 1e-4)
    }
}
