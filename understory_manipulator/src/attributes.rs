// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup-facing configuration of a manipulator.
//!
//! Hosts typically read these values from element attributes. Parsing never
//! fails: unrecognized values fall back to a documented default.

use crate::pose::Side;

/// Interprets a boolean-ish attribute value.
///
/// Only `"1"` and `"true"` are true; anything else, including a missing
/// attribute, is false.
///
/// ```rust
/// use understory_manipulator::parse_bool_attribute;
///
/// assert!(parse_bool_attribute(Some("true")));
/// assert!(parse_bool_attribute(Some("1")));
/// assert!(!parse_bool_attribute(Some("yes")));
/// assert!(!parse_bool_attribute(None));
/// ```
#[must_use]
pub fn parse_bool_attribute(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "true"))
}

/// Which axes an interaction may act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AxisConstraint {
    /// Both axes.
    #[default]
    All,
    /// Horizontal only.
    X,
    /// Vertical only.
    Y,
    /// Disabled.
    None,
}

impl AxisConstraint {
    /// Parses `all`, `x`, `y` or `none`; anything else (or nothing) is [`AxisConstraint::All`].
    #[must_use]
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("x") => Self::X,
            Some("y") => Self::Y,
            Some("none") => Self::None,
            _ => Self::All,
        }
    }

    /// The attribute spelling of this value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::X => "x",
            Self::Y => "y",
            Self::None => "none",
        }
    }

    /// Returns `true` if horizontal motion is allowed.
    #[must_use]
    pub fn allows_x(self) -> bool {
        matches!(self, Self::All | Self::X)
    }

    /// Returns `true` if vertical motion is allowed.
    #[must_use]
    pub fn allows_y(self) -> bool {
        matches!(self, Self::All | Self::Y)
    }

    /// Returns `true` unless the interaction is disabled.
    #[must_use]
    pub fn is_enabled(self) -> bool {
        self != Self::None
    }
}

/// The attribute surface of a manipulator element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ManipulatorAttributes {
    /// `translate`: axes the whole shape can be dragged along.
    pub translate: AxisConstraint,
    /// `rotate`: whether the rotate handle is shown and active.
    pub rotate: bool,
    /// `scale`: which resize handles are active.
    pub scale: AxisConstraint,
    /// `skew`: stored and reported; no skew interaction exists.
    pub skew: AxisConstraint,
}

impl Default for ManipulatorAttributes {
    /// Matches an element that carries none of the attributes.
    fn default() -> Self {
        Self {
            translate: AxisConstraint::All,
            rotate: false,
            scale: AxisConstraint::All,
            skew: AxisConstraint::All,
        }
    }
}

impl ManipulatorAttributes {
    /// Names of the attributes understood by [`ManipulatorAttributes::set_attribute`].
    pub const OBSERVED: [&'static str; 4] = ["translate", "rotate", "scale", "skew"];

    /// Applies one attribute change; `None` means the attribute was removed.
    ///
    /// Returns `false` for names outside [`ManipulatorAttributes::OBSERVED`].
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> bool {
        match name {
            "translate" => self.translate = AxisConstraint::parse_or_default(value),
            "rotate" => self.rotate = parse_bool_attribute(value),
            "scale" => self.scale = AxisConstraint::parse_or_default(value),
            "skew" => self.skew = AxisConstraint::parse_or_default(value),
            _ => return false,
        }
        true
    }

    /// Corner handles need both axes.
    #[must_use]
    pub fn allows_corner_resize(&self) -> bool {
        self.scale == AxisConstraint::All
    }

    /// Left/right handles need `x`, top/bottom handles need `y`.
    #[must_use]
    pub fn allows_side_resize(&self, side: Side) -> bool {
        if side.is_horizontal_axis() {
            self.scale.allows_x()
        } else {
            self.scale.allows_y()
        }
    }
}
