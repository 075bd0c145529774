// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle pose and corner/side addressing.

use kurbo::{Affine, Point, Size, Vec2};

/// Placement of a rotated rectangle in page space.
///
/// `left`/`top` describe the unrotated top-left corner, as a host box model
/// would lay the element out before applying `rotation` (radians, clockwise
/// in a y-down coordinate system) around the rectangle's center.
///
/// Equality is exact on all five fields; the manipulator relies on this to
/// suppress duplicate change notifications.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    /// Unrotated top edge.
    pub top: f64,
    /// Unrotated left edge.
    pub left: f64,
    /// Width in page units.
    pub width: f64,
    /// Height in page units.
    pub height: f64,
    /// Rotation around the center, in radians.
    pub rotation: f64,
}

impl Pose {
    /// Creates an unrotated pose.
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Returns a copy with the given rotation.
    #[must_use]
    pub fn with_rotation(self, rotation: f64) -> Self {
        Self { rotation, ..self }
    }

    /// Unrotated top-left corner.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Width and height.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Center of the rectangle; invariant under rotation.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width * 0.5,
            self.top + self.height * 0.5,
        )
    }

    /// Transform from the center-origin local frame into page space.
    #[must_use]
    pub fn local_to_world(&self) -> Affine {
        Affine::translate(self.center().to_vec2()) * Affine::rotate(self.rotation)
    }

    /// Page-space position of a point given as an offset from the center in
    /// the unrotated frame.
    #[must_use]
    pub fn local_point(&self, offset: Vec2) -> Point {
        self.local_to_world() * offset.to_point()
    }

    /// Page-space position of `corner`.
    #[must_use]
    pub fn corner(&self, corner: Corner) -> Point {
        let (sx, sy) = corner.signs();
        self.local_point(Vec2::new(
            sx * self.width * 0.5,
            sy * self.height * 0.5,
        ))
    }

    /// Page-space position of the corner at `index` (see [`Corner::from_index`]).
    ///
    /// Returns `None` for indices outside `0..4`.
    #[must_use]
    pub fn corner_at(&self, index: usize) -> Option<Point> {
        Corner::from_index(index).map(|corner| self.corner(corner))
    }

    /// Page-space position of the midpoint of `side`.
    #[must_use]
    pub fn side_midpoint(&self, side: Side) -> Point {
        let (sx, sy) = side.signs();
        self.local_point(Vec2::new(
            sx * self.width * 0.5,
            sy * self.height * 0.5,
        ))
    }

    /// All four corners in page space.
    #[must_use]
    pub fn corners(&self) -> Corners {
        Corners {
            top_left: self.corner(Corner::TopLeft),
            top_right: self.corner(Corner::TopRight),
            bottom_right: self.corner(Corner::BottomRight),
            bottom_left: self.corner(Corner::BottomLeft),
        }
    }

    /// Returns `true` if `pt` lies inside the rotated rectangle (edges included).
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        let local = self.local_to_world().inverse() * pt;
        let (hw, hh) = (self.width * 0.5, self.height * 0.5);
        within(local.x, hw) && within(local.y, hh)
    }

    /// Returns `true` if every field is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.left.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.rotation.is_finite()
    }
}

/// The four page-space corners of a [`Pose`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corners {
    /// Rotated top-left corner.
    pub top_left: Point,
    /// Rotated top-right corner.
    pub top_right: Point,
    /// Rotated bottom-right corner.
    pub bottom_right: Point,
    /// Rotated bottom-left corner.
    pub bottom_left: Point,
}

/// A rectangle corner, indexed clockwise from the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Index `0`.
    TopLeft,
    /// Index `1`.
    TopRight,
    /// Index `2`.
    BottomRight,
    /// Index `3`.
    BottomLeft,
}

impl Corner {
    /// All corners in index order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
    ];

    /// Maps `0..4` to a corner; anything else yields `None`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this corner in [`Corner::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomRight => 2,
            Self::BottomLeft => 3,
        }
    }

    /// The diagonally opposite corner.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomRight => Self::TopLeft,
            Self::BottomLeft => Self::TopRight,
        }
    }

    /// Direction from the center, as `(±1, ±1)`.
    #[must_use]
    pub fn signs(self) -> (f64, f64) {
        match self {
            Self::TopLeft => (-1.0, -1.0),
            Self::TopRight => (1.0, -1.0),
            Self::BottomRight => (1.0, 1.0),
            Self::BottomLeft => (-1.0, 1.0),
        }
    }
}

/// A rectangle side, indexed clockwise from the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Index `0`.
    Top,
    /// Index `1`.
    Right,
    /// Index `2`.
    Bottom,
    /// Index `3`.
    Left,
}

impl Side {
    /// All sides in index order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Maps `0..4` to a side; anything else yields `None`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this side in [`Side::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// The opposite side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Outward normal in the unrotated frame; one component is always zero.
    #[must_use]
    pub fn signs(self) -> (f64, f64) {
        match self {
            Self::Top => (0.0, -1.0),
            Self::Right => (1.0, 0.0),
            Self::Bottom => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
        }
    }

    /// Returns `true` for the left and right sides, which only change width.
    #[must_use]
    pub fn is_horizontal_axis(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Returns `true` if `|v| <= |half|`.
fn within(v: f64, half: f64) -> bool {
    let half = if half < 0.0 { -half } else { half };
    -half <= v && v <= half
}
