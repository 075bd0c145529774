// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchored resize under rotation.
//!
//! A resize session works in a local frame whose origin is the rectangle's
//! center at the start of the drag and whose axes are rotated by the
//! rectangle's rotation. In that frame the rectangle is axis-aligned, so the
//! moving handle `q` and the fixed anchor `p` can be combined with plain
//! per-axis arithmetic. A [`ResizeMatrix`] selects, per axis, whether the
//! moving handle lies on the positive (`a`/`b`) or negative (`c`/`d`) side of
//! the anchor:
//!
//! ```text
//! width  = a·(qx − px) + c·(px − qx)      left = c·qx + a·px
//! height = b·(qy − py) + d·(py − qy)      top  = d·qy + b·py
//! ```
//!
//! The resulting local rectangle is mapped back to page space with the
//! session rotation. Because `p` never moves in the local frame and the frame
//! never moves in page space, the anchor stays put, including when the size
//! is clamped to its minimum.

use kurbo::{Affine, Point, Size, Vec2};

use crate::pose::{Corner, Pose, Side};

/// Which handle a resize drags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeTarget {
    /// A corner handle: both dimensions change symmetrically.
    Corner(Corner),
    /// A side handle: only the dimension across that side changes.
    Side(Side),
}

impl ResizeTarget {
    /// Direction of the dragged handle from the center, per axis.
    ///
    /// Components are `-1`, `0` (side handles, unaffected axis) or `1`.
    #[must_use]
    pub fn signs(self) -> (f64, f64) {
        match self {
            Self::Corner(corner) => corner.signs(),
            Self::Side(side) => side.signs(),
        }
    }

    /// Projects a local-frame pointer delta onto the motion this handle
    /// allows.
    ///
    /// Corners keep only the component along their diagonal, halved and
    /// applied equally to both axes; sides keep only their own axis.
    #[must_use]
    pub fn project(self, local_delta: Vec2) -> Vec2 {
        let (sx, sy) = self.signs();
        match self {
            Self::Corner(_) => {
                let along = (sx * local_delta.x + sy * local_delta.y) * 0.5;
                Vec2::new(sx * along, sy * along)
            }
            Self::Side(_) => Vec2::new(
                sx * sx * local_delta.x,
                sy * sy * local_delta.y,
            ),
        }
    }
}

/// Per-axis selector of the moving vs fixed edge.
///
/// Each coefficient is `0` or `1`, and exactly one of `a`/`c` and one of
/// `b`/`d` is set. Sides that leave an axis untouched use the positive
/// selector for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResizeMatrix {
    /// Moving edge is right of the anchor.
    pub a: u8,
    /// Moving edge is below the anchor.
    pub b: u8,
    /// Moving edge is left of the anchor.
    pub c: u8,
    /// Moving edge is above the anchor.
    pub d: u8,
}

impl ResizeMatrix {
    /// Matrix for the given resize target.
    #[must_use]
    pub fn for_target(target: ResizeTarget) -> Self {
        let (sx, sy) = target.signs();
        let (a, c) = if sx < 0.0 { (0, 1) } else { (1, 0) };
        let (b, d) = if sy < 0.0 { (0, 1) } else { (1, 0) };
        Self { a, b, c, d }
    }

    /// `+1` if the moving edge is right of the anchor, `-1` otherwise.
    #[must_use]
    pub fn x_sign(&self) -> f64 {
        f64::from(self.a) - f64::from(self.c)
    }

    /// `+1` if the moving edge is below the anchor, `-1` otherwise.
    #[must_use]
    pub fn y_sign(&self) -> f64 {
        f64::from(self.b) - f64::from(self.d)
    }

    /// Size spanned by `q` and `p`.
    #[must_use]
    pub fn size_between(&self, q: Point, p: Point) -> Size {
        let (a, b, c, d) = self.coefficients();
        Size::new(
            a * (q.x - p.x) + c * (p.x - q.x),
            b * (q.y - p.y) + d * (p.y - q.y),
        )
    }

    /// Top-left corner of the rectangle spanned by `q` and `p`.
    #[must_use]
    pub fn origin_between(&self, q: Point, p: Point) -> Point {
        let (a, b, c, d) = self.coefficients();
        Point::new(c * q.x + a * p.x, d * q.y + b * p.y)
    }

    fn coefficients(&self) -> (f64, f64, f64, f64) {
        (
            f64::from(self.a),
            f64::from(self.b),
            f64::from(self.c),
            f64::from(self.d),
        )
    }
}

/// Anchors captured at the start of a resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeAnchor {
    target: ResizeTarget,
    matrix: ResizeMatrix,
    /// Session-start center; origin of the local frame.
    origin: Point,
    rotation: f64,
    /// Moving handle at session start (local frame).
    qp0: Point,
    /// Fixed anchor (local frame).
    pp0: Point,
}

impl ResizeAnchor {
    /// Captures anchors for dragging `target` of `start`.
    #[must_use]
    pub fn new(start: &Pose, target: ResizeTarget) -> Self {
        let matrix = ResizeMatrix::for_target(target);
        let half_w = start.width * 0.5;
        let half_h = start.height * 0.5;
        let sx = matrix.x_sign();
        let sy = matrix.y_sign();
        Self {
            target,
            matrix,
            origin: start.center(),
            rotation: start.rotation,
            qp0: Point::new(sx * half_w, sy * half_h),
            pp0: Point::new(-sx * half_w, -sy * half_h),
        }
    }

    /// The handle being dragged.
    #[must_use]
    pub fn target(&self) -> ResizeTarget {
        self.target
    }

    /// The matrix selected for the target.
    #[must_use]
    pub fn matrix(&self) -> ResizeMatrix {
        self.matrix
    }

    /// Page-space position of the fixed anchor.
    #[must_use]
    pub fn anchor_world(&self) -> Point {
        self.frame() * self.pp0
    }

    /// Pose after dragging the handle by `delta` (page space), never smaller
    /// than `min_size`.
    #[must_use]
    pub fn apply(&self, delta: Vec2, min_size: Size) -> Pose {
        let local_delta = Affine::rotate(-self.rotation) * delta.to_point();
        let moved = self.target.project(local_delta.to_vec2());

        let p = self.pp0;
        let mut q = self.qp0 + moved;
        let mut size = self.matrix.size_between(q, p);

        // Clamp each axis independently and move `q` back so the anchor
        // corner still spans exactly the clamped size.
        let min_w = sanitize_min(min_size.width);
        let min_h = sanitize_min(min_size.height);
        if size.width.is_nan() || size.width < min_w {
            size.width = min_w;
            q.x = p.x + self.matrix.x_sign() * min_w;
        }
        if size.height.is_nan() || size.height < min_h {
            size.height = min_h;
            q.y = p.y + self.matrix.y_sign() * min_h;
        }

        let origin = self.matrix.origin_between(q, p);
        let local_center = Point::new(
            origin.x + size.width * 0.5,
            origin.y + size.height * 0.5,
        );
        let center = self.frame() * local_center;
        Pose {
            top: center.y - size.height * 0.5,
            left: center.x - size.width * 0.5,
            width: size.width,
            height: size.height,
            rotation: self.rotation,
        }
    }

    fn frame(&self) -> Affine {
        Affine::translate(self.origin.to_vec2()) * Affine::rotate(self.rotation)
    }
}

fn sanitize_min(min: f64) -> f64 {
    if min.is_finite() && min > 0.0 {
        min
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_4;

    use kurbo::{Point, Size, Vec2};

    use super::{ResizeAnchor, ResizeMatrix, ResizeTarget};
    use crate::pose::{Corner, Pose, Side};

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn matrix_selects_moving_edges() {
        let br = ResizeMatrix::for_target(ResizeTarget::Corner(Corner::BottomRight));
        assert_eq!((br.a, br.b, br.c, br.d), (1, 1, 0, 0));
        let tl = ResizeMatrix::for_target(ResizeTarget::Corner(Corner::TopLeft));
        assert_eq!((tl.a, tl.b, tl.c, tl.d), (0, 0, 1, 1));
        let top = ResizeMatrix::for_target(ResizeTarget::Side(Side::Top));
        assert_eq!((top.a, top.b, top.c, top.d), (1, 0, 0, 1));
        let left = ResizeMatrix::for_target(ResizeTarget::Side(Side::Left));
        assert_eq!((left.a, left.b, left.c, left.d), (0, 1, 1, 0));
    }

    #[test]
    fn bottom_right_grows_along_diagonal() {
        let start = Pose::new(0.0, 0.0, 100.0, 50.0);
        let anchor = ResizeAnchor::new(&start, ResizeTarget::Corner(Corner::BottomRight));
        let pose = anchor.apply(Vec2::new(10.0, 10.0), Size::ZERO);
        assert_eq!(pose, Pose::new(0.0, 0.0, 110.0, 60.0));
    }

    #[test]
    fn corner_ignores_motion_across_diagonal() {
        let start = Pose::new(0.0, 0.0, 100.0, 100.0);
        let anchor = ResizeAnchor::new(&start, ResizeTarget::Corner(Corner::BottomRight));
        let pose = anchor.apply(Vec2::new(10.0, -10.0), Size::ZERO);
        assert!((pose.width - 100.0).abs() < 1e-9);
        assert!((pose.height - 100.0).abs() < 1e-9);
    }

    #[test]
    fn top_left_moves_origin() {
        let start = Pose::new(0.0, 0.0, 100.0, 50.0);
        let anchor = ResizeAnchor::new(&start, ResizeTarget::Corner(Corner::TopLeft));
        let pose = anchor.apply(Vec2::new(-10.0, -10.0), Size::ZERO);
        assert!(close(pose.position(), Point::new(-10.0, -10.0)));
        assert!((pose.width - 110.0).abs() < 1e-9);
        assert!((pose.height - 60.0).abs() < 1e-9);
    }

    #[test]
    fn side_only_changes_its_axis() {
        let start = Pose::new(0.0, 0.0, 100.0, 50.0).with_rotation(0.7);
        let anchor = ResizeAnchor::new(&start, ResizeTarget::Side(Side::Right));
        let pose = anchor.apply(Vec2::new(13.0, -41.0), Size::ZERO);
        assert_eq!(pose.height, 50.0);
        assert!(pose.width != 100.0);
    }

    #[test]
    fn rotated_anchor_stays_fixed() {
        let start = Pose::new(20.0, 30.0, 80.0, 40.0).with_rotation(FRAC_PI_4);
        let anchor = ResizeAnchor::new(&start, ResizeTarget::Corner(Corner::TopRight));
        let fixed = start.corner(Corner::BottomLeft);
        assert!(close(anchor.anchor_world(), fixed));
        let pose = anchor.apply(Vec2::new(25.0, -5.0), Size::ZERO);
        assert!(close(pose.corner(Corner::BottomLeft), fixed));
    }

    #[test]
    fn clamp_keeps_anchor_and_floor() {
        let start = Pose::new(0.0, 0.0, 100.0, 50.0).with_rotation(1.1);
        let anchor = ResizeAnchor::new(&start, ResizeTarget::Corner(Corner::BottomRight));
        let fixed = start.corner(Corner::TopLeft);
        let pose = anchor.apply(Vec2::new(-1000.0, -1000.0), Size::new(10.0, 8.0));
        assert_eq!(pose.width, 10.0);
        assert_eq!(pose.height, 8.0);
        assert!(close(pose.corner(Corner::TopLeft), fixed));
    }

    #[test]
    fn zero_size_and_zero_minimum_stay_finite() {
        let start = Pose::new(5.0, 5.0, 0.0, 0.0);
        let anchor = ResizeAnchor::new(&start, ResizeTarget::Side(Side::Left));
        let pose = anchor.apply(Vec2::new(3.0, 0.0), Size::ZERO);
        assert!(pose.is_finite());
        assert_eq!(pose.width, 0.0);
    }

    #[test]
    fn non_finite_minimum_is_treated_as_zero() {
        let start = Pose::new(0.0, 0.0, 10.0, 10.0);
        let anchor = ResizeAnchor::new(&start, ResizeTarget::Side(Side::Bottom));
        let pose = anchor.apply(Vec2::new(0.0, -20.0), Size::new(f64::NAN, f64::INFINITY));
        assert!(pose.is_finite());
        assert_eq!(pose.height, 0.0);
    }
}
