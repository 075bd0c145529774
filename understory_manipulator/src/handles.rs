// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handle layout and hit testing.

use kurbo::{Point, Vec2};

use crate::manipulator::{DragTarget, Manipulator};
use crate::pose::{Corner, Side};

/// A grabbable handle in page space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Handle {
    /// What dragging this handle does.
    pub target: DragTarget,
    /// Handle center.
    pub position: Point,
}

impl Manipulator {
    /// The handles the current attributes enable, in paint order.
    ///
    /// Corners come first (clockwise from top-left), then sides (clockwise
    /// from top), then the rotate handle above the top edge.
    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        let pose = self.pose();
        let attrs = *self.attributes();
        let corners = Corner::ALL
            .into_iter()
            .filter(move |_| attrs.allows_corner_resize())
            .map(move |c| Handle {
                target: DragTarget::Corner(c),
                position: pose.corner(c),
            });
        let sides = Side::ALL
            .into_iter()
            .filter(move |s| attrs.allows_side_resize(*s))
            .map(move |s| Handle {
                target: DragTarget::Side(s),
                position: pose.side_midpoint(s),
            });
        let rotate = attrs.rotate.then(|| Handle {
            target: DragTarget::Rotate,
            position: self.rotate_handle_position(),
        });
        corners.chain(sides).chain(rotate)
    }

    /// Page-space position of the rotate handle, whether or not it is enabled.
    #[must_use]
    pub fn rotate_handle_position(&self) -> Point {
        let pose = self.pose();
        let offset = pose.height / 2.0 + self.config().rotate_handle_offset;
        pose.local_point(Vec2::new(0.0, -offset))
    }

    /// The drag target under `point`, if any.
    ///
    /// Enabled handles within `handle_radius` win over the body; among
    /// handles the closest one wins. The body only hits when translation is
    /// enabled.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<DragTarget> {
        let radius = self.config().handle_radius;
        let mut best: Option<(f64, DragTarget)> = None;
        for handle in self.handles() {
            let dist = (handle.position - point).hypot();
            if dist <= radius && best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, handle.target));
            }
        }
        if let Some((_, target)) = best {
            return Some(target);
        }
        (self.attributes().translate.is_enabled() && self.pose().contains(point))
            .then_some(DragTarget::Whole)
    }
}
