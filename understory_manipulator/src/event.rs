// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input and manipulator notifications.

use kurbo::Point;

use crate::pose::Pose;

bitflags::bitflags! {
    /// Keyboard modifiers held during a pointer event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift; snaps translation to the grid and rotation to the angle step.
        const SHIFT = 1 << 0;
        /// Control.
        const CTRL = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Meta / Command.
        const META = 1 << 3;
    }
}

impl Modifiers {
    /// Returns `true` if the snap modifier is held.
    #[must_use]
    pub fn snap(self) -> bool {
        self.contains(Self::SHIFT)
    }
}

/// The parts of a pointer event the manipulator reads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in page coordinates.
    pub page: Point,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// An event at `(x, y)` with no modifiers.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            page: Point::new(x, y),
            modifiers: Modifiers::empty(),
        }
    }

    /// Returns a copy with the given modifiers.
    #[must_use]
    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }
}

/// Payload of every manipulator notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ManipulatorUpdate {
    /// Unrotated top-left corner (`x` = left, `y` = top).
    pub position: Point,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Rotation in radians.
    pub rotation: f64,
    /// Rotated top-left corner in page space.
    pub top_left: Point,
    /// Rotated top-right corner in page space.
    pub top_right: Point,
    /// Rotated bottom-left corner in page space.
    pub bottom_left: Point,
    /// Rotated bottom-right corner in page space.
    pub bottom_right: Point,
}

impl ManipulatorUpdate {
    /// Snapshot of `pose` with its page-space corners.
    #[must_use]
    pub fn from_pose(pose: &Pose) -> Self {
        let corners = pose.corners();
        Self {
            position: pose.position(),
            width: pose.width,
            height: pose.height,
            rotation: pose.rotation,
            top_left: corners.top_left,
            top_right: corners.top_right,
            bottom_left: corners.bottom_left,
            bottom_right: corners.bottom_right,
        }
    }
}

/// Notification emitted by a [`crate::Manipulator`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ManipulatorEvent {
    /// The pose changed during a drag.
    Change(ManipulatorUpdate),
    /// A drag that changed the pose has ended.
    UpdateEnd(ManipulatorUpdate),
}

impl ManipulatorEvent {
    /// The DOM event type a host would dispatch for this notification.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Change(_) => "change",
            Self::UpdateEnd(_) => "updateend",
        }
    }

    /// The carried pose snapshot.
    #[must_use]
    pub fn update(&self) -> &ManipulatorUpdate {
        match self {
            Self::Change(update) | Self::UpdateEnd(update) => update,
        }
    }
}
