// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The manipulator state machine.

use core::f64::consts::{FRAC_PI_2, PI, TAU};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use kurbo::{Point, Size, Vec2};

use crate::attributes::ManipulatorAttributes;
use crate::config::ManipulatorConfig;
use crate::event::{ManipulatorEvent, ManipulatorUpdate, PointerEvent};
use crate::pose::{Corner, Corners, Pose, Side};
use crate::resize::{ResizeAnchor, ResizeTarget};

/// What a drag session acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragTarget {
    /// The body: translate the whole shape.
    Whole,
    /// A corner handle.
    Corner(Corner),
    /// A side handle.
    Side(Side),
    /// The rotate handle.
    Rotate,
}

#[derive(Clone, Copy, Debug)]
enum SessionKind {
    Translate,
    Resize(ResizeAnchor),
    Rotate { center: Point },
}

/// State of one pointer-down to pointer-up interaction.
#[derive(Clone, Copy, Debug)]
struct DragSession {
    start_page: Point,
    start: Pose,
    target: DragTarget,
    kind: SessionKind,
    changed: bool,
}

/// Headless model of a 2D manipulator widget.
///
/// The host forwards pointer events; the manipulator updates its [`Pose`]
/// and returns the notification (if any) the host should dispatch. At most
/// one drag session is active at a time: starting another while one is open
/// is ignored.
///
/// ```rust
/// use understory_manipulator::{Manipulator, ManipulatorEvent, Pose, PointerEvent};
///
/// let mut m = Manipulator::new(Pose::new(0.0, 0.0, 100.0, 50.0));
/// assert!(m.start_drag_corner(PointerEvent::at(100.0, 50.0), 2));
///
/// let event = m.on_pointer_move(PointerEvent::at(110.0, 60.0));
/// assert!(matches!(event, Some(ManipulatorEvent::Change(_))));
/// assert_eq!(m.pose().width, 110.0);
///
/// let end = m.on_pointer_up(PointerEvent::at(110.0, 60.0));
/// assert!(matches!(end, Some(ManipulatorEvent::UpdateEnd(_))));
/// ```
#[derive(Clone, Debug)]
pub struct Manipulator {
    pose: Pose,
    last_notified: Pose,
    config: ManipulatorConfig,
    attributes: ManipulatorAttributes,
    session: Option<DragSession>,
}

impl Manipulator {
    /// Creates a manipulator with default configuration and attributes.
    #[must_use]
    pub fn new(pose: Pose) -> Self {
        Self::with_config(pose, ManipulatorConfig::default())
    }

    /// Creates a manipulator with the given configuration.
    ///
    /// The initial size is clamped to `config.min_size`.
    #[must_use]
    pub fn with_config(pose: Pose, config: ManipulatorConfig) -> Self {
        let mut m = Self {
            pose,
            last_notified: pose,
            config,
            attributes: ManipulatorAttributes::default(),
            session: None,
        };
        m.set_pose(pose);
        m
    }

    /// Current pose.
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ManipulatorConfig {
        &self.config
    }

    /// Replaces the configuration. Takes effect on the next pointer event.
    pub fn set_config(&mut self, config: ManipulatorConfig) {
        self.config = config;
    }

    /// Current attribute surface.
    #[must_use]
    pub fn attributes(&self) -> &ManipulatorAttributes {
        &self.attributes
    }

    /// Mutable attribute surface, for hosts forwarding attribute changes.
    pub fn attributes_mut(&mut self) -> &mut ManipulatorAttributes {
        &mut self.attributes
    }

    /// Returns `true` while a drag session is open.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The handle being dragged, if any.
    #[must_use]
    pub fn active_target(&self) -> Option<DragTarget> {
        self.session.map(|s| s.target)
    }

    /// Page-space corner at `index`; `None` outside `0..4`.
    #[must_use]
    pub fn get_corner(&self, index: usize) -> Option<Point> {
        self.pose.corner_at(index)
    }

    /// All four page-space corners.
    #[must_use]
    pub fn corners(&self) -> Corners {
        self.pose.corners()
    }

    /// Replaces the pose without notifying.
    ///
    /// Non-finite fields are replaced by zero and the size is clamped to the
    /// configured minimum.
    pub fn set_pose(&mut self, pose: Pose) {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        let min = self.config.min_size;
        self.pose = Pose {
            top: finite(pose.top),
            left: finite(pose.left),
            width: finite(pose.width).max(finite(min.width)),
            height: finite(pose.height).max(finite(min.height)),
            rotation: finite(pose.rotation),
        };
        self.last_notified = self.pose;
    }

    /// Moves the unrotated top-left corner without notifying.
    pub fn set_position(&mut self, left: f64, top: f64) {
        self.set_pose(Pose {
            left,
            top,
            ..self.pose
        });
    }

    /// Resizes without notifying. The top-left corner stays where it is.
    pub fn set_size(&mut self, size: Size) {
        self.set_pose(Pose {
            width: size.width,
            height: size.height,
            ..self.pose
        });
    }

    /// Sets the rotation (radians) without notifying.
    pub fn set_rotation(&mut self, rotation: f64) {
        self.set_pose(self.pose.with_rotation(rotation));
    }

    /// Starts dragging the whole shape.
    ///
    /// Returns `false` if a session is already open or translation is
    /// disabled.
    pub fn start_translate(&mut self, event: PointerEvent) -> bool {
        if !self.attributes.translate.is_enabled() {
            return false;
        }
        self.begin(event, DragTarget::Whole, SessionKind::Translate)
    }

    /// Starts dragging the corner at `index` (clockwise from top-left).
    ///
    /// Returns `false` if a session is already open, the index is outside
    /// `0..4`, or corner resizing is disabled.
    pub fn start_drag_corner(&mut self, event: PointerEvent, index: usize) -> bool {
        let Some(corner) = Corner::from_index(index) else {
            return false;
        };
        if !self.attributes.allows_corner_resize() {
            return false;
        }
        let anchor = ResizeAnchor::new(&self.pose, ResizeTarget::Corner(corner));
        self.begin(event, DragTarget::Corner(corner), SessionKind::Resize(anchor))
    }

    /// Starts dragging the side at `index` (clockwise from top).
    ///
    /// Returns `false` if a session is already open, the index is outside
    /// `0..4`, or resizing along that side's axis is disabled.
    pub fn start_drag_side(&mut self, event: PointerEvent, index: usize) -> bool {
        let Some(side) = Side::from_index(index) else {
            return false;
        };
        if !self.attributes.allows_side_resize(side) {
            return false;
        }
        let anchor = ResizeAnchor::new(&self.pose, ResizeTarget::Side(side));
        self.begin(event, DragTarget::Side(side), SessionKind::Resize(anchor))
    }

    /// Starts dragging the rotate handle.
    ///
    /// Returns `false` if a session is already open or rotation is disabled.
    pub fn start_rotate(&mut self, event: PointerEvent) -> bool {
        if !self.attributes.rotate {
            return false;
        }
        let center = self.pose.center();
        self.begin(event, DragTarget::Rotate, SessionKind::Rotate { center })
    }

    /// Starts a session for `target`, dispatching to the specific starters.
    pub fn start_drag(&mut self, event: PointerEvent, target: DragTarget) -> bool {
        match target {
            DragTarget::Whole => self.start_translate(event),
            DragTarget::Corner(corner) => self.start_drag_corner(event, corner.index()),
            DragTarget::Side(side) => self.start_drag_side(event, side.index()),
            DragTarget::Rotate => self.start_rotate(event),
        }
    }

    /// Applies a pointer move to the open session.
    ///
    /// Returns [`ManipulatorEvent::Change`] when the resulting pose differs
    /// from the last notified one, and `None` otherwise (including when no
    /// session is open or the pointer position is not finite).
    pub fn on_pointer_move(&mut self, event: PointerEvent) -> Option<ManipulatorEvent> {
        let session = self.session?;
        let delta = event.page - session.start_page;
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            return None;
        }
        let next = match session.kind {
            SessionKind::Translate => self.translated(&session.start, delta, event.modifiers.snap()),
            SessionKind::Resize(anchor) => anchor.apply(delta, self.config.min_size),
            SessionKind::Rotate { center } => {
                self.rotated(&session.start, center, event.page, event.modifiers.snap())
            }
        };
        if !next.is_finite() {
            return None;
        }
        self.pose = next;
        if next == self.last_notified {
            return None;
        }
        self.last_notified = next;
        if let Some(s) = self.session.as_mut() {
            s.changed = true;
        }
        Some(ManipulatorEvent::Change(ManipulatorUpdate::from_pose(&next)))
    }

    /// Ends the open session.
    ///
    /// Returns [`ManipulatorEvent::UpdateEnd`] if the session changed the
    /// pose at least once.
    pub fn on_pointer_up(&mut self, _event: PointerEvent) -> Option<ManipulatorEvent> {
        let session = self.session.take()?;
        log::trace!("manipulator: end {:?} drag (changed: {})", session.target, session.changed);
        session
            .changed
            .then(|| ManipulatorEvent::UpdateEnd(ManipulatorUpdate::from_pose(&self.pose)))
    }

    /// Drops the open session without notifying; the pose stays as it is.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    fn begin(&mut self, event: PointerEvent, target: DragTarget, kind: SessionKind) -> bool {
        if let Some(active) = self.session {
            log::trace!("manipulator: ignoring {target:?} start during {:?} drag", active.target);
            return false;
        }
        if !(event.page.x.is_finite() && event.page.y.is_finite()) {
            return false;
        }
        log::trace!("manipulator: start {target:?} drag at {:?}", event.page);
        self.session = Some(DragSession {
            start_page: event.page,
            start: self.pose,
            target,
            kind,
            changed: false,
        });
        true
    }

    fn translated(&self, start: &Pose, delta: Vec2, snap: bool) -> Pose {
        let axes = self.attributes.translate;
        let mut left = start.left;
        let mut top = start.top;
        if axes.allows_x() {
            left += delta.x;
            if snap {
                left = snap_to(left, self.config.grid_size);
            }
        }
        if axes.allows_y() {
            top += delta.y;
            if snap {
                top = snap_to(top, self.config.grid_size);
            }
        }
        Pose { left, top, ..*start }
    }

    fn rotated(&self, start: &Pose, center: Point, pointer: Point, snap: bool) -> Pose {
        let offset = pointer - center;
        if offset.x == 0.0 && offset.y == 0.0 {
            // Direction is undefined on the pivot itself.
            return self.pose;
        }
        // The handle sits above the top edge, i.e. at angle -π/2 when unrotated.
        let mut rotation = offset.angle() + FRAC_PI_2;
        if rotation > PI {
            rotation -= TAU;
        }
        if snap {
            rotation = snap_to(rotation, self.config.angle_step);
        }
        start.with_rotation(rotation)
    }
}

fn snap_to(value: f64, step: f64) -> f64 {
    if step.is_finite() && step > 0.0 {
        (value / step).round() * step
    } else {
        value
    }
}
