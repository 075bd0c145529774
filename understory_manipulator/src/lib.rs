// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_manipulator --heading-base-level=0

//! Understory Manipulator: headless geometry for translate/resize/rotate handles.
//!
//! A manipulator wraps a rectangle ([`Pose`]) that may be rotated around its
//! center, and turns pointer drags on its body, corners, sides and rotate
//! handle into new poses. It does not render anything and does not own the
//! event loop: the host hit-tests, forwards pointer events, applies the
//! resulting pose to whatever it draws, and dispatches the returned
//! [`ManipulatorEvent`]s.
//!
//! ## Resizing under rotation
//!
//! Resizing keeps the handle opposite to the dragged one fixed in page space,
//! even when the rectangle is rotated. The pointer delta is rotated into the
//! rectangle's frame, projected onto the axes the handle controls (a corner
//! moves along its diagonal, a side along its normal), and the new center is
//! mapped back to page space. Sizes never drop below
//! [`ManipulatorConfig::min_size`]; when they would, the clamped edge is
//! placed exactly `min_size` away from the anchor. The building blocks are
//! public in [`ResizeAnchor`] and [`ResizeMatrix`] for hosts that want the
//! math without the state machine.
//!
//! ## Sessions and notifications
//!
//! Pressing on a handle opens a drag session via one of the `start_*`
//! methods; only one session can be open at a time. Each pointer move yields
//! [`ManipulatorEvent::Change`] if and only if the pose differs from the one
//! last reported, and pointer-up yields [`ManipulatorEvent::UpdateEnd`] if
//! the session changed anything. Holding [`Modifiers::SHIFT`] snaps
//! translation to [`ManipulatorConfig::grid_size`] and rotation to
//! [`ManipulatorConfig::angle_step`].
//!
//! ## Example
//!
//! ```rust
//! use understory_manipulator::{Corner, DragTarget, Manipulator, Pose, PointerEvent};
//!
//! let mut m = Manipulator::new(Pose::new(0.0, 0.0, 100.0, 100.0).with_rotation(0.3));
//!
//! let grab = m.get_corner(2).unwrap();
//! let anchor = m.get_corner(0).unwrap();
//! assert_eq!(m.hit_test(grab), Some(DragTarget::Corner(Corner::BottomRight)));
//!
//! m.start_drag_corner(PointerEvent::at(grab.x, grab.y), 2);
//! m.on_pointer_move(PointerEvent::at(grab.x + 20.0, grab.y + 20.0));
//! m.on_pointer_up(PointerEvent::at(grab.x + 20.0, grab.y + 20.0));
//!
//! // The opposite corner has not moved.
//! let after = m.get_corner(0).unwrap();
//! assert!((after - anchor).hypot() < 1e-9);
//! assert!(m.pose().width > 100.0);
//! ```
//!
//! Attribute-style configuration (`translate`, `rotate`, `scale`, `skew`) is
//! modelled by [`ManipulatorAttributes`], which parses the string values a
//! markup host would forward.
//!
//! This crate is `no_std` unless the `std` feature is enabled; enable `libm`
//! for `no_std` float math.

#![no_std]

#[cfg(test)]
extern crate alloc;

mod attributes;
mod config;
mod event;
mod handles;
mod manipulator;
mod pose;
mod resize;

pub use attributes::{AxisConstraint, ManipulatorAttributes, parse_bool_attribute};
pub use config::ManipulatorConfig;
pub use event::{ManipulatorEvent, ManipulatorUpdate, Modifiers, PointerEvent};
pub use handles::Handle;
pub use manipulator::{DragTarget, Manipulator};
pub use pose::{Corner, Corners, Pose, Side};
pub use resize::{ResizeAnchor, ResizeMatrix, ResizeTarget};
