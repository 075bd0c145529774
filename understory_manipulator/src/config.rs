// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::PI;

use kurbo::Size;

/// Tunables of a [`crate::Manipulator`] that are not part of its markup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ManipulatorConfig {
    /// Resize floor. Defaults to zero.
    pub min_size: Size,
    /// Translation snap grid, in page units. Non-positive disables snapping.
    pub grid_size: f64,
    /// Rotation snap step, in radians. Non-positive disables snapping.
    pub angle_step: f64,
    /// Distance from the top edge to the rotate handle.
    pub rotate_handle_offset: f64,
    /// Hit radius of the handles, in page units.
    pub handle_radius: f64,
}

impl Default for ManipulatorConfig {
    fn default() -> Self {
        Self {
            min_size: Size::ZERO,
            grid_size: 20.0,
            angle_step: PI / 12.0,
            rotate_handle_offset: 24.0,
            handle_radius: 8.0,
        }
    }
}

impl ManipulatorConfig {
    /// Sets the resize floor.
    #[must_use]
    pub fn with_min_size(mut self, min_size: Size) -> Self {
        self.min_size = min_size;
        self
    }

    /// Sets the translation snap grid.
    #[must_use]
    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Sets the rotation snap step, in radians.
    #[must_use]
    pub fn with_angle_step(mut self, angle_step: f64) -> Self {
        self.angle_step = angle_step;
        self
    }

    /// Sets the rotate handle distance and the handle hit radius.
    #[must_use]
    pub fn with_handles(mut self, rotate_handle_offset: f64, handle_radius: f64) -> Self {
        self.rotate_handle_offset = rotate_handle_offset;
        self.handle_radius = handle_radius;
        self
    }
}
