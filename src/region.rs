// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The rectangle to be erased
//!
//! Coordinates follow the image: origin at the top left, x grows
//! rightward, y grows downward.

use crate::error::{Result, SeamError};
use std::convert::TryFrom;

/// An axis-aligned rectangle in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region { x, y, width, height }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }

    /// Check that the rectangle is non-empty and lies entirely inside
    /// an image of the given size.
    pub fn validate(&self, image_width: u32, image_height: u32) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SeamError::region(format!(
                "{}x{} rectangle is empty",
                self.width, self.height
            )));
        }
        if self.right() > u64::from(image_width) || self.bottom() > u64::from(image_height) {
            return Err(SeamError::region(format!(
                "rectangle ({}, {}, {}, {}) extends past the {}x{} image",
                self.x, self.y, self.width, self.height, image_width, image_height
            )));
        }
        Ok(())
    }

    /// The same rectangle with a new width, never narrower than one
    /// column.
    pub fn with_width(&self, width: u32) -> Self {
        Region {
            width: width.max(1),
            ..*self
        }
    }

    /// Clip the rectangle to an image of the given size.  Returns
    /// `None` if nothing of it is left inside the image.
    pub fn clamped(&self, image_width: u32, image_height: u32) -> Option<Region> {
        if self.x >= image_width || self.y >= image_height {
            return None;
        }
        let right = self.right().min(u64::from(image_width)) as u32;
        let bottom = self.bottom().min(u64::from(image_height)) as u32;
        if right == self.x || bottom == self.y {
            return None;
        }
        Some(Region {
            x: self.x,
            y: self.y,
            width: right - self.x,
            height: bottom - self.y,
        })
    }
}

fn component(name: &str, value: i64) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| SeamError::region(format!("{} must be in 0..={}, got {}", name, u32::MAX, value)))
}

impl TryFrom<(i64, i64, i64, i64)> for Region {
    type Error = SeamError;

    /// Build a rectangle from signed coordinates, as they arrive from a
    /// user.  Negative positions and non-positive sizes are rejected.
    fn try_from((x, y, width, height): (i64, i64, i64, i64)) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(SeamError::region(format!(
                "width and height must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Region {
            x: component("x", x)?,
            y: component("y", y)?,
            width: component("width", width)?,
            height: component("height", height)?,
        })
    }
}
