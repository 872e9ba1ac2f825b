// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Two-dimensional scratch fields
//!
//! The energy map, the accumulated cost table and the back-pointer
//! table all share the same shape as the image they were derived
//! from, so they share one container.

use crate::error::{Result, SeamError};
use std::ops::{Index, IndexMut};

/// An addressable two-dimensional field, stored row-major.  The
/// content is a `u32` for the energy map, a `u64` for the cost table,
/// or an `i8` column offset for the path table.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    width: u32,
    height: u32,
    data: Vec<P>,
}

/// Per-pixel edge strength; one cell per image pixel.
pub type EnergyMap = TwoDimensionalMap<u32>;

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// A new map with every cell at `P::default()`.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, P::default())
    }

    /// A new map with every cell at `value`.
    pub fn filled(width: u32, height: u32, value: P) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Wrap row-major data.  The data must hold exactly `width *
    /// height` cells.
    pub fn from_vec(width: u32, height: u32, data: Vec<P>) -> Result<Self> {
        if data.len() != width as usize * height as usize {
            return Err(SeamError::image(format!(
                "{} cells cannot fill a {}x{} map",
                data.len(),
                width,
                height
            )));
        }
        Ok(TwoDimensionalMap { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when the map has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    // Keep the index math in exactly one place.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// One full row, left to right.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [P] {
        let start = self.get_index(0, y);
        let width = self.width as usize;
        &mut self.data[start..start + width]
    }

    pub fn as_slice(&self) -> &[P] {
        &self.data
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addressing_is_row_major() {
        let map = TwoDimensionalMap::from_vec(3, 2, vec![0u32, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(map[(2, 0)], 2);
        assert_eq!(map[(0, 1)], 3);
        assert_eq!(map.row(1), &[3, 4, 5]);
    }

    #[test]
    fn mismatched_data_is_rejected() {
        let result = TwoDimensionalMap::from_vec(3, 2, vec![0u32; 5]);
        assert!(matches!(result, Err(SeamError::InvalidImage { .. })));
    }

    #[test]
    fn rows_can_be_rewritten() {
        let mut map: TwoDimensionalMap<u64> = TwoDimensionalMap::filled(2, 2, u64::MAX);
        map.row_mut(0).iter_mut().for_each(|c| *c = 0);
        map[(1, 1)] = 7;
        assert_eq!(map.as_slice(), &[0, 0, u64::MAX, 7]);
    }
}
