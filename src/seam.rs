// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find and remove a minimal vertical seam
//!
//! The search is a forward relaxation: every cell of one row pushes
//! its accumulated cost down into the (up to) three cells below it.
//! Row 0 costs nothing, so the energy of the top row never influences
//! the result.  Ties are resolved in favour of whatever was found
//! first, which makes the seam fully deterministic:
//!
//! * a cell below keeps the leftmost predecessor among equal costs;
//! * the seam ends at the leftmost cheapest cell of the bottom row.

use crate::error::{Result, SeamError};
use crate::twodmap::{EnergyMap, TwoDimensionalMap};
use image::{GenericImageView, ImageBuffer, Pixel, Primitive};

// Seed for every cell that has not been relaxed yet.
const UNREACHED: u64 = u64::MAX;

/// A connected top-to-bottom path: one column per row, row 0 first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seam(Vec<u32>);

impl Seam {
    pub fn columns(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if neighbouring rows never step more than one column.
    pub fn is_connected(&self) -> bool {
        self.0
            .windows(2)
            .all(|pair| (i64::from(pair[0]) - i64::from(pair[1])).abs() <= 1)
    }
}

impl From<Vec<u32>> for Seam {
    fn from(columns: Vec<u32>) -> Self {
        Seam(columns)
    }
}

/// Given an energy map, return the cheapest connected vertical seam.
pub fn find_vertical_seam(energy: &EnergyMap) -> Result<Seam> {
    if energy.is_empty() {
        return Err(SeamError::image(format!(
            "no seam through a {}x{} energy map",
            energy.width(),
            energy.height()
        )));
    }
    let (width, height) = energy.dimensions();
    let last = width - 1;

    // cost: cheapest accumulated energy reaching each cell from row 0.
    // path: predecessor column minus own column, one of -1, 0, 1.
    let mut cost: TwoDimensionalMap<u64> = TwoDimensionalMap::filled(width, height, UNREACHED);
    let mut path: TwoDimensionalMap<i8> = TwoDimensionalMap::new(width, height);
    cost.row_mut(0).iter_mut().for_each(|c| *c = 0);

    for y in 0..height - 1 {
        for x in 0..width {
            let here = cost[(x, y)];
            for target in x.saturating_sub(1)..=(x + 1).min(last) {
                let candidate = here.saturating_add(u64::from(energy[(target, y + 1)]));
                if candidate < cost[(target, y + 1)] {
                    cost[(target, y + 1)] = candidate;
                    path[(target, y + 1)] = (i64::from(x) - i64::from(target)) as i8;
                }
            }
        }
    }

    let mut seam_col = (0..width)
        .min_by_key(|x| cost[(*x, height - 1)])
        .ok_or_else(|| SeamError::image("energy map has no columns"))?;
    log::trace!(
        "cheapest seam ends at column {} with cost {}",
        seam_col,
        cost[(seam_col, height - 1)]
    );

    // Walk the back-pointers from the bottom row up, then flip.
    let mut columns: Vec<u32> = (0..height)
        .rev()
        .map(|y| {
            let col = seam_col;
            seam_col = (i64::from(col) + i64::from(path[(col, y)])) as u32;
            col
        })
        .collect();
    columns.reverse();
    Ok(Seam(columns))
}

/// Delete one pixel per row along `seam`, shifting everything to its
/// right one column left.  Returns a new image one column narrower;
/// the input is left untouched.
pub fn remove_vertical_seam<I, P, S>(image: &I, seam: &Seam) -> Result<ImageBuffer<P, Vec<S>>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    if width < 2 || height == 0 {
        return Err(SeamError::image(format!(
            "cannot remove a seam from a {}x{} image",
            width, height
        )));
    }
    if seam.len() != height as usize {
        return Err(SeamError::seam(format!(
            "seam has {} rows, image has {}",
            seam.len(),
            height
        )));
    }
    if let Some((y, x)) = seam.0.iter().enumerate().find(|&(_, &x)| x >= width) {
        return Err(SeamError::seam(format!(
            "row {} points at column {}, image is {} wide",
            y, x, width
        )));
    }

    let mut imgbuf = ImageBuffer::new(width - 1, height);
    for y in 0..height {
        let cut = seam.0[y as usize];
        for x in 0..width {
            if x == cut {
                continue;
            }
            imgbuf.put_pixel(if x < cut { x } else { x - 1 }, y, image.get_pixel(x, y));
        }
    }
    Ok(imgbuf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    const CORRIDOR_ENERGY: [u32; 20] = [
        9, 9, 9, 9, 9, //
        9, 1, 9, 9, 9, //
        9, 1, 9, 9, 9, //
        9, 9, 9, 9, 9,
    ];

    fn pseudo_random_energy(width: u32, height: u32, seed: u64) -> EnergyMap {
        let mut state = seed;
        let data = (0..width * height)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                ((state >> 33) % 256) as u32
            })
            .collect();
        EnergyMap::from_vec(width, height, data).unwrap()
    }

    fn seam_cost(energy: &EnergyMap, seam: &Seam) -> u64 {
        seam.columns()
            .iter()
            .enumerate()
            .skip(1)
            .map(|(y, &x)| u64::from(energy[(x, y as u32)]))
            .sum()
    }

    // Exhaustive search over every connected path, row 0 free.
    fn brute_force_cost(energy: &EnergyMap) -> u64 {
        let (width, height) = energy.dimensions();
        let mut best = vec![0u64; width as usize];
        for y in 1..height {
            best = (0..width)
                .map(|x| {
                    let lo = x.saturating_sub(1);
                    let hi = (x + 1).min(width - 1);
                    (lo..=hi).map(|p| best[p as usize]).min().unwrap() + u64::from(energy[(x, y)])
                })
                .collect();
        }
        *best.iter().min().unwrap()
    }

    #[test]
    fn corridor_seam_and_removal() {
        let energy = EnergyMap::from_vec(5, 4, CORRIDOR_ENERGY.to_vec()).unwrap();
        let seam = find_vertical_seam(&energy).unwrap();
        // Rows 1 and 2 follow the corridor; the free top row and the
        // flat bottom row fall back to the leftmost candidate.
        assert_eq!(seam.columns(), &[0, 1, 1, 0]);

        let buf: ImageBuffer<Luma<u8>, _> =
            ImageBuffer::from_raw(5, 4, (0u8..20).collect::<Vec<_>>()).unwrap();
        let carved = remove_vertical_seam(&buf, &seam).unwrap();
        assert_eq!(carved.dimensions(), (4, 4));
        assert_eq!(
            carved.into_raw(),
            vec![1, 2, 3, 4, 5, 7, 8, 9, 10, 12, 13, 14, 16, 17, 18, 19]
        );
    }

    #[test]
    fn full_height_corridor_is_followed() {
        let mut energy = EnergyMap::filled(6, 4, 5);
        for y in 0..4 {
            energy[(3, y)] = 0;
        }
        let seam = find_vertical_seam(&energy).unwrap();
        assert_eq!(seam.columns(), &[2, 3, 3, 3]);
    }

    #[test]
    fn seams_are_connected_minimal_and_in_range() {
        for seed in 1..20 {
            let energy = pseudo_random_energy(7, 6, seed);
            let seam = find_vertical_seam(&energy).unwrap();
            assert_eq!(seam.len(), 6);
            assert!(seam.is_connected(), "{:?}", seam);
            assert!(seam.columns().iter().all(|&x| x < 7));
            assert_eq!(seam_cost(&energy, &seam), brute_force_cost(&energy));
        }
    }

    #[test]
    fn narrow_and_short_maps() {
        let column = EnergyMap::filled(1, 3, 4);
        assert_eq!(find_vertical_seam(&column).unwrap().columns(), &[0, 0, 0]);

        let row = EnergyMap::from_vec(3, 1, vec![5, 1, 7]).unwrap();
        assert_eq!(find_vertical_seam(&row).unwrap().columns(), &[0]);
    }

    #[test]
    fn empty_map_has_no_seam() {
        assert!(matches!(
            find_vertical_seam(&EnergyMap::new(0, 4)),
            Err(SeamError::InvalidImage { .. })
        ));
    }

    #[test]
    fn connectivity_check() {
        assert!(Seam::from(vec![2, 1, 1, 2, 3]).is_connected());
        assert!(!Seam::from(vec![2, 0]).is_connected());
    }

    #[test]
    fn bad_seams_are_rejected() {
        let buf: ImageBuffer<Luma<u8>, _> = ImageBuffer::from_pixel(3, 2, Luma([1u8]));
        assert!(matches!(
            remove_vertical_seam(&buf, &Seam::from(vec![0])),
            Err(SeamError::InvalidSeam { .. })
        ));
        assert!(matches!(
            remove_vertical_seam(&buf, &Seam::from(vec![0, 3])),
            Err(SeamError::InvalidSeam { .. })
        ));

        let sliver: ImageBuffer<Luma<u8>, _> = ImageBuffer::from_pixel(1, 2, Luma([1u8]));
        assert!(matches!(
            remove_vertical_seam(&sliver, &Seam::from(vec![0, 0])),
            Err(SeamError::InvalidImage { .. })
        ));
    }
}
