// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is the even mix of its absolute horizontal
//! and vertical Sobel derivatives, taken over a greyscale rendition of
//! the image.  Each derivative is saturated to the 8-bit range before
//! mixing, and so is the mix, so every energy lies in `0..=255`.
//!
//! Borders are reflected without repeating the edge pixel (`gfedcb|abcdefgh|gfedcba`),
//! so a flat image has zero energy everywhere, edges included.

use crate::error::{Result, SeamError};
use crate::region::Region;
use crate::twodmap::{EnergyMap, TwoDimensionalMap};
use image::{GenericImageView, GrayImage, ImageBuffer, Luma, Pixel, Primitive};
use itertools::iproduct;
use num_traits::ToPrimitive;

// ITU-R BT.601 luma weights, R G B.
const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

const SATURATION: i32 = 255;

/// (Pixel) -> Luma
///
/// Single-channel pixels convert to themselves; colour pixels are
/// weighted and rounded to the nearest integer.
fn lumachannel<P, S>(p: &P) -> i32
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let rgb = p.to_rgb();
    let luma: f64 = rgb
        .0
        .iter()
        .zip(LUMA_WEIGHTS.iter())
        .map(|(c, w)| c.to_f64().unwrap_or(0.0) * w)
        .sum();
    luma.round() as i32
}

/// Convert an image to a map of greyscale intensities.
pub fn grayscale<I, P, S>(image: &I) -> TwoDimensionalMap<i32>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    let mut luma = TwoDimensionalMap::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        luma[(x, y)] = lumachannel(&image.get_pixel(x, y));
    }
    luma
}

// Mirror an out-of-range coordinate back into `0..len` without
// repeating the edge.  A single-pixel extent only has itself.
fn reflect_101(i: i64, len: u32) -> u32 {
    let last = i64::from(len) - 1;
    if last <= 0 {
        return 0;
    }
    let reflected = if i < 0 {
        -i
    } else if i > last {
        2 * last - i
    } else {
        i
    };
    reflected as u32
}

// The 3x3 Sobel pair at one pixel: (d/dx, d/dy).
//
//        -1 0 1         -1 -2 -1
//   gx = -2 0 2    gy =  0  0  0
//        -1 0 1          1  2  1
fn sobel(luma: &TwoDimensionalMap<i32>, x: u32, y: u32) -> (i32, i32) {
    let (width, height) = luma.dimensions();
    let at = |dx: i64, dy: i64| {
        luma[(
            reflect_101(i64::from(x) + dx, width),
            reflect_101(i64::from(y) + dy, height),
        )]
    };

    let gx = (at(1, -1) - at(-1, -1)) + 2 * (at(1, 0) - at(-1, 0)) + (at(1, 1) - at(-1, 1));
    let gy = (at(-1, 1) - at(-1, -1)) + 2 * (at(0, 1) - at(0, -1)) + (at(1, 1) - at(1, -1));
    (gx, gy)
}

fn saturated_abs(g: i32) -> u32 {
    g.abs().min(SATURATION) as u32
}

// 0.5a + 0.5b, rounded half to even.  Both inputs are at most 255, so
// the result is too.
fn mix_half_even(a: u32, b: u32) -> u32 {
    let sum = a + b;
    let half = sum / 2;
    if sum % 2 == 1 {
        half + (half & 1)
    } else {
        half
    }
}

/// Compute the energy of every pixel in an image.  This is generic on
/// the image type; colour images are reduced to greyscale first.
pub fn compute_energy<I, P, S>(image: &I) -> Result<EnergyMap>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(SeamError::image(format!(
            "cannot compute the energy of a {}x{} image",
            width, height
        )));
    }

    let luma = grayscale(image);
    let mut emap = EnergyMap::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        let (gx, gy) = sobel(&luma, x, y);
        emap[(x, y)] = mix_half_even(saturated_abs(gx), saturated_abs(gy));
    }
    Ok(emap)
}

/// Zero the energy inside `region`, clipped to the map, so that the
/// cheapest seams run through it.
pub fn mask_region(energy: &mut EnergyMap, region: Region) {
    let (width, height) = energy.dimensions();
    if let Some(clipped) = region.clamped(width, height) {
        let (left, right) = (clipped.x as usize, (clipped.x + clipped.width) as usize);
        for y in clipped.y..clipped.y + clipped.height {
            energy.row_mut(y)[left..right].iter_mut().for_each(|e| *e = 0);
        }
    }
}

/// The energy of an image with `region` masked out.
pub fn compute_masked_energy<I, P, S>(image: &I, region: Region) -> Result<EnergyMap>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let mut energy = compute_energy(image)?;
    mask_region(&mut energy, region);
    Ok(energy)
}

/// Render an energy map as a greyscale image, stretched so the
/// strongest edge is white.
pub fn energy_to_image(energy: &EnergyMap) -> GrayImage {
    let (width, height) = energy.dimensions();
    let factor = u64::from(energy.as_slice().iter().copied().max().unwrap_or(0));
    ImageBuffer::from_fn(width, height, |x, y| {
        let e = u64::from(energy[(x, y)]);
        let scaled = if factor == 0 { 0 } else { e * 255 / factor };
        Luma([scaled.min(255) as u8])
    })
}
