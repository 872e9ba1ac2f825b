// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Annotations drawn over the original image: the outline of the
//! selected region, and the seams that were carved away.

use crate::error::{Result, SeamError};
use crate::region::Region;
use crate::seam::Seam;
use image::{GenericImageView, ImageBuffer, Pixel, Primitive, Rgb};

/// Outline thickness, in pixels, drawn inward from the rectangle's
/// edges.
pub const OUTLINE_THICKNESS: u32 = 2;

/// Red, the colour of every selection preview.
pub const HIGHLIGHT: Rgb<u8> = Rgb([255, 0, 0]);

/// A copy of `image` with the outline of `region` painted in `colour`.
/// The outline spans from `(x, y)` to `(x + width, y + height)`
/// inclusive and is clipped to the image.  The stroke lies entirely
/// inside those edges rather than centred on them, so it sits one
/// pixel inward of a centred two-pixel stroke and never covers pixels
/// outside the rectangle.
pub fn draw_region_outline<I, P, S>(image: &I, region: Region, colour: P) -> ImageBuffer<P, Vec<S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (left, top) = (u64::from(region.x), u64::from(region.y));
    let (right, bottom) = (region.right(), region.bottom());
    let thickness = u64::from(OUTLINE_THICKNESS);
    let near = |v: u64, lo: u64, hi: u64| v - lo < thickness || hi - v < thickness;

    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let (px, py) = (u64::from(x), u64::from(y));
        let inside = px >= left && px <= right && py >= top && py <= bottom;
        if inside && (near(px, left, right) || near(py, top, bottom)) {
            colour
        } else {
            image.get_pixel(x, y)
        }
    })
}

/// Paint `seams` onto a copy of the original `image`.  The seams must
/// be given in the order they were removed, each in the coordinates of
/// the image it was cut from; they are mapped back to the original
/// columns before painting.
pub fn draw_vertical_seams<I, P, S>(
    image: &I,
    seams: &[Seam],
    colour: P,
) -> Result<ImageBuffer<P, Vec<S>>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    let mut out = ImageBuffer::from_fn(width, height, |x, y| image.get_pixel(x, y));

    // Original columns already removed, per row, kept sorted.
    let mut removed: Vec<Vec<u32>> = vec![Vec::new(); height as usize];

    for seam in seams {
        if seam.len() != height as usize {
            return Err(SeamError::seam(format!(
                "seam has {} rows, image has {}",
                seam.len(),
                height
            )));
        }
        for (y, &x) in seam.columns().iter().enumerate() {
            let row = &mut removed[y];
            let mut original = x;
            for &gone in row.iter() {
                if gone <= original {
                    original += 1;
                }
            }
            if original >= width {
                return Err(SeamError::seam(format!(
                    "row {} maps to column {}, image is {} wide",
                    y, original, width
                )));
            }
            let at = row.binary_search(&original).unwrap_or_else(|i| i);
            row.insert(at, original);
            out.put_pixel(original, y as u32, colour);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn outline_is_two_pixels_thick_and_clipped() {
        let image = GrayImage::new(8, 8);
        let out = draw_region_outline(&image, Region::new(1, 1, 5, 10), Luma([255u8]));
        let painted = |x, y| out.get_pixel(x, y)[0] == 255;

        assert!(painted(1, 1) && painted(2, 2) && painted(6, 4) && painted(5, 4));
        assert!(!painted(3, 3) && !painted(0, 0) && !painted(7, 1));
        // Bottom edge is at y = 11, outside the image; only sides reach row 7.
        assert!(painted(1, 7) && !painted(3, 7));
    }

    #[test]
    fn seams_are_mapped_back_to_original_columns() {
        let image = GrayImage::new(5, 2);
        let seams = vec![Seam::from(vec![1, 1]), Seam::from(vec![1, 2])];
        let out = draw_vertical_seams(&image, &seams, Luma([9u8])).unwrap();
        assert_eq!(out.into_raw(), vec![0, 9, 9, 0, 0, 0, 9, 0, 9, 0]);
    }

    #[test]
    fn seams_that_do_not_fit_are_rejected() {
        let image = GrayImage::new(2, 2);
        let too_short = vec![Seam::from(vec![0])];
        assert!(draw_vertical_seams(&image, &too_short, Luma([1u8])).is_err());

        let too_many = vec![Seam::from(vec![1, 1]), Seam::from(vec![1, 1])];
        assert!(draw_vertical_seams(&image, &too_many, Luma([1u8])).is_err());
    }
}
