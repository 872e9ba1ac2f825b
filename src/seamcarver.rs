// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - region removal
//!
//! Repeatedly mask, find and remove seams until the selected
//! rectangle has been carved out of the image.  Every pass consumes
//! the image produced by the pass before it; the caller's image is
//! only ever read.

use crate::energy::compute_masked_energy;
use crate::error::{Result, SeamError};
use crate::region::Region;
use crate::seam::{find_vertical_seam, remove_vertical_seam, Seam};
use image::{GenericImageView, ImageBuffer, Pixel, Primitive};
use log::{debug, info};

/// Extra seams carved past the region's width, to catch the pixels a
/// slanted seam leaves behind.
pub const DEFAULT_MARGIN: u32 = 10;

/// Tunables for a region removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalConfig {
    /// Seams removed beyond the region's width.
    pub margin: u32,
}

impl Default for RemovalConfig {
    fn default() -> Self {
        RemovalConfig {
            margin: DEFAULT_MARGIN,
        }
    }
}

/// Reported once per completed pass.  Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: u32,
    pub total: u32,
}

impl Progress {
    /// Completed share of the work, in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            f64::from(self.completed) / f64::from(self.total)
        }
    }
}

/// Holds the image to be carved, how to carve it, and who wants to
/// hear about it.
pub struct RegionRemover<'a, I> {
    image: &'a I,
    config: RemovalConfig,
    progress: Option<Box<dyn FnMut(Progress) + 'a>>,
}

impl<'a, I, P, S> RegionRemover<'a, I>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    /// Creates a new RegionRemover with the default configuration.
    pub fn new(image: &'a I) -> Self {
        RegionRemover {
            image,
            config: RemovalConfig::default(),
            progress: None,
        }
    }

    pub fn with_config(mut self, config: RemovalConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a callback invoked after every removed seam.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(Progress) + 'a,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    /// How many seams `remove` will take out for `region`: its width
    /// plus the margin, but never so many that less than one column
    /// would remain.
    pub fn pass_count(&self, region: Region) -> u32 {
        let width = self.image.width();
        region
            .width
            .saturating_add(self.config.margin)
            .min(width.saturating_sub(1))
    }

    /// Carve `region` out of the image.
    pub fn remove(&mut self, region: Region) -> Result<ImageBuffer<P, Vec<S>>> {
        let passes = self.pass_count(region);
        self.carve(region, passes).map(|(image, _)| image)
    }

    /// As `remove`, also returning the seams in the order they were
    /// taken out, each in the coordinates of the image it was cut from.
    pub fn remove_with_seams(
        &mut self,
        region: Region,
    ) -> Result<(ImageBuffer<P, Vec<S>>, Vec<Seam>)> {
        let passes = self.pass_count(region);
        self.carve(region, passes)
    }

    /// Run exactly `passes` masked passes over `region`, clamped so at
    /// least one column survives.
    pub fn remove_passes(&mut self, region: Region, passes: u32) -> Result<ImageBuffer<P, Vec<S>>> {
        let passes = passes.min(self.image.width().saturating_sub(1));
        self.carve(region, passes).map(|(image, _)| image)
    }

    fn carve(
        &mut self,
        region: Region,
        passes: u32,
    ) -> Result<(ImageBuffer<P, Vec<S>>, Vec<Seam>)> {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return Err(SeamError::image(format!(
                "cannot carve a {}x{} image",
                width, height
            )));
        }
        region.validate(width, height)?;

        info!(
            "removing {:?} from a {}x{} image in {} passes",
            region, width, height, passes
        );

        let image = self.image;
        let mut scratch: ImageBuffer<P, Vec<S>> =
            ImageBuffer::from_fn(width, height, |x, y| image.get_pixel(x, y));
        let mut seams = Vec::with_capacity(passes as usize);

        for completed in 0..passes {
            // The mask narrows with the image; x, y and height stay put.
            let mask = region.with_width(region.width.saturating_sub(completed));
            let energy = compute_masked_energy(&scratch, mask)?;
            let seam = find_vertical_seam(&energy)?;
            scratch = remove_vertical_seam(&scratch, &seam)?;
            debug!(
                "pass {}/{}: mask width {}, image now {} wide",
                completed + 1,
                passes,
                mask.width,
                scratch.width()
            );
            seams.push(seam);

            if let Some(callback) = self.progress.as_mut() {
                callback(Progress {
                    completed: completed + 1,
                    total: passes,
                });
            }
        }

        info!("region removed, image now {}x{}", scratch.width(), scratch.height());
        Ok((scratch, seams))
    }
}

/// Carve `region` out of `image` with the default configuration,
/// reporting each completed pass to `progress` when one is given.
pub fn remove_region<I, P, S>(
    image: &I,
    region: Region,
    progress: Option<&mut dyn FnMut(Progress)>,
) -> Result<ImageBuffer<P, Vec<S>>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let mut remover = RegionRemover::new(image);
    if let Some(callback) = progress {
        remover = remover.on_progress(move |p| callback(p));
    }
    remover.remove(region)
}
