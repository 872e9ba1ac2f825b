// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Object removal by seam carving.
//!
//! Mask the region to erase in the image's energy map, then carve
//! minimal vertical seams through it until it is gone.
//!
//! ```no_run
//! use seamerase::{remove_region, Region};
//!
//! let image = image::open("photo.png").unwrap().to_rgb8();
//! let erased = remove_region(&image, Region::new(40, 10, 25, 60), None).unwrap();
//! erased.save("erased.png").unwrap();
//! ```

pub mod annotate;
pub use annotate::{draw_region_outline, draw_vertical_seams};

pub mod energy;
pub use energy::{compute_energy, compute_masked_energy, energy_to_image, mask_region};

pub mod error;
pub use error::SeamError;

pub mod region;
pub use region::Region;

pub mod seam;
pub use seam::{find_vertical_seam, remove_vertical_seam, Seam};

pub mod seamcarver;
pub use seamcarver::{remove_region, Progress, RegionRemover, RemovalConfig};

pub mod twodmap;
pub use twodmap::{EnergyMap, TwoDimensionalMap};
