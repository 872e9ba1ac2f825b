// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors raised by the seam engine.
//!
//! Every failure here is an input-contract violation.  Nothing is
//! retried; the caller gets the error back before any seam pass runs.

use failure::Fail;

/// What went wrong while carving.
#[derive(Debug, Fail, PartialEq, Eq)]
pub enum SeamError {
    /// The removal rectangle is empty, negative, or falls outside the image.
    #[fail(display = "invalid region: {}", reason)]
    InvalidRegion { reason: String },

    /// The image (or energy map) has no rows or no columns, or is too
    /// narrow for the requested operation.
    #[fail(display = "invalid image: {}", reason)]
    InvalidImage { reason: String },

    /// A seam that does not fit the image it is applied to.
    #[fail(display = "invalid seam: {}", reason)]
    InvalidSeam { reason: String },
}

impl SeamError {
    pub(crate) fn region<S: Into<String>>(reason: S) -> Self {
        SeamError::InvalidRegion { reason: reason.into() }
    }

    pub(crate) fn image<S: Into<String>>(reason: S) -> Self {
        SeamError::InvalidImage { reason: reason.into() }
    }

    pub(crate) fn seam<S: Into<String>>(reason: S) -> Self {
        SeamError::InvalidSeam { reason: reason.into() }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SeamError>;
