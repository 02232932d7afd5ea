// Copyright (c) 2024 The intel-icd developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! The GPU a command buffer records for.
//!
//! A [`Gpu`] is the read-only capability record of the hardware: its generation and how many
//! viewports it supports. It is shared between every command buffer created on it through an
//! `Arc`, and never changes after creation, so no synchronization is needed to read it.
//!
//! ```
//! use intel_icd::device::{Gpu, GpuCreateInfo};
//! use intel_icd::Gen;
//!
//! let gpu = Gpu::new(GpuCreateInfo {
//!     generation: Gen::GEN7_5,
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! assert_eq!(gpu.generation(), Gen::GEN7_5);
//! assert_eq!(gpu.max_viewports(), 16);
//! ```

use crate::{Gen, NonExhaustive};
use std::{
    error::Error,
    fmt::{Display, Error as FmtError, Formatter},
    ops::Deref,
    sync::Arc,
};
use tracing::debug;

/// The largest number of viewports any supported GPU exposes.
///
/// Fixed-capacity state buffers are sized from this value.
pub const MAX_VIEWPORTS: u32 = 16;

/// Capabilities of the GPU.
#[derive(Debug)]
pub struct Gpu {
    generation: Gen,
    max_viewports: u32,
}

impl Gpu {
    /// Creates the capability record of a GPU.
    pub fn new(create_info: GpuCreateInfo) -> Result<Arc<Gpu>, GpuCreationError> {
        let GpuCreateInfo {
            generation,
            max_viewports,
            _ne: _,
        } = create_info;

        if max_viewports == 0 || max_viewports > MAX_VIEWPORTS {
            return Err(GpuCreationError::MaxViewportsOutOfRange {
                provided: max_viewports,
                max: MAX_VIEWPORTS,
            });
        }

        debug!(%generation, max_viewports, "created gpu");

        Ok(Arc::new(Gpu { generation, max_viewports }))
    }

    /// Returns the hardware generation.
    #[inline]
    pub fn generation(&self) -> Gen {
        self.generation
    }

    /// Returns the maximum number of viewports (and scissors) that can be active at once.
    #[inline]
    pub fn max_viewports(&self) -> u32 {
        self.max_viewports
    }
}

/// Parameters to create a new `Gpu`.
#[derive(Clone, Debug)]
pub struct GpuCreateInfo {
    /// The hardware generation.
    ///
    /// The default value is [`Gen::GEN7`].
    pub generation: Gen,

    /// The number of viewports the hardware supports. Must be between 1 and
    /// [`MAX_VIEWPORTS`] inclusive.
    ///
    /// The default value is [`MAX_VIEWPORTS`].
    pub max_viewports: u32,

    pub _ne: NonExhaustive,
}

impl Default for GpuCreateInfo {
    #[inline]
    fn default() -> Self {
        Self {
            generation: Gen::GEN7,
            max_viewports: MAX_VIEWPORTS,
            _ne: NonExhaustive(()),
        }
    }
}

/// Error that can be returned when creating a `Gpu`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GpuCreationError {
    /// `max_viewports` is zero or larger than the state buffers can hold.
    MaxViewportsOutOfRange { provided: u32, max: u32 },
}

impl Error for GpuCreationError {}

impl Display for GpuCreationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::MaxViewportsOutOfRange { provided, max } => write!(
                f,
                "the provided `max_viewports` ({}) is not between 1 and {} inclusive",
                provided, max,
            ),
        }
    }
}

/// Implemented on objects that belong to a GPU.
pub unsafe trait GpuOwned {
    /// Returns the GPU that owns `Self`.
    fn gpu(&self) -> &Arc<Gpu>;
}

unsafe impl<T> GpuOwned for T
where
    T: Deref,
    T::Target: GpuOwned,
{
    #[inline]
    fn gpu(&self) -> &Arc<Gpu> {
        (**self).gpu()
    }
}

#[cfg(test)]
mod tests {
    use super::{Gpu, GpuCreateInfo, GpuCreationError, MAX_VIEWPORTS};
    use crate::Gen;

    #[test]
    fn defaults() {
        let gpu = Gpu::new(GpuCreateInfo::default()).unwrap();
        assert_eq!(gpu.generation(), Gen::GEN7);
        assert_eq!(gpu.max_viewports(), MAX_VIEWPORTS);
    }

    #[test]
    fn max_viewports_zero() {
        let err = Gpu::new(GpuCreateInfo {
            max_viewports: 0,
            ..Default::default()
        })
        .unwrap_err();

        assert_eq!(
            err,
            GpuCreationError::MaxViewportsOutOfRange {
                provided: 0,
                max: MAX_VIEWPORTS,
            },
        );
    }

    #[test]
    fn max_viewports_too_large() {
        assert!(Gpu::new(GpuCreateInfo {
            max_viewports: MAX_VIEWPORTS + 1,
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn fewer_viewports() {
        let gpu = Gpu::new(GpuCreateInfo {
            generation: Gen::GEN6,
            max_viewports: 1,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(gpu.generation(), Gen::GEN6);
        assert_eq!(gpu.max_viewports(), 1);
    }
}
