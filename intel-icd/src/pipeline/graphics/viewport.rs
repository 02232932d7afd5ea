// Copyright (c) 2024 The intel-icd developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Configures the area of the framebuffer that pixels will be written to.
//!
//! There are two different concepts to determine where things will be drawn:
//!
//! - The viewport is the region of the image which corresponds to the vertex coordinates `-1.0` to
//!   `1.0`.
//! - Any pixel outside of the scissor box will be discarded.
//!
//! In other words, modifying the viewport will stretch the image, while modifying the scissor
//! box acts like a filter.
//!
//! Viewports and scissors are always set together, and the `n`th viewport is paired with the
//! `n`th scissor box.

use ash::vk;
use std::ops::RangeInclusive;

/// State of a single viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Coordinates in pixels of the top-left hand corner of the viewport.
    ///
    /// The default value is `[0.0; 2]`.
    pub offset: [f32; 2],

    /// Dimensions in pixels of the viewport.
    ///
    /// Both dimensions must be nonzero when the viewport is set on a command buffer. A negative
    /// height flips the viewport vertically.
    ///
    /// The default value is `[1.0; 2]`, which you probably want to override.
    pub extent: [f32; 2],

    /// Minimum and maximum values of the depth.
    ///
    /// The values `0.0` to `1.0` of each vertex's Z coordinate will be mapped to this
    /// `depth_range` before being compared to the existing depth value.
    ///
    /// The default value is `0.0..=1.0`.
    pub depth_range: RangeInclusive<f32>,
}

impl Viewport {
    /// Returns the scale the hardware applies to normalized device coordinates.
    #[inline]
    pub(crate) fn scale(&self) -> [f32; 3] {
        [
            self.extent[0] / 2.0,
            self.extent[1] / 2.0,
            self.depth_range.end() - self.depth_range.start(),
        ]
    }

    /// Returns the translation the hardware applies after scaling, given the scale returned by
    /// `scale`.
    #[inline]
    pub(crate) fn translate(&self, scale: [f32; 3]) -> [f32; 3] {
        [
            self.offset[0] + scale[0],
            self.offset[1] + scale[1],
            *self.depth_range.start(),
        ]
    }
}

impl Default for Viewport {
    #[inline]
    fn default() -> Self {
        Self {
            offset: [0.0; 2],
            extent: [1.0; 2],
            depth_range: 0.0..=1.0,
        }
    }
}

impl From<vk::Viewport> for Viewport {
    #[inline]
    fn from(val: vk::Viewport) -> Self {
        Viewport {
            offset: [val.x, val.y],
            extent: [val.width, val.height],
            depth_range: val.min_depth..=val.max_depth,
        }
    }
}

impl From<&Viewport> for vk::Viewport {
    #[inline]
    fn from(val: &Viewport) -> Self {
        vk::Viewport {
            x: val.offset[0],
            y: val.offset[1],
            width: val.extent[0],
            height: val.extent[1],
            min_depth: *val.depth_range.start(),
            max_depth: *val.depth_range.end(),
        }
    }
}

/// State of a single scissor box.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Scissor {
    /// Coordinates in pixels of the top-left hand corner of the box.
    ///
    /// The default value is `[0; 2]`.
    pub offset: [i32; 2],

    /// Dimensions in pixels of the box.
    ///
    /// If either dimension is zero, nothing passes the scissor test.
    ///
    /// The default value is `[i32::MAX as u32; 2]`.
    pub extent: [u32; 2],
}

impl Scissor {
    /// Returns a scissor that, when used, will instruct the pipeline to draw to the entire
    /// framebuffer no matter its size.
    #[inline]
    pub fn irrelevant() -> Scissor {
        Scissor {
            offset: [0, 0],
            extent: [0x7fffffff, 0x7fffffff],
        }
    }

    /// Returns whether the scissor box covers no pixel at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.extent[0] == 0 || self.extent[1] == 0
    }
}

impl Default for Scissor {
    #[inline]
    fn default() -> Scissor {
        Scissor::irrelevant()
    }
}

impl From<vk::Rect2D> for Scissor {
    #[inline]
    fn from(val: vk::Rect2D) -> Self {
        Scissor {
            offset: [val.offset.x, val.offset.y],
            extent: [val.extent.width, val.extent.height],
        }
    }
}

impl From<Scissor> for vk::Rect2D {
    #[inline]
    fn from(val: Scissor) -> Self {
        vk::Rect2D {
            offset: vk::Offset2D {
                x: val.offset[0],
                y: val.offset[1],
            },
            extent: vk::Extent2D {
                width: val.extent[0],
                height: val.extent[1],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Scissor, Viewport};
    use ash::vk;

    #[test]
    fn scale_and_translate() {
        let viewport = Viewport {
            offset: [0.0, 0.0],
            extent: [800.0, 600.0],
            depth_range: 0.0..=1.0,
        };

        let scale = viewport.scale();
        assert_eq!(scale, [400.0, 300.0, 1.0]);
        assert_eq!(viewport.translate(scale), [400.0, 300.0, 0.0]);
    }

    #[test]
    fn translate_with_offset_and_depth() {
        let viewport = Viewport {
            offset: [100.0, -50.0],
            extent: [200.0, -100.0],
            depth_range: 0.25..=0.75,
        };

        let scale = viewport.scale();
        assert_eq!(scale, [100.0, -50.0, 0.5]);
        assert_eq!(viewport.translate(scale), [200.0, -100.0, 0.25]);
    }

    #[test]
    fn from_vk() {
        let viewport = Viewport::from(vk::Viewport {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
            min_depth: 0.5,
            max_depth: 0.75,
        });

        assert_eq!(viewport.offset, [1.0, 2.0]);
        assert_eq!(viewport.extent, [3.0, 4.0]);
        assert_eq!(viewport.depth_range, 0.5..=0.75);
        assert_eq!(vk::Viewport::from(&viewport).max_depth, 0.75);

        let scissor = Scissor::from(vk::Rect2D {
            offset: vk::Offset2D { x: -3, y: 7 },
            extent: vk::Extent2D {
                width: 0,
                height: 9,
            },
        });

        assert_eq!(scissor.offset, [-3, 7]);
        assert!(scissor.is_empty());
        assert_eq!(vk::Rect2D::from(scissor).extent.height, 9);
    }

    #[test]
    fn irrelevant_is_not_empty() {
        assert!(!Scissor::default().is_empty());
    }
}
