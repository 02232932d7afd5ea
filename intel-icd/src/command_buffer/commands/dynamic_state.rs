// Copyright (c) 2024 The intel-icd developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::{
    command_buffer::CommandBuffer,
    device::GpuOwned,
    pipeline::graphics::{
        depth_stencil::StencilFaces,
        rasterization::DepthBias,
        viewport::{Scissor, Viewport},
    },
    Gen,
};
use std::{
    error::Error,
    fmt::{Display, Error as FmtError, Formatter},
    ops::RangeInclusive,
};
use tracing::trace;

/// # Commands to set dynamic state for pipelines.
///
/// These commands never fail: the arguments are expected to have been validated by the layer
/// above. Violating the documented requirements panics.
impl CommandBuffer {
    /// Sets the dynamic viewports and scissor boxes for future draw calls, and encodes them into
    /// the hardware viewport state.
    ///
    /// The `n`th scissor box applies to the `n`th viewport. The previous viewport state is
    /// replaced entirely.
    ///
    /// # Panics
    ///
    /// - Panics if the generation of the GPU is not between Gen6 and Gen7.5 inclusive.
    /// - Panics if `viewports.len()` is not equal to `scissors.len()`.
    /// - Panics if `viewports.len()` is greater than the
    ///   [`max_viewports`](crate::device::Gpu::max_viewports) capability of the GPU.
    /// - Panics if a viewport has a width or a height of zero.
    pub fn set_viewports_and_scissors(
        &mut self,
        viewports: &[Viewport],
        scissors: &[Scissor],
    ) -> &mut Self {
        self.validate_set_viewports_and_scissors(viewports, scissors)
            .unwrap();

        let generation = self.gpu().generation();
        self.state.viewport.set(generation, viewports, scissors);

        trace!(
            %generation,
            count = viewports.len(),
            len = self.state.viewport.len(),
            "set viewports and scissors"
        );

        self
    }

    fn validate_set_viewports_and_scissors(
        &self,
        viewports: &[Viewport],
        scissors: &[Scissor],
    ) -> Result<(), SetDynamicStateError> {
        let generation = self.gpu().generation();

        if !(Gen::GEN6..=Gen::GEN7_5).contains(&generation) {
            return Err(SetDynamicStateError::UnsupportedGeneration { generation });
        }

        if viewports.len() != scissors.len() {
            return Err(SetDynamicStateError::ViewportScissorCountMismatch {
                viewport_count: viewports.len(),
                scissor_count: scissors.len(),
            });
        }

        let max_viewports = self.gpu().max_viewports();

        if viewports.len() > max_viewports as usize {
            return Err(SetDynamicStateError::MaxViewportsExceeded {
                provided: viewports.len(),
                max: max_viewports,
            });
        }

        if let Some(index) = viewports
            .iter()
            .position(|viewport| viewport.extent[0] == 0.0 || viewport.extent[1] == 0.0)
        {
            return Err(SetDynamicStateError::ViewportExtentZero { index });
        }

        Ok(())
    }

    /// Sets the dynamic line width for future draw calls.
    #[inline]
    pub fn set_line_width(&mut self, line_width: f32) -> &mut Self {
        self.state.line_width = line_width;

        self
    }

    /// Sets the dynamic depth bias values for future draw calls.
    #[inline]
    pub fn set_depth_bias(
        &mut self,
        constant_factor: f32,
        clamp: f32,
        slope_factor: f32,
    ) -> &mut Self {
        self.state.depth_bias = DepthBias {
            constant_factor,
            clamp,
            slope_factor,
        };

        self
    }

    /// Sets the dynamic blend constants for future draw calls.
    #[inline]
    pub fn set_blend_constants(&mut self, constants: [f32; 4]) -> &mut Self {
        self.state.blend_constants = constants;

        self
    }

    /// Sets the dynamic depth bounds for future draw calls.
    ///
    /// Whether the bound depth buffer format allows depth bounds or stencil testing is not
    /// checked here.
    #[inline]
    pub fn set_depth_bounds(&mut self, bounds: RangeInclusive<f32>) -> &mut Self {
        self.state.depth_bounds = bounds;

        self
    }

    /// Sets the dynamic stencil compare mask on one or both faces for future draw calls.
    #[inline]
    pub fn set_stencil_compare_mask(
        &mut self,
        faces: StencilFaces,
        compare_mask: u32,
    ) -> &mut Self {
        self.state.stencil_compare_mask.set(faces, compare_mask);

        self
    }

    /// Sets the dynamic stencil write mask on one or both faces for future draw calls.
    #[inline]
    pub fn set_stencil_write_mask(&mut self, faces: StencilFaces, write_mask: u32) -> &mut Self {
        self.state.stencil_write_mask.set(faces, write_mask);

        self
    }

    /// Sets the dynamic stencil reference on one or both faces for future draw calls.
    #[inline]
    pub fn set_stencil_reference(&mut self, faces: StencilFaces, reference: u32) -> &mut Self {
        self.state.stencil_reference.set(faces, reference);

        self
    }
}

/// A requirement of a dynamic state command was not met.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetDynamicStateError {
    /// The [`max_viewports`](crate::device::Gpu::max_viewports) limit has been exceeded.
    MaxViewportsExceeded { provided: usize, max: u32 },

    /// Viewport state can't be encoded for the generation of the GPU.
    UnsupportedGeneration { generation: Gen },

    /// The viewport at `index` has a width or a height of zero.
    ViewportExtentZero { index: usize },

    /// A different number of viewports and scissors was provided.
    ViewportScissorCountMismatch {
        viewport_count: usize,
        scissor_count: usize,
    },
}

impl Error for SetDynamicStateError {}

impl Display for SetDynamicStateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::MaxViewportsExceeded { provided, max } => write!(
                f,
                "{} viewports were provided, but the `max_viewports` limit is {}",
                provided, max,
            ),
            Self::UnsupportedGeneration { generation } => write!(
                f,
                "viewport state can't be encoded for Gen{}, only Gen6 to Gen7.5 are supported",
                generation,
            ),
            Self::ViewportExtentZero { index } => write!(
                f,
                "the viewport at index {} has a width or a height of zero",
                index,
            ),
            Self::ViewportScissorCountMismatch {
                viewport_count,
                scissor_count,
            } => write!(
                f,
                "the number of viewports ({}) is different from the number of scissors ({})",
                viewport_count, scissor_count,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SetDynamicStateError;
    use crate::{
        command_buffer::CommandBuffer,
        device::{Gpu, GpuCreateInfo, MAX_VIEWPORTS},
        pipeline::graphics::{
            depth_stencil::{DynamicStencilValue, StencilFaces},
            rasterization::DepthBias,
            viewport::{Scissor, Viewport},
        },
        Gen,
    };

    fn viewports_and_scissors(count: usize) -> (Vec<Viewport>, Vec<Scissor>) {
        let viewport = Viewport {
            offset: [0.0, 0.0],
            extent: [1024.0, 768.0],
            depth_range: 0.0..=1.0,
        };
        let scissor = Scissor {
            offset: [0, 0],
            extent: [1024, 768],
        };

        (vec![viewport; count], vec![scissor; count])
    }

    #[test]
    fn set_viewports_and_scissors() {
        let mut command_buffer = CommandBuffer::new(gpu!(Gen::GEN7));
        let (viewports, scissors) = viewports_and_scissors(2);
        command_buffer.set_viewports_and_scissors(&viewports, &scissors);

        let state = command_buffer.state().viewport();
        assert_eq!(state.viewport_count(), 2);
        assert_eq!(state.len(), 40);
        assert_eq!(state.scissor_rect(1), &[0, 767 << 16 | 1023]);
    }

    #[test]
    fn max_viewports() {
        let mut command_buffer = CommandBuffer::new(gpu!(Gen::GEN7_5));
        let (viewports, scissors) = viewports_and_scissors(MAX_VIEWPORTS as usize);
        command_buffer.set_viewports_and_scissors(&viewports, &scissors);
        assert_eq!(
            command_buffer.state().viewport().viewport_count(),
            MAX_VIEWPORTS,
        );

        let (viewports, scissors) = viewports_and_scissors(MAX_VIEWPORTS as usize + 1);
        assert_should_panic!("MaxViewportsExceeded", {
            command_buffer.set_viewports_and_scissors(&viewports, &scissors);
        });
    }

    #[test]
    fn max_viewports_of_gpu() {
        let gpu = Gpu::new(GpuCreateInfo {
            generation: Gen::GEN6,
            max_viewports: 1,
            ..Default::default()
        })
        .unwrap();
        let mut command_buffer = CommandBuffer::new(gpu);

        let (viewports, scissors) = viewports_and_scissors(1);
        command_buffer.set_viewports_and_scissors(&viewports, &scissors);

        let (viewports, scissors) = viewports_and_scissors(2);
        assert_should_panic!("MaxViewportsExceeded", {
            command_buffer.set_viewports_and_scissors(&viewports, &scissors);
        });
    }

    #[test]
    fn count_mismatch() {
        let mut command_buffer = CommandBuffer::new(gpu!(Gen::GEN7));
        let (viewports, scissors) = viewports_and_scissors(2);

        assert_should_panic!("ViewportScissorCountMismatch", {
            command_buffer.set_viewports_and_scissors(&viewports, &scissors[..1]);
        });
    }

    #[test]
    fn zero_extent() {
        let mut command_buffer = CommandBuffer::new(gpu!(Gen::GEN6));
        let (mut viewports, scissors) = viewports_and_scissors(3);
        viewports[2].extent[1] = 0.0;

        assert_should_panic!("ViewportExtentZero { index: 2 }", {
            command_buffer.set_viewports_and_scissors(&viewports, &scissors);
        });
    }

    #[test]
    fn unsupported_generation() {
        let mut command_buffer = CommandBuffer::new(gpu!(Gen::new(8, 0)));
        let (viewports, scissors) = viewports_and_scissors(1);

        assert_should_panic!("UnsupportedGeneration", {
            command_buffer.set_viewports_and_scissors(&viewports, &scissors);
        });
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            SetDynamicStateError::MaxViewportsExceeded {
                provided: 17,
                max: 16,
            }
            .to_string(),
            "17 viewports were provided, but the `max_viewports` limit is 16",
        );
        assert_eq!(
            SetDynamicStateError::UnsupportedGeneration {
                generation: Gen::new(8, 0),
            }
            .to_string(),
            "viewport state can't be encoded for Gen8, only Gen6 to Gen7.5 are supported",
        );
    }

    #[test]
    fn plain_dynamic_state() {
        let mut command_buffer = CommandBuffer::new(gpu!(Gen::GEN7));
        command_buffer
            .set_line_width(1.5)
            .set_depth_bias(1.0, 0.5, 2.0)
            .set_blend_constants([0.1, 0.2, 0.3, 0.4])
            .set_depth_bounds(0.25..=0.75);

        let state = command_buffer.state();
        assert_eq!(state.line_width(), 1.5);
        assert_eq!(
            state.depth_bias(),
            DepthBias {
                constant_factor: 1.0,
                clamp: 0.5,
                slope_factor: 2.0,
            },
        );
        assert_eq!(state.blend_constants(), [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(state.depth_bounds(), 0.25..=0.75);
    }

    #[test]
    fn stencil_state() {
        let mut command_buffer = CommandBuffer::new(gpu!(Gen::GEN7));
        command_buffer
            .set_stencil_compare_mask(StencilFaces::FrontAndBack, 0xff)
            .set_stencil_compare_mask(StencilFaces::Back, 0x0f)
            .set_stencil_write_mask(StencilFaces::Front, 0xf0)
            .set_stencil_reference(StencilFaces::Back, 3);

        let state = command_buffer.state();
        assert_eq!(
            state.stencil_compare_mask(),
            DynamicStencilValue {
                front: 0xff,
                back: 0x0f,
            },
        );
        assert_eq!(
            state.stencil_write_mask(),
            DynamicStencilValue {
                front: 0xf0,
                back: 0,
            },
        );
        assert_eq!(
            state.stencil_reference(),
            DynamicStencilValue { front: 0, back: 3 },
        );
    }
}
