// Copyright (c) 2024 The intel-icd developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use super::viewport::DynamicViewportState;
use crate::pipeline::graphics::{depth_stencil::DynamicStencilValue, rasterization::DepthBias};
use std::ops::RangeInclusive;

/// The dynamic state recorded into a command buffer.
///
/// Apart from the viewports, which are encoded into hardware state as soon as they are set, these
/// are plain values the command stream builder consumes when emitting draw calls.
#[derive(Clone, Debug)]
pub struct CommandBufferState {
    pub(super) viewport: DynamicViewportState,
    pub(super) line_width: f32,
    pub(super) depth_bias: DepthBias,
    pub(super) blend_constants: [f32; 4],
    pub(super) depth_bounds: RangeInclusive<f32>,
    pub(super) stencil_compare_mask: DynamicStencilValue,
    pub(super) stencil_write_mask: DynamicStencilValue,
    pub(super) stencil_reference: DynamicStencilValue,
}

impl CommandBufferState {
    /// Returns the encoded viewport and scissor state.
    #[inline]
    pub fn viewport(&self) -> &DynamicViewportState {
        &self.viewport
    }

    #[inline]
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    #[inline]
    pub fn depth_bias(&self) -> DepthBias {
        self.depth_bias
    }

    #[inline]
    pub fn blend_constants(&self) -> [f32; 4] {
        self.blend_constants
    }

    #[inline]
    pub fn depth_bounds(&self) -> RangeInclusive<f32> {
        self.depth_bounds.clone()
    }

    #[inline]
    pub fn stencil_compare_mask(&self) -> DynamicStencilValue {
        self.stencil_compare_mask
    }

    #[inline]
    pub fn stencil_write_mask(&self) -> DynamicStencilValue {
        self.stencil_write_mask
    }

    #[inline]
    pub fn stencil_reference(&self) -> DynamicStencilValue {
        self.stencil_reference
    }
}

impl Default for CommandBufferState {
    #[inline]
    fn default() -> Self {
        CommandBufferState {
            viewport: DynamicViewportState::default(),
            line_width: 1.0,
            depth_bias: DepthBias::default(),
            blend_constants: [0.0; 4],
            depth_bounds: 0.0..=1.0,
            stencil_compare_mask: DynamicStencilValue::default(),
            stencil_write_mask: DynamicStencilValue::default(),
            stencil_reference: DynamicStencilValue::default(),
        }
    }
}
