// Copyright (c) 2024 The intel-icd developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Vulkan entry points of the dynamic state commands.
//!
//! These are the `vkCmdSet*` functions the loader dispatches to. Each one resolves the
//! command buffer handle and forwards to the matching method of [`CommandBuffer`], converting
//! the API structures on the way. The application is expected to have validated its calls, for
//! example with the validation layers; a violated requirement panics, and since a panic can't
//! unwind out of an `extern "system"` function, the process aborts.

use crate::{
    command_buffer::CommandBuffer,
    device::MAX_VIEWPORTS,
    pipeline::graphics::{
        depth_stencil::StencilFaces,
        viewport::{Scissor, Viewport},
    },
};
use ash::vk;
use smallvec::SmallVec;
use std::slice;

/// `vkCmdSetViewport`: sets `viewport_and_scissor_count` viewports and scissors at once.
///
/// # Safety
///
/// - `command_buffer` must be a valid handle returned by [`CommandBuffer::into_handle`] that is
///   not being recorded into by another thread.
/// - Unless the count is zero, `p_viewports` and `p_scissors` must each point to that many
///   elements.
pub unsafe extern "system" fn cmd_set_viewport(
    command_buffer: vk::CommandBuffer,
    viewport_and_scissor_count: u32,
    p_viewports: *const vk::Viewport,
    p_scissors: *const vk::Rect2D,
) {
    let viewports: SmallVec<[Viewport; MAX_VIEWPORTS as usize]> =
        unsafe { slice_or_empty(p_viewports, viewport_and_scissor_count) }
            .iter()
            .copied()
            .map(Viewport::from)
            .collect();
    let scissors: SmallVec<[Scissor; MAX_VIEWPORTS as usize]> =
        unsafe { slice_or_empty(p_scissors, viewport_and_scissor_count) }
            .iter()
            .copied()
            .map(Scissor::from)
            .collect();

    unsafe { CommandBuffer::from_handle_mut(command_buffer) }
        .set_viewports_and_scissors(&viewports, &scissors);
}

/// `vkCmdSetLineWidth`.
///
/// # Safety
///
/// - `command_buffer` must be a valid handle returned by [`CommandBuffer::into_handle`] that is
///   not being recorded into by another thread.
pub unsafe extern "system" fn cmd_set_line_width(
    command_buffer: vk::CommandBuffer,
    line_width: f32,
) {
    unsafe { CommandBuffer::from_handle_mut(command_buffer) }.set_line_width(line_width);
}

/// `vkCmdSetDepthBias`.
///
/// # Safety
///
/// - `command_buffer` must be a valid handle returned by [`CommandBuffer::into_handle`] that is
///   not being recorded into by another thread.
pub unsafe extern "system" fn cmd_set_depth_bias(
    command_buffer: vk::CommandBuffer,
    depth_bias_constant_factor: f32,
    depth_bias_clamp: f32,
    depth_bias_slope_factor: f32,
) {
    unsafe { CommandBuffer::from_handle_mut(command_buffer) }.set_depth_bias(
        depth_bias_constant_factor,
        depth_bias_clamp,
        depth_bias_slope_factor,
    );
}

/// `vkCmdSetBlendConstants`.
///
/// # Safety
///
/// - `command_buffer` must be a valid handle returned by [`CommandBuffer::into_handle`] that is
///   not being recorded into by another thread.
/// - `blend_constants` must point to four floats.
pub unsafe extern "system" fn cmd_set_blend_constants(
    command_buffer: vk::CommandBuffer,
    blend_constants: *const [f32; 4],
) {
    let blend_constants = unsafe { *blend_constants };

    unsafe { CommandBuffer::from_handle_mut(command_buffer) }.set_blend_constants(blend_constants);
}

/// `vkCmdSetDepthBounds`.
///
/// # Safety
///
/// - `command_buffer` must be a valid handle returned by [`CommandBuffer::into_handle`] that is
///   not being recorded into by another thread.
pub unsafe extern "system" fn cmd_set_depth_bounds(
    command_buffer: vk::CommandBuffer,
    min_depth_bounds: f32,
    max_depth_bounds: f32,
) {
    unsafe { CommandBuffer::from_handle_mut(command_buffer) }
        .set_depth_bounds(min_depth_bounds..=max_depth_bounds);
}

/// `vkCmdSetStencilCompareMask`. A `face_mask` that names neither face changes nothing.
///
/// # Safety
///
/// - `command_buffer` must be a valid handle returned by [`CommandBuffer::into_handle`] that is
///   not being recorded into by another thread.
pub unsafe extern "system" fn cmd_set_stencil_compare_mask(
    command_buffer: vk::CommandBuffer,
    face_mask: vk::StencilFaceFlags,
    compare_mask: u32,
) {
    if let Some(faces) = StencilFaces::from_flags(face_mask) {
        unsafe { CommandBuffer::from_handle_mut(command_buffer) }
            .set_stencil_compare_mask(faces, compare_mask);
    }
}

/// `vkCmdSetStencilWriteMask`. A `face_mask` that names neither face changes nothing.
///
/// # Safety
///
/// - `command_buffer` must be a valid handle returned by [`CommandBuffer::into_handle`] that is
///   not being recorded into by another thread.
pub unsafe extern "system" fn cmd_set_stencil_write_mask(
    command_buffer: vk::CommandBuffer,
    face_mask: vk::StencilFaceFlags,
    write_mask: u32,
) {
    if let Some(faces) = StencilFaces::from_flags(face_mask) {
        unsafe { CommandBuffer::from_handle_mut(command_buffer) }
            .set_stencil_write_mask(faces, write_mask);
    }
}

/// `vkCmdSetStencilReference`. A `face_mask` that names neither face changes nothing.
///
/// # Safety
///
/// - `command_buffer` must be a valid handle returned by [`CommandBuffer::into_handle`] that is
///   not being recorded into by another thread.
pub unsafe extern "system" fn cmd_set_stencil_reference(
    command_buffer: vk::CommandBuffer,
    face_mask: vk::StencilFaceFlags,
    reference: u32,
) {
    if let Some(faces) = StencilFaces::from_flags(face_mask) {
        unsafe { CommandBuffer::from_handle_mut(command_buffer) }
            .set_stencil_reference(faces, reference);
    }
}

// Vulkan allows the array pointers to be dangling or null when the count is zero.
unsafe fn slice_or_empty<'a, T>(ptr: *const T, len: u32) -> &'a [T] {
    if len == 0 {
        &[]
    } else {
        unsafe { slice::from_raw_parts(ptr, len as usize) }
    }
}
