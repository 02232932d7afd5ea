// Copyright (c) 2024 The intel-icd developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Recording dynamic state into command buffers.
//!
//! A [`CommandBuffer`] is the recording context of the driver. It owns the
//! [`CommandBufferState`]: every dynamic state command writes into it, and the command stream
//! builder later reads it back when it emits draw calls. The hardware-facing part of this state,
//! the viewports and scissors, is encoded eagerly by [`DynamicViewportState`].
//!
//! Command buffers are not synchronized. As with any Vulkan command buffer, recording into one
//! from several threads at the same time must be prevented by the application.

pub use self::{
    commands::dynamic_state::*,
    state::CommandBufferState,
    viewport::{
        encode_scissor_rect, guardband_extent, DynamicViewportState, Guardband, ViewportLayout,
        ViewportOffsets, CC_VIEWPORT_LEN, CLIP_VIEWPORT_LEN, SCISSOR_RECT_LEN, SF_VIEWPORT_LEN,
        VIEWPORT_STATE_CAPACITY,
    },
};
use crate::device::{Gpu, GpuOwned};
use ash::vk::{self, Handle};
use std::sync::Arc;
use tracing::debug;

mod commands;
mod state;
mod viewport;

/// A command buffer in the recording state.
#[derive(Debug)]
pub struct CommandBuffer {
    gpu: Arc<Gpu>,
    state: CommandBufferState,
}

impl CommandBuffer {
    /// Creates a new command buffer recording for `gpu`, with all dynamic state at its default
    /// value.
    pub fn new(gpu: Arc<Gpu>) -> CommandBuffer {
        debug!(generation = %gpu.generation(), "created command buffer");

        CommandBuffer {
            gpu,
            state: CommandBufferState::default(),
        }
    }

    /// Returns the dynamic state recorded so far.
    #[inline]
    pub fn state(&self) -> &CommandBufferState {
        &self.state
    }

    /// Turns the command buffer into a dispatchable Vulkan handle.
    ///
    /// The handle must eventually be passed to [`from_handle`](Self::from_handle), or the command
    /// buffer is leaked.
    #[inline]
    pub fn into_handle(self: Box<Self>) -> vk::CommandBuffer {
        vk::CommandBuffer::from_raw(Box::into_raw(self) as usize as u64)
    }

    /// Takes back ownership of a command buffer from its handle.
    ///
    /// # Safety
    ///
    /// - `handle` must have been returned by [`into_handle`](Self::into_handle), and must not have
    ///   been passed to this function before.
    #[inline]
    pub unsafe fn from_handle(handle: vk::CommandBuffer) -> Box<CommandBuffer> {
        unsafe { Box::from_raw(handle.as_raw() as usize as *mut CommandBuffer) }
    }

    /// Returns the command buffer a handle refers to.
    ///
    /// # Safety
    ///
    /// - `handle` must have been returned by [`into_handle`](Self::into_handle), and must not have
    ///   been passed to [`from_handle`](Self::from_handle) since.
    /// - No other reference to the command buffer may exist for the lifetime `'a`.
    #[inline]
    pub unsafe fn from_handle_mut<'a>(handle: vk::CommandBuffer) -> &'a mut CommandBuffer {
        unsafe { &mut *(handle.as_raw() as usize as *mut CommandBuffer) }
    }
}

unsafe impl GpuOwned for CommandBuffer {
    #[inline]
    fn gpu(&self) -> &Arc<Gpu> {
        &self.gpu
    }
}
