// Copyright (c) 2024 The intel-icd developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Dynamic pipeline state of a Vulkan driver for Intel Gen6 to Gen7.5 graphics.
//!
//! # Brief summary
//!
//! - A [`Gpu`](crate::device::Gpu) describes the hardware: its [generation](crate::Gen) and how
//!   many viewports it supports. It is shared read-only by everything created on it.
//!
//! - A [`CommandBuffer`](crate::command_buffer::CommandBuffer) is a recording context. The
//!   dynamic state commands (`set_viewports_and_scissors`, `set_line_width`, `set_depth_bias`,
//!   and so on) write into its [state](crate::command_buffer::CommandBufferState), which the
//!   command stream builder reads when emitting draw calls.
//!
//! - Viewports and scissors are the only dynamic state that needs encoding. Setting them produces
//!   the exact `SF_VIEWPORT`, `CLIP_VIEWPORT`, `CC_VIEWPORT` and `SCISSOR_RECT` words the hardware
//!   of the GPU's generation reads; see the
//!   [`DynamicViewportState`](crate::command_buffer::DynamicViewportState).
//!
//! - The [`icd`] module exposes the same commands as raw `vkCmdSet*` entry points over Vulkan
//!   handles.
//!
//! ```
//! use intel_icd::command_buffer::CommandBuffer;
//! use intel_icd::device::{Gpu, GpuCreateInfo};
//! use intel_icd::pipeline::graphics::viewport::{Scissor, Viewport};
//! use intel_icd::Gen;
//!
//! let gpu = Gpu::new(GpuCreateInfo {
//!     generation: Gen::GEN7,
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let mut command_buffer = CommandBuffer::new(gpu);
//! command_buffer.set_viewports_and_scissors(
//!     &[Viewport {
//!         offset: [0.0, 0.0],
//!         extent: [800.0, 600.0],
//!         depth_range: 0.0..=1.0,
//!     }],
//!     &[Scissor {
//!         offset: [0, 0],
//!         extent: [800, 600],
//!     }],
//! );
//!
//! let viewport_state = command_buffer.state().viewport();
//! assert_eq!(viewport_state.len(), 20);
//! assert_eq!(viewport_state.scissor_rect(0), &[0, 599 << 16 | 799]);
//! ```

pub use ash::vk::Handle;
pub use generation::Gen;

#[macro_use]
mod tests;
pub mod command_buffer;
pub mod device;
mod generation;
pub mod icd;
pub mod pipeline;

/// A helper type for non-exhaustive structs.
///
/// This type cannot be constructed outside this crate. Structures with a field of this type can
/// only be constructed by calling a constructor function or `Default::default()`. The effect is
/// similar to the standard Rust `#[non_exhaustive]` attribute, except that it does not prevent
/// update syntax from being used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NonExhaustive(pub(crate) ());
