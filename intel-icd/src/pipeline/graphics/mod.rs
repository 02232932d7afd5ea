// Copyright (c) 2024 The intel-icd developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Graphics pipeline state descriptors.
//!
//! These are the API-level values the application hands to the dynamic state commands. They are
//! resolution independent; the [`command_buffer`](crate::command_buffer) module turns them into
//! hardware state.

pub mod depth_stencil;
pub mod rasterization;
pub mod viewport;
