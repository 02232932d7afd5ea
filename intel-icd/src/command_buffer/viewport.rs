// Copyright (c) 2024 The intel-icd developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Hardware encoding of the viewport and scissor state.
//!
//! Setting the viewports and scissors of a command buffer produces four arrays of hardware
//! state, stored back to back in a single fixed-capacity word buffer:
//!
//! - `SF_VIEWPORT`: the scale and translation applied to normalized device coordinates.
//! - `CLIP_VIEWPORT`: the guardband, expressed in normalized device coordinates.
//! - `CC_VIEWPORT`: the depth range fragments are clamped to.
//! - `SCISSOR_RECT`: the inclusive pixel rectangle of each scissor box.
//!
//! On Gen7 and later the hardware reads `SF_VIEWPORT` and `CLIP_VIEWPORT` from one combined
//! `SF_CLIP_VIEWPORT` array, so the clip entries are interleaved with the SF entries. Gen6
//! keeps them apart. See [`ViewportLayout`].
//!
//! All floating-point values are stored as their IEEE-754 bit patterns.

use crate::{
    device::MAX_VIEWPORTS,
    pipeline::graphics::viewport::{Scissor, Viewport},
    Gen,
};
use std::fmt::{Debug, Error as FmtError, Formatter};

/// Number of meaningful words in an `SF_VIEWPORT` entry.
pub const SF_VIEWPORT_LEN: usize = 8;

/// Number of words in a `CLIP_VIEWPORT` entry.
pub const CLIP_VIEWPORT_LEN: usize = 4;

/// Number of words in a `CC_VIEWPORT` entry.
pub const CC_VIEWPORT_LEN: usize = 2;

/// Number of words in a `SCISSOR_RECT` entry.
pub const SCISSOR_RECT_LEN: usize = 2;

/// Capacity in words of the viewport state buffer.
///
/// This is the encoded size of [`MAX_VIEWPORTS`] viewports in the larger of the two layouts.
pub const VIEWPORT_STATE_CAPACITY: usize = MAX_VIEWPORTS as usize * (16 + 2 + 2);

/// `SCISSOR_RECT` of a scissor box with no area.
///
/// The rectangle is inclusive, so a zero-sized box is expressed with a minimum corner at (1, 1)
/// that lies past the maximum corner at (0, 0).
const SCISSOR_RECT_EMPTY: [u32; 2] = [1 << 16 | 1, 0];

/// Side length of the guardband, in pixels.
const GUARDBAND_LEN: i32 = 8192;

/// Returns the half-range of the screen-space coordinates the generation supports.
///
/// Valid coordinates lie in `[-extent, extent - 1]`.
#[inline]
pub fn guardband_extent(generation: Gen) -> i32 {
    if generation >= Gen::GEN7 {
        32768
    } else {
        16384
    }
}

/// The screen-space rectangle primitives must fit in to skip exact clipping.
///
/// The hardware only renders objects whose screen-space bounding box is no larger than 8K in
/// either direction correctly, so the guardband is an 8K square. It is centered on the viewport
/// when possible so that primitives failing the viewport test have a better chance of passing
/// the guardband test, and moved inwards when it would leave the valid coordinate range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Guardband {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Guardband {
    /// Computes the guardband for a viewport centered at `center`, in integer pixels.
    pub fn new(generation: Gen, center: [i32; 2]) -> Guardband {
        let extent = guardband_extent(generation);
        let half_len = GUARDBAND_LEN / 2;
        let center_x = clamp_guardband_center(center[0], extent);
        let center_y = clamp_guardband_center(center[1], extent);

        Guardband {
            min_x: center_x - half_len,
            max_x: center_x + half_len,
            min_y: center_y - half_len,
            max_y: center_y + half_len,
        }
    }

    /// Returns the guardband relative to a viewport, as `CLIP_VIEWPORT` words.
    fn clip_viewport(&self, scale: [f32; 3], translate: [f32; 3]) -> [u32; CLIP_VIEWPORT_LEN] {
        let scale_x = scale[0].abs();
        let scale_y = scale[1].abs();

        [
            ((self.min_x as f32 - translate[0]) / scale_x).to_bits(),
            ((self.max_x as f32 - translate[0]) / scale_x).to_bits(),
            ((self.min_y as f32 - translate[1]) / scale_y).to_bits(),
            ((self.max_y as f32 - translate[1]) / scale_y).to_bits(),
        ]
    }
}

/// Moves a guardband center along one axis so that the guardband stays within
/// `[-extent, extent - 1]`.
///
/// When pushed against the upper bound, the center lands on `extent - half_len`, leaving the
/// guardband's maximum one past the last valid coordinate. The hardware accepts this.
pub(crate) fn clamp_guardband_center(center: i32, extent: i32) -> i32 {
    let half_len = GUARDBAND_LEN / 2;

    // `center - half_len < -extent` and `center + half_len > extent - 1`, rearranged so that
    // centers near the `i32` limits can't overflow.
    if center < -extent + half_len {
        -extent + half_len
    } else if center > extent - 1 - half_len {
        extent - half_len
    } else {
        center
    }
}

/// How the viewport arrays are laid out for a hardware generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportLayout {
    /// Gen6: an array of 8-word `SF_VIEWPORT`s followed by an array of 4-word
    /// `CLIP_VIEWPORT`s.
    Separate,

    /// Gen7 and Gen7.5: a single array of 16-word `SF_CLIP_VIEWPORT`s, with the clip entry at
    /// word 8 of each slot.
    Interleaved,
}

impl ViewportLayout {
    /// Returns the layout the hardware of `generation` reads.
    ///
    /// # Panics
    ///
    /// - Panics if `generation` is not between Gen6 and Gen7.5 inclusive.
    pub fn for_generation(generation: Gen) -> ViewportLayout {
        assert!(
            (Gen::GEN6..=Gen::GEN7_5).contains(&generation),
            "viewport state can't be encoded for Gen{}",
            generation,
        );

        if generation >= Gen::GEN7 {
            ViewportLayout::Interleaved
        } else {
            ViewportLayout::Separate
        }
    }

    /// Returns the distance in words between two consecutive `SF_VIEWPORT` entries.
    #[inline]
    pub const fn sf_stride(self) -> usize {
        match self {
            ViewportLayout::Separate => 8,
            ViewportLayout::Interleaved => 16,
        }
    }

    /// Returns the distance in words between two consecutive `CLIP_VIEWPORT` entries.
    #[inline]
    pub const fn clip_stride(self) -> usize {
        match self {
            ViewportLayout::Separate => 4,
            ViewportLayout::Interleaved => 16,
        }
    }

    /// Computes where each array starts for `count` viewports, and the total length.
    ///
    /// # Panics
    ///
    /// - Panics if `count` is greater than [`MAX_VIEWPORTS`].
    pub fn plan(self, count: u32) -> ViewportOffsets {
        assert!(
            count <= MAX_VIEWPORTS,
            "{} viewports requested, but at most {} fit in the state buffer",
            count,
            MAX_VIEWPORTS,
        );

        let count = count as usize;
        let mut len = self.sf_stride() * count;

        let clip_pos = match self {
            ViewportLayout::Interleaved => SF_VIEWPORT_LEN,
            ViewportLayout::Separate => {
                let pos = len;
                len += self.clip_stride() * count;
                pos
            }
        };

        let cc_pos = len;
        len += CC_VIEWPORT_LEN * count;

        let scissor_rect_pos = len;
        len += SCISSOR_RECT_LEN * count;

        assert!(len <= VIEWPORT_STATE_CAPACITY);

        ViewportOffsets {
            len,
            clip_pos,
            cc_pos,
            scissor_rect_pos,
        }
    }
}

/// Word offsets of the viewport arrays within the state buffer. `SF_VIEWPORT` always starts at
/// offset 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportOffsets {
    /// Total length in words.
    pub len: usize,
    pub clip_pos: usize,
    pub cc_pos: usize,
    pub scissor_rect_pos: usize,
}

/// Returns the `SCISSOR_RECT` words of a scissor box.
///
/// The first word holds the minimum corner and the second the inclusive maximum corner, with y
/// in the high half and x in the low half. Coordinates wrap to the 16 bits of the register.
pub fn encode_scissor_rect(scissor: &Scissor) -> [u32; SCISSOR_RECT_LEN] {
    if scissor.is_empty() {
        return SCISSOR_RECT_EMPTY;
    }

    let [offset_x, offset_y] = scissor.offset.map(|v| v as u32);
    let [width, height] = scissor.extent;

    let min_x = offset_x & 0xffff;
    let min_y = offset_y & 0xffff;
    let max_x = offset_x.wrapping_add(width).wrapping_sub(1) & 0xffff;
    let max_y = offset_y.wrapping_add(height).wrapping_sub(1) & 0xffff;

    [min_y << 16 | min_x, max_y << 16 | max_x]
}

/// The encoded viewport and scissor state of a command buffer.
///
/// Every call to [`set`](Self::set) overwrites the whole state. The buffer never grows; its
/// capacity covers [`MAX_VIEWPORTS`] viewports in either layout.
#[derive(Clone)]
pub struct DynamicViewportState {
    layout: ViewportLayout,
    viewport_count: u32,
    offsets: ViewportOffsets,
    cmd: [u32; VIEWPORT_STATE_CAPACITY],
}

impl DynamicViewportState {
    /// Encodes `viewports` and `scissors` for the hardware of `generation`, replacing the
    /// previous state.
    ///
    /// The caller must have checked that both slices have the same length, that no viewport has
    /// a zero width or height, and that the count is within the GPU's limit.
    ///
    /// # Panics
    ///
    /// - Panics if `generation` is not between Gen6 and Gen7.5 inclusive.
    /// - Panics if more than [`MAX_VIEWPORTS`] viewports are provided.
    /// - Panics if `viewports` and `scissors` have different lengths.
    pub(crate) fn set(&mut self, generation: Gen, viewports: &[Viewport], scissors: &[Scissor]) {
        assert_eq!(viewports.len(), scissors.len());

        let layout = ViewportLayout::for_generation(generation);
        let count = u32::try_from(viewports.len()).unwrap_or(u32::MAX);
        let offsets = layout.plan(count);

        self.layout = layout;
        self.viewport_count = count;
        self.offsets = offsets;
        self.cmd[..offsets.len].fill(0);

        for (index, viewport) in viewports.iter().enumerate() {
            let scale = viewport.scale();
            let translate = viewport.translate(scale);
            let guardband =
                Guardband::new(generation, [translate[0] as i32, translate[1] as i32]);

            let sf = index * layout.sf_stride();
            self.cmd[sf..sf + SF_VIEWPORT_LEN].copy_from_slice(&[
                scale[0].to_bits(),
                scale[1].to_bits(),
                scale[2].to_bits(),
                translate[0].to_bits(),
                translate[1].to_bits(),
                translate[2].to_bits(),
                0,
                0,
            ]);

            let clip = offsets.clip_pos + index * layout.clip_stride();
            self.cmd[clip..clip + CLIP_VIEWPORT_LEN]
                .copy_from_slice(&guardband.clip_viewport(scale, translate));

            let cc = offsets.cc_pos + index * CC_VIEWPORT_LEN;
            self.cmd[cc..cc + CC_VIEWPORT_LEN].copy_from_slice(&[
                viewport.depth_range.start().to_bits(),
                viewport.depth_range.end().to_bits(),
            ]);
        }

        for (index, scissor) in scissors.iter().enumerate() {
            let rect = offsets.scissor_rect_pos + index * SCISSOR_RECT_LEN;
            self.cmd[rect..rect + SCISSOR_RECT_LEN].copy_from_slice(&encode_scissor_rect(scissor));
        }
    }

    /// Returns the number of viewports (and scissors) currently set.
    #[inline]
    pub fn viewport_count(&self) -> u32 {
        self.viewport_count
    }

    /// Returns the layout of the current state.
    #[inline]
    pub fn layout(&self) -> ViewportLayout {
        self.layout
    }

    /// Returns the length of the encoded state, in words.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len
    }

    /// Returns the word offset of the first `CLIP_VIEWPORT` entry.
    #[inline]
    pub fn clip_pos(&self) -> usize {
        self.offsets.clip_pos
    }

    /// Returns the word offset of the `CC_VIEWPORT` array.
    #[inline]
    pub fn cc_pos(&self) -> usize {
        self.offsets.cc_pos
    }

    /// Returns the word offset of the `SCISSOR_RECT` array.
    #[inline]
    pub fn scissor_rect_pos(&self) -> usize {
        self.offsets.scissor_rect_pos
    }

    /// Returns the encoded state.
    #[inline]
    pub fn as_words(&self) -> &[u32] {
        &self.cmd[..self.offsets.len]
    }

    /// Returns the encoded state as bytes, in native endianness.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_words())
    }

    /// Returns the `SF_VIEWPORT` entry of the viewport at `index`.
    ///
    /// # Panics
    ///
    /// - Panics if `index` is not less than the viewport count.
    pub fn sf_viewport(&self, index: u32) -> &[u32] {
        let pos = self.entry_index(index) * self.layout.sf_stride();
        &self.cmd[pos..pos + SF_VIEWPORT_LEN]
    }

    /// Returns the `CLIP_VIEWPORT` entry of the viewport at `index`.
    ///
    /// # Panics
    ///
    /// - Panics if `index` is not less than the viewport count.
    pub fn clip_viewport(&self, index: u32) -> &[u32] {
        let pos = self.offsets.clip_pos + self.entry_index(index) * self.layout.clip_stride();
        &self.cmd[pos..pos + CLIP_VIEWPORT_LEN]
    }

    /// Returns the `CC_VIEWPORT` entry of the viewport at `index`.
    ///
    /// # Panics
    ///
    /// - Panics if `index` is not less than the viewport count.
    pub fn cc_viewport(&self, index: u32) -> &[u32] {
        let pos = self.offsets.cc_pos + self.entry_index(index) * CC_VIEWPORT_LEN;
        &self.cmd[pos..pos + CC_VIEWPORT_LEN]
    }

    /// Returns the `SCISSOR_RECT` entry of the scissor at `index`.
    ///
    /// # Panics
    ///
    /// - Panics if `index` is not less than the viewport count.
    pub fn scissor_rect(&self, index: u32) -> &[u32] {
        let pos = self.offsets.scissor_rect_pos + self.entry_index(index) * SCISSOR_RECT_LEN;
        &self.cmd[pos..pos + SCISSOR_RECT_LEN]
    }

    fn entry_index(&self, index: u32) -> usize {
        assert!(
            index < self.viewport_count,
            "viewport index {} is out of range for {} viewports",
            index,
            self.viewport_count,
        );

        index as usize
    }
}

impl Default for DynamicViewportState {
    #[inline]
    fn default() -> Self {
        DynamicViewportState {
            layout: ViewportLayout::Interleaved,
            viewport_count: 0,
            offsets: ViewportOffsets::default(),
            cmd: [0; VIEWPORT_STATE_CAPACITY],
        }
    }
}

impl Debug for DynamicViewportState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.debug_struct("DynamicViewportState")
            .field("layout", &self.layout)
            .field("viewport_count", &self.viewport_count)
            .field("offsets", &self.offsets)
            .field("cmd", &self.as_words())
            .finish()
    }
}
