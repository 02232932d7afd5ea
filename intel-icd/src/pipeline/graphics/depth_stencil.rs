// Copyright (c) 2024 The intel-icd developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Configures the depth and stencil tests.
//!
//! Only the parts that can be set dynamically on a command buffer live here: the depth bounds
//! and the per-face stencil masks and reference values.

use ash::vk;

/// Specifies a face for stencil operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum StencilFaces {
    Front = vk::StencilFaceFlags::FRONT.as_raw(),
    Back = vk::StencilFaceFlags::BACK.as_raw(),
    FrontAndBack = vk::StencilFaceFlags::FRONT_AND_BACK.as_raw(),
}

impl StencilFaces {
    /// Selects the faces named by a Vulkan face mask.
    ///
    /// Returns `None` if the mask names neither face. Bits other than `FRONT` and `BACK` are
    /// ignored.
    #[inline]
    pub fn from_flags(flags: vk::StencilFaceFlags) -> Option<StencilFaces> {
        match (
            flags.contains(vk::StencilFaceFlags::FRONT),
            flags.contains(vk::StencilFaceFlags::BACK),
        ) {
            (true, true) => Some(StencilFaces::FrontAndBack),
            (true, false) => Some(StencilFaces::Front),
            (false, true) => Some(StencilFaces::Back),
            (false, false) => None,
        }
    }

    #[inline]
    fn includes_front(self) -> bool {
        matches!(self, StencilFaces::Front | StencilFaces::FrontAndBack)
    }

    #[inline]
    fn includes_back(self) -> bool {
        matches!(self, StencilFaces::Back | StencilFaces::FrontAndBack)
    }
}

impl From<StencilFaces> for vk::StencilFaceFlags {
    #[inline]
    fn from(val: StencilFaces) -> Self {
        Self::from_raw(val as u32)
    }
}

/// Specifies a dynamic state value for the front and back faces.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DynamicStencilValue {
    pub front: u32,
    pub back: u32,
}

impl DynamicStencilValue {
    /// Writes `value` to the faces selected by `faces`, leaving the other face untouched.
    #[inline]
    pub fn set(&mut self, faces: StencilFaces, value: u32) {
        if faces.includes_front() {
            self.front = value;
        }

        if faces.includes_back() {
            self.back = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DynamicStencilValue, StencilFaces};
    use ash::vk;

    #[test]
    fn from_flags() {
        assert_eq!(
            StencilFaces::from_flags(vk::StencilFaceFlags::FRONT),
            Some(StencilFaces::Front),
        );
        assert_eq!(
            StencilFaces::from_flags(vk::StencilFaceFlags::BACK),
            Some(StencilFaces::Back),
        );
        assert_eq!(
            StencilFaces::from_flags(vk::StencilFaceFlags::FRONT_AND_BACK),
            Some(StencilFaces::FrontAndBack),
        );
        assert_eq!(StencilFaces::from_flags(vk::StencilFaceFlags::empty()), None);
    }

    #[test]
    fn to_flags() {
        assert_eq!(
            vk::StencilFaceFlags::from(StencilFaces::FrontAndBack),
            vk::StencilFaceFlags::FRONT | vk::StencilFaceFlags::BACK,
        );
    }

    #[test]
    fn set_selects_faces() {
        let mut value = DynamicStencilValue::default();

        value.set(StencilFaces::Front, 0xff);
        assert_eq!(value, DynamicStencilValue { front: 0xff, back: 0 });

        value.set(StencilFaces::Back, 0x0f);
        assert_eq!(value, DynamicStencilValue { front: 0xff, back: 0x0f });

        value.set(StencilFaces::FrontAndBack, 7);
        assert_eq!(value, DynamicStencilValue { front: 7, back: 7 });
    }
}
