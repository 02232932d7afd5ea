// Copyright (c) 2024 The intel-icd developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

// The `Gen` object is reexported from the crate root.

use std::fmt;

/// Represents a hardware generation of Intel graphics.
///
/// Generations are ordered, so `Gen::GEN7_5 > Gen::GEN7` and range checks such as
/// `(Gen::GEN6..=Gen::GEN7_5).contains(&gen)` behave as expected.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gen {
    /// Major generation number.
    pub major: u16,
    /// Minor generation number, e.g. `5` for Haswell (Gen7.5).
    pub minor: u16,
}

impl Gen {
    /// Sandy Bridge.
    pub const GEN6: Gen = Gen::new(6, 0);
    /// Ivy Bridge.
    pub const GEN7: Gen = Gen::new(7, 0);
    /// Haswell.
    pub const GEN7_5: Gen = Gen::new(7, 5);

    #[inline]
    pub const fn new(major: u16, minor: u16) -> Gen {
        Gen { major, minor }
    }
}

impl fmt::Debug for Gen {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minor == 0 {
            write!(formatter, "{}", self.major)
        } else {
            write!(formatter, "{}.{}", self.major, self.minor)
        }
    }
}

impl fmt::Display for Gen {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, formatter)
    }
}

impl Default for Gen {
    #[inline]
    fn default() -> Self {
        Gen::GEN7
    }
}

#[cfg(test)]
mod tests {
    use super::Gen;

    #[test]
    fn ordering() {
        assert!(Gen::GEN6 < Gen::GEN7);
        assert!(Gen::GEN7 < Gen::GEN7_5);
        assert!(Gen::GEN7_5 < Gen::new(8, 0));
        assert!(Gen::new(5, 0) < Gen::GEN6);
    }

    #[test]
    fn display() {
        assert_eq!(Gen::GEN6.to_string(), "6");
        assert_eq!(Gen::GEN7_5.to_string(), "7.5");
        assert_eq!(format!("{:?}", Gen::GEN7), "7");
    }
}
