//! Light Flags

use bitflags::bitflags;

bitflags! {
    /// Stores combination of flags describing how a light interacts with
    /// participating media.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct LightFlags: u8 {
        /// Light scatters in the atmosphere and lights dust halos.
        const ATMOSPHERE = 1;

        /// Light is attenuated by the atmosphere on its way to a surface.
        const ATMOSPHERIC_ATTENUATION = 2;
    }
}

impl LightFlags {
    /// Tests a single flag and returns whether it is set or not.
    ///
    /// * `other` - Flag to match.
    pub fn matches(&self, other: Self) -> bool {
        self.intersects(other)
    }
}

impl Default for LightFlags {
    /// Lights interact with the atmosphere unless told otherwise.
    fn default() -> Self {
        Self::ATMOSPHERE | Self::ATMOSPHERIC_ATTENUATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags() {
        let flags = LightFlags::default();
        assert!(flags.matches(LightFlags::ATMOSPHERE));
        assert!(flags.matches(LightFlags::ATMOSPHERIC_ATTENUATION));
        assert!(!LightFlags::empty().matches(LightFlags::ATMOSPHERE));
    }
}
