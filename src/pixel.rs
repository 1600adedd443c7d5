/// Pixel memory layout of an [`crate::Image`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Single channel, 8-bit grayscale.
    Gray,
    /// 3 channels, 8-bit, stored R,G,B.
    Rgb,
    /// 4 channels, 8-bit, stored A,R,G,B.
    Argb,
}

impl PixelFormat {
    /// Bytes per pixel for this format.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
            Self::Argb => 4,
        }
    }

    /// Number of channels.
    pub fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
            Self::Argb => 4,
        }
    }

    /// Whether pixels carry an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Argb)
    }
}
