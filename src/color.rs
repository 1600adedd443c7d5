/// A 4-channel A,R,G,B color value.
///
/// Pixel accessors on [`crate::Image`] speak this type regardless of the
/// buffer's own format; formats without an alpha channel read back as fully
/// opaque and ignore alpha on write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Fully opaque color from R, G, B channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    /// Color from all four channels.
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// BT.601 luma approximation of the color channels.
    pub fn luma(self) -> u8 {
        let y = 77 * u32::from(self.r) + 150 * u32::from(self.g) + 29 * u32::from(self.b);
        (y >> 8) as u8
    }
}
