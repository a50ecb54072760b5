//! 24-bit RGB pixel

/// Maximum value of one color channel.
pub const MAX_CHANNEL: u8 = u8::MAX;

/// One pixel with three independent 8-bit channels.
///
/// There is no alpha channel. Channel order in memory is red, green, blue;
/// the on-disk blue-green-red order is the codec's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Pixel {
    /// Pure black (0, 0, 0)
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);
    /// Pure white (255, 255, 255)
    pub const WHITE: Pixel = Pixel::new(MAX_CHANNEL, MAX_CHANNEL, MAX_CHANNEL);

    /// Create a pixel from red, green and blue channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a gray pixel with all channels equal to `value`.
    #[inline]
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Channels as an `[r, g, b]` array.
    #[inline]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Every channel mapped to `255 - channel`.
    #[inline]
    pub const fn inverted(self) -> Self {
        Self::new(
            MAX_CHANNEL - self.r,
            MAX_CHANNEL - self.g,
            MAX_CHANNEL - self.b,
        )
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<(u8, u8, u8)> for Pixel {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}
