//! Channel identifiers and channel storage types.
//!
//! A channel value lives in an unsigned integer of 8, 16 or 32 bits. The
//! pipeline computes in `f64` on the *raw* channel range (0..=255 for 8-bit
//! and so on) and converts back with the legacy `+0.5`-then-truncate cast,
//! which keeps 8/16/32-bit outputs bit-identical to the reference behaviour.

/// Colour channel identifier.
///
/// The index order is fixed: R=0, G=1, B=2, A=3. RGB images simply never
/// address index 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red channel.
    Red,
    /// Green channel.
    Green,
    /// Blue channel.
    Blue,
    /// Alpha (opacity) channel.
    Alpha,
}

impl Channel {
    /// Channels in storage index order.
    pub const ORDER: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    /// Returns the storage index of this channel.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }
}

/// Trait for channel storage types.
///
/// Implemented for `u8`, `u16` and `u32`. Unlike float-normalised pixel
/// traits, values convert to `f64` *unscaled*: a `u8` of 255 becomes
/// `255.0`. Interpolation and gain math happen on that raw range and clamp
/// against [`MIN`](ChannelStorage::MIN)/[`MAX`](ChannelStorage::MAX) before
/// the final cast.
pub trait ChannelStorage:
    Copy + Clone + Default + Send + Sync + PartialOrd + std::fmt::Debug + 'static
{
    /// Number of bits per channel value.
    const BITS: u32;

    /// Minimum storable value, as `f64`.
    const MIN: f64;

    /// Maximum storable value, as `f64`.
    const MAX: f64;

    /// Converts to `f64` without rescaling.
    fn to_f64(self) -> f64;

    /// Converts from `f64` with the legacy `+0.5` truncating cast
    /// (round-half-up). The input is expected to be clamped to
    /// `[MIN, MAX]` already.
    fn from_f64(v: f64) -> Self;
}

impl ChannelStorage for u8 {
    const BITS: u32 = 8;
    const MIN: f64 = 0.0;
    const MAX: f64 = 255.0;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        (v + 0.5) as u8
    }
}

impl ChannelStorage for u16 {
    const BITS: u32 = 16;
    const MIN: f64 = 0.0;
    const MAX: f64 = 65535.0;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        (v + 0.5) as u16
    }
}

impl ChannelStorage for u32 {
    const BITS: u32 = 32;
    const MIN: f64 = 0.0;
    const MAX: f64 = 4294967295.0;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        (v + 0.5) as u32
    }
}
