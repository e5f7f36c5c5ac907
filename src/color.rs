use crate::error::MinimapError;
use macroquad::prelude::Color;

/// A packed RGBA8888 color, `0xRRGGBBAA`.
///
/// `PackedColor(0)` is fully transparent black and doubles as the
/// "no color" sentinel returned for structures without a display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedColor(pub u32);

impl PackedColor {
    /// The transparent "no color" sentinel.
    pub const TRANSPARENT: PackedColor = PackedColor(0);
    /// Opaque black.
    pub const BLACK: PackedColor = PackedColor(0x0000_00ff);

    /// Packs four 8-bit channels.
    #[inline]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        PackedColor((r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | a as u32)
    }

    /// Packs an opaque color.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 0xff)
    }

    /// Raw packed value.
    #[inline] pub fn raw(self) -> u32 { self.0 }
    /// True for the "no color" sentinel.
    #[inline] pub fn is_transparent(self) -> bool { self.0 == 0 }

    /// Byte order as uploaded to the texture: `[r, g, b, a]`.
    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Parses `#rrggbb` (opaque) or `#rrggbbaa`; the leading `#` is optional.
    pub fn from_hex(s: &str) -> Result<Self, MinimapError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let bad = || MinimapError::InvalidColor(s.to_owned());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| bad())?;
        match hex.len() {
            6 => Ok(PackedColor(value << 8 | 0xff)),
            8 => Ok(PackedColor(value)),
            _ => Err(bad()),
        }
    }
}

impl From<PackedColor> for Color {
    fn from(c: PackedColor) -> Self {
        let [r, g, b, a] = c.to_bytes();
        Color::from_rgba(r, g, b, a)
    }
}

impl From<Color> for PackedColor {
    fn from(c: Color) -> Self {
        let [r, g, b, a]: [u8; 4] = c.into();
        PackedColor::from_rgba8(r, g, b, a)
    }
}
