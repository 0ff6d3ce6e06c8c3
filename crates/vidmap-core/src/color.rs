//! Packed ARGB colors written into the output color buffer.

/// Sentinel written for points that have nothing to sample (transparent black).
pub const NO_COLOR: u32 = 0;

/// Packs an opaque color as `0xAARRGGBB`.
#[must_use]
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Red channel of a packed color.
#[must_use]
pub const fn red(color: u32) -> u8 {
    ((color >> 16) & 0xFF) as u8
}

/// Green channel of a packed color.
#[must_use]
pub const fn green(color: u32) -> u8 {
    ((color >> 8) & 0xFF) as u8
}

/// Blue channel of a packed color.
#[must_use]
pub const fn blue(color: u32) -> u8 {
    (color & 0xFF) as u8
}

/// Alpha channel of a packed color.
#[must_use]
pub const fn alpha(color: u32) -> u8 {
    (color >> 24) as u8
}
