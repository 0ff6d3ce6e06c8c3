//! Pixel lookup for a single sample coordinate.

use glam::Vec2;
use vidmap_core::color::rgb;
use vidmap_frame::Frame;

/// Maps a sample UV to a pixel in `frame` and returns its packed color.
///
/// `u` runs left to right and `v` bottom to top; the frame is stored top row
/// first, so the row is flipped. Coordinates that land outside the frame,
/// including NaN, return `None` and are never read.
#[must_use]
pub fn sample(frame: &Frame, uv: Vec2) -> Option<u32> {
    let (x, y) = pixel_coords(frame.width(), frame.height(), uv)?;
    let row = frame.height() - 1 - y;
    let [r, g, b] = frame.rgb_at(x, row)?;
    Some(rgb(r, g, b))
}

/// Column and bottom-up row for `uv`, or `None` outside the frame.
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
fn pixel_coords(width: u32, height: u32, uv: Vec2) -> Option<(u32, u32)> {
    let max_x = width.checked_sub(1)? as f32;
    let max_y = height.checked_sub(1)? as f32;
    let x = (uv.x * max_x).round();
    let y = (uv.y * max_y).round();
    // Range checks are false for NaN.
    if (0.0..=max_x).contains(&x) && (0.0..=max_y).contains(&y) {
        Some((x as u32, y as u32))
    } else {
        None
    }
}
