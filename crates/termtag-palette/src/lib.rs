//! Nearest-color lookup for the xterm 256-color palette.
//!
//! The upper 240 entries of the palette are laid out in two regular blocks:
//!
//! | Indices   | Layout |
//! |-----------|--------|
//! | `16–231`  | a 6×6×6 color cube with per-channel levels `0, 95, 135, 175, 215, 255` |
//! | `232–255` | a 24-step grayscale ramp, `8, 18, …, 238` on every channel |
//!
//! [`rgb_to_color_index`] finds the best cube entry and the best gray entry for
//! a color and returns whichever is closer in RGB space. When both are equally
//! close the gray entry is returned.
//!
//! # Example
//!
//! ```rust
//! use termtag_palette::rgb_to_color_index;
//!
//! // Pure red lands exactly on a cube corner.
//! assert_eq!(rgb_to_color_index(1.0, 0.0, 0.0).unwrap(), 196);
//!
//! // A mid gray is better served by the grayscale ramp.
//! assert_eq!(rgb_to_color_index(0.5, 0.5, 0.5).unwrap(), 244);
//!
//! // Components must be fractions in [0, 1].
//! assert!(rgb_to_color_index(1.5, 0.0, 0.0).is_err());
//! ```

use std::fmt;

use thiserror::Error;

/// A palette index in `0..=255`.
pub type ColorIndex = u8;

/// Per-channel levels of the 6×6×6 color cube.
pub const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// First index of the color cube.
pub const CUBE_START: ColorIndex = 16;

/// First index of the grayscale ramp.
pub const GRAY_START: ColorIndex = 232;

const GRAY_STEPS: i64 = 24;

// ─── Errors ─────────────────────────────────────────────────────────────────

/// A color channel, used to report which component was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Errors produced by palette lookups.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PaletteError {
    /// A component was negative, above one, or not a number.
    #[error("{channel} component {value} is out of bounds; should be a number between 0 and 1")]
    OutOfRange { channel: Channel, value: f64 },
}

/// Result type for palette operations.
pub type Result<T> = std::result::Result<T, PaletteError>;

// ─── RGB type ───────────────────────────────────────────────────────────────

/// An RGB triplet in byte space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    fn components(self) -> [f64; 3] {
        [f64::from(self.0), f64::from(self.1), f64::from(self.2)]
    }
}

/// Returns the RGB value a cube or grayscale index stands for.
///
/// The 16 system colors (`0–15`) are user-themable and have no fixed value,
/// so they yield `None`.
pub fn color_index_to_rgb(index: ColorIndex) -> Option<Rgb> {
    if index >= GRAY_START {
        Some(gray_index_to_rgb(index))
    } else if index >= CUBE_START {
        Some(cube_index_to_rgb(index))
    } else {
        None
    }
}

// ─── Public entry point ─────────────────────────────────────────────────────

/// Converts an RGB color to the closest xterm-256color palette index.
///
/// Each component is the fraction of that primary, between `0.0` and `1.0`
/// inclusive. Anything else (including NaN) is rejected with
/// [`PaletteError::OutOfRange`].
pub fn rgb_to_color_index(red: f64, green: f64, blue: f64) -> Result<ColorIndex> {
    let red = checked_component(Channel::Red, red)?;
    let green = checked_component(Channel::Green, green)?;
    let blue = checked_component(Channel::Blue, blue)?;

    Ok(closest_index([red * 255.0, green * 255.0, blue * 255.0]))
}

fn checked_component(channel: Channel, value: f64) -> Result<f64> {
    // `contains` is false for NaN.
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(PaletteError::OutOfRange { channel, value })
    }
}

/// Picks between the cube and gray candidates for a color in byte space.
fn closest_index(color: [f64; 3]) -> ColorIndex {
    let gray = rgb_to_gray_index(color);
    let cube = rgb_to_cube_index(color);

    let gray_distance = distance(color, gray_index_to_rgb(gray).components());
    let cube_distance = distance(color, cube_index_to_rgb(cube).components());

    if gray_distance <= cube_distance {
        gray
    } else {
        cube
    }
}

// ─── Color cube ─────────────────────────────────────────────────────────────

/// Index into [`CUBE_LEVELS`] of the level nearest to `component`.
///
/// Scans upward and only replaces the best match on a strictly smaller
/// difference, so the lower level wins a tie.
fn nearest_cube_level(component: f64) -> u8 {
    let mut best_index = 0u8;
    let mut best_difference = f64::INFINITY;
    for (index, level) in (0u8..).zip(CUBE_LEVELS) {
        let difference = (component - f64::from(level)).abs();
        if difference < best_difference {
            best_index = index;
            best_difference = difference;
        }
    }
    best_index
}

fn rgb_to_cube_index([red, green, blue]: [f64; 3]) -> ColorIndex {
    CUBE_START + 36 * nearest_cube_level(red) + 6 * nearest_cube_level(green) + nearest_cube_level(blue)
}

fn cube_index_to_rgb(index: ColorIndex) -> Rgb {
    let offset = usize::from(index - CUBE_START);
    Rgb(
        CUBE_LEVELS[offset / 36],
        CUBE_LEVELS[(offset % 36) / 6],
        CUBE_LEVELS[offset % 6],
    )
}

// ─── Grayscale ramp ─────────────────────────────────────────────────────────

/// Rec. 709 luma of a byte-space color.
fn luma([red, green, blue]: [f64; 3]) -> f64 {
    0.2126 * red + 0.7152 * green + 0.0722 * blue
}

fn rgb_to_gray_index(color: [f64; 3]) -> ColorIndex {
    let step = ((luma(color) - 8.0) / 10.0).round() as i64;
    // Clamped into 0..=23, so the cast cannot truncate.
    GRAY_START + step.clamp(0, GRAY_STEPS - 1) as u8
}

fn gray_index_to_rgb(index: ColorIndex) -> Rgb {
    let value = 8 + (index - GRAY_START) * 10;
    Rgb(value, value, value)
}

/// Squared Euclidean distance in byte space.
fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)
}
