//! Percentage to color gradient for status display.
//!
//! Maps a percentage onto a hue range (red at 0, green at 120 by default)
//! and converts the resulting HSL color to RGB for terminal output.

use crossterm::style::{Color, Stylize};

/// Hue used for 0% by [`alert_percent_color`] (red).
pub const DEFAULT_START_HUE: f64 = 0.0;
/// Hue used for 100% by [`alert_percent_color`] (green).
pub const DEFAULT_END_HUE: f64 = 120.0;

/// Lightness applied to every gradient color.
const LIGHTNESS: f64 = 50.0;

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Wrap `text` in a 24-bit foreground color escape sequence.
    pub fn paint(&self, text: &str) -> String {
        text.with(Color::from(*self)).to_string()
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// Convert an HSL color to RGB.
///
/// `hue` is in degrees and wraps around 360. `saturation` and `lightness`
/// are percentages (0-100). Each channel is scaled to 0-255 with
/// [`f64::round`], i.e. halves round away from zero.
pub fn hsl_to_rgb(hue: i64, saturation: f64, lightness: f64) -> Rgb {
    let h = hue.rem_euclid(360) as f64 / 360.0;
    let s = (saturation / 100.0).clamp(0.0, 1.0);
    let l = (lightness / 100.0).clamp(0.0, 1.0);

    if s == 0.0 {
        let v = to_channel(l);
        return Rgb::new(v, v, v);
    }

    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;

    Rgb::new(
        to_channel(hue_to_channel(m1, m2, h + 1.0 / 3.0)),
        to_channel(hue_to_channel(m1, m2, h)),
        to_channel(hue_to_channel(m1, m2, h - 1.0 / 3.0)),
    )
}

fn hue_to_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Hue reached by the gradient at `percent`.
///
/// Below or at `clip` the hue stays pinned at `start_hue`; above it the hue
/// moves linearly towards `end_hue`, reaching it at 100%.
pub fn gradient_hue(percent: f64, clip: f64, start_hue: f64, end_hue: f64) -> f64 {
    let a = if percent <= clip {
        0.0
    } else {
        (percent - clip) / (100.0 - clip)
    };
    let b = (end_hue - start_hue).abs() * a;
    if end_hue > start_hue {
        start_hue + b
    } else {
        start_hue - b
    }
}

/// Pick an RGB color for a percentage.
///
/// `percent` must be within 0-100; values outside that range are a caller
/// error and produce hues beyond the requested range. `clip` (0-100) shifts
/// the start of the gradient, `saturation` (0-100) controls how vivid the
/// colors are and `start_hue`/`end_hue` pick the range (0 = red,
/// 120 = green). Lightness is fixed at 50%.
pub fn pick_color(percent: f64, clip: f64, saturation: f64, start_hue: f64, end_hue: f64) -> Rgb {
    let hue = gradient_hue(percent, clip, start_hue, end_hue).round() as i64;
    hsl_to_rgb(hue, saturation, LIGHTNESS)
}

/// Color for a percentage with no clipping and full saturation.
///
/// Red at 0%, green at 100% with the default hues. Swap `start_hue` and
/// `end_hue` to invert the scale.
pub fn alert_percent_color(percent: f64, start_hue: f64, end_hue: f64) -> Rgb {
    pick_color(percent, 0.0, 100.0, start_hue, end_hue)
}
