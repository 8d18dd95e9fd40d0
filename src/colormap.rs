//! Named colormaps and the colormap-family heuristic
//!
//! Colormaps are piecewise-linear per channel. Each channel is a list of
//! anchors `(x, below, above)` where `below` is the value approached from the
//! left of `x` and `above` the value leaving `x` to the right, so a colormap can
//! contain sharp steps. Evenly spaced color lists are the special case
//! `below == above`.
//!
//! Built-in maps: `seismic`, `hot`, `spectral` and `dunne_rainbow`. Appending
//! `_r` to any name reverses it.

use crate::errors::{PcolorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A color in RGBA format (0.0 to 1.0)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a color from RGB (alpha = 1.0)
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0)
    }

    /// Convert to hex string, e.g. `#FF0000`
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Anchor {
    x: f32,
    below: f32,
    above: f32,
}

/// A continuous colormap sampled on `[0, 1]`
#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
    name: String,
    red: Vec<Anchor>,
    green: Vec<Anchor>,
    blue: Vec<Anchor>,
    reversed: bool,
}

impl Colormap {
    /// Colormap interpolating linearly between evenly spaced colors.
    pub fn from_colors(name: impl Into<String>, colors: &[Color]) -> Self {
        let n = colors.len();
        let anchors = |channel: fn(&Color) -> f32| -> Vec<Anchor> {
            colors
                .iter()
                .enumerate()
                .map(|(k, c)| Anchor {
                    x: k as f32 / (n - 1).max(1) as f32,
                    below: channel(c),
                    above: channel(c),
                })
                .collect()
        };
        Self {
            name: name.into(),
            red: anchors(|c: &Color| c.r),
            green: anchors(|c: &Color| c.g),
            blue: anchors(|c: &Color| c.b),
            reversed: false,
        }
    }

    /// Colormap from per-channel `(x, below, above)` anchors with `x` increasing from 0 to 1.
    pub fn from_segments(
        name: impl Into<String>,
        red: &[(f32, f32, f32)],
        green: &[(f32, f32, f32)],
        blue: &[(f32, f32, f32)],
    ) -> Self {
        let anchors = |seg: &[(f32, f32, f32)]| -> Vec<Anchor> {
            seg.iter()
                .map(|&(x, below, above)| Anchor { x, below, above })
                .collect()
        };
        Self {
            name: name.into(),
            red: anchors(red),
            green: anchors(green),
            blue: anchors(blue),
            reversed: false,
        }
    }

    /// Look up a built-in colormap, ignoring case; a trailing `_r` reverses it.
    ///
    /// # Errors
    ///
    /// Returns [`PcolorError::UnknownColormap`] for names not in the built-in table.
    pub fn by_name(name: &str) -> Result<Self> {
        let lower = name.to_ascii_lowercase();
        let (base, reversed) = match lower.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (lower.as_str(), false),
        };
        let cmap = match base {
            "seismic" => seismic(),
            "hot" => hot(),
            "spectral" => spectral(),
            "dunne_rainbow" | "dunnerainbow" => dunne_rainbow(),
            _ => {
                return Err(PcolorError::UnknownColormap {
                    name: name.to_string(),
                })
            }
        };
        Ok(if reversed { cmap.reversed() } else { cmap })
    }

    /// Reverse the colormap
    pub fn reversed(mut self) -> Self {
        self.reversed = !self.reversed;
        self.name = match self.name.strip_suffix("_r") {
            Some(base) => base.to_string(),
            None => format!("{}_r", self.name),
        };
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sample the colormap at a position (clamped to 0.0..=1.0)
    pub fn sample(&self, t: f64) -> Color {
        let mut t = t.clamp(0.0, 1.0) as f32;
        if self.reversed {
            t = 1.0 - t;
        }
        Color::rgb(
            channel_at(&self.red, t),
            channel_at(&self.green, t),
            channel_at(&self.blue, t),
        )
    }

    /// `n` colors evenly spaced over the whole colormap, both ends included.
    ///
    /// Entry `k` samples position `k / (n - 1)`; a single entry samples 0.
    pub fn lut(&self, n: usize) -> Vec<Color> {
        (0..n)
            .map(|k| self.sample(k as f64 / (n - 1).max(1) as f64))
            .collect()
    }
}

fn channel_at(anchors: &[Anchor], t: f32) -> f32 {
    let Some(last) = anchors.last() else {
        return 0.0;
    };
    if t >= last.x {
        return last.below;
    }
    for pair in anchors.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t >= a.x && t < b.x {
            let frac = (t - a.x) / (b.x - a.x);
            return a.above + frac * (b.below - a.above);
        }
    }
    anchors[0].above
}

/// Colormap families chosen from the sign and magnitude of a field's range
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColormapFamily {
    /// Diverging blue-white-red for fields that change sign
    Seismic,
    /// Sequential for non-negative fields
    Hot,
    /// Sequential, reversed, for non-positive fields
    HotReversed,
    /// Multi-hue fallback
    Spectral,
}

impl ColormapFamily {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Seismic => "seismic",
            Self::Hot => "hot",
            Self::HotReversed => "hot_r",
            Self::Spectral => "spectral",
        }
    }

    pub fn colormap(self) -> Colormap {
        match self {
            Self::Seismic => seismic(),
            Self::Hot => hot(),
            Self::HotReversed => hot().reversed(),
            Self::Spectral => spectral(),
        }
    }
}

impl fmt::Display for ColormapFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Choose a colormap family from the field's extremes.
///
/// The tests run in this order and the order matters when `min` or `max` is
/// exactly zero. The `0.1` thresholds are a rough heuristic, not a rule: the
/// third branch is not a true mirror of the second.
pub fn pick_colormap(min: f64, max: f64) -> ColormapFamily {
    if min < 0.0 && max > 0.0 {
        ColormapFamily::Seismic
    } else if max > 0.0 && min < 0.1 * max {
        ColormapFamily::Hot
    } else if min < 0.0 && max > 0.1 * min {
        ColormapFamily::HotReversed
    } else {
        ColormapFamily::Spectral
    }
}

/// Diverging dark blue, blue, white, red, dark red
pub fn seismic() -> Colormap {
    Colormap::from_colors(
        "seismic",
        &[
            Color::rgb(0.0, 0.0, 0.3),
            Color::rgb(0.0, 0.0, 1.0),
            Color::rgb(1.0, 1.0, 1.0),
            Color::rgb(1.0, 0.0, 0.0),
            Color::rgb(0.5, 0.0, 0.0),
        ],
    )
}

/// Black-red-yellow-white
pub fn hot() -> Colormap {
    Colormap::from_segments(
        "hot",
        &[(0.0, 0.0416, 0.0416), (0.365079, 1.0, 1.0), (1.0, 1.0, 1.0)],
        &[(0.0, 0.0, 0.0), (0.365079, 0.0, 0.0), (0.746032, 1.0, 1.0), (1.0, 1.0, 1.0)],
        &[(0.0, 0.0, 0.0), (0.746032, 0.0, 0.0), (1.0, 1.0, 1.0)],
    )
}

/// Multi-hue spectral ramp: black, purple, blue, green, yellow, red, grey
///
/// Anchors are evenly spaced at `0.05` (the classic `nipy_spectral` table).
pub fn spectral() -> Colormap {
    const STOPS: [(f32, f32, f32); 21] = [
        (0.0, 0.0, 0.0),
        (0.4667, 0.0, 0.5333),
        (0.5333, 0.0, 0.6),
        (0.0, 0.0, 0.6667),
        (0.0, 0.0, 0.8667),
        (0.0, 0.4667, 0.8667),
        (0.0, 0.6, 0.8667),
        (0.0, 0.6667, 0.6667),
        (0.0, 0.6667, 0.5333),
        (0.0, 0.6, 0.0),
        (0.0, 0.7333, 0.0),
        (0.0, 0.8667, 0.0),
        (0.0, 1.0, 0.0),
        (0.7333, 1.0, 0.0),
        (0.9333, 0.9333, 0.0),
        (1.0, 0.8, 0.0),
        (1.0, 0.6, 0.0),
        (1.0, 0.0, 0.0),
        (0.8667, 0.0, 0.0),
        (0.8, 0.0, 0.0),
        (0.8, 0.8, 0.8),
    ];
    let colors: Vec<Color> = STOPS.iter().map(|&(r, g, b)| Color::rgb(r, g, b)).collect();
    Colormap::from_colors("spectral", &colors)
}

/// John Dunne's spectral rainbow, pale lavender through blue, green, yellow to dark red
pub fn dunne_rainbow() -> Colormap {
    Colormap::from_segments(
        "dunne_rainbow",
        &[
            (0.00, 0.95, 0.95),
            (0.09, 0.85, 0.85),
            (0.18, 0.60, 0.60),
            (0.32, 0.30, 0.30),
            (0.45, 0.00, 0.00),
            (0.60, 1.00, 1.00),
            (0.85, 1.00, 1.00),
            (1.00, 0.40, 0.00),
        ],
        &[
            (0.00, 0.75, 0.75),
            (0.09, 0.85, 0.85),
            (0.18, 0.60, 0.60),
            (0.32, 0.20, 0.20),
            (0.45, 0.60, 0.60),
            (0.60, 1.00, 1.00),
            (0.73, 0.70, 0.70),
            (0.85, 0.00, 0.00),
            (1.00, 0.00, 0.00),
        ],
        &[
            (0.00, 1.00, 1.00),
            (0.32, 1.00, 1.00),
            (0.45, 0.30, 0.30),
            (0.60, 0.00, 0.00),
            (1.00, 0.00, 0.00),
        ],
    )
}
