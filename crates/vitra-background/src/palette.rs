//! Line palettes and color math for the background.

use ratatui::style::Color;
use vitra_core::LineCategory;

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Linear blend toward `other` by `t` in `[0, 1]`.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(ch(self.0, other.0), ch(self.1, other.1), ch(self.2, other.2))
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.0, c.1, c.2)
    }
}

/// Bright strokes: cyan, neon blue, soft blue, soft white blue.
pub const LIGHT_COLORS: [Rgb; 4] = [
    Rgb::from_hex(0x00d4ff),
    Rgb::from_hex(0x4da8ff),
    Rgb::from_hex(0x88ccff),
    Rgb::from_hex(0xbbddff),
];

/// Deep strokes: navy, dark teal, charcoal blue, navy blue.
pub const DARK_COLORS: [Rgb; 4] = [
    Rgb::from_hex(0x0a1628),
    Rgb::from_hex(0x0d2f3f),
    Rgb::from_hex(0x1a2a3a),
    Rgb::from_hex(0x0e3355),
];

/// Palette a line of the given category picks its color from.
pub fn line_palette(category: LineCategory) -> &'static [Rgb; 4] {
    match category {
        LineCategory::Light => &LIGHT_COLORS,
        LineCategory::Dark => &DARK_COLORS,
    }
}

/// Accumulated additive light for one terminal cell, in linear 0-255 units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Light {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Light {
    /// Add `color` scaled by `opacity`.
    pub fn add(&mut self, color: Rgb, opacity: f32) {
        self.r += color.0 as f32 * opacity;
        self.g += color.1 as f32 * opacity;
        self.b += color.2 as f32 * opacity;
    }

    /// Brightest channel. Strokes compare by it to decide which glyph a cell shows.
    pub fn peak(&self) -> f32 {
        self.r.max(self.g).max(self.b)
    }

    /// Add this light onto a base color, saturating at white.
    pub fn over(&self, base: Rgb) -> Rgb {
        let ch = |b: u8, l: f32| (b as f32 + l).clamp(0.0, 255.0) as u8;
        Rgb(ch(base.0, self.r), ch(base.1, self.g), ch(base.2, self.b))
    }
}

/// Gradient stops behind the scene, in HSL.
const GRADIENT_STOPS: [(f32, f32, f32); 3] = [
    (210.0, 0.50, 0.12),
    (200.0, 0.60, 0.20),
    (195.0, 0.70, 0.15),
];

/// Background color at a cell for a 135 degree gradient (top-left to bottom-right).
pub fn gradient_at(x: u16, y: u16, width: u16, height: u16) -> Rgb {
    let x_norm = x as f32 / width.saturating_sub(1).max(1) as f32;
    let y_norm = y as f32 / height.saturating_sub(1).max(1) as f32;
    let t = ((x_norm + y_norm) / 2.0).clamp(0.0, 1.0);

    let (from, to, local) = if t < 0.5 {
        (GRADIENT_STOPS[0], GRADIENT_STOPS[1], t * 2.0)
    } else {
        (GRADIENT_STOPS[1], GRADIENT_STOPS[2], (t - 0.5) * 2.0)
    };
    let a = hsl_to_rgb(from.0, from.1, from.2);
    let b = hsl_to_rgb(to.0, to.1, to.2);
    a.mix(b, local)
}

/// Convert HSL (hue in degrees, saturation and lightness in `[0, 1]`) to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let sector = h.rem_euclid(360.0) / 60.0;
    let second = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u8 {
        0 => (chroma, second, 0.0),
        1 => (second, chroma, 0.0),
        2 => (0.0, chroma, second),
        3 => (0.0, second, chroma),
        4 => (second, 0.0, chroma),
        _ => (chroma, 0.0, second),
    };
    let m = l - chroma / 2.0;
    let ch = |v: f32| ((v + m) * 255.0).clamp(0.0, 255.0) as u8;
    Rgb(ch(r), ch(g), ch(b))
}
