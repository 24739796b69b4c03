//! Cell canvas that line segments are rasterized into.

use crate::palette::{Light, Rgb};

/// Glyphs for strokes by screen-space direction.
pub const HORIZONTAL: char = '─';
pub const VERTICAL: char = '│';
pub const RISING: char = '╱';
pub const FALLING: char = '╲';

/// One canvas cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasCell {
    /// Additive light from every stroke crossing the cell.
    pub light: Light,
    /// Glyph of the strongest stroke, if any crossed the cell.
    pub glyph: Option<char>,
    strongest: f32,
    last_stroke: usize,
}

/// Fixed-size cell grid reused across frames.
#[derive(Debug, Default)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<CanvasCell>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize if needed and clear every cell, keeping the allocation.
    pub fn reset(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = width as usize * height as usize;
        self.cells.clear();
        self.cells.resize(len, CanvasCell::default());
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&CanvasCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    /// Rasterize a segment between two fractional cell positions.
    ///
    /// `stroke_id` identifies the polyline; a cell receives light from a given
    /// stroke at most once so joints between segments are not double counted.
    /// Ids must be non-zero and unique per frame.
    pub fn segment(
        &mut self,
        stroke_id: usize,
        from: (f32, f32),
        to: (f32, f32),
        color: Rgb,
        opacity: f32,
    ) {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let glyph = glyph_for(dx, dy);
        let mut stroke = Light::default();
        stroke.add(color, opacity);
        let weight = stroke.peak();

        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = from.0 + dx * t;
            let y = from.1 + dy * t;
            if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
                continue;
            }
            let idx = y as usize * self.width as usize + x as usize;
            let Some(cell) = self.cells.get_mut(idx) else {
                continue;
            };
            if cell.last_stroke == stroke_id {
                continue;
            }
            cell.last_stroke = stroke_id;
            cell.light.add(color, opacity);
            if cell.glyph.is_none() || weight > cell.strongest {
                cell.glyph = Some(glyph);
                cell.strongest = weight;
            }
        }
    }
}

/// Pick a stroke glyph from a segment's direction in cell units.
pub fn glyph_for(dx: f32, dy: f32) -> char {
    // Rows are twice as tall as columns are wide
    let dy = dy * 2.0;
    if dx.abs() < f32::EPSILON {
        return if dy.abs() < f32::EPSILON {
            HORIZONTAL
        } else {
            VERTICAL
        };
    }
    let slope = dy / dx;
    if slope.abs() < 0.5 {
        HORIZONTAL
    } else if slope.abs() > 3.0 {
        VERTICAL
    } else if slope < 0.0 {
        RISING
    } else {
        FALLING
    }
}
