//! Background scene state and terminal rendering.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use vitra_core::Pointer;

use crate::canvas::Canvas;
use crate::field::LineField;
use crate::palette::{self, Rgb};
use crate::projection::Camera;

/// Glyph strokes cover only part of a cell, so their light is boosted.
const STROKE_GAIN: f32 = 1.5;

/// Background scene: the animated line field plus its render buffers.
#[derive(Debug)]
pub struct BackgroundState {
    field: LineField,
    camera: Camera,
    canvas: Canvas,
    /// Projected vertices of the line being drawn, reused between lines.
    scratch: Vec<Option<(f32, f32)>>,
}

impl Default for BackgroundState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl BackgroundState {
    /// Create the scene, seeded when `seed` is given.
    pub fn new(seed: Option<u64>) -> Self {
        let field = match seed {
            Some(seed) => LineField::with_seed(seed),
            None => LineField::from_entropy(),
        };
        tracing::debug!(lines = field.lines().len(), ?seed, "line field mounted");
        Self::from_field(field)
    }

    /// Wrap an existing line field.
    pub fn from_field(field: LineField) -> Self {
        Self {
            field,
            camera: Camera::default(),
            canvas: Canvas::new(),
            scratch: Vec::new(),
        }
    }

    pub fn field(&self) -> &LineField {
        &self.field
    }

    /// Animate the scene to `elapsed` and render it over the whole frame.
    pub fn render(&mut self, frame: &mut Frame, elapsed: Duration, pointer: Pointer) {
        self.field.animate(elapsed.as_secs_f64(), pointer);
        let area = frame.area();
        self.rasterize(area.width, area.height);
        frame.render_widget(Paragraph::new(self.lines(area)), area);
    }

    /// Project every line into the canvas.
    fn rasterize(&mut self, width: u16, height: u16) {
        self.canvas.reset(width, height);
        let rotation = self.field.rotation();

        for (i, line) in self.field.lines().iter().enumerate() {
            self.scratch.clear();
            self.scratch.extend(
                line.vertices()
                    .iter()
                    .map(|&v| self.camera.project(rotation.apply(v), width, height)),
            );

            let opacity = line.opacity() * STROKE_GAIN;
            for pair in self.scratch.windows(2) {
                if let [Some(from), Some(to)] = pair {
                    self.canvas.segment(i + 1, *from, *to, line.color(), opacity);
                }
            }
        }
    }

    /// Turn the canvas into styled text over the gradient backdrop.
    fn lines(&self, area: Rect) -> Vec<Line<'static>> {
        (0..area.height)
            .map(|y| {
                let spans: Vec<Span> = (0..area.width)
                    .map(|x| self.render_char(x, y, area.width, area.height))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn render_char(&self, x: u16, y: u16, width: u16, height: u16) -> Span<'static> {
        let base = palette::gradient_at(x, y, width, height);
        let style = Style::new().bg(base.into());
        let stroke = self
            .canvas
            .cell(x, y)
            .and_then(|cell| cell.glyph.map(|glyph| (glyph, cell.light)));
        match stroke {
            Some((glyph, light)) => {
                let fg: Rgb = light.over(base);
                Span::styled(glyph.to_string(), style.fg(fg.into()))
            }
            None => Span::styled(" ", style),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_render_draws_lines() {
        let mut state = BackgroundState::new(Some(3));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| state.render(frame, Duration::from_millis(1500), Pointer::default()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let strokes = buffer
            .content()
            .iter()
            .filter(|cell| cell.symbol() != " ")
            .count();
        assert!(strokes > 0);
        assert!(buffer.content().iter().all(|cell| cell.bg != ratatui::style::Color::Reset));
    }

    #[test]
    fn test_render_tiny_viewport() {
        let mut state = BackgroundState::new(Some(3));
        let mut terminal = Terminal::new(TestBackend::new(1, 1)).unwrap();
        terminal
            .draw(|frame| state.render(frame, Duration::ZERO, Pointer::new(1.0, 1.0)))
            .unwrap();
    }

    #[test]
    fn test_render_advances_rotation() {
        let mut state = BackgroundState::new(Some(3));
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        for _ in 0..3 {
            terminal
                .draw(|frame| state.render(frame, Duration::ZERO, Pointer::new(1.0, 0.0)))
                .unwrap();
        }
        assert!(state.field().rotation().yaw > 0.0);
    }
}
