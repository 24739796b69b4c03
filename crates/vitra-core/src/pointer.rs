//! Normalized pointer position shared between input handling and rendering.

use std::cell::Cell;
use std::rc::Rc;

/// Pointer position with both axes in `[-1, 1]` and `y` pointing up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    /// Build a pointer, clamping both axes into `[-1, 1]`.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    /// Normalize a terminal cell position against the viewport size.
    ///
    /// A zero-sized viewport maps to the centre.
    pub fn from_cell(column: u16, row: u16, width: u16, height: u16) -> Self {
        if width == 0 || height == 0 {
            return Self::default();
        }
        let x = (column as f32 / width as f32) * 2.0 - 1.0;
        let y = -(row as f32 / height as f32) * 2.0 + 1.0;
        Self::new(x, y)
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) }
}

/// Single-threaded shared pointer cell.
///
/// The event handler writes and the frame callback reads; both run on the UI
/// thread, so a plain `Cell` is enough.
#[derive(Debug, Clone, Default)]
pub struct PointerCell(Rc<Cell<Pointer>>);

impl PointerCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pointer position.
    pub fn get(&self) -> Pointer {
        self.0.get()
    }

    /// Store a new pointer position.
    pub fn set(&self, pointer: Pointer) {
        self.0.set(pointer);
    }
}
