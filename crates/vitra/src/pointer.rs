//! Mouse tracking for the background tilt.

use std::io;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use vitra_core::{Pointer, PointerCell};

/// Keeps terminal mouse reporting on while alive.
#[derive(Debug)]
pub struct MouseCapture(());

impl MouseCapture {
    /// Start receiving mouse events.
    pub fn enable() -> io::Result<Self> {
        execute!(io::stdout(), EnableMouseCapture)?;
        tracing::debug!("mouse capture enabled");
        Ok(Self(()))
    }
}

impl Drop for MouseCapture {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
            tracing::warn!(error = %e, "failed to disable mouse capture");
        }
        tracing::debug!("mouse capture disabled");
    }
}

/// Writes normalized mouse positions into a shared [`PointerCell`].
#[derive(Debug, Clone)]
pub struct PointerTracker {
    cell: PointerCell,
    width: u16,
    height: u16,
}

impl PointerTracker {
    /// Track a viewport of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cell: PointerCell::new(),
            width,
            height,
        }
    }

    /// The shared cell readers poll each frame.
    pub fn cell(&self) -> PointerCell {
        self.cell.clone()
    }

    /// Record the mouse at a terminal cell.
    pub fn on_move(&self, column: u16, row: u16) {
        self.cell
            .set(Pointer::from_cell(column, row, self.width, self.height));
    }

    /// Update the viewport size used for normalization.
    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_centred() {
        let tracker = PointerTracker::new(80, 24);
        assert_eq!(tracker.cell().get(), Pointer::default());
    }

    #[test]
    fn test_move_is_normalized() {
        let tracker = PointerTracker::new(80, 24);
        tracker.on_move(0, 0);
        assert_eq!(tracker.cell().get(), Pointer::new(-1.0, 1.0));
        tracker.on_move(60, 6);
        assert_eq!(tracker.cell().get(), Pointer::new(0.5, 0.5));
    }

    #[test]
    fn test_readers_see_writes() {
        let tracker = PointerTracker::new(10, 10);
        let reader = tracker.cell();
        tracker.on_move(10, 10);
        assert_eq!(reader.get(), Pointer::new(1.0, -1.0));
    }

    #[test]
    fn test_resize_changes_normalization() {
        let mut tracker = PointerTracker::new(80, 24);
        tracker.on_resize(40, 24);
        tracker.on_move(20, 12);
        assert_eq!(tracker.cell().get(), Pointer::new(0.0, 0.0));
    }
}
