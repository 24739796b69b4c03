//! Core types shared by the vitra crates.

mod geometry;
mod pointer;
pub mod theme;

pub use geometry::{Rotation, Vec3, lerp};
pub use pointer::{Pointer, PointerCell};

/// Visual class of a background line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCategory {
    /// Bright cyan and blue strokes.
    Light,
    /// Deep navy and teal strokes.
    Dark,
}

impl LineCategory {
    /// Category for the line at `index`: every third line is dark.
    pub fn for_index(index: usize) -> Self {
        if index % 3 == 0 {
            LineCategory::Dark
        } else {
            LineCategory::Light
        }
    }
}

/// Focusable elements of the login card, in tab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Email,
    Password,
    ShowPassword,
    Submit,
}

impl Focus {
    /// All focus targets in tab order.
    pub const ALL: [Focus; 4] = [
        Focus::Email,
        Focus::Password,
        Focus::ShowPassword,
        Focus::Submit,
    ];

    /// Move to the next element, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Focus::Email => Focus::Password,
            Focus::Password => Focus::ShowPassword,
            Focus::ShowPassword => Focus::Submit,
            Focus::Submit => Focus::Email,
        }
    }

    /// Move to the previous element, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Focus::Email => Focus::Submit,
            Focus::Password => Focus::Email,
            Focus::ShowPassword => Focus::Password,
            Focus::Submit => Focus::ShowPassword,
        }
    }

    /// Whether this element accepts typed text.
    pub fn is_text_input(self) -> bool {
        matches!(self, Focus::Email | Focus::Password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_for_index() {
        assert_eq!(LineCategory::for_index(0), LineCategory::Dark);
        assert_eq!(LineCategory::for_index(1), LineCategory::Light);
        assert_eq!(LineCategory::for_index(2), LineCategory::Light);
        assert_eq!(LineCategory::for_index(3), LineCategory::Dark);
        assert_eq!(LineCategory::for_index(79), LineCategory::Light);
    }

    #[test]
    fn test_focus_cycle() {
        let mut focus = Focus::default();
        for _ in 0..Focus::ALL.len() {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Email);
        assert_eq!(Focus::Email.prev(), Focus::Submit);
        assert_eq!(Focus::Submit.prev().next(), Focus::Submit);
    }

    #[test]
    fn test_focus_text_input() {
        assert!(Focus::Email.is_text_input());
        assert!(Focus::Password.is_text_input());
        assert!(!Focus::ShowPassword.is_text_input());
        assert!(!Focus::Submit.is_text_input());
    }
}
