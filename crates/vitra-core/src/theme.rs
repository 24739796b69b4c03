//! Color tokens for the login card.

use ratatui::style::Color;

/// Accent used for focus rings, links and the submit button.
pub const PRIMARY: Color = Color::Rgb(77, 168, 255);
/// Text drawn on top of [`PRIMARY`].
pub const PRIMARY_FOREGROUND: Color = Color::Rgb(10, 22, 40);
/// Main text color.
pub const FOREGROUND: Color = Color::Rgb(226, 238, 250);
/// Secondary text and placeholders.
pub const MUTED_FOREGROUND: Color = Color::Rgb(140, 164, 190);
/// Error text and border.
pub const DESTRUCTIVE: Color = Color::Rgb(255, 107, 107);
/// Tint behind the error message.
pub const DESTRUCTIVE_BACKGROUND: Color = Color::Rgb(58, 28, 36);
/// Card border.
pub const BORDER: Color = Color::Rgb(120, 160, 200);
/// Unfocused input border.
pub const INPUT: Color = Color::Rgb(70, 96, 124);
/// Frosted card fill.
pub const CARD: Color = Color::Rgb(24, 44, 62);
/// Input field fill.
pub const BACKGROUND: Color = Color::Rgb(16, 32, 48);
