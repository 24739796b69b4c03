//! Animated line field background for the vitra login screen.
//!
//! A fixed population of 3D polylines waves over time, tilts toward the
//! pointer, and is projected onto terminal cells with additive blending over
//! a diagonal gradient.

mod canvas;
mod field;
mod palette;
mod projection;
mod state;

pub use field::{
    LINE_COUNT, Line, LineField, POINTS_PER_LINE, fade_opacity, vertex_x, wave_point,
};
pub use palette::{DARK_COLORS, LIGHT_COLORS, Rgb, gradient_at, hsl_to_rgb, line_palette};
pub use projection::Camera;
pub use state::BackgroundState;
