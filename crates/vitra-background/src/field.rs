//! Procedural line field: a fixed set of waving 3D polylines.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use vitra_core::{LineCategory, Pointer, Rotation, Vec3};

use crate::palette::{self, Rgb};

/// Number of lines in the field.
pub const LINE_COUNT: usize = 80;

/// Number of vertices per line.
pub const POINTS_PER_LINE: usize = 60;

/// Horizontal extent of each line, centred on the origin.
const LINE_SPAN: f32 = 20.0;

/// How far the group tilts toward the pointer, in radians at full deflection.
const TILT_SCALE: f32 = 0.15;

/// Per-frame easing factor for the group rotation.
const TILT_EASE: f32 = 0.02;

/// One procedural polyline.
#[derive(Debug, Clone)]
pub struct Line {
    vertices: [Vec3; POINTS_PER_LINE],
    base_y: f32,
    base_z: f32,
    speed: f32,
    phase: f32,
    category: LineCategory,
    color: Rgb,
    opacity: f32,
}

impl Line {
    /// Sample a new line for position `index` in the field.
    fn sample(index: usize, rng: &mut impl Rng) -> Self {
        let category = LineCategory::for_index(index);
        let base_y = (rng.random::<f32>() - 0.5) * 12.0;
        let base_z = (rng.random::<f32>() - 0.5) * 10.0 - 3.0;

        let vertices = std::array::from_fn(|j| Vec3::new(vertex_x(j), base_y, base_z));

        let colors = palette::line_palette(category);
        let color = colors[rng.random_range(0..colors.len())];

        let opacity = match category {
            LineCategory::Light => 0.15 + rng.random::<f32>() * 0.35,
            LineCategory::Dark => 0.3 + rng.random::<f32>() * 0.4,
        };
        let speed = match category {
            LineCategory::Light => 0.3,
            LineCategory::Dark => 0.15,
        } + rng.random::<f32>() * 0.3;
        let phase = rng.random::<f32>() * std::f32::consts::TAU;

        Self {
            vertices,
            base_y,
            base_z,
            speed,
            phase,
            category,
            color,
            opacity,
        }
    }

    /// Recompute vertex positions and opacity for time `t` in seconds.
    fn update(&mut self, t: f64) {
        for v in &mut self.vertices {
            let (y, z) = wave_point(v.x, t, self.speed, self.phase, self.base_y, self.base_z);
            v.y = y;
            v.z = z;
        }
        self.opacity = fade_opacity(self.category, t, self.phase);
    }

    pub fn vertices(&self) -> &[Vec3; POINTS_PER_LINE] {
        &self.vertices
    }

    pub fn base_y(&self) -> f32 {
        self.base_y
    }

    pub fn base_z(&self) -> f32 {
        self.base_z
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn category(&self) -> LineCategory {
        self.category
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

/// Fixed x coordinate of vertex `j`, spread evenly across the line span.
pub fn vertex_x(j: usize) -> f32 {
    (j as f32 / (POINTS_PER_LINE - 1) as f32 - 0.5) * LINE_SPAN
}

/// Animated `(y, z)` of a vertex at fixed `x` and time `t`.
///
/// Time grows without bound, so the phase arguments are computed in `f64`
/// and only the resulting coordinates are narrowed.
pub fn wave_point(x: f32, t: f64, speed: f32, phase: f32, base_y: f32, base_z: f32) -> (f32, f32) {
    let (x, speed, phase) = (x as f64, speed as f64, phase as f64);
    let wave1 = (x * 0.3 + t * speed + phase).sin() * 0.8;
    let wave2 = (x * 0.15 + t * speed * 0.7 + phase * 1.3).cos() * 0.5;
    let y = base_y as f64 + wave1 + wave2;
    let z = base_z as f64 + (x * 0.2 + t * speed * 0.5).sin() * 0.6;
    (y as f32, z as f32)
}

/// Opacity of a line at time `t`.
pub fn fade_opacity(category: LineCategory, t: f64, phase: f32) -> f32 {
    let fade = (0.5 + 0.5 * (t * 0.3 + phase as f64).sin()) as f32;
    match category {
        LineCategory::Light => 0.15 + fade * 0.35,
        LineCategory::Dark => 0.2 + fade * 0.3,
    }
}

/// The whole background scene: lines plus the group rotation.
#[derive(Debug, Clone)]
pub struct LineField {
    lines: Vec<Line>,
    rotation: Rotation,
}

impl LineField {
    /// Build the field from the given random source.
    pub fn new(rng: &mut impl Rng) -> Self {
        let lines = (0..LINE_COUNT).map(|i| Line::sample(i, rng)).collect();
        Self {
            lines,
            rotation: Rotation::default(),
        }
    }

    /// Build a reproducible field from a seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(&mut SmallRng::seed_from_u64(seed))
    }

    /// Build a field seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(&mut SmallRng::from_os_rng())
    }

    /// Advance every line to time `t` and ease the group toward the pointer.
    pub fn animate(&mut self, t: f64, pointer: Pointer) {
        for line in &mut self.lines {
            line.update(t);
        }
        let target = Rotation {
            pitch: pointer.y * TILT_SCALE,
            yaw: pointer.x * TILT_SCALE,
        };
        self.rotation.ease_toward(target, TILT_EASE);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }
}
