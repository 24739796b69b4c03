//! Perspective camera mapping scene space onto terminal cells.

use vitra_core::Vec3;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

/// Points closer to the camera than this are dropped.
const NEAR_PLANE: f32 = 0.1;

/// A camera on the +z axis looking toward the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Distance from the origin along +z.
    pub distance: f32,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            distance: 6.0,
            fov_y: 60.0,
        }
    }
}

impl Camera {
    /// Project a point to fractional cell coordinates `(column, row)`.
    ///
    /// Returns `None` for points behind the near plane or an empty viewport.
    /// The result may fall outside the viewport.
    pub fn project(&self, p: Vec3, width: u16, height: u16) -> Option<(f32, f32)> {
        if width == 0 || height == 0 {
            return None;
        }
        let depth = self.distance - p.z;
        if depth <= NEAR_PLANE {
            return None;
        }

        let w = width as f32;
        let h = height as f32;
        let half_fov = (self.fov_y.to_radians() / 2.0).tan();
        let aspect = w / (h * CELL_ASPECT);

        let ndc_x = p.x / (depth * half_fov * aspect);
        let ndc_y = p.y / (depth * half_fov);

        let column = (ndc_x + 1.0) / 2.0 * w;
        let row = (1.0 - ndc_y) / 2.0 * h;
        Some((column, row))
    }
}
