//! Small 3D helpers for the background scene.

/// Linear interpolation from `a` toward `b` by factor `f`.
pub fn lerp(a: f32, b: f32, f: f32) -> f32 {
    a + (b - a) * f
}

/// A point in scene space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Group rotation in radians.
///
/// Applied in XYZ Euler order: yaw about the Y axis first, then pitch about X.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    /// Rotation about the X axis.
    pub pitch: f32,
    /// Rotation about the Y axis.
    pub yaw: f32,
}

impl Rotation {
    /// Ease both angles toward a target by factor `f`.
    pub fn ease_toward(&mut self, target: Rotation, f: f32) {
        self.pitch = lerp(self.pitch, target.pitch, f);
        self.yaw = lerp(self.yaw, target.yaw, f);
    }

    /// Rotate a point by this rotation.
    pub fn apply(&self, v: Vec3) -> Vec3 {
        let (sin_y, cos_y) = self.yaw.sin_cos();
        let x = v.x * cos_y + v.z * sin_y;
        let z = -v.x * sin_y + v.z * cos_y;

        let (sin_p, cos_p) = self.pitch.sin_cos();
        let y = v.y * cos_p - z * sin_p;
        let z = v.y * sin_p + z * cos_p;

        Vec3 { x, y, z }
    }
}
