//! Small vector and quaternion helpers for hand poses.
//!
//! Angle conventions match the engine-side tracking data the recognizers
//! consume: degrees everywhere, `signed_angle_deg` signs by the rotation
//! axis, and Euler offsets are applied in Z, X, Y order.

use std::ops::{Add, Mul, Neg, Sub};

/// Below this squared-length product two vectors have no defined angle.
const EPSILON_NORMAL_SQRT: f32 = 1e-15;

// ── Vec2 ───────────────────────────────────────────────────

/// 2D vector (navigation and move input).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const UP: Self = Self { x: 0.0, y: 1.0 };
    pub const DOWN: Self = Self { x: 0.0, y: -1.0 };
    pub const LEFT: Self = Self { x: -1.0, y: 0.0 };
    pub const RIGHT: Self = Self { x: 1.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }
}

// ── Vec3 ───────────────────────────────────────────────────

/// 3D vector in meters (positions) or unitless (directions).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Euclidean distance between two points.
    pub fn distance(&self, other: Vec3) -> f32 {
        (other - *self).length()
    }

    /// Unsigned angle between two vectors in degrees (0..=180).
    ///
    /// Returns 0 when either vector is (near) zero length.
    pub fn angle_deg(&self, to: Vec3) -> f32 {
        let denominator = (self.length_squared() * to.length_squared()).sqrt();
        if denominator < EPSILON_NORMAL_SQRT {
            return 0.0;
        }
        let cos = (self.dot(to) / denominator).clamp(-1.0, 1.0);
        cos.acos().to_degrees()
    }

    /// Signed angle in degrees from `self` to `to`, measured about `axis`.
    ///
    /// Positive for a right-handed rotation about `axis`. A zero triple
    /// product counts as positive.
    pub fn signed_angle_deg(&self, to: Vec3, axis: Vec3) -> f32 {
        let unsigned = self.angle_deg(to);
        let triple = axis.dot(self.cross(to));
        if triple < 0.0 {
            -unsigned
        } else {
            unsigned
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

// ── Quat ───────────────────────────────────────────────────

/// Orientation quaternion (x, y, z, w).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle_deg` about a (not necessarily normalized) axis.
    pub fn from_axis_angle_deg(axis: Vec3, angle_deg: f32) -> Self {
        let len = axis.length();
        if len <= f32::EPSILON {
            return Self::IDENTITY;
        }
        let half = angle_deg.to_radians() * 0.5;
        let s = half.sin() / len;
        Self::new(axis.x * s, axis.y * s, axis.z * s, half.cos())
    }

    /// Rotation from Euler angles in degrees, applied Z first, then X, then Y.
    pub fn from_euler_deg(euler: Vec3) -> Self {
        let qx = Self::from_axis_angle_deg(Vec3::new(1.0, 0.0, 0.0), euler.x);
        let qy = Self::from_axis_angle_deg(Vec3::new(0.0, 1.0, 0.0), euler.y);
        let qz = Self::from_axis_angle_deg(Vec3::new(0.0, 0.0, 1.0), euler.z);
        qy * qx * qz
    }

    /// Rotate a vector by this quaternion.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        // v' = v + 2w(q × v) + 2(q × (q × v))
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Local up (+Y) axis of this orientation.
    pub fn up(&self) -> Vec3 {
        self.rotate(Vec3::UP)
    }

    /// Local forward (+Z) axis of this orientation.
    pub fn forward(&self) -> Vec3 {
        self.rotate(Vec3::FORWARD)
    }
}

impl Mul for Quat {
    type Output = Quat;
    fn mul(self, rhs: Quat) -> Quat {
        Quat::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y + self.y * rhs.w + self.z * rhs.x - self.x * rhs.z,
            self.w * rhs.z + self.z * rhs.w + self.x * rhs.y - self.y * rhs.x,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

/// Linear interpolation with `t` clamped to [0, 1].
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}
