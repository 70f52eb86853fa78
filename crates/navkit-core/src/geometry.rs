#![forbid(unsafe_code)]

//! 2D vectors and host-supplied rectangle transforms.
//!
//! A [`RectTransform`] is the geometry snapshot a host hands over for one
//! element: pivot position in world space, local rectangle size, rotation,
//! scale, and normalized pivot. Builders only ever read it.
//!
//! # Invariants
//!
//! 1. [`point_on_rect_edge`] with a zero direction returns the center.
//! 2. `edge_point_world` of an unrotated, unscaled, centered rect equals
//!    `center + size/2 * dir` for axis-aligned `dir`.
//! 3. `contains_point` is false for any rect with a zero scale component.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A 2D vector in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);
    pub const ONE: Vec2 = Vec2::new(1.0, 1.0);

    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Same value in both components.
    #[must_use]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    #[inline]
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Component-wise product.
    #[inline]
    #[must_use]
    pub fn scale(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Component-wise absolute value.
    #[inline]
    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    #[must_use]
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len > 0.0 { self / len } else { Self::ZERO }
    }

    /// Clamp the magnitude to `max`.
    #[must_use]
    pub fn clamp_length(self, max: f32) -> Self {
        let len_sq = self.length_squared();
        if len_sq > max * max && len_sq > 0.0 {
            self * (max / len_sq.sqrt())
        } else {
            self
        }
    }

    /// Rotate counter-clockwise by `radians`.
    #[must_use]
    pub fn rotate(self, radians: f32) -> Self {
        if radians == 0.0 {
            return self;
        }
        let (sin, cos) = radians.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Point on the boundary of a rectangle in the given direction.
///
/// The direction is rescaled so its dominant component has magnitude 1, which
/// puts the result on the edge the direction points at (corners for exact
/// diagonals). A zero direction returns `center`.
#[must_use]
pub fn point_on_rect_edge(center: Vec2, size: Vec2, direction: Vec2) -> Vec2 {
    if direction.is_zero() {
        return center;
    }
    let dominant = direction.x.abs().max(direction.y.abs());
    let dir = direction / dominant;
    center + size.scale(dir * 0.5)
}

/// Host-supplied geometry for one element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectTransform {
    /// World position of the pivot.
    pub position: Vec2,
    /// Local rectangle size before scaling.
    pub size: Vec2,
    /// Counter-clockwise rotation in radians.
    pub rotation: f32,
    pub scale: Vec2,
    /// Normalized pivot inside the rect; `(0.5, 0.5)` is the center.
    pub pivot: Vec2,
}

impl Default for RectTransform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            pivot: Vec2::splat(0.5),
        }
    }
}

impl RectTransform {
    /// Centered, unrotated, unscaled rect at `position`.
    #[must_use]
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            ..Self::default()
        }
    }

    /// Builder: set rotation (radians).
    #[must_use]
    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    /// Builder: set scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Builder: set pivot.
    #[must_use]
    pub fn with_pivot(mut self, pivot: Vec2) -> Self {
        self.pivot = pivot;
        self
    }

    /// Rect center in local (pivot-relative, unscaled) space.
    #[must_use]
    pub fn rect_center_local(&self) -> Vec2 {
        (Vec2::splat(0.5) - self.pivot).scale(self.size)
    }

    /// Local point to world space.
    #[must_use]
    pub fn transform_point(&self, local: Vec2) -> Vec2 {
        self.position + local.scale(self.scale).rotate(self.rotation)
    }

    /// World direction into local space (rotation only).
    #[must_use]
    pub fn inverse_rotate(&self, world_dir: Vec2) -> Vec2 {
        world_dir.rotate(-self.rotation)
    }

    /// World-space center of the rectangle.
    #[must_use]
    pub fn world_center(&self) -> Vec2 {
        self.transform_point(self.rect_center_local())
    }

    /// World-space point on the rect edge facing `world_dir`.
    #[must_use]
    pub fn edge_point_world(&self, world_dir: Vec2) -> Vec2 {
        let local_dir = self.inverse_rotate(world_dir);
        let local = point_on_rect_edge(self.rect_center_local(), self.size, local_dir);
        self.transform_point(local)
    }

    /// Size after scaling (ignores rotation).
    #[must_use]
    pub fn world_extent(&self) -> Vec2 {
        self.size.scale(self.scale).abs()
    }

    /// Oriented containment test in world space (edges inclusive).
    #[must_use]
    pub fn contains_point(&self, world: Vec2) -> bool {
        if self.scale.x == 0.0 || self.scale.y == 0.0 {
            return false;
        }
        let rotated = (world - self.position).rotate(-self.rotation);
        let local = Vec2::new(rotated.x / self.scale.x, rotated.y / self.scale.y);
        let offset = (local - self.rect_center_local()).abs();
        offset.x <= self.size.x * 0.5 && offset.y <= self.size.y * 0.5
    }
}
