//! Ray–circle intersection.
//!
//! A ray is `origin + t * direction`. Solving it against `|p - center| = radius`
//! gives a quadratic in `t`; the nearest root in front of the origin is the hit.

use crate::math::Vec2;

/// Returned by [`intersect`] when the ray has no forward hit.
pub const NO_HIT: f64 = -1.0;

/// Half-line starting at `origin`.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec2,
    /// Must be nonzero. Unit length keeps `t` equal to the travelled distance.
    pub direction: Vec2,
}

impl Ray {
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f64) -> Vec2 {
        self.origin + self.direction * t
    }
}

/// Disc used both for the light's visual footprint and for the blocker.
#[derive(Debug, Clone, Copy)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Vec2, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// True if `point` lies inside or on the boundary.
    pub fn contains(&self, point: Vec2) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }

    /// Nearest forward hit distance, or `None` when the ray misses.
    pub fn hit(&self, ray: &Ray) -> Option<f64> {
        let t = intersect(ray.origin, ray.direction, self.center, self.radius);
        (t > 0.0).then_some(t)
    }
}

/// Distance along `direction` to the circle, or [`NO_HIT`].
///
/// Returns the near root when the origin is outside the circle. When the
/// origin is inside, the near root is behind it and the far (exit) root is
/// returned instead, so a light inside the blocker still reports a hit.
/// Circles entirely behind the origin report [`NO_HIT`].
pub fn intersect(origin: Vec2, direction: Vec2, center: Vec2, radius: f64) -> f64 {
    let oc = origin - center;

    let a = direction.dot(direction);
    debug_assert!(a > 0.0, "ray direction must be nonzero");
    let b = 2.0 * oc.dot(direction);
    let c = oc.dot(oc) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return NO_HIT;
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);

    if t1 > 0.0 {
        t1
    } else if t2 > 0.0 {
        t2
    } else {
        NO_HIT
    }
}
