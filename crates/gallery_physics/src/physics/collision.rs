//! Hit testing against target bounding spheres
//!
//! Targets are spheres (center = position, radius = size). A hit probe is
//! either a single world-space point or a ray cast from the player.

use crate::foundation::math::{self, Scalar, Vec3};

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (unit length, or zero when degenerate)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    ///
    /// The direction is normalized; a zero direction stays zero and the ray
    /// then behaves like a point at its origin.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: math::normalize(&direction),
        }
    }

    /// Creates a ray from `origin` through `through`
    pub fn through(origin: Vec3, through: Vec3) -> Self {
        Self::new(origin, through - origin)
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: Scalar) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Whether the direction collapsed to zero
    pub fn is_degenerate(&self) -> bool {
        self.direction == Vec3::zeros()
    }
}

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: Scalar,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: Scalar) -> Self {
        Self { center, radius }
    }

    /// Check if a point lies inside or on the sphere
    pub fn contains_point(&self, point: &Vec3) -> bool {
        math::distance_squared(&self.center, point) <= self.radius * self.radius
    }

    /// Test ray intersection with this sphere
    ///
    /// Returns the distance along the ray to the first surface crossing in
    /// front of the origin, or `0.0` when the origin is already inside.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Scalar> {
        if self.contains_point(&ray.origin) {
            return Some(0.0);
        }
        if ray.is_degenerate() {
            return None;
        }

        // Solve |origin + t*direction - center|^2 = radius^2 with |direction| = 1
        let oc = ray.origin - self.center;
        let half_b = oc.dot(&ray.direction);
        let c = oc.magnitude_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - c;
        if discriminant < 0.0 {
            return None;
        }

        let t = -half_b - discriminant.sqrt();
        // Origin is outside (c > 0), so both roots share a sign
        (t >= 0.0).then_some(t)
    }
}

/// What the host is testing a target against
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Probe {
    /// A world-space point, e.g. the hit position reported by the host's ray system
    Point(Vec3),
    /// A ray cast from the player
    Ray(Ray),
}

impl Probe {
    /// Point probe
    pub fn point(point: Vec3) -> Self {
        Self::Point(point)
    }

    /// Ray probe from an origin along a direction
    pub fn ray(origin: Vec3, direction: Vec3) -> Self {
        Self::Ray(Ray::new(origin, direction))
    }

    /// Whether all coordinates are finite
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Point(point) => math::is_finite(point),
            Self::Ray(ray) => math::is_finite(&ray.origin) && math::is_finite(&ray.direction),
        }
    }

    /// Distance from the probe origin to the sphere, if it is hit
    ///
    /// Point probes report the distance to the sphere center so callers can
    /// rank overlapping hits.
    pub fn hit_distance(&self, sphere: &BoundingSphere) -> Option<Scalar> {
        match self {
            Self::Point(point) => sphere
                .contains_point(point)
                .then(|| math::distance(point, &sphere.center)),
            Self::Ray(ray) => sphere.intersect_ray(ray),
        }
    }

    /// Whether the probe hits the sphere
    pub fn hits(&self, sphere: &BoundingSphere) -> bool {
        self.hit_distance(sphere).is_some()
    }
}
