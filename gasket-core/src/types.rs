use glam::{DVec2, DVec3};

/// Unnormalized barycentric weights of a [`crate::sphere::Sphere`].
///
/// Component `i` is the strength of reference corner `i`. Only the ratio
/// between components matters for position; the total sets the radius.
pub type Weights = DVec3;

/// A point in the Cartesian plane the simplex is laid out on.
///
/// The reference triangle has corners at `(0.5, sqrt(3)/2)`, `(1, 0)` and
/// `(0, 0)` for weight components `x`, `y` and `z` respectively.
pub type Point2D = DVec2;
