use crate::{
    coords,
    error::{GasketError, Result},
    types::{Point2D, Weights},
};
use glam::DVec3;

/// A sphere in barycentric weight space.
///
/// Fields are private so a sphere cannot change after construction.
/// Equality compares the four scalars by value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    weights: Weights,
    radius: f64,
}

/// Everything a renderer needs to draw one sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub center: Point2D,
    pub radius: f64,
    /// Normalized weights, read as an RGB triple in `0.0..=1.0`.
    pub color: DVec3,
}

impl Placement {
    /// Height of the sphere center above the packing plane.
    ///
    /// Every sphere rests on the plane, so this equals the radius.
    pub fn elevation(&self) -> f64 {
        self.radius
    }
}

impl Sphere {
    /// The all-zero sphere. Used as the initial cutoff.
    pub const ZERO: Self = Self {
        weights: DVec3::ZERO,
        radius: 0.0,
    };

    pub fn new(weights: Weights, radius: f64) -> Self {
        Self { weights, radius }
    }

    pub fn from_components(wx: f64, wy: f64, wz: f64, radius: f64) -> Self {
        Self::new(DVec3::new(wx, wy, wz), radius)
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn total(&self) -> f64 {
        self.weights.element_sum()
    }

    /// `true` if every weight is finite and non-negative and the total is
    /// finite and positive.
    pub fn is_valid(&self) -> bool {
        let total = self.total();
        self.weights.is_finite()
            && self.weights.cmpge(DVec3::ZERO).all()
            && total.is_finite()
            && total > 0.0
    }

    /// Weights scaled to sum to one.
    ///
    /// Fails with [`GasketError::DegenerateProjection`] for a zero or
    /// non-finite total.
    pub fn normalized(&self) -> Result<DVec3> {
        let total = self.total();
        if total == 0.0 || !total.is_finite() {
            return Err(GasketError::DegenerateProjection {
                weights: self.weights,
            });
        }
        Ok(self.weights / total)
    }

    /// Builds the render hand-off for this sphere.
    pub fn placement(&self) -> Result<Placement> {
        Ok(Placement {
            center: coords::to_cartesian(self)?,
            radius: self.radius,
            color: self.normalized()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_requires_non_negative_weights_and_positive_total() {
        assert!(Sphere::from_components(1.0, 0.0, 0.0, 0.5).is_valid());
        assert!(Sphere::from_components(0.2, 0.3, 0.5, 1.0).is_valid());

        assert!(!Sphere::ZERO.is_valid());
        assert!(!Sphere::from_components(-0.1, 1.0, 1.0, 0.5).is_valid());
        assert!(!Sphere::from_components(1.0, -1.0, 0.0, 0.5).is_valid());
    }

    #[test]
    fn validity_rejects_non_finite_weights_and_totals() {
        assert!(!Sphere::from_components(f64::NAN, 1.0, 1.0, 0.5).is_valid());
        assert!(!Sphere::from_components(f64::INFINITY, 0.0, 0.0, 0.5).is_valid());
        assert!(!Sphere::from_components(f64::MAX, f64::MAX, 0.0, 0.5).is_valid());

        assert!(Sphere::from_components(1e308, 0.0, 0.0, 0.5).is_valid());
    }

    #[test]
    fn equality_is_by_value() {
        let a = Sphere::from_components(1.0, 1.0, 1.0, 1.0 / 6.0);
        let b = Sphere::new(DVec3::ONE, 1.0 / 6.0);
        assert_eq!(a, b);
        assert_ne!(a, Sphere::from_components(1.0, 1.0, 1.0, 0.2));
    }

    #[test]
    fn normalized_scales_weights_to_unit_sum() {
        let s = Sphere::from_components(2.0, 1.0, 1.0, 0.125);
        let n = s.normalized().unwrap();
        assert_eq!(n, DVec3::new(0.5, 0.25, 0.25));
        assert!((n.element_sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalized_rejects_zero_total() {
        let err = Sphere::ZERO.normalized().unwrap_err();
        assert_eq!(
            err,
            GasketError::DegenerateProjection {
                weights: DVec3::ZERO
            }
        );

        // Mixed signs can still cancel out.
        assert!(Sphere::from_components(1.0, -1.0, 0.0, 0.0).normalized().is_err());
    }

    #[test]
    fn placement_uses_projection_radius_and_normalized_color() {
        let s = Sphere::from_components(1.0, 1.0, 1.0, 1.0 / 6.0);
        let p = s.placement().unwrap();

        assert!((p.center.x - 0.5).abs() < 1e-12);
        assert!((p.center.y - 3f64.sqrt() / 6.0).abs() < 1e-12);
        assert_eq!(p.radius, 1.0 / 6.0);
        assert_eq!(p.elevation(), p.radius);
        assert!((p.color - DVec3::splat(1.0 / 3.0)).abs().max_element() < 1e-12);
    }

    #[test]
    fn placement_of_corner_has_pure_color() {
        let p = Sphere::from_components(0.0, 4.0, 0.0, 0.5).placement().unwrap();
        assert_eq!(p.color, DVec3::new(0.0, 1.0, 0.0));
        assert_eq!(p.center, glam::DVec2::new(1.0, 0.0));
    }
}
