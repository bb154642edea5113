//! Conversions between barycentric weights and the Cartesian plane.
//!
//! The reference triangle is equilateral with unit sides. Normalized weights
//! `(a, b, c)` map to `x = a/2 + b`, `y = a * sqrt(3)/2`; the inverse
//! recovers `(a, b)` and leaves `c = 1 - a - b` implicit.

use crate::{error::Result, sphere::Sphere, types::Point2D};
use glam::DVec3;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Result of [`to_barycentric`]: the first two normalized weights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightPair {
    pub u: f64,
    pub v: f64,
    pub radius: f64,
}

impl WeightPair {
    /// Lifts the pair back to a sphere whose weights sum to one.
    pub fn to_sphere(&self) -> Sphere {
        Sphere::new(DVec3::new(self.u, self.v, 1.0 - self.u - self.v), self.radius)
    }
}

/// Projects a sphere's weights onto the reference triangle.
///
/// ### Parameters
/// - `s` - Sphere whose weights are projected. The radius is ignored.
///
/// ### Returns
/// The Cartesian position of the sphere center, or
/// [`crate::error::GasketError::DegenerateProjection`] if the weights sum to zero (or to a
/// non-finite value).
pub fn to_cartesian(s: &Sphere) -> Result<Point2D> {
    let n = s.normalized()?;
    Ok(Point2D::new(0.5 * n.x + n.y, (SQRT_3 / 2.0) * n.x))
}

/// Maps a Cartesian point back to weight space.
///
/// Inverse of [`to_cartesian`] up to the third weight, which is not
/// recoverable from a 2D point. `radius` is carried through unchanged.
pub fn to_barycentric(p: Point2D, radius: f64) -> WeightPair {
    WeightPair {
        u: (2.0 / SQRT_3) * p.y,
        v: p.x - (1.0 / SQRT_3) * p.y,
        radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GasketError;
    use glam::DVec2;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    const EPS: f64 = 1e-9;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).abs().max_element() < EPS
    }

    #[test]
    fn corners_land_on_triangle_vertices() {
        let top = to_cartesian(&Sphere::from_components(1.0, 0.0, 0.0, 0.5)).unwrap();
        let right = to_cartesian(&Sphere::from_components(0.0, 1.0, 0.0, 0.5)).unwrap();
        let origin = to_cartesian(&Sphere::from_components(0.0, 0.0, 1.0, 0.5)).unwrap();

        assert!(close(top, DVec2::new(0.5, SQRT_3 / 2.0)));
        assert!(close(right, DVec2::new(1.0, 0.0)));
        assert!(close(origin, DVec2::ZERO));
    }

    #[test]
    fn projection_ignores_weight_scale() {
        let a = to_cartesian(&Sphere::from_components(1.0, 2.0, 3.0, 1.0)).unwrap();
        let b = to_cartesian(&Sphere::from_components(10.0, 20.0, 30.0, 0.1)).unwrap();
        assert!(close(a, b));
    }

    #[test]
    fn zero_total_is_a_checked_failure() {
        let err = to_cartesian(&Sphere::ZERO).unwrap_err();
        assert!(matches!(err, GasketError::DegenerateProjection { .. }));

        let cancelled = Sphere::from_components(2.0, -1.0, -1.0, 0.0);
        assert!(to_cartesian(&cancelled).is_err());
    }

    #[test]
    fn projection_failure_matches_normalization() {
        for s in [
            Sphere::from_components(f64::MAX, f64::MAX, 0.0, 0.5),
            Sphere::from_components(f64::NAN, 1.0, 1.0, 0.5),
            Sphere::ZERO,
        ] {
            assert!(s.normalized().is_err());
            assert!(matches!(
                to_cartesian(&s),
                Err(GasketError::DegenerateProjection { .. })
            ));
        }
    }

    #[test]
    fn to_barycentric_preserves_radius() {
        let pair = to_barycentric(DVec2::new(0.3, 0.2), 0.75);
        assert_eq!(pair.radius, 0.75);
        assert_eq!(pair.to_sphere().radius(), 0.75);
    }

    #[test]
    fn to_barycentric_recovers_first_two_normalized_weights() {
        let s = Sphere::from_components(2.0, 1.0, 1.0, 0.125);
        let pair = to_barycentric(to_cartesian(&s).unwrap(), s.radius());
        assert!((pair.u - 0.5).abs() < EPS);
        assert!((pair.v - 0.25).abs() < EPS);
    }

    #[test]
    fn cartesian_round_trip_on_random_valid_spheres() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..1000 {
            let s = Sphere::from_components(
                rng.random_range(0.0..10.0),
                rng.random_range(0.0..10.0),
                rng.random_range(0.01..10.0),
                rng.random_range(0.0..1.0),
            );
            assert!(s.is_valid());

            let p = to_cartesian(&s).unwrap();
            let back = to_cartesian(&to_barycentric(p, s.radius()).to_sphere()).unwrap();
            assert!(close(p, back), "round trip drifted: {p:?} -> {back:?}");
        }
    }
}
