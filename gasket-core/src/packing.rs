//! The recursive tangent-sphere search that fills the simplex.
//!
//! One generation step works like this:
//! 1. [`tangent_sphere`] adds the weights of three mutually tangent spheres
//!    and subtracts a fourth (the cutoff), giving the other sphere tangent
//!    to the three.
//! 2. [`expand`] stores that sphere and repeats with each pair of the three
//!    plus the new sphere, demoting the dropped member to the cutoff role.
//! 3. [`run`] seeds the corners with the zero cutoff and collects everything
//!    into a [`GasketSet`].

use crate::{
    config::{Config, DedupMode},
    coords,
    error::{GasketError, Result},
    gasket_set::GasketSet,
    sphere::Sphere,
    types::Point2D,
};
use glam::DVec3;
use tracing::{debug, info, trace, warn};

/// Below this remaining budget [`run_parallel`] stops forking.
const PARALLEL_CUTOFF_BUDGET: u32 = 4;

/// Computes the sphere tangent to `s1`, `s2`, `s3` other than `cutoff`.
///
/// The new weights are `s1 + s2 + s3 - cutoff` componentwise and the radius
/// is `1 / (2 * total)`.
///
/// ### Parameters
/// - `s1`, `s2`, `s3` - Three mutually tangent spheres.
/// - `cutoff` - The already known fourth member of the tangency quadruple.
///
/// ### Returns
/// `None` if any resulting weight is negative or not finite, or if the
/// weights sum to zero or overflow. Such a branch has no further tangent
/// member; this is a normal outcome.
pub fn tangent_sphere(s1: &Sphere, s2: &Sphere, s3: &Sphere, cutoff: &Sphere) -> Option<Sphere> {
    let w = s1.weights() + s2.weights() + s3.weights() - cutoff.weights();
    let total = w.element_sum();
    // `cmpge` is false for NaN, unlike `min_element`.
    if !w.is_finite() || !w.cmpge(DVec3::ZERO).all() || !total.is_finite() || total == 0.0 {
        return None;
    }
    // Same value as `1 / (2 * total)`, without overflowing near `f64::MAX`.
    Some(Sphere::new(w, 0.5 / total))
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    budget: u32,
    s1: Sphere,
    s2: Sphere,
    s3: Sphere,
    cutoff: Sphere,
}

impl Frame {
    /// The three child frames of `next`, in the order a recursive walk
    /// would visit them.
    fn children(&self, next: Sphere) -> [Frame; 3] {
        let budget = self.budget - 1;
        [
            Frame {
                budget,
                s1: self.s1,
                s2: self.s2,
                s3: next,
                cutoff: self.s3,
            },
            Frame {
                budget,
                s1: self.s1,
                s2: next,
                s3: self.s3,
                cutoff: self.s2,
            },
            Frame {
                budget,
                s1: next,
                s2: self.s2,
                s3: self.s3,
                cutoff: self.s1,
            },
        ]
    }

    /// The sphere this frame would insert, or `None` if the branch ends here.
    fn next(&self, depth_floor: f64) -> Option<Sphere> {
        let Some(next) = tangent_sphere(&self.s1, &self.s2, &self.s3, &self.cutoff) else {
            trace!(budget = self.budget, "no tangent sphere, pruning branch");
            return None;
        };
        if self.budget == 0 || next.radius() < depth_floor {
            trace!(
                budget = self.budget,
                radius = next.radius(),
                "budget or depth floor reached"
            );
            return None;
        }
        Some(next)
    }
}

/// Fills `set` with every sphere reachable from the given quadruple.
///
/// For the current frame:
///
/// 1. Compute `next = tangent_sphere(s1, s2, s3, cutoff)`.
/// 2. Stop if there is no `next`, if `budget == 0`, or if
///    `next.radius() < depth_floor`.
/// 3. Insert `next` and continue with `(s1, s2, next | s3)`,
///    `(s1, next, s3 | s2)` and `(next, s2, s3 | s1)` at `budget - 1`,
///    where `| x` marks the cutoff.
///
/// The walk uses an explicit stack, so large budgets do not grow the call
/// stack. Branches continue even when `next` was a duplicate.
///
/// ### Parameters
/// - `set` - Result container; its dedup mode decides what is stored.
/// - `depth_floor` - Minimum radius of a stored sphere.
/// - `budget` - Remaining recursion depth.
/// - `s1`, `s2`, `s3`, `cutoff` - The starting quadruple.
///
/// ### Returns
/// The number of spheres newly stored in `set`.
pub fn expand(
    set: &mut GasketSet,
    depth_floor: f64,
    budget: u32,
    s1: Sphere,
    s2: Sphere,
    s3: Sphere,
    cutoff: Sphere,
) -> usize {
    let mut added = 0;
    let mut stack = Vec::with_capacity(2 * (budget as usize).min(64) + 1);
    stack.push(Frame {
        budget,
        s1,
        s2,
        s3,
        cutoff,
    });

    while let Some(frame) = stack.pop() {
        let Some(next) = frame.next(depth_floor) else {
            continue;
        };
        if set.insert(next) {
            added += 1;
        }
        // Reversed so the first child is popped first.
        stack.extend(frame.children(next).into_iter().rev());
    }

    added
}

/// Generates the full gasket for three seed corners.
///
/// The corners are validated, stored, and expanded with [`Sphere::ZERO`] as
/// the initial cutoff.
///
/// ### Parameters
/// - `corners` - Three mutually tangent seed spheres.
/// - `cfg` - Depth floor, budget and dedup mode.
///
/// ### Returns
/// The gasket set including the corners, or an error if a corner is not a
/// valid sphere or `cfg.depth_floor` is negative or not finite.
pub fn run(corners: [Sphere; 3], cfg: &Config) -> Result<GasketSet> {
    check_inputs(&corners, cfg)?;
    debug!(
        depth_floor = cfg.depth_floor,
        budget = cfg.budget,
        dedup = ?cfg.dedup,
        "expanding gasket"
    );

    let mut set = seeded_set(&corners, cfg.dedup);
    let [c1, c2, c3] = corners;
    let added = expand(&mut set, cfg.depth_floor, cfg.budget, c1, c2, c3, Sphere::ZERO);

    info!(generated = added, total = set.len(), "gasket complete");
    Ok(set)
}

/// Same as [`run`], but forks the three branches of each node onto the
/// rayon thread pool.
///
/// Every branch collects into its own [`GasketSet`]; the sets are merged on
/// the way back up. The result holds the same sphere values as [`run`],
/// though iteration order may differ.
pub fn run_parallel(corners: [Sphere; 3], cfg: &Config) -> Result<GasketSet> {
    check_inputs(&corners, cfg)?;
    debug!(
        depth_floor = cfg.depth_floor,
        budget = cfg.budget,
        dedup = ?cfg.dedup,
        "expanding gasket in parallel"
    );

    let mut set = seeded_set(&corners, cfg.dedup);
    let [c1, c2, c3] = corners;
    let root = Frame {
        budget: cfg.budget,
        s1: c1,
        s2: c2,
        s3: c3,
        cutoff: Sphere::ZERO,
    };
    let added = set.merge_from(expand_forked(root, cfg.depth_floor, cfg.dedup));

    info!(generated = added, total = set.len(), "gasket complete");
    Ok(set)
}

fn expand_forked(frame: Frame, depth_floor: f64, mode: DedupMode) -> GasketSet {
    let mut set = GasketSet::new(mode);

    if frame.budget < PARALLEL_CUTOFF_BUDGET {
        expand(
            &mut set,
            depth_floor,
            frame.budget,
            frame.s1,
            frame.s2,
            frame.s3,
            frame.cutoff,
        );
        return set;
    }

    let Some(next) = frame.next(depth_floor) else {
        return set;
    };
    set.insert(next);

    let [a, b, c] = frame.children(next);
    let (set_a, (set_b, set_c)) = rayon::join(
        || expand_forked(a, depth_floor, mode),
        || {
            rayon::join(
                || expand_forked(b, depth_floor, mode),
                || expand_forked(c, depth_floor, mode),
            )
        },
    );
    set.merge_from(set_a);
    set.merge_from(set_b);
    set.merge_from(set_c);
    set
}

/// The point a viewer should center on: the projection of the first
/// generated sphere.
pub fn centroid(corners: [Sphere; 3]) -> Result<Point2D> {
    check_corners(&corners)?;
    let [c1, c2, c3] = corners;
    let first = tangent_sphere(&c1, &c2, &c3, &Sphere::ZERO).ok_or(
        GasketError::DegenerateProjection {
            weights: c1.weights() + c2.weights() + c3.weights(),
        },
    )?;
    coords::to_cartesian(&first)
}

fn seeded_set(corners: &[Sphere; 3], mode: DedupMode) -> GasketSet {
    let mut set = GasketSet::new(mode);
    for c in corners {
        set.insert(*c);
    }
    set
}

fn check_corners(corners: &[Sphere; 3]) -> Result<()> {
    if let Some((index, c)) = corners.iter().enumerate().find(|(_, c)| !c.is_valid()) {
        warn!(index, weights = %c.weights(), "rejecting seed corner");
        return Err(GasketError::InvalidSeed {
            index,
            weights: c.weights(),
        });
    }
    Ok(())
}

fn check_inputs(corners: &[Sphere; 3], cfg: &Config) -> Result<()> {
    if !cfg.depth_floor.is_finite() || cfg.depth_floor < 0.0 {
        return Err(GasketError::InvalidParameter {
            name: "depth_floor",
            value: cfg.depth_floor,
        });
    }
    if let DedupMode::ByValue { precision } = cfg.dedup
        && !(precision.is_finite() && precision > 0.0)
    {
        return Err(GasketError::InvalidParameter {
            name: "precision",
            value: precision,
        });
    }
    check_corners(corners)
}
