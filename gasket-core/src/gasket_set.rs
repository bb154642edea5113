use crate::{config::DedupMode, sphere::Sphere};
use ordered_float::OrderedFloat;
use std::collections::HashSet;

/// Hashable value identity of a sphere: quantized weights and radius.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct SphereKey([OrderedFloat<f64>; 4]);

impl SphereKey {
    fn of(s: &Sphere, precision: f64) -> Self {
        let q = |v: f64| {
            if precision > 0.0 {
                OrderedFloat((v / precision).round())
            } else {
                OrderedFloat(v)
            }
        };
        let w = s.weights();
        Self([q(w.x), q(w.y), q(w.z), q(s.radius())])
    }
}

/// The accumulating collection of spheres found by the packing engine.
///
/// Insertion order is kept for iteration but carries no meaning. Depending
/// on its [`DedupMode`], the set either keeps every inserted sphere or
/// silently drops spheres equal by value to one already present.
#[derive(Debug, Clone)]
pub struct GasketSet {
    spheres: Vec<Sphere>,
    seen: HashSet<SphereKey>,
    mode: DedupMode,
}

impl GasketSet {
    /// Creates an empty [`GasketSet`] with the given dedup behaviour.
    pub fn new(mode: DedupMode) -> Self {
        Self {
            spheres: Vec::with_capacity(64),
            seen: HashSet::new(),
            mode,
        }
    }

    /// Adds a sphere to the set.
    ///
    /// In [`DedupMode::Bag`] the sphere is always appended. In
    /// [`DedupMode::ByValue`] it is appended only if no member has the same
    /// quantized weights and radius.
    ///
    /// ### Parameters
    /// - `s` - Sphere to insert. Callers only insert valid spheres.
    ///
    /// ### Returns
    /// `true` if the sphere was stored, `false` if it was a duplicate.
    pub fn insert(&mut self, s: Sphere) -> bool {
        debug_assert!(s.is_valid(), "invalid sphere inserted: {s:?}");

        if let DedupMode::ByValue { precision } = self.mode
            && !self.seen.insert(SphereKey::of(&s, precision))
        {
            return false;
        }
        self.spheres.push(s);
        true
    }

    /// Returns `true` if a sphere equal to `s` is already stored.
    ///
    /// Uses the same quantization as [`GasketSet::insert`] in
    /// [`DedupMode::ByValue`], and exact equality in [`DedupMode::Bag`].
    pub fn contains(&self, s: &Sphere) -> bool {
        match self.mode {
            DedupMode::ByValue { precision } => self.seen.contains(&SphereKey::of(s, precision)),
            DedupMode::Bag => self.spheres.contains(s),
        }
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sphere> + '_ {
        self.spheres.iter()
    }

    /// Returns `true` if every member of `self` is also in `other`.
    ///
    /// Membership is tested with `other`'s dedup rules.
    pub fn is_subset(&self, other: &GasketSet) -> bool {
        self.spheres.iter().all(|s| other.contains(s))
    }

    /// Moves all spheres of `other` into this set.
    ///
    /// Each sphere goes through [`GasketSet::insert`], so this set's dedup
    /// mode decides what survives; `other`'s mode is ignored.
    ///
    /// ### Parameters
    /// - `other` - The set to drain into `self`.
    ///
    /// ### Returns
    /// The number of spheres that were actually stored.
    pub fn merge_from(&mut self, other: GasketSet) -> usize {
        other
            .spheres
            .into_iter()
            .filter(|s| self.insert(*s))
            .count()
    }
}
