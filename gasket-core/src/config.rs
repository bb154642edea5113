/// How a [`crate::gasket_set::GasketSet`] treats coincident spheres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DedupMode {
    /// Keep every inserted sphere, even numerically identical ones.
    Bag,
    /// Drop spheres whose weights and radius match an existing member once
    /// quantized to `precision`.
    ByValue { precision: f64 },
}

impl Default for DedupMode {
    fn default() -> Self {
        DedupMode::ByValue { precision: 1e-9 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Branches whose next sphere is smaller than this are pruned.
    pub depth_floor: f64,
    /// Maximum recursion depth below the seed corners.
    pub budget: u32,
    /// Whether coincident spheres are collapsed in the result set.
    pub dedup: DedupMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            depth_floor: 0.03,
            budget: 8,
            dedup: DedupMode::default(),
        }
    }
}
