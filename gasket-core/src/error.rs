use crate::types::Weights;

/// Result type for gasket operations.
pub type Result<T> = std::result::Result<T, GasketError>;

/// Errors surfaced by the coordinate model and the packing entry points.
///
/// Degenerate geometry met during expansion is not an error; those branches
/// are pruned silently.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GasketError {
    #[error("cannot project weights {weights} with zero or non-finite total")]
    DegenerateProjection { weights: Weights },

    #[error("seed corner {index} has invalid weights {weights} (need all >= 0 and a positive total)")]
    InvalidSeed { index: usize, weights: Weights },

    #[error("parameter `{name}` must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
