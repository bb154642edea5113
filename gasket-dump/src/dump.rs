//! Plain-text hand-off format for renderers.
//!
//! The first line is a `#` comment holding the packing center. Each further
//! line is one sphere: `x y radius red green blue`, largest spheres first.

use gasket_core::{GasketSet, Placement, Result, Sphere, types::Point2D};
use std::io::Write;

/// The three unit corners of the reference simplex.
pub fn unit_corners() -> [Sphere; 3] {
    [
        Sphere::from_components(1.0, 0.0, 0.0, 0.5),
        Sphere::from_components(0.0, 1.0, 0.0, 0.5),
        Sphere::from_components(0.0, 0.0, 1.0, 0.5),
    ]
}

/// Projects every sphere of `set`, sorted by descending radius.
///
/// Ties are broken by position so the output is stable across runs and
/// between the sequential and parallel engines.
pub fn placements(set: &GasketSet) -> Result<Vec<Placement>> {
    let mut out = set
        .iter()
        .map(Sphere::placement)
        .collect::<Result<Vec<_>>>()?;
    out.sort_by(|a, b| {
        b.radius
            .total_cmp(&a.radius)
            .then(a.center.x.total_cmp(&b.center.x))
            .then(a.center.y.total_cmp(&b.center.y))
    });
    Ok(out)
}

pub fn format_line(p: &Placement) -> String {
    format!(
        "{:.9} {:.9} {:.9} {:.6} {:.6} {:.6}",
        p.center.x, p.center.y, p.radius, p.color.x, p.color.y, p.color.z
    )
}

/// Writes the header and one line per sphere to `out`.
pub fn write_table(out: &mut impl Write, center: Point2D, set: &GasketSet) -> anyhow::Result<()> {
    writeln!(out, "# center {:.9} {:.9}", center.x, center.y)?;
    for p in placements(set)? {
        writeln!(out, "{}", format_line(&p))?;
    }
    Ok(())
}
