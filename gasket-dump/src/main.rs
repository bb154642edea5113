//! Command-line driver that prints a barycentric gasket for an external
//! renderer.
//!
//! Logs go to stderr; stdout carries only the sphere table produced by
//! [`dump::write_table`].

mod dump;

use anyhow::Context;
use clap::Parser;
use gasket_core::{Config, DedupMode, packing};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gasket-dump", about = "Print an Apollonian sphere packing of the simplex")]
struct Args {
    /// Smallest radius that is still generated.
    #[arg(long, default_value_t = 0.03)]
    depth_floor: f64,

    /// Maximum recursion depth below the corners.
    #[arg(long, default_value_t = 8)]
    budget: u32,

    /// Keep coincident spheres instead of deduplicating by value.
    #[arg(long)]
    bag: bool,

    /// Quantization step used when deduplicating by value.
    #[arg(long, default_value_t = 1e-9)]
    precision: f64,

    /// Fork branches onto a thread pool.
    #[arg(long)]
    parallel: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            depth_floor: self.depth_floor,
            budget: self.budget,
            dedup: if self.bag {
                DedupMode::Bag
            } else {
                DedupMode::ByValue {
                    precision: self.precision,
                }
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = args.config();
    let corners = dump::unit_corners();

    let set = if args.parallel {
        packing::run_parallel(corners, &cfg)
    } else {
        packing::run(corners, &cfg)
    }
    .context("failed to generate gasket")?;
    let center = packing::centroid(corners).context("failed to locate packing center")?;
    tracing::info!(spheres = set.len(), "writing sphere table");

    let stdout = std::io::stdout();
    dump::write_table(&mut stdout.lock(), center, &set).context("failed to write sphere table")?;
    Ok(())
}
