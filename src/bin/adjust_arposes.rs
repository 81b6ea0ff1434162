extern crate arpose_graph;
extern crate color_eyre;

use std::path::PathBuf;
use clap::Parser;
use color_eyre::eyre::Result;
use arpose_graph::{load_runtime_conf,RuntimeConf};
use arpose_graph::pipeline::{adjust_trajectory,AdjustmentPaths};

/// Adjust an ARKit trajectory with pose graph optimization.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the ARposes.txt trajectory
    #[arg(long)]
    arposes: PathBuf,

    /// Path to the pairs.txt file with loop closure index pairs
    #[arg(long)]
    pairs: PathBuf,

    /// Output g2o graph. Defaults to the trajectory path with a .g2o extension
    #[arg(long)]
    g2o: Option<PathBuf>,

    /// Adjusted trajectory. Defaults to the trajectory path with a .adj.txt extension
    #[arg(long)]
    output: Option<PathBuf>,

    /// Optional yaml runtime configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Solver binary, overrides the configuration
    #[arg(long)]
    solver: Option<PathBuf>,

    /// Solver timeout in seconds, overrides the configuration
    #[arg(long)]
    timeout: Option<u64>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut runtime_conf = match &args.config {
        Some(path) => load_runtime_conf(path)?,
        None => RuntimeConf::default()
    };
    if let Some(solver) = args.solver {
        runtime_conf.solver.binary = solver;
    }
    if args.timeout.is_some() {
        runtime_conf.solver.timeout_secs = args.timeout;
    }

    let mut paths = AdjustmentPaths::next_to(&args.arposes, &args.pairs);
    if let Some(g2o) = args.g2o {
        paths.solver_output = arpose_graph::solver::default_output_path(&g2o);
        paths.graph = g2o;
    }
    if let Some(output) = args.output {
        paths.ply = Some(output.with_extension("ply"));
        paths.adjusted_arposes = output;
    }

    let adjusted = adjust_trajectory(&paths, &runtime_conf)?;
    log::info!("Adjusted {} poses, saved to {}", adjusted.len(), paths.adjusted_arposes.display());
    Ok(())
}
