extern crate arpose_graph;
extern crate color_eyre;

use std::path::PathBuf;
use clap::Parser;
use color_eyre::eyre::Result;
use arpose_graph::graph::EdgeKind;
use arpose_graph::{load_runtime_conf,RuntimeConf};
use arpose_graph::pipeline::{builder_from_conf,export_graph};

/// Convert ARKit poses and loop closure pairs to a g2o pose graph.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the ARposes.txt trajectory
    #[arg(long)]
    arposes: PathBuf,

    /// Path to the pairs.txt file
    #[arg(long)]
    pairs: PathBuf,

    /// Path to the output g2o file
    #[arg(long)]
    g2o: PathBuf,

    /// Optional yaml runtime configuration
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let runtime_conf = match &args.config {
        Some(path) => load_runtime_conf(path)?,
        None => RuntimeConf::default()
    };

    let graph = export_graph(&args.arposes, &args.pairs, &args.g2o, &builder_from_conf(&runtime_conf))?;
    log::info!("{} vertices, {} sequential and {} pairwise edges", graph.vertices().len(), graph.number_of_edges(EdgeKind::Sequential), graph.number_of_edges(EdgeKind::Pairwise));
    Ok(())
}
