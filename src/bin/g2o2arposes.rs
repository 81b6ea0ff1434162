extern crate arpose_graph;
extern crate color_eyre;

use std::path::PathBuf;
use clap::Parser;
use color_eyre::eyre::Result;
use arpose_graph::io::arposes_loader::load_arposes;
use arpose_graph::pipeline::import_graph;

/// Convert an optimized g2o graph back to ARKit poses.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Optimized g2o file written by the solver
    #[arg(long)]
    g2o: PathBuf,

    /// Output trajectory
    #[arg(long)]
    output: PathBuf,

    /// Original trajectory whose timestamps should be kept
    #[arg(long)]
    reference: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let reference = args.reference.as_deref().map(load_arposes).transpose()?;
    let adjusted = import_graph(&args.g2o, &args.output, reference.as_ref())?;
    log::info!("Wrote {} poses", adjusted.len());
    Ok(())
}
