extern crate arpose_graph;
extern crate color_eyre;

use std::path::PathBuf;
use clap::Parser;
use color_eyre::eyre::Result;
use arpose_graph::io::arposes_loader::load_arposes;
use arpose_graph::visualize::ply::write_ply;

/// Convert ARKit poses to a vertex only ply point cloud.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the ARposes.txt trajectory
    #[arg(long)]
    arposes: PathBuf,

    /// Output ply. Defaults to the trajectory path with a .ply extension
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let poses = load_arposes(&args.arposes)?;
    let output = args.output.unwrap_or_else(|| args.arposes.with_extension("ply"));
    write_ply(&poses, &output)?;

    if let Some((center, half_range)) = poses.extent() {
        log::info!("{} poses around {:?}, half range {:.3}", poses.len(), center.as_slice(), half_range);
    }
    Ok(())
}
