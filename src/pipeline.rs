use std::path::{Path,PathBuf};
use log::{info,warn};

use crate::graph::{InformationMatrix,PoseGraph,builder::PoseGraphBuilder,g2o};
use crate::io::{arposes_loader,pairs_loader};
use crate::trajectory::PoseSequence;
use crate::visualize::{ply,plot};
use crate::{solver,RuntimeConf,Result};

/// Every file the adjustment touches. Nothing is derived inside the components.
#[derive(Debug,Clone)]
pub struct AdjustmentPaths {
    pub arposes: PathBuf,
    pub pairs: PathBuf,
    pub graph: PathBuf,
    pub solver_output: PathBuf,
    pub adjusted_arposes: PathBuf,
    pub ply: Option<PathBuf>
}

impl AdjustmentPaths {
    /**
     * Conventional names next to the trajectory: `<stem>.g2o`, `<stem>.g2o.out`, `<stem>.adj.txt`, `<stem>.adj.ply`.
     */
    pub fn next_to(arposes: &Path, pairs: &Path) -> AdjustmentPaths {
        let graph = arposes.with_extension("g2o");
        let solver_output = solver::default_output_path(&graph);
        let adjusted_arposes = arposes.with_extension("adj.txt");
        let ply = Some(arposes.with_extension("adj.ply"));
        AdjustmentPaths { arposes: arposes.to_path_buf(), pairs: pairs.to_path_buf(), graph, solver_output, adjusted_arposes, ply }
    }
}

pub fn builder_from_conf(conf: &RuntimeConf) -> PoseGraphBuilder {
    PoseGraphBuilder::new(InformationMatrix::uniform(conf.information_weight), conf.pairwise_translation)
}

/**
 * Loads the trajectory and pairs, builds the graph and saves it to `graph_path`.
 */
pub fn export_graph(arposes: &Path, pairs: &Path, graph_path: &Path, builder: &PoseGraphBuilder) -> Result<PoseGraph> {
    let poses = arposes_loader::load_arposes(arposes)?;
    let pairs = pairs_loader::load_pairs(pairs)?;
    let graph = builder.build_described(poses, &pairs.pairs, |pair_idx| pairs.describe(pair_idx))?;
    g2o::save_g2o(&graph, graph_path)?;
    Ok(graph)
}

/**
 * Decodes the solver output and writes it as a trajectory. With a reference of equal length its timestamps are kept.
 */
pub fn import_graph(solver_output: &Path, adjusted_arposes: &Path, reference: Option<&PoseSequence>) -> Result<PoseSequence> {
    let decoded = g2o::load_g2o(solver_output)?;
    let adjusted = match reference {
        Some(reference) => match decoded.with_timestamps_from(reference) {
            Some(restored) => restored,
            None => {
                warn!("Solver returned {} vertices for {} poses, keeping vertex ids as timestamps", decoded.len(), reference.len());
                decoded
            }
        },
        None => decoded
    };
    arposes_loader::write_arposes(&adjusted, adjusted_arposes)?;
    Ok(adjusted)
}

/**
 * load -> build -> encode -> solver -> decode -> trajectory (and optionally ply and plot)
 */
pub fn adjust_trajectory(paths: &AdjustmentPaths, conf: &RuntimeConf) -> Result<PoseSequence> {
    info!("step 1: converting ARKit poses to g2o");
    let graph = export_graph(&paths.arposes, &paths.pairs, &paths.graph, &builder_from_conf(conf))?;

    info!("step 2: running graph optimization");
    solver::run_solver(&conf.solver, &paths.graph, &paths.solver_output)?;

    info!("step 3: converting g2o back to ARKit poses");
    let reference = match conf.restore_timestamps {
        true => Some(graph.vertices()),
        false => None
    };
    let adjusted = import_graph(&paths.solver_output, &paths.adjusted_arposes, reference)?;

    if let Some(ply_path) = paths.ply.as_ref().filter(|_| conf.write_ply) {
        ply::write_ply(&adjusted, ply_path)?;
    }

    if let Some(plot_path) = &conf.plot_output {
        // best effort
        if let Err(e) = plot::draw_trajectory_comparison(&graph.vertices().positions(), "original", &adjusted.positions(), "adjusted", plot_path, "Trajectory adjustment") {
            warn!("Could not draw {}: {}", plot_path.display(), e);
        }
    }

    if let (Some(before), Some(after)) = (graph.vertices().extent(), adjusted.extent()) {
        info!("Trajectory center moved from {:?} to {:?}, half range {:.3} -> {:.3}", before.0.as_slice(), after.0.as_slice(), before.1, after.1);
    }

    Ok(adjusted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_sit_next_to_trajectory() {
        let paths = AdjustmentPaths::next_to(Path::new("data/ARposes.txt"), Path::new("data/pairs.txt"));
        assert_eq!(paths.graph, PathBuf::from("data/ARposes.g2o"));
        assert_eq!(paths.solver_output, PathBuf::from("data/ARposes.g2o.out"));
        assert_eq!(paths.adjusted_arposes, PathBuf::from("data/ARposes.adj.txt"));
        assert_eq!(paths.ply, Some(PathBuf::from("data/ARposes.adj.ply")));
    }
}
