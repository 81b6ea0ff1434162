extern crate nalgebra as na;

use na::Vector3;
use log::{info,debug};

use crate::graph::{Edge,EdgeKind,InformationMatrix,PoseGraph};
use crate::trajectory::PoseSequence;
use crate::Result;

#[derive(Debug,Clone,Copy,Default)]
pub struct PoseGraphBuilder {
    pub information: InformationMatrix,
    /// Pairwise edges carry a zero translation unless this is set.
    pub pairwise_translation: bool
}

impl PoseGraphBuilder {
    pub fn new(information: InformationMatrix, pairwise_translation: bool) -> PoseGraphBuilder {
        PoseGraphBuilder { information, pairwise_translation }
    }

    /**
     * One sequential edge per consecutive pose pair, then one pairwise edge per supplied pair in the given order.
     * Pairs are neither sorted nor deduplicated. Any pair outside the sequence aborts the build.
     */
    pub fn build(&self, poses: PoseSequence, pairs: &[(i64,i64)]) -> Result<PoseGraph> {
        self.build_described(poses, pairs, |pair_idx| format!("pair {}", pair_idx))
    }

    /// As `build`, with `describe` naming a pair by its position for error messages.
    pub fn build_described<F>(&self, poses: PoseSequence, pairs: &[(i64,i64)], describe: F) -> Result<PoseGraph> where F: Fn(usize) -> String {
        let mut edges = Vec::<Edge>::with_capacity(poses.len().saturating_sub(1) + pairs.len());

        info!("Building {} sequential edges", poses.len().saturating_sub(1));
        for ind in 1..poses.len() {
            edges.push(self.edge(&poses, ind-1, ind, EdgeKind::Sequential)?);
        }

        info!("Adding {} pairs as edges", pairs.len());
        for (pair_idx, &(raw_1, raw_2)) in pairs.iter().enumerate() {
            let context = describe(pair_idx);
            let ind_1 = poses.vertex_index(raw_1, &context)?;
            let ind_2 = poses.vertex_index(raw_2, &context)?;
            edges.push(self.edge(&poses, ind_1, ind_2, EdgeKind::Pairwise)?);
        }

        PoseGraph::new(poses, edges)
    }

    fn edge(&self, poses: &PoseSequence, from: usize, to: usize, kind: EdgeKind) -> Result<Edge> {
        let (t_rel, q_rel) = poses.relative(from, to)?;
        let translation = match (kind, self.pairwise_translation) {
            (EdgeKind::Pairwise, false) => Vector3::zeros(),
            _ => t_rel
        };
        debug!("{:?} edge {} -> {}: t {:?} q {:?}", kind, from, to, translation.as_slice(), q_rel.coords.as_slice());

        Ok(Edge { from, to, translation, rotation: q_rel, information: self.information, kind })
    }
}

pub fn build_pose_graph(poses: PoseSequence, pairs: &[(i64,i64)]) -> Result<PoseGraph> {
    PoseGraphBuilder::default().build(poses, pairs)
}
