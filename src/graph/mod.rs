extern crate nalgebra as na;

use na::{Vector3,UnitQuaternion,Matrix6};
use crate::trajectory::PoseSequence;
use crate::{Float,PoseGraphError,Result};

pub mod builder;
pub mod g2o;

/// Diagonal weight the external solver expects on every edge.
pub const DEFAULT_INFORMATION_WEIGHT: Float = 100.0;

/// 6x6 symmetric precision matrix of an edge, translation block first, rotation block second.
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct InformationMatrix(Matrix6<Float>);

impl InformationMatrix {
    /**
     * Decoupled translation and rotation blocks, each a scaled identity.
     */
    pub fn from_blocks(translation_weight: Float, rotation_weight: Float) -> InformationMatrix {
        let mut m = Matrix6::<Float>::zeros();
        m.fixed_view_mut::<3,3>(0,0).fill_diagonal(translation_weight);
        m.fixed_view_mut::<3,3>(3,3).fill_diagonal(rotation_weight);
        InformationMatrix(m)
    }

    pub fn uniform(weight: Float) -> InformationMatrix {
        InformationMatrix::from_blocks(weight, weight)
    }

    pub fn matrix(&self) -> &Matrix6<Float> {
        &self.0
    }

    /**
     * Row major upper triangle, the 21 values following the measurement on an edge line.
     */
    pub fn upper_triangle(&self) -> Vec<Float> {
        (0..6).flat_map(|r| (r..6).map(move |c| (r, c))).map(|(r, c)| self.0[(r, c)]).collect::<Vec<Float>>()
    }
}

impl Default for InformationMatrix {
    fn default() -> InformationMatrix {
        InformationMatrix::uniform(DEFAULT_INFORMATION_WEIGHT)
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum EdgeKind {
    Sequential,
    Pairwise
}

/// Directed relative constraint between two vertices.
#[derive(Debug,Clone,PartialEq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub translation: Vector3<Float>,
    pub rotation: UnitQuaternion<Float>,
    pub information: InformationMatrix,
    pub kind: EdgeKind
}

/// Vertices are the poses by index, edges keep their insertion order.
#[derive(Debug,Clone)]
pub struct PoseGraph {
    vertices: PoseSequence,
    edges: Vec<Edge>
}

impl PoseGraph {
    pub fn new(vertices: PoseSequence, edges: Vec<Edge>) -> Result<PoseGraph> {
        for (edge_idx, edge) in edges.iter().enumerate() {
            for index in [edge.from, edge.to] {
                if index >= vertices.len() {
                    return Err(PoseGraphError::IndexOutOfRange { context: format!("edge {}", edge_idx), index: index as i64, vertex_count: vertices.len() });
                }
            }
        }
        Ok(PoseGraph { vertices, edges })
    }

    pub fn vertices(&self) -> &PoseSequence {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn number_of_edges(&self, kind: EdgeKind) -> usize {
        self.edges.iter().filter(|e| e.kind == kind).count()
    }
}
