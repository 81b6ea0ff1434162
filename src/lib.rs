extern crate nalgebra as na;

use std::fs;
use std::path::{Path,PathBuf};
use serde::Deserialize;

pub mod error;
pub mod trajectory;
pub mod numerics;
pub mod io;
pub mod graph;
pub mod solver;
pub mod visualize;
pub mod pipeline;

pub use error::{PoseGraphError,Result};

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);

/// Runtime configuration of the adjustment pipeline. Every field has a default so an
/// empty (or partial) yaml file is valid.
#[derive(Debug,Clone,Deserialize)]
#[serde(default)]
pub struct RuntimeConf {
    pub solver: solver::SolverConfig,
    pub information_weight: Float,
    pub pairwise_translation: bool,
    pub restore_timestamps: bool,
    pub write_ply: bool,
    pub plot_output: Option<PathBuf>
}

impl Default for RuntimeConf {
    fn default() -> RuntimeConf {
        RuntimeConf {
            solver: solver::SolverConfig::default(),
            information_weight: graph::DEFAULT_INFORMATION_WEIGHT,
            pairwise_translation: false,
            restore_timestamps: true,
            write_ply: true,
            plot_output: None
        }
    }
}

pub fn load_runtime_conf(path: &Path) -> Result<RuntimeConf> {
    let contents = fs::read_to_string(path).map_err(|e| PoseGraphError::io(path, e))?;
    serde_yaml::from_str(&contents).map_err(|e| PoseGraphError::Config { path: path.to_path_buf(), source: e })
}
