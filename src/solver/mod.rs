use std::fs;
use std::path::{Path,PathBuf};
use std::process::{Command,ExitStatus};
use std::thread;
use std::time::{Duration,Instant};
use serde::Deserialize;
use log::{info,debug};

use crate::{PoseGraphError,Result};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug,Clone,Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub binary: PathBuf,
    /// Passed as `<flag>=<graph path>`
    pub flag: String,
    pub timeout_secs: Option<u64>
}

impl Default for SolverConfig {
    fn default() -> SolverConfig {
        SolverConfig {
            binary: PathBuf::from("bin/position_estimator"),
            flag: "--g2o_filename".to_string(),
            timeout_secs: None
        }
    }
}

impl SolverConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/**
 * Name the solver binaries give their result: the input path with `.out` appended.
 */
pub fn default_output_path(graph_path: &Path) -> PathBuf {
    let mut name = graph_path.as_os_str().to_os_string();
    name.push(".out");
    PathBuf::from(name)
}

/**
 * Runs the solver on `graph_path` to completion and checks that it produced `output_path`.
 * A stale `output_path` is removed first so a failed run cannot be mistaken for a fresh result.
 */
pub fn run_solver(config: &SolverConfig, graph_path: &Path, output_path: &Path) -> Result<()> {
    if output_path.exists() {
        debug!("Removing stale solver output: {}", output_path.display());
        fs::remove_file(output_path).map_err(|e| PoseGraphError::io(output_path, e))?;
    }

    let argument = format!("{}={}", config.flag, graph_path.display());
    info!("Running {} {}", config.binary.display(), argument);
    let mut child = Command::new(&config.binary).arg(&argument).spawn()
        .map_err(|e| PoseGraphError::ExternalProcess(format!("could not start {}: {}", config.binary.display(), e)))?;

    let status = wait_with_timeout(&mut child, config.timeout())?;
    if !status.success() {
        return Err(PoseGraphError::ExternalProcess(format!("{} exited with {}", config.binary.display(), status)));
    }
    if !output_path.exists() {
        return Err(PoseGraphError::ExternalProcess(format!("{} did not write {}", config.binary.display(), output_path.display())));
    }

    info!("Solver finished, output: {}", output_path.display());
    Ok(())
}

fn wait_with_timeout(child: &mut std::process::Child, timeout: Option<Duration>) -> Result<ExitStatus> {
    let process_error = |e: std::io::Error| PoseGraphError::ExternalProcess(format!("waiting for solver failed: {}", e));
    let timeout = match timeout {
        Some(t) => t,
        None => return child.wait().map_err(process_error)
    };

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait().map_err(process_error)? {
            return Ok(status);
        }
        if start.elapsed() >= timeout {
            child.kill().map_err(process_error)?;
            child.wait().map_err(process_error)?;
            return Err(PoseGraphError::ExternalProcess(format!("timed out after {:?}", timeout)));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_appends_suffix() {
        assert_eq!(default_output_path(Path::new("data/ARposes.g2o")), PathBuf::from("data/ARposes.g2o.out"));
    }

    #[test]
    fn missing_binary_is_process_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = SolverConfig { binary: dir.path().join("does_not_exist"), ..SolverConfig::default() };
        let graph = dir.path().join("graph.g2o");
        let result = run_solver(&config, &graph, &default_output_path(&graph));
        assert!(matches!(result, Err(PoseGraphError::ExternalProcess(_))));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_process_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = SolverConfig { binary: PathBuf::from("false"), ..SolverConfig::default() };
        let graph = dir.path().join("graph.g2o");
        let result = run_solver(&config, &graph, &default_output_path(&graph));
        assert!(matches!(result, Err(PoseGraphError::ExternalProcess(msg)) if msg.contains("exited")));
    }

    #[cfg(unix)]
    #[test]
    fn stale_output_is_removed_and_missing_output_reported() {
        let dir = tempfile::tempdir().unwrap();
        let graph = dir.path().join("graph.g2o");
        let output = default_output_path(&graph);
        fs::write(&output, "VERTEX_SE3:QUAT 0 0 0 0 0 0 0 1\n").unwrap();

        let config = SolverConfig { binary: PathBuf::from("true"), ..SolverConfig::default() };
        let result = run_solver(&config, &graph, &output);
        assert!(matches!(result, Err(PoseGraphError::ExternalProcess(msg)) if msg.contains("did not write")));
        assert!(!output.exists());
    }

    #[cfg(unix)]
    #[test]
    fn slow_solver_is_killed_after_timeout() {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("slow_solver.sh");
        {
            let mut file = fs::File::create(&script).unwrap();
            file.write_all(b"#!/bin/sh\nsleep 5\n").unwrap();
            file.sync_all().unwrap();
        }
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let graph = dir.path().join("graph.g2o");
        let output = default_output_path(&graph);
        let config = SolverConfig { binary: script, timeout_secs: Some(1), ..SolverConfig::default() };

        let started = Instant::now();
        let mut result = run_solver(&config, &graph, &output);
        // exec can race with a file still open for writing in a concurrently forked test
        for _ in 0..5 {
            match &result {
                Err(PoseGraphError::ExternalProcess(msg)) if msg.contains("could not start") => {
                    thread::sleep(Duration::from_millis(100));
                    result = run_solver(&config, &graph, &output);
                },
                _ => break
            }
        }
        assert!(matches!(&result, Err(PoseGraphError::ExternalProcess(msg)) if msg.contains("timed out")), "{:?}", result);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!output.exists());
    }
}
