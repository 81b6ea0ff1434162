extern crate nalgebra as na;

use std::fs;
use std::path::Path;
use std::io::Write;
use na::Vector3;
use log::{info,warn};

use crate::graph::PoseGraph;
use crate::io::{parse_field,parse_to_float,write_atomically};
use crate::numerics::pose::{checked_unit_quaternion,from_xyzw,to_xyzw};
use crate::trajectory::{Pose,PoseSequence,TRACKING_PLACEHOLDER};
use crate::{PoseGraphError,Result};

pub const VERTEX_TAG: &str = "VERTEX_SE3:QUAT";
pub const EDGE_TAG: &str = "EDGE_SE3:QUAT";

/// Tag, index, x y z, qx qy qz qw
const VERTEX_FIELDS: usize = 9;

/**
 * Vertices in index order, then edges in build order.
 * Vertex line: tag id x y z qx qy qz qw
 * Edge line: tag from to tx ty tz qx qy qz qw followed by the upper triangle of the information matrix.
 */
pub fn write_g2o_to<W: Write + ?Sized>(graph: &PoseGraph, writer: &mut W) -> std::io::Result<()> {
    for (ind, pose) in graph.vertices().iter().enumerate() {
        let p = &pose.position;
        let [qx, qy, qz, qw] = to_xyzw(&pose.orientation);
        writeln!(writer, "{} {} {} {} {} {} {} {} {}", VERTEX_TAG, ind, p.x, p.y, p.z, qx, qy, qz, qw)?;
    }

    for edge in graph.edges() {
        let t = &edge.translation;
        let [qx, qy, qz, qw] = to_xyzw(edge.rotation.quaternion());
        write!(writer, "{} {} {} {} {} {} {} {} {} {}", EDGE_TAG, edge.from, edge.to, t.x, t.y, t.z, qx, qy, qz, qw)?;
        for value in edge.information.upper_triangle() {
            write!(writer, " {}", value)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

pub fn encode(graph: &PoseGraph) -> String {
    let mut buffer = Vec::<u8>::new();
    write_g2o_to(graph, &mut buffer).expect("writing into a Vec does not fail");
    String::from_utf8(buffer).expect("g2o output is ascii")
}

pub fn save_g2o(graph: &PoseGraph, file_path: &Path) -> Result<()> {
    info!("Saving g2o graph with {} vertices and {} edges to: {}", graph.vertices().len(), graph.edges().len(), file_path.display());
    write_atomically(file_path, |w| write_g2o_to(graph, w))
}

/**
 * Reads vertex lines until the first line with another tag. Everything after that point is ignored,
 * the solver output is only consumed for its vertices.
 * The vertex index becomes the timestamp and the tracking status is the placeholder.
 */
pub fn decode(contents: &str, origin: &str) -> Result<PoseSequence> {
    let mut poses = Vec::<Pose>::new();

    for (idx, line) in contents.lines().enumerate() {
        let line_number = idx + 1;
        let fields = line.split_whitespace().collect::<Vec<&str>>();
        if fields.first() != Some(&VERTEX_TAG) {
            warn!("{}:{}: hit line that is not {}, stopping", origin, line_number, VERTEX_TAG);
            break;
        }
        if fields.len() < VERTEX_FIELDS {
            return Err(PoseGraphError::format(origin, line_number, format!("vertex line has {} fields, expected {}", fields.len(), VERTEX_FIELDS)));
        }

        let index = parse_field::<usize>(fields[1], origin, line_number, "vertex index")?;
        let values = fields[2..VERTEX_FIELDS].iter().map(|v| parse_to_float(v, origin, line_number)).collect::<Result<Vec<_>>>()?;
        let position = Vector3::new(values[0], values[1], values[2]);
        let orientation = from_xyzw(values[3], values[4], values[5], values[6]);
        checked_unit_quaternion(&orientation, &format!("{}:{}", origin, line_number))?;

        poses.push(Pose::new(&index.to_string(), position, orientation, TRACKING_PLACEHOLDER));
    }

    Ok(PoseSequence::new(poses))
}

pub fn load_g2o(file_path: &Path) -> Result<PoseSequence> {
    info!("Converting g2o to ARKit poses: {}", file_path.display());
    let contents = fs::read_to_string(file_path).map_err(|e| PoseGraphError::io(file_path, e))?;
    decode(&contents, &file_path.display().to_string())
}
