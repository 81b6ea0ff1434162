extern crate nalgebra as na;

use std::fs;
use std::path::Path;
use std::io::Write;
use na::{Vector3,Quaternion};
use csv::StringRecord;
use serde::Deserialize;
use log::{info,debug};

use crate::io::{csv_error,csv_reader,record_line,write_atomically};
use crate::numerics::pose::checked_unit_quaternion;
use crate::trajectory::{Pose,PoseSequence};
use crate::{Float,PoseGraphError,Result};

/// Column order: Timestamp, X, Y, Z, QW, QX, QY, QZ, TrackingStatus. The quaternion is scalar first.
pub const ARPOSES_COLUMNS: usize = 9;
pub const ARPOSES_HEADER: &str = "Timestamp,Loc.x,Loc.y,Loc.z,Quat.w,Quat.x,Quat.y,Quat.z,TrackingStatus";

pub fn load_arposes(file_path: &Path) -> Result<PoseSequence> {
    info!("Loading ARKit poses from: {}", file_path.display());
    let contents = fs::read_to_string(file_path).map_err(|e| PoseGraphError::io(file_path, e))?;
    parse_arposes(&contents, &file_path.display().to_string())
}

#[derive(Debug,Deserialize)]
struct ArposeRow {
    timestamp: String,
    x: Float,
    y: Float,
    z: Float,
    qw: Float,
    qx: Float,
    qy: Float,
    qz: Float,
    tracking_status: String
}

/**
 * The first line is a header whose names must match `ARPOSES_HEADER` (case insensitive), so a file with
 * another quaternion order is rejected instead of being read transposed.
 * `origin` names the source in error messages.
 */
pub fn parse_arposes(contents: &str, origin: &str) -> Result<PoseSequence> {
    let mut reader = csv_reader(contents);
    let header = reader.headers().map_err(|e| csv_error(e, origin, None))?.clone();
    check_header(&header, origin)?;

    let mut poses = Vec::<Pose>::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(e, origin, None))?;
        let row: ArposeRow = record.deserialize(None).map_err(|e| csv_error(e, origin, Some(&record)))?;
        let line = record_line(&record);

        let orientation = Quaternion::new(row.qw, row.qx, row.qy, row.qz);
        checked_unit_quaternion(&orientation, &format!("{}:{}", origin, line))?;
        poses.push(Pose::new(&row.timestamp, Vector3::new(row.x, row.y, row.z), orientation, &row.tracking_status));
    }
    debug!("Parsed {} poses from {}", poses.len(), origin);

    Ok(PoseSequence::new(poses))
}

fn check_header(header: &StringRecord, origin: &str) -> Result<()> {
    if header.is_empty() {
        return Err(PoseGraphError::format(origin, 1, "missing header row"));
    }
    if header.len() != ARPOSES_COLUMNS {
        return Err(PoseGraphError::format(origin, 1, format!("expected {} columns, found {}", ARPOSES_COLUMNS, header.len())));
    }
    for (column, (found, expected)) in header.iter().zip(ARPOSES_HEADER.split(',')).enumerate() {
        if !found.eq_ignore_ascii_case(expected) {
            return Err(PoseGraphError::format(origin, 1, format!("column {} is '{}', expected '{}'", column + 1, found, expected)));
        }
    }
    Ok(())
}

pub fn write_arposes_to<W: Write + ?Sized>(poses: &PoseSequence, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "{}", ARPOSES_HEADER)?;
    for pose in poses {
        let p = &pose.position;
        let q = &pose.orientation;
        writeln!(writer, "{},{},{},{},{},{},{},{},{}", pose.timestamp, p.x, p.y, p.z, q.w, q.i, q.j, q.k, pose.tracking_status)?;
    }
    Ok(())
}

pub fn write_arposes(poses: &PoseSequence, file_path: &Path) -> Result<()> {
    info!("Saving {} ARKit poses to: {}", poses.len(), file_path.display());
    write_atomically(file_path, |w| write_arposes_to(poses, w))
}
