use std::path::Path;
use std::io::Write;
use log::info;

use crate::io::write_atomically;
use crate::trajectory::PoseSequence;
use crate::Result;

/**
 * Vertex only ascii PLY of the pose positions.
 */
pub fn write_ply_to<W: Write + ?Sized>(poses: &PoseSequence, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "element vertex {}", poses.len())?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    writeln!(writer, "end_header")?;
    for pose in poses {
        writeln!(writer, "{} {} {}", pose.position.x, pose.position.y, pose.position.z)?;
    }
    Ok(())
}

pub fn write_ply(poses: &PoseSequence, file_path: &Path) -> Result<()> {
    info!("Converting ARposes to ply. Output file: {}", file_path.display());
    write_atomically(file_path, |w| write_ply_to(poses, w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::Pose;
    use nalgebra::{Vector3,Quaternion};

    #[test]
    fn ply_has_header_and_one_line_per_pose() {
        let poses = PoseSequence::new(vec![
            Pose::new("0", Vector3::new(0.5, -1.0, 2.0), Quaternion::identity(), "Normal"),
            Pose::new("1", Vector3::new(1.0, 0.0, 0.25), Quaternion::identity(), "Normal")
        ]);
        let mut buffer = Vec::<u8>::new();
        write_ply_to(&poses, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines = text.lines().collect::<Vec<&str>>();
        assert_eq!(lines[2], "element vertex 2");
        assert_eq!(lines[6], "end_header");
        assert_eq!(&lines[7..], &["0.5 -1 2", "1 0 0.25"]);
    }
}
