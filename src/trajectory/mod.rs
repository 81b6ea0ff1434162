extern crate nalgebra as na;

use na::{Vector3,Quaternion,UnitQuaternion};
use crate::numerics::pose::{checked_unit_quaternion,relative_rotation,relative_translation};
use crate::{float,Float,PoseGraphError,Result};

/// Tracking status written for poses that come back from the solver, which does not carry one.
pub const TRACKING_PLACEHOLDER: &str = "Tracking";

/// One trajectory sample. `timestamp` and `tracking_status` are opaque and passed through untouched.
/// `orientation` holds the loaded components verbatim; it is validated as a unit quaternion on load.
#[derive(Debug,Clone,PartialEq)]
pub struct Pose {
    pub timestamp: String,
    pub position: Vector3<Float>,
    pub orientation: Quaternion<Float>,
    pub tracking_status: String
}

impl Pose {
    pub fn new(timestamp: &str, position: Vector3<Float>, orientation: Quaternion<Float>, tracking_status: &str) -> Pose {
        Pose { timestamp: timestamp.to_string(), position, orientation, tracking_status: tracking_status.to_string() }
    }

    pub fn unit_orientation(&self, context: &str) -> Result<UnitQuaternion<Float>> {
        checked_unit_quaternion(&self.orientation, context)
    }
}

/// Index addressable, write-once list of poses. The index of a pose is its vertex id in the graph.
#[derive(Debug,Clone,PartialEq,Default)]
pub struct PoseSequence {
    poses: Vec<Pose>
}

impl PoseSequence {
    pub fn new(poses: Vec<Pose>) -> PoseSequence {
        PoseSequence { poses }
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Pose> {
        self.poses.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pose> {
        self.poses.iter()
    }

    pub fn positions(&self) -> Vec<Vector3<Float>> {
        self.poses.iter().map(|p| p.position).collect::<Vec<Vector3<Float>>>()
    }

    /**
     * Maps a raw (possibly negative) index onto a vertex of this sequence.
     */
    pub fn vertex_index(&self, index: i64, context: &str) -> Result<usize> {
        match usize::try_from(index) {
            Ok(idx) if idx < self.poses.len() => Ok(idx),
            _ => Err(PoseGraphError::IndexOutOfRange { context: context.to_string(), index, vertex_count: self.poses.len() })
        }
    }

    /**
     * Relative transform between the poses at `from` and `to`.
     * Translation is the world frame difference, rotation is q_to * q_from^-1.
     */
    pub fn relative(&self, from: usize, to: usize) -> Result<(Vector3<Float>,UnitQuaternion<Float>)> {
        let pose_from = self.pose_at(from)?;
        let pose_to = self.pose_at(to)?;
        let rot_from = pose_from.unit_orientation(&format!("pose {}", from))?;
        let rot_to = pose_to.unit_orientation(&format!("pose {}", to))?;

        Ok((relative_translation(&pose_from.position, &pose_to.position), relative_rotation(&rot_from, &rot_to)))
    }

    /**
     * Copies timestamps of `reference` onto this sequence by index. Returns None if the lengths differ.
     */
    pub fn with_timestamps_from(&self, reference: &PoseSequence) -> Option<PoseSequence> {
        match self.len() == reference.len() {
            true => Some(PoseSequence::new(self.poses.iter().zip(reference.iter()).map(|(p, r)| Pose { timestamp: r.timestamp.clone(), ..p.clone() }).collect())),
            false => None
        }
    }

    /**
     * Center of the bounding box and half of its largest side.
     */
    pub fn extent(&self) -> Option<(Vector3<Float>,Float)> {
        if self.poses.is_empty() {
            return None;
        }

        let mut min = Vector3::<Float>::repeat(float::MAX);
        let mut max = Vector3::<Float>::repeat(float::MIN);
        for pose in &self.poses {
            min = min.inf(&pose.position);
            max = max.sup(&pose.position);
        }

        Some(((max + min) * 0.5, (max - min).max() / 2.0))
    }

    fn pose_at(&self, index: usize) -> Result<&Pose> {
        self.poses.get(index).ok_or_else(|| PoseGraphError::IndexOutOfRange { context: "relative transform".to_string(), index: index as i64, vertex_count: self.poses.len() })
    }
}

impl<'a> IntoIterator for &'a PoseSequence {
    type Item = &'a Pose;
    type IntoIter = std::slice::Iter<'a, Pose>;

    fn into_iter(self) -> Self::IntoIter {
        self.poses.iter()
    }
}
