use nalgebra as na;
use rand::{rngs::StdRng, Rng, SeedableRng};
use approx::assert_relative_eq;

use na::{Vector3,Quaternion,UnitQuaternion};
use arpose_graph::numerics::pose::{relative_rotation,relative_rotation_from_matrices};
use arpose_graph::trajectory::{Pose,PoseSequence};
use arpose_graph::{float,Float,PoseGraphError};

fn random_rotation(rng: &mut StdRng) -> UnitQuaternion<Float> {
    let pi = float::consts::PI;
    UnitQuaternion::from_euler_angles(rng.gen_range(-pi..pi), rng.gen_range(-pi/2.0..pi/2.0), rng.gen_range(-pi..pi))
}

fn pose_with(position: Vector3<Float>, orientation: Quaternion<Float>) -> Pose {
    Pose::new("0", position, orientation, "Normal")
}

#[test]
fn quaternion_and_matrix_composition_agree() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1000 {
        let a = random_rotation(&mut rng);
        let b = random_rotation(&mut rng);
        let q_rel = relative_rotation(&a, &b);
        let q_rel_matrix = relative_rotation_from_matrices(&a, &b);

        assert!(q_rel.angle_to(&q_rel_matrix) < 1e-6);
        assert!(q_rel.w >= 0.0 && q_rel_matrix.w >= 0.0);
        assert_relative_eq!(q_rel.coords, q_rel_matrix.coords, epsilon = 1e-6);
    }
}

#[test]
fn relative_rotation_maps_a_onto_b() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let a = random_rotation(&mut rng);
        let b = random_rotation(&mut rng);
        let q_rel = relative_rotation(&a, &b);
        assert!((q_rel * a).angle_to(&b) < 1e-9);
    }
}

#[test]
fn translation_is_world_frame_difference() {
    let rotated = UnitQuaternion::from_euler_angles(0.0, 0.0, float::consts::FRAC_PI_2);
    let poses = PoseSequence::new(vec![
        pose_with(Vector3::new(1.0, 2.0, 3.0), rotated.into_inner()),
        pose_with(Vector3::new(2.0, 2.0, 1.0), Quaternion::identity())
    ]);
    let (t_rel, q_rel) = poses.relative(0, 1).unwrap();
    assert_eq!(t_rel, Vector3::new(1.0, 0.0, -2.0));
    assert!(q_rel.angle_to(&rotated.inverse()) < 1e-12);
}

#[test]
fn identical_orientations_give_identity() {
    let q = UnitQuaternion::from_euler_angles(0.3, -0.2, 1.1);
    let poses = PoseSequence::new(vec![
        pose_with(Vector3::zeros(), q.into_inner()),
        pose_with(Vector3::new(0.0, 1.0, 0.0), q.into_inner())
    ]);
    let (_, q_rel) = poses.relative(0, 1).unwrap();
    assert_relative_eq!(q_rel.w, 1.0, epsilon = 1e-12);
    assert_relative_eq!(q_rel.imag(), Vector3::zeros(), epsilon = 1e-12);
}

#[test]
fn zero_norm_orientation_is_degenerate() {
    let poses = PoseSequence::new(vec![
        pose_with(Vector3::zeros(), Quaternion::identity()),
        pose_with(Vector3::zeros(), Quaternion::new(0.0, 0.0, 0.0, 0.0))
    ]);
    let result = poses.relative(0, 1);
    assert!(matches!(result, Err(PoseGraphError::DegenerateOrientation { ref context, .. }) if context == "pose 1"));
}
