use core::f32::consts::PI;

use crate::*;

#[test]
fn test_identity_quaternion_is_level() {
    let q = Quaternion::identity();
    assert!(q.gravity().approx_eq(&Vector::new(0.0, 0.0, 1.0), 1e-6));
    assert!(EulerAngles::from(q).approx_eq(&EulerAngles::identity(), 1e-6));
}

#[test]
fn test_rotation_around_z_is_yaw_only() {
    let half = PI / 4.0;
    let q = Quaternion::new(libm::cosf(half), 0.0, 0.0, libm::sinf(half));
    let angles = EulerAngles::from(q).to_degrees();

    println!("{:?}", angles);
    assert!(angles.approx_eq(&EulerAngles::new(-90.0, 0.0, 0.0), 0.01));
}

#[test]
fn test_rotation_around_x_is_roll_only() {
    let half = (15.0f32).to_radians();
    let q = Quaternion::new(libm::cosf(half), libm::sinf(half), 0.0, 0.0);
    let angles = EulerAngles::from(q).to_degrees();

    println!("{:?}", angles);
    assert!(angles.approx_eq(&EulerAngles::new(0.0, 0.0, 30.0), 0.01));
}

#[test]
fn test_rotation_around_y_is_pitch_only() {
    let half = (10.0f32).to_radians();
    let q = Quaternion::new(libm::cosf(half), 0.0, libm::sinf(half), 0.0);
    let angles = EulerAngles::from(q).to_degrees();

    println!("{:?}", angles);
    assert!(angles.approx_eq(&EulerAngles::new(0.0, -20.0, 0.0), 0.01));
}

#[test]
fn test_normalize_scaled_quaternion() {
    let q = Quaternion::new(2.0, 0.0, 0.0, 0.0).normalize();
    assert!(q.approx_eq(&Quaternion::identity(), 1e-6));

    let zero = Quaternion::new(0.0, 0.0, 0.0, 0.0);
    assert_eq!(zero.normalize(), zero);
}
