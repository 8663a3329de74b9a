use rustfft::num_complex::Complex64;
use std::f64::consts::{FRAC_PI_2, PI};
use trajectoid::{TrajectoidError, Trajectory};

#[test]
fn test_constant_magnitude_maps_to_zero() {
    let t = Trajectory::from_signal(&[3.0; 6], None).unwrap();
    assert_eq!(t.len(), 6);
    assert_eq!(t.xs(), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    assert!(t.ys().iter().all(|&y| y == 0.0));
    assert!(t.zs().iter().all(|&z| z == 0.0));
}

#[test]
fn test_magnitude_is_normalised() {
    let magnitude = [2.0, 4.0, 3.0, 6.0];
    let phase = [0.1, -0.2, 0.3, -0.4];
    let t = Trajectory::from_signal(&magnitude, Some(&phase[..])).unwrap();
    let ys = t.ys();
    assert_eq!(ys[0], 0.0);
    assert!((ys[1] - 0.5).abs() < 1e-9);
    assert!((ys[2] - 0.25).abs() < 1e-9);
    assert!((ys[3] - 1.0).abs() < 1e-9 && ys[3] < 1.0);
    assert_eq!(t.zs(), phase.to_vec());
}

#[test]
fn test_phase_length_must_match() {
    let result = Trajectory::from_signal(&[1.0, 2.0, 3.0], Some(&[0.0, 1.0][..]));
    assert!(matches!(
        result,
        Err(TrajectoidError::ShapeMismatch { expected: 3, actual: 2, .. })
    ));
}

#[test]
fn test_from_complex_uses_modulus_and_argument() {
    let c = [
        Complex64::new(0.0, 0.0),
        Complex64::new(0.0, -2.0),
        Complex64::new(-1.0, 0.0),
        Complex64::new(3.0, 4.0),
    ];
    let t = Trajectory::from_complex(&c);
    let p = t.points();
    assert_eq!(p[0], [0.0, 0.0, 0.0]);
    assert!((p[1][1] - 0.4).abs() < 1e-9);
    assert!((p[1][2] + FRAC_PI_2).abs() < 1e-12);
    assert!((p[2][2] - PI).abs() < 1e-12);
    assert!((p[3][1] - 1.0).abs() < 1e-9);
    for point in p {
        assert!(point[2] > -PI && point[2] <= PI);
    }
}

#[test]
fn test_from_real_phase_is_sign() {
    let t = Trajectory::from_real(&[-2.0, 0.0, 1.0, 2.0]);
    assert_eq!(t.zs(), vec![PI, 0.0, 0.0, 0.0]);
    let ys = t.ys();
    assert!((ys[0] - 1.0).abs() < 1e-9);
    assert!((ys[2] - 0.5).abs() < 1e-9);
    assert_eq!(t.flat().len(), 12);
}
