use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trajectoid::support::support_radii;
use trajectoid::{rounded_hull, star_body, ConvexHull, DirectionSet, Support, SupportSolid};

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn max_projection(points: &[[f64; 3]], d: [f64; 3]) -> f64 {
    points.iter().map(|&p| dot(p, d)).fold(f64::NEG_INFINITY, f64::max)
}

fn random_cloud(count: usize, seed: u64) -> Vec<[f64; 3]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            [
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-0.5..2.0),
                rng.gen_range(0.0..0.3),
            ]
        })
        .collect()
}

/// Radius of a vertex placed along a unit direction.
fn radius_along(v: [f64; 3], d: [f64; 3]) -> f64 {
    dot(v, d)
}

#[test]
fn test_star_body_full_quantile_is_max_projection() {
    let directions = DirectionSet::icosphere(2);
    let points = random_cloud(300, 1);
    let mesh = star_body(&points, 1.0, &directions).unwrap();

    assert_eq!(mesh.vertex_count(), directions.len());
    assert_eq!(mesh.faces, directions.faces());
    for (v, &d) in mesh.vertices.iter().zip(directions.directions()) {
        let expected = max_projection(&points, d);
        for k in 0..3 {
            assert!((v[k] - d[k] * expected).abs() < 1e-12, "vertex {:?} for {:?}", v, d);
        }
    }
}

#[test]
fn test_quantile_star_body_is_inside_full_one() {
    let directions = DirectionSet::icosphere(1);
    let points = random_cloud(500, 2);
    let full = support_radii(&points, directions.directions(), Support::Max).unwrap();
    let robust = support_radii(&points, directions.directions(), Support::Quantile(0.9)).unwrap();
    let median = support_radii(&points, directions.directions(), Support::Quantile(0.5)).unwrap();

    for i in 0..directions.len() {
        assert!(robust[i] <= full[i], "direction {}: {} > {}", i, robust[i], full[i]);
        assert!(median[i] <= robust[i], "direction {}: {} > {}", i, median[i], robust[i]);
    }
    // Some points must stick out of the robust solid
    assert!(robust.iter().zip(&full).any(|(r, f)| r < f));
}

#[test]
fn test_outlier_barely_moves_robust_support() {
    let directions = DirectionSet::icosphere(1);
    let mut points = random_cloud(400, 3);
    let before = support_radii(&points, directions.directions(), Support::Quantile(0.9)).unwrap();
    points.push([50.0, 50.0, 50.0]);
    let after = support_radii(&points, directions.directions(), Support::Quantile(0.9)).unwrap();
    let max_after = support_radii(&points, directions.directions(), Support::Max).unwrap();

    for i in 0..directions.len() {
        let moved = after[i] - before[i];
        assert!(moved.abs() < 0.05, "direction {} moved {}", i, moved);
    }
    assert!(max_after.iter().any(|&r| r > 50.0));
}

#[test]
fn test_rounded_hull_is_dilated_hull_support() {
    let directions = DirectionSet::icosphere(3);
    let points = random_cloud(400, 4);
    let radius = 0.08;
    let hull = ConvexHull::new(&points).expect("random cloud spans a volume");
    assert!(hull.vertex_indices().len() < points.len());

    let solid = rounded_hull(&points, radius, &directions).unwrap();
    assert!(solid.is_rounded_hull());
    let mesh = solid.mesh();
    assert_eq!(mesh.faces, directions.faces());

    for (v, &d) in mesh.vertices.iter().zip(directions.directions()) {
        let expected = hull.support(d) + radius;
        assert!((radius_along(*v, d) - expected).abs() < 1e-12);
        // Interior points never matter
        assert!((hull.support(d) - max_projection(&points, d)).abs() < 1e-9);
    }
}

#[test]
fn test_hull_contains_every_point() {
    let points = random_cloud(250, 5);
    let hull = ConvexHull::new(&points).unwrap();
    for f in hull.faces() {
        let (a, b, c) = (points[f[0]], points[f[1]], points[f[2]]);
        let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        let n = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];
        for p in &points {
            let side = dot(n, [p[0] - a[0], p[1] - a[1], p[2] - a[2]]);
            assert!(side <= 1e-9, "face {:?} sees {:?} at {}", f, p, side);
        }
    }
    // Closed triangulated sphere
    assert_eq!(hull.faces().len(), 2 * hull.vertex_indices().len() - 4);
}

#[test]
fn test_three_points_fall_back_to_star_body() {
    let directions = DirectionSet::icosphere(2);
    let points = [[0.0, 0.0, 0.0], [1.0, 0.2, 0.0], [0.3, 1.0, 0.5]];

    let solid = rounded_hull(&points, 0.1, &directions).unwrap();
    assert!(!solid.is_rounded_hull());
    assert_eq!(solid.mesh().faces, directions.faces());

    let star = star_body(&points, 1.0, &directions).unwrap();
    match solid {
        SupportSolid::StarBody(mesh) => assert_eq!(mesh, star),
        SupportSolid::RoundedHull(_) => panic!("three points cannot form a hull"),
    }
}

#[test]
fn test_flat_cloud_falls_back_to_star_body() {
    let directions = DirectionSet::icosphere(1);
    let points: Vec<[f64; 3]> = (0..50).map(|i| [i as f64, (i as f64 * 0.3).sin(), 0.0]).collect();
    let solid = rounded_hull(&points, 0.5, &directions).unwrap();
    assert!(matches!(solid, SupportSolid::StarBody(_)));
    assert_eq!(solid.into_mesh().face_count(), directions.faces().len());
}

#[test]
fn test_star_body_is_deterministic() {
    let directions = DirectionSet::icosphere(3);
    let points = random_cloud(1000, 6);
    let a = star_body(&points, 0.9, &directions).unwrap();
    let b = star_body(&points, 0.9, &directions).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_support_radii_validates_arguments() {
    let directions = DirectionSet::icosphere(1);
    let points = random_cloud(20, 7);
    for q in [-0.1, 2.0, f64::NAN] {
        let result = support_radii(&points, directions.directions(), Support::Quantile(q));
        assert!(result.is_err(), "quantile {} should be rejected", q);
    }
    assert!(support_radii(&[], directions.directions(), Support::Quantile(0.5)).is_err());
    assert!(support_radii(&[], directions.directions(), Support::Max).is_err());
}
