//! Solids reconstructed from direction-wise support values.
//!
//! Both builders place one vertex per direction of a [`DirectionSet`] at
//! `direction · radius(direction)` and reuse the direction set's triangles, so
//! the result is always a closed, sphere-like mesh.

use crate::error::{Result, TrajectoidError};
use crate::hull::{initial_simplex, ConvexHull};
use crate::icosphere::DirectionSet;
use crate::mesh::Mesh;
use crate::vector::dot;
use rayon::prelude::*;

/// How the projections of a cloud onto one direction collapse to a radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Support {
    /// The largest projection: the true support function.
    Max,
    /// The given quantile of the projections, with linear interpolation.
    Quantile(f64),
}

/// Result of [`rounded_hull`]: either the dilated hull, or the star body it
/// falls back to when the cloud cannot enclose a volume.
#[derive(Clone, Debug, PartialEq)]
pub enum SupportSolid {
    StarBody(Mesh),
    RoundedHull(Mesh),
}

impl SupportSolid {
    pub fn mesh(&self) -> &Mesh {
        match self {
            SupportSolid::StarBody(mesh) | SupportSolid::RoundedHull(mesh) => mesh,
        }
    }

    pub fn into_mesh(self) -> Mesh {
        match self {
            SupportSolid::StarBody(mesh) | SupportSolid::RoundedHull(mesh) => mesh,
        }
    }

    pub fn is_rounded_hull(&self) -> bool {
        matches!(self, SupportSolid::RoundedHull(_))
    }
}

/// Linear-interpolation quantile; sorts `values` in place.
fn quantile(values: &mut [f64], q: f64) -> f64 {
    values.sort_unstable_by(f64::total_cmp);
    let last = values.len() - 1;
    let position = q * last as f64;
    let lo = position.floor() as usize;
    let hi = (lo + 1).min(last);
    let frac = position - lo as f64;
    values[lo] + (values[hi] - values[lo]) * frac
}

fn validate_support(support: Support) -> Result<()> {
    let Support::Quantile(q) = support else {
        return Ok(());
    };
    if !(0.0..=1.0).contains(&q) {
        return Err(TrajectoidError::invalid(
            "quantile",
            format!("must lie in [0, 1], got {}", q),
        ));
    }
    Ok(())
}

/// Support value of `points` along every direction, in direction order.
pub fn support_radii(
    points: &[[f64; 3]],
    directions: &[[f64; 3]],
    support: Support,
) -> Result<Vec<f64>> {
    if points.is_empty() {
        return Err(TrajectoidError::EmptyInput("point cloud is empty"));
    }
    validate_support(support)?;

    let radii: Vec<f64> = directions
        .par_iter()
        .map_init(
            || Vec::with_capacity(points.len()),
            |projections: &mut Vec<f64>, &d| match support {
                Support::Max => points
                    .iter()
                    .map(|&p| dot(p, d))
                    .fold(f64::NEG_INFINITY, f64::max),
                Support::Quantile(q) => {
                    projections.clear();
                    projections.extend(points.iter().map(|&p| dot(p, d)));
                    quantile(projections, q)
                }
            },
        )
        .collect();
    Ok(radii)
}

/// Star-shaped solid whose radius along each direction is the `quantile` of
/// the cloud's projections onto it.
///
/// A quantile below one ignores outliers, so the solid need not contain every
/// point; `quantile = 1.0` gives the tight maximum support.
pub fn star_body(points: &[[f64; 3]], quantile: f64, directions: &DirectionSet) -> Result<Mesh> {
    let support = if quantile == 1.0 {
        Support::Max
    } else {
        Support::Quantile(quantile)
    };
    let radii = support_radii(points, directions.directions(), support)?;
    Ok(directions.scaled_mesh(&radii))
}

/// Support-sampled Minkowski sum of the cloud's convex hull with a ball of
/// radius `radius`: along each direction the radius is `h(direction) + radius`,
/// with `h` the maximum projection over the hull vertices.
///
/// Clouds with fewer than four points, or without volume, cannot form a hull;
/// they yield [`SupportSolid::StarBody`] with quantile 1.0 instead.
pub fn rounded_hull(
    points: &[[f64; 3]],
    radius: f64,
    directions: &DirectionSet,
) -> Result<SupportSolid> {
    if points.is_empty() {
        return Err(TrajectoidError::EmptyInput("point cloud is empty"));
    }
    if !radius.is_finite() || radius < 0.0 {
        return Err(TrajectoidError::invalid(
            "radius",
            format!("must be finite and non-negative, got {}", radius),
        ));
    }

    let Some(simplex) = initial_simplex(points) else {
        log::warn!(
            "{} points do not enclose a volume, falling back to the star body",
            points.len()
        );
        return star_body(points, 1.0, directions).map(SupportSolid::StarBody);
    };

    let hull = ConvexHull::from_simplex(points, simplex);
    let radii: Vec<f64> = support_radii(hull.vertices(), directions.directions(), Support::Max)?
        .into_iter()
        .map(|h| h + radius)
        .collect();
    Ok(SupportSolid::RoundedHull(directions.scaled_mesh(&radii)))
}
