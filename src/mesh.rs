//! Polyline mesher (component B): turn a beam's named support points into a
//! sequence of evenly-distributed mesh points carrying a relative
//! arc-length coordinate and the propagated support-point UIDs.
//!
//! Grounded on `framat/fem/beamline.py::_make_elements` for shape; the exact
//! subdivision rule (`ceil(n_target * L_i / L)`) follows SPEC_FULL §4.B
//! literally, since it differs from `interpolate.py`'s heuristic.

use crate::error::{FrameError, FrameResult};
use crate::math::Vec3;

/// A support point: a named node before subdivision.
#[derive(Debug, Clone)]
pub struct SupportPoint {
    pub uid: String,
    pub coord: Vec3,
}

impl SupportPoint {
    pub fn new(uid: impl Into<String>, coord: Vec3) -> Self {
        Self {
            uid: uid.into(),
            coord,
        }
    }
}

/// A point on the subdivided polyline.
#[derive(Debug, Clone)]
pub struct MeshPoint {
    pub coord: Vec3,
    /// Arc-length fraction along the beam, in `[0, 1]`.
    pub eta: f64,
    /// UID inherited from a support point; `None` for interior subdivisions.
    pub uid: Option<String>,
}

/// Subdivide a polyline of support points into mesh points.
///
/// `n_target` is distributed across segments in proportion to their length
/// (`n_i = ceil(n_target * L_i / L)`, guaranteeing at least one element per
/// segment), then each segment is subdivided uniformly. Shared endpoints
/// between adjacent segments are deduplicated.
pub fn mesh_polyline(support_points: &[SupportPoint], n_target: usize) -> FrameResult<Vec<MeshPoint>> {
    if support_points.len() < 2 {
        return Err(FrameError::InsufficientSupport(format!(
            "{} support point(s) given, need at least 2",
            support_points.len()
        )));
    }
    if n_target == 0 {
        return Err(FrameError::InvalidSchema("nelem must be >= 1".into()));
    }

    let segment_lengths: Vec<f64> = support_points
        .windows(2)
        .map(|w| (w[1].coord - w[0].coord).norm())
        .collect();
    let total_length: f64 = segment_lengths.iter().sum();
    if segment_lengths.iter().any(|&l| l == 0.0) {
        let bad = support_points
            .windows(2)
            .zip(segment_lengths.iter())
            .find(|(_, &l)| l == 0.0)
            .map(|(w, _)| format!("{} -> {}", w[0].uid, w[1].uid))
            .unwrap_or_default();
        return Err(FrameError::ZeroSegment(bad));
    }

    let mut points = Vec::new();
    let mut cumulative = 0.0_f64;

    for (i, (pair, &seg_len)) in support_points.windows(2).zip(segment_lengths.iter()).enumerate() {
        let p0 = &pair[0];
        let p1 = &pair[1];
        let n_i = ((n_target as f64) * seg_len / total_length).ceil().max(1.0) as usize;

        let first_sub = if i == 0 { 0 } else { 1 };
        for k in first_sub..=n_i {
            let t = k as f64 / n_i as f64;
            let coord = p0.coord + (p1.coord - p0.coord) * t;
            let eta = (cumulative + t * seg_len) / total_length;
            let uid = if k == 0 {
                Some(p0.uid.clone())
            } else if k == n_i {
                Some(p1.uid.clone())
            } else {
                None
            };
            points.push(MeshPoint { coord, eta, uid });
        }
        cumulative += seg_len;
    }

    if let Some(last) = points.last_mut() {
        last.eta = 1.0;
    }

    Ok(points)
}
