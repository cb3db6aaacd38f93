//! Cross-section properties

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Cross-section properties referenced by UID from beam assignments.
///
/// The data model only needs the four scalars below (SPEC_FULL §3); the
/// geometric constructors are ergonomic sugar that compute them from more
/// convenient inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossSection {
    /// User-facing identifier, unique within a model.
    pub uid: String,
    /// Cross-sectional area in m^2.
    pub a: f64,
    /// Second moment of area about local y in m^4.
    pub iy: f64,
    /// Second moment of area about local z in m^4.
    pub iz: f64,
    /// Torsional constant in m^4.
    pub j: f64,
}

impl CrossSection {
    /// Create a new cross-section, validating `A, Iy, Iz, J > 0`.
    pub fn new(uid: impl Into<String>, a: f64, iy: f64, iz: f64, j: f64) -> FrameResult<Self> {
        let uid = uid.into();
        if uid.is_empty() {
            return Err(FrameError::InvalidSchema(
                "cross-section uid must not be empty".into(),
            ));
        }
        if !(a > 0.0 && iy > 0.0 && iz > 0.0 && j > 0.0) {
            return Err(FrameError::InvalidSchema(format!(
                "cross-section '{uid}' requires A, Iy, Iz, J > 0"
            )));
        }
        Ok(Self { uid, a, iy, iz, j })
    }

    /// A unit-valued section (A = Iy = Iz = J = 1), used by the spec's end-to-end scenarios.
    pub fn unit(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            a: 1.0,
            iy: 1.0,
            iz: 1.0,
            j: 1.0,
        }
    }

    /// Rectangular section of the given width (local z extent) and depth (local y extent).
    pub fn rectangular(uid: impl Into<String>, width: f64, depth: f64) -> FrameResult<Self> {
        let a = width * depth;
        let iy = width * depth.powi(3) / 12.0;
        let iz = depth * width.powi(3) / 12.0;
        let (long_side, short_side) = if width > depth {
            (width, depth)
        } else {
            (depth, width)
        };
        let j = long_side * short_side.powi(3) / 3.0 * (1.0 - 0.63 * short_side / long_side);
        Self::new(uid, a, iy, iz, j)
    }

    /// Solid circular section of the given diameter.
    pub fn circular(uid: impl Into<String>, diameter: f64) -> FrameResult<Self> {
        let r = diameter / 2.0;
        let a = std::f64::consts::PI * r.powi(2);
        let i = std::f64::consts::PI * r.powi(4) / 4.0;
        let j = std::f64::consts::PI * r.powi(4) / 2.0;
        Self::new(uid, a, i, i, j)
    }

    /// Hollow circular (pipe) section.
    pub fn pipe(uid: impl Into<String>, outer_diameter: f64, wall_thickness: f64) -> FrameResult<Self> {
        let r_o = outer_diameter / 2.0;
        let r_i = r_o - wall_thickness;
        let a = std::f64::consts::PI * (r_o.powi(2) - r_i.powi(2));
        let i = std::f64::consts::PI * (r_o.powi(4) - r_i.powi(4)) / 4.0;
        let j = std::f64::consts::PI * (r_o.powi(4) - r_i.powi(4)) / 2.0;
        Self::new(uid, a, i, i, j)
    }

    /// Wide-flange (I-beam) section.
    pub fn wide_flange(
        uid: impl Into<String>,
        depth: f64,
        flange_width: f64,
        flange_thickness: f64,
        web_thickness: f64,
    ) -> FrameResult<Self> {
        let bf = flange_width;
        let tf = flange_thickness;
        let tw = web_thickness;
        let d = depth;
        let hw = d - 2.0 * tf;

        let a = 2.0 * bf * tf + hw * tw;
        let iy = (bf * d.powi(3) - (bf - tw) * hw.powi(3)) / 12.0;
        let iz = (2.0 * tf * bf.powi(3) + hw * tw.powi(3)) / 12.0;
        let j = (2.0 * bf * tf.powi(3) + hw * tw.powi(3)) / 3.0;
        Self::new(uid, a, iy, iz, j)
    }

    /// Rectangular hollow (box/tube) section.
    pub fn box_section(
        uid: impl Into<String>,
        width: f64,
        depth: f64,
        wall_thickness: f64,
    ) -> FrameResult<Self> {
        let t = wall_thickness;
        let b = width;
        let d = depth;
        let bi = b - 2.0 * t;
        let di = d - 2.0 * t;

        let a = b * d - bi * di;
        let iy = (b * d.powi(3) - bi * di.powi(3)) / 12.0;
        let iz = (d * b.powi(3) - di * bi.powi(3)) / 12.0;
        let am = (b - t) * (d - t);
        let s = 2.0 * (b + d) - 4.0 * t;
        let j = 4.0 * am.powi(2) * t / s;
        Self::new(uid, a, iy, iz, j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangular_matches_closed_form() {
        let s = CrossSection::rectangular("s", 0.3, 0.5).unwrap();
        assert!((s.a - 0.15).abs() < 1e-12);
        assert!((s.iy - 0.3 * 0.5_f64.powi(3) / 12.0).abs() < 1e-12);
    }

    #[test]
    fn circular_has_equal_iy_iz() {
        let s = CrossSection::circular("s", 0.5).unwrap();
        assert!((s.iy - s.iz).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_properties() {
        assert!(CrossSection::new("s", 0.0, 1.0, 1.0, 1.0).is_err());
    }
}
