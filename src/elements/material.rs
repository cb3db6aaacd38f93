//! Material properties

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Isotropic material referenced by UID from beam cross-section assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// User-facing identifier, unique within a model.
    pub uid: String,
    /// Young's modulus in Pa.
    pub e: f64,
    /// Shear modulus in Pa.
    pub g: f64,
    /// Density in kg/m^3.
    pub rho: f64,
}

impl Material {
    /// Create a new material, validating `E, G, rho > 0`.
    pub fn new(uid: impl Into<String>, e: f64, g: f64, rho: f64) -> FrameResult<Self> {
        let uid = uid.into();
        if uid.is_empty() {
            return Err(FrameError::InvalidSchema("material uid must not be empty".into()));
        }
        if !(e > 0.0 && g > 0.0 && rho > 0.0) {
            return Err(FrameError::InvalidSchema(format!(
                "material '{uid}' requires E, G, rho > 0"
            )));
        }
        Ok(Self { uid, e, g, rho })
    }

    /// Standard steel (A36-ish), for quick model building and tests.
    pub fn steel(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            e: 200e9,
            g: 77e9,
            rho: 7850.0,
        }
    }

    /// A unit-valued material (E = G = rho = 1), used by the spec's end-to-end scenarios.
    pub fn unit(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            e: 1.0,
            g: 1.0,
            rho: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_properties() {
        assert!(Material::new("m", -1.0, 1.0, 1.0).is_err());
        assert!(Material::new("m", 1.0, 0.0, 1.0).is_err());
        assert!(Material::new("m", 1.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn rejects_empty_uid() {
        assert!(Material::new("", 1.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn accepts_valid_material() {
        let m = Material::new("steel", 200e9, 77e9, 7850.0).unwrap();
        assert_eq!(m.uid, "steel");
    }
}
