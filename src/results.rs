//! Result projection (component H): split the global displacement and load
//! vectors into six-component per-node views.
//!
//! Grounded on the teacher's `src/results.rs` accessor pattern
//! (`NodeDisplacement`/`Reactions`), generalized to a strided six-array
//! split per SPEC_FULL §4.H.

use nalgebra_sparse::CsrMatrix;
use serde::{Deserialize, Serialize};

use crate::abstract_mesh::AbstractMesh;
use crate::error::{FrameError, FrameResult};
use crate::math::Vec as FVec;

/// Six parallel arrays, one entry per global node, in DOF order `[0..6)`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentView {
    pub c0: Vec<f64>,
    pub c1: Vec<f64>,
    pub c2: Vec<f64>,
    pub c3: Vec<f64>,
    pub c4: Vec<f64>,
    pub c5: Vec<f64>,
}

impl ComponentView {
    /// Split a length-n vector (n = 6 * nnodes) into six length-(n/6) arrays
    /// by strided slicing on offsets `0..6`.
    pub fn from_vector(v: &FVec) -> FrameResult<Self> {
        let n = v.len();
        if n % 6 != 0 {
            return Err(FrameError::DimensionMismatch(format!(
                "vector length {n} is not a multiple of 6"
            )));
        }
        let nnodes = n / 6;
        let mut comps = [Vec::with_capacity(nnodes), Vec::with_capacity(nnodes), Vec::with_capacity(nnodes), Vec::with_capacity(nnodes), Vec::with_capacity(nnodes), Vec::with_capacity(nnodes)];
        for node in 0..nnodes {
            for (offset, comp) in comps.iter_mut().enumerate() {
                comp.push(v[6 * node + offset]);
            }
        }
        let [c0, c1, c2, c3, c4, c5] = comps;
        Ok(Self { c0, c1, c2, c3, c4, c5 })
    }

    /// Re-interleave the six components back into a length-n vector.
    /// Exact inverse of [`Self::from_vector`].
    pub fn into_vector(&self) -> FVec {
        let nnodes = self.c0.len();
        let mut out = FVec::zeros(6 * nnodes);
        for node in 0..nnodes {
            out[6 * node] = self.c0[node];
            out[6 * node + 1] = self.c1[node];
            out[6 * node + 2] = self.c2[node];
            out[6 * node + 3] = self.c3[node];
            out[6 * node + 4] = self.c4[node];
            out[6 * node + 5] = self.c5[node];
        }
        out
    }
}

/// Displacement view: `{ux, uy, uz, thx, thy, thz}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplacementView {
    pub ux: Vec<f64>,
    pub uy: Vec<f64>,
    pub uz: Vec<f64>,
    pub thx: Vec<f64>,
    pub thy: Vec<f64>,
    pub thz: Vec<f64>,
}

impl From<ComponentView> for DisplacementView {
    fn from(c: ComponentView) -> Self {
        Self {
            ux: c.c0,
            uy: c.c1,
            uz: c.c2,
            thx: c.c3,
            thy: c.c4,
            thz: c.c5,
        }
    }
}

/// Force/moment view: `{fx, fy, fz, mx, my, mz}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForceView {
    pub fx: Vec<f64>,
    pub fy: Vec<f64>,
    pub fz: Vec<f64>,
    pub mx: Vec<f64>,
    pub my: Vec<f64>,
    pub mz: Vec<f64>,
}

impl From<ComponentView> for ForceView {
    fn from(c: ComponentView) -> Self {
        Self {
            fx: c.c0,
            fy: c.c1,
            fz: c.c2,
            mx: c.c3,
            my: c.c4,
            mz: c.c5,
        }
    }
}

/// Every tensor produced by one analysis run.
pub struct Tensors {
    pub k: CsrMatrix<f64>,
    pub m: CsrMatrix<f64>,
    pub f: FVec,
    pub b: crate::math::Mat,
    pub u: FVec,
    pub f_react: FVec,
}

/// Full result of one `FrameModel::run` call.
pub struct AnalysisResults {
    pub mesh: AbstractMesh,
    pub tensors: Tensors,
    pub comp_u: DisplacementView,
    pub comp_f: ForceView,
}

impl AnalysisResults {
    pub(crate) fn assemble(mesh: AbstractMesh, tensors: Tensors) -> FrameResult<Self> {
        let comp_u = DisplacementView::from(ComponentView::from_vector(&tensors.u)?);
        let comp_f = ForceView::from(ComponentView::from_vector(&tensors.f)?);
        Ok(Self {
            mesh,
            tensors,
            comp_u,
            comp_f,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_reproduces_vector_exactly() {
        let v = FVec::from_row_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let comp = ComponentView::from_vector(&v).unwrap();
        let back = comp.into_vector();
        assert_eq!(v, back);
    }

    #[test]
    fn rejects_length_not_multiple_of_six() {
        let v = FVec::from_row_slice(&[1.0, 2.0, 3.0]);
        assert!(ComponentView::from_vector(&v).is_err());
    }
}
