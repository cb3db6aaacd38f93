//! Solver (component G): assemble the Lagrange-multiplier saddle-point
//! system and solve for displacements and reaction multipliers.
//!
//! Grounded on the teacher's `math::solve_linear_system` (dense LU via
//! `nalgebra`) and `framat/_solve.py::static_load_analysis`'s
//! `np.block([[K, B.T], [B, Z]])` augmented system.

use crate::error::{FrameError, FrameResult};
use crate::math::{solve_linear_system, Mat, Vec as FVec};

/// Displacements and reaction multipliers recovered from the saddle-point solve.
pub struct Solution {
    /// Global displacement vector, length `n`.
    pub u: FVec,
    /// Reaction (Lagrange multiplier) vector, length `B.nrows()`.
    pub reactions: FVec,
}

/// Solve `[[K, B^T], [B, 0]] [U; lambda] = [F; b]`.
///
/// `k` is the dense global stiffness matrix (the sparse `K` from the
/// assembler, densified), `b_mat`/`b_vec` are the constraint matrix/RHS from
/// the constraint builder, and `f` is the global load vector.
pub fn solve(k: &Mat, b_mat: &Mat, f: &FVec, b_vec: &FVec) -> FrameResult<Solution> {
    let n = k.nrows();
    if b_mat.ncols() != n {
        return Err(FrameError::DimensionMismatch(format!(
            "constraint matrix has {} columns, expected {n}",
            b_mat.ncols()
        )));
    }
    let n_lr = b_mat.nrows();
    let total = n + n_lr;

    let mut a_system = Mat::zeros(total, total);
    a_system.view_mut((0, 0), (n, n)).copy_from(k);
    a_system.view_mut((0, n), (n, n_lr)).copy_from(&b_mat.transpose());
    a_system.view_mut((n, 0), (n_lr, n)).copy_from(b_mat);

    let mut rhs = FVec::zeros(total);
    rhs.rows_mut(0, n).copy_from(f);
    rhs.rows_mut(n, n_lr).copy_from(b_vec);

    let solution = solve_linear_system(&a_system, &rhs).ok_or_else(|| {
        FrameError::SingularSystem(
            "augmented KKT system is singular (indeterminate structure or incompatible constraints)"
                .into(),
        )
    })?;

    let u = FVec::from_column_slice(&solution.as_slice()[0..n]);
    let reactions = FVec::from_column_slice(&solution.as_slice()[n..total]);

    Ok(Solution { u, reactions })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_dof_solves_to_exact_zero() {
        // A single axial spring element: k*u = f, with u0 fixed to 0.
        let k = Mat::from_row_slice(2, 2, &[1.0, -1.0, -1.0, 1.0]);
        let mut b_mat = Mat::zeros(1, 2);
        b_mat[(0, 0)] = 1.0;
        let b_vec = FVec::zeros(1);
        let f = FVec::from_row_slice(&[0.0, 1.0]);

        let solution = solve(&k, &b_mat, &f, &b_vec).unwrap();
        assert!(solution.u[0].abs() < 1e-12);
        assert!((solution.u[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn mismatched_constraint_columns_is_rejected() {
        let k = Mat::identity(2, 2);
        let b_mat = Mat::zeros(1, 3);
        let f = FVec::zeros(2);
        let b_vec = FVec::zeros(1);
        assert!(matches!(
            solve(&k, &b_mat, &f, &b_vec),
            Err(FrameError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn unconstrained_singular_system_is_reported() {
        let k = Mat::zeros(2, 2);
        let b_mat = Mat::zeros(0, 2);
        let f = FVec::zeros(2);
        let b_vec = FVec::zeros(0);
        assert!(matches!(solve(&k, &b_mat, &f, &b_vec), Err(FrameError::SingularSystem(_))));
    }
}
