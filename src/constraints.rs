//! Constraint builder (component F): rows of the constraint matrix `B` for
//! fixed DOFs and rigid multipoint connectors.
//!
//! Grounded on `framat/fem/boundary_conditions.py`'s `fix_dof`/`connect`,
//! ported directly; the DOF symbol set uses `thx/thy/thz` per SPEC_FULL's
//! open-question resolution (§9).

use serde::{Deserialize, Serialize};

use crate::abstract_mesh::AbstractMesh;
use crate::error::FrameResult;
use crate::loads::DofSymbol;
use crate::math::{Mat, Vec as FVec};

/// Fix a subset of DOFs at a named node to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fix {
    pub node: String,
    pub fix: Vec<DofSymbol>,
}

impl Fix {
    pub fn new(node: impl Into<String>, fix: Vec<DofSymbol>) -> Self {
        Self { node: node.into(), fix }
    }
}

/// Rigid link between two named nodes (may belong to the same or different beams).
///
/// `framat`'s `connect` never actually consults its `dof_constraints`
/// argument (marked "NOT YET IMPLEMENTED" in the original); this crate
/// follows that and always emits the full six-row rigid connection
/// (SPEC_FULL §4.F), keeping `fix` only for schema symmetry with [`Fix`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connect {
    pub node1: String,
    pub node2: String,
    pub fix: Vec<DofSymbol>,
}

impl Connect {
    pub fn new(node1: impl Into<String>, node2: impl Into<String>, fix: Vec<DofSymbol>) -> Self {
        Self {
            node1: node1.into(),
            node2: node2.into(),
            fix,
        }
    }
}

/// The full set of boundary conditions for a model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoundaryConditions {
    pub fix: Vec<Fix>,
    pub connect: Vec<Connect>,
}

/// Build one row of `B` fixing a single DOF of `node` to zero.
fn fix_dof_row(node_index: usize, ndofs: usize, offset: usize) -> Vec<f64> {
    let mut row = vec![0.0; ndofs];
    row[6 * node_index + offset] = 1.0;
    row
}

/// Build the six rows of `B` fixing every DOF of `node` to zero.
fn fix_all_rows(node_index: usize, ndofs: usize) -> Vec<Vec<f64>> {
    (0..6).map(|offset| fix_dof_row(node_index, ndofs, offset)).collect()
}

/// Build the six rows of `B` rigidly linking `node1` to `node2`.
fn connect_rows(node1_index: usize, node2_index: usize, x1: &crate::math::Vec3, x2: &crate::math::Vec3, ndofs: usize) -> Vec<Vec<f64>> {
    let (dx, dy, dz) = (x1.x - x2.x, x1.y - x2.y, x1.z - x2.z);

    let mut rows = vec![vec![0.0; ndofs]; 6];
    let a = 6 * node1_index;
    let b = 6 * node2_index;

    for i in 0..6 {
        rows[i][a + i] = 1.0;
        rows[i][b + i] = -1.0;
    }
    rows[0][b + 4] = -dz;
    rows[0][b + 5] = dy;
    rows[1][b + 3] = dz;
    rows[1][b + 5] = -dx;
    rows[2][b + 3] = -dy;
    rows[2][b + 4] = dx;

    rows
}

/// Assemble the constraint matrix `B` (rows x n) and the right-hand side `b`
/// (zero for every supported constraint kind).
pub fn build_constraints(mesh: &AbstractMesh, bc: &BoundaryConditions) -> FrameResult<(Mat, FVec)> {
    let ndofs = mesh.ndofs();
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for fix in &bc.fix {
        let node_index = mesh.global_node_index(&fix.node)?;
        if fix.fix.iter().any(|s| matches!(s, DofSymbol::All)) {
            rows.extend(fix_all_rows(node_index, ndofs));
            continue;
        }
        for symbol in &fix.fix {
            if let Some(offset) = symbol.offset() {
                rows.push(fix_dof_row(node_index, ndofs, offset));
            }
        }
    }

    for connect in &bc.connect {
        let node1_index = mesh.global_node_index(&connect.node1)?;
        let node2_index = mesh.global_node_index(&connect.node2)?;
        let x1 = named_node_coord(mesh, &connect.node1)?;
        let x2 = named_node_coord(mesh, &connect.node2)?;
        rows.extend(connect_rows(node1_index, node2_index, &x1, &x2, ndofs));
    }

    let nrows = rows.len();
    let mut b_mat = Mat::zeros(nrows, ndofs);
    for (r, row) in rows.into_iter().enumerate() {
        for (c, value) in row.into_iter().enumerate() {
            b_mat[(r, c)] = value;
        }
    }

    let b_vec = FVec::zeros(nrows);
    Ok((b_mat, b_vec))
}

fn named_node_coord(mesh: &AbstractMesh, uid: &str) -> FrameResult<crate::math::Vec3> {
    for beam_nodes in &mesh.named_nodes_by_beam {
        if let Some((_, coord)) = beam_nodes.iter().find(|(u, _)| u == uid) {
            return Ok(*coord);
        }
    }
    Err(crate::error::FrameError::UnknownUid(uid.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_all_produces_identity_block() {
        let rows = fix_all_rows(1, 18);
        for (offset, row) in rows.iter().enumerate() {
            assert_eq!(row[6 + offset], 1.0);
            assert_eq!(row.iter().filter(|&&v| v != 0.0).count(), 1);
        }
    }

    #[test]
    fn connect_rows_encode_moment_arm() {
        let x1 = crate::math::Vec3::new(0.0, 0.0, 0.0);
        let x2 = crate::math::Vec3::new(1.0, 0.0, 0.0);
        let rows = connect_rows(0, 1, &x1, &x2, 12);
        // dx=-1, dy=0, dz=0 => row 1 (uy) couples node2's theta_x with +dz=0 and theta_z with -dx=1
        assert_eq!(rows[1][6 + 5], 1.0);
        assert_eq!(rows[2][6 + 4], -1.0);
    }
}
