//! Sparse matrix utilities for efficient assembly
//!
//! Global stiffness/mass matrices for a beam mesh are typically 95-99%
//! sparse. Entries are accumulated in COO form and compacted to CSR once,
//! which sums duplicate (row, col) contributions from shared nodes.

use nalgebra::DMatrix;
use nalgebra_sparse::{CooMatrix, CsrMatrix};

/// Sparse matrix builder using COO format.
///
/// More efficient for incremental assembly than inserting directly into a
/// CSR matrix: entries are pushed as encountered and compacted once at the
/// end.
pub struct SparseMatrixBuilder {
    size: usize,
    entries: Vec<(usize, usize, f64)>,
}

impl SparseMatrixBuilder {
    /// Create a new sparse matrix builder for an n x n matrix.
    pub fn new(size: usize) -> Self {
        // 6 DOFs/node, ~10 connections/node is a reasonable FEA density estimate.
        let estimated_nnz = size * 60;
        Self {
            size,
            entries: Vec::with_capacity(estimated_nnz),
        }
    }

    /// Add a value to the matrix (accumulates on duplicate (row, col)).
    #[inline]
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        if value != 0.0 {
            self.entries.push((row, col, value));
        }
    }

    /// Add a 12x12 element matrix at the given global DOF indices.
    pub fn add_element_matrix(&mut self, dofs: &[usize; 12], k_elem: &[[f64; 12]; 12]) {
        for (i, &di) in dofs.iter().enumerate() {
            for (j, &dj) in dofs.iter().enumerate() {
                self.add(di, dj, k_elem[i][j]);
            }
        }
    }

    /// Convert to CSR format for assembly into the final global matrix.
    pub fn to_csr(&self) -> CsrMatrix<f64> {
        let mut coo = CooMatrix::new(self.size, self.size);

        for &(row, col, val) in &self.entries {
            coo.push(row, col, val);
        }

        CsrMatrix::from(&coo)
    }

    /// Convert to a dense matrix (used by the solver, which works on the
    /// dense augmented KKT system).
    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut mat = DMatrix::zeros(self.size, self.size);

        for &(row, col, val) in &self.entries {
            mat[(row, col)] += val;
        }

        mat
    }

    /// Number of triplet entries pushed (before CSR compaction sums
    /// duplicates at the same (row, col)).
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Fraction of the n x n matrix that is non-zero, after CSR compaction.
    pub fn density(&self) -> f64 {
        let total = self.size * self.size;
        if total == 0 {
            return 0.0;
        }
        self.to_csr().nnz() as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_duplicate_entries() {
        let mut builder = SparseMatrixBuilder::new(4);
        builder.add(0, 0, 4.0);
        builder.add(0, 0, 1.0);
        builder.add(1, 1, 3.0);

        let dense = builder.to_dense();
        assert!((dense[(0, 0)] - 5.0).abs() < 1e-10);
        assert!((dense[(1, 1)] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn density_matches_nnz_over_n_squared() {
        let mut builder = SparseMatrixBuilder::new(2);
        builder.add(0, 0, 1.0);
        builder.add(1, 1, 1.0);
        assert!((builder.density() - 0.5).abs() < 1e-12);
    }
}
