//! Linear algebra building blocks for the beam pipeline: fixed-size 12x12
//! element matrices, the local-to-global rotation, and the dense solve used
//! by the constrained system.

pub mod sparse;

use nalgebra::{DMatrix, DVector, Matrix3, SMatrix, SVector, Vector3};

pub use sparse::SparseMatrixBuilder;

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Vec3 = Vector3<f64>;

/// 12x12 matrix for a two-node, six-DOF-per-node beam element.
pub type Mat12 = SMatrix<f64, 12, 12>;
/// 12-element vector for element forces/displacements.
pub type Vec12 = SVector<f64, 12>;

/// Unit vector in the direction of `v`.
///
/// Panics if `v` is (numerically) the zero vector; callers are expected to
/// have already rejected zero-length segments (`ZeroSegment`).
pub fn unit_vector(v: Vec3) -> Vec3 {
    v / v.norm()
}

/// Component of `v` orthogonal to the unit vector `axis` ("vector rejection").
pub fn vector_rejection(v: Vec3, axis: Vec3) -> Vec3 {
    v - axis * v.dot(&axis)
}

/// Build local (y, z) axes for an element given its local x-axis and an
/// `up` hint, following `ẑ = unit(up - (up·x̂)x̂)`, `ŷ = ẑ × x̂`.
///
/// Returns `None` if `up` is parallel to `x_elem` (degenerate orientation);
/// the caller maps this to `FrameError::DegenerateOrientation`.
pub fn local_axes_from_up(x_elem: Vec3, up: Vec3) -> Option<(Vec3, Vec3)> {
    if (1.0 - x_elem.dot(&up).abs()).abs() <= 1e-10 {
        return None;
    }
    let z_elem = unit_vector(vector_rejection(up, x_elem));
    let y_elem = unit_vector(z_elem.cross(&x_elem));
    Some((y_elem, z_elem))
}

/// 12x12 block-diagonal rotation matrix (local <- global) for an element
/// with the given local axes, tiling the 3x3 direction-cosine block four
/// times (translation and rotation DOFs at each of the two nodes).
pub fn element_transformation_matrix(x_elem: Vec3, y_elem: Vec3, z_elem: Vec3) -> Mat12 {
    let r = Mat3::new(
        x_elem.x, x_elem.y, x_elem.z, y_elem.x, y_elem.y, y_elem.z, z_elem.x, z_elem.y, z_elem.z,
    );

    let mut t = Mat12::zeros();
    for i in 0..4 {
        let offset = i * 3;
        for row in 0..3 {
            for col in 0..3 {
                t[(offset + row, offset + col)] = r[(row, col)];
            }
        }
    }
    t
}

/// Local 12x12 Euler-Bernoulli stiffness matrix, symmetric.
#[rustfmt::skip]
pub fn element_local_stiffness(e: f64, g: f64, a: f64, iy: f64, iz: f64, j: f64, length: f64) -> Mat12 {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;

    let ea_l = e * a / l;
    let gj_l = g * j / l;

    let eiy_l3 = e * iy / l3;
    let eiy_l2 = e * iy / l2;
    let eiy_l = e * iy / l;

    let eiz_l3 = e * iz / l3;
    let eiz_l2 = e * iz / l2;
    let eiz_l = e * iz / l;

    let data = [
        ea_l,      0.0,          0.0,           0.0,    0.0,           0.0,          -ea_l,     0.0,          0.0,           0.0,    0.0,           0.0,
        0.0,       12.0*eiz_l3,  0.0,           0.0,    0.0,           6.0*eiz_l2,   0.0,       -12.0*eiz_l3, 0.0,           0.0,    0.0,           6.0*eiz_l2,
        0.0,       0.0,          12.0*eiy_l3,   0.0,    -6.0*eiy_l2,   0.0,          0.0,       0.0,          -12.0*eiy_l3,  0.0,    -6.0*eiy_l2,   0.0,
        0.0,       0.0,          0.0,           gj_l,   0.0,           0.0,          0.0,       0.0,          0.0,           -gj_l,  0.0,           0.0,
        0.0,       0.0,          -6.0*eiy_l2,   0.0,    4.0*eiy_l,     0.0,          0.0,       0.0,          6.0*eiy_l2,    0.0,    2.0*eiy_l,     0.0,
        0.0,       6.0*eiz_l2,   0.0,           0.0,    0.0,           4.0*eiz_l,    0.0,       -6.0*eiz_l2,  0.0,           0.0,    0.0,           2.0*eiz_l,
        -ea_l,     0.0,          0.0,           0.0,    0.0,           0.0,          ea_l,      0.0,          0.0,           0.0,    0.0,           0.0,
        0.0,       -12.0*eiz_l3, 0.0,           0.0,    0.0,           -6.0*eiz_l2,  0.0,       12.0*eiz_l3,  0.0,           0.0,    0.0,           -6.0*eiz_l2,
        0.0,       0.0,          -12.0*eiy_l3,  0.0,    6.0*eiy_l2,    0.0,          0.0,       0.0,          12.0*eiy_l3,   0.0,    6.0*eiy_l2,    0.0,
        0.0,       0.0,          0.0,           -gj_l,  0.0,           0.0,          0.0,       0.0,          0.0,           gj_l,   0.0,           0.0,
        0.0,       0.0,          -6.0*eiy_l2,   0.0,    2.0*eiy_l,     0.0,          0.0,       0.0,          6.0*eiy_l2,    0.0,    4.0*eiy_l,     0.0,
        0.0,       6.0*eiz_l2,   0.0,           0.0,    0.0,           2.0*eiz_l,    0.0,       -6.0*eiz_l2,  0.0,           0.0,    0.0,           4.0*eiz_l,
    ];

    Mat12::from_row_slice(&data)
}

/// Local 12x12 consistent mass matrix, symmetric, scaled by rho*A*L/420.
/// Rotational inertia `rx2 = (Iy+Iz)/A` is used for the torsional DOFs (3, 9).
#[rustfmt::skip]
pub fn element_local_mass(rho: f64, a: f64, iy: f64, iz: f64, length: f64) -> Mat12 {
    let rx2 = (iy + iz) / a;
    let l = length;
    let l2 = l * l;

    let data = [
        140.0, 0.0,     0.0,     0.0,        0.0,        0.0,        70.0,  0.0,     0.0,     0.0,        0.0,        0.0,
        0.0,   156.0,   0.0,     0.0,        0.0,        22.0*l,     0.0,   54.0,    0.0,     0.0,        0.0,        -13.0*l,
        0.0,   0.0,     156.0,   0.0,        -22.0*l,    0.0,        0.0,   0.0,     54.0,    0.0,        13.0*l,     0.0,
        0.0,   0.0,     0.0,     140.0*rx2,  0.0,        0.0,        0.0,   0.0,     0.0,     70.0*rx2,   0.0,        0.0,
        0.0,   0.0,     -22.0*l, 0.0,        4.0*l2,     0.0,        0.0,   0.0,     -13.0*l, 0.0,        -3.0*l2,    0.0,
        0.0,   22.0*l,  0.0,     0.0,        0.0,        4.0*l2,     0.0,   13.0*l,  0.0,     0.0,        0.0,        -3.0*l2,
        70.0,  0.0,     0.0,     0.0,        0.0,        0.0,        140.0, 0.0,     0.0,     0.0,        0.0,        0.0,
        0.0,   54.0,    0.0,     0.0,        0.0,        13.0*l,     0.0,   156.0,   0.0,     0.0,        0.0,        -22.0*l,
        0.0,   0.0,     54.0,    0.0,        -13.0*l,    0.0,        0.0,   0.0,     156.0,   0.0,        22.0*l,     0.0,
        0.0,   0.0,     0.0,     70.0*rx2,   0.0,        0.0,        0.0,   0.0,     0.0,     140.0*rx2,  0.0,        0.0,
        0.0,   0.0,     13.0*l,  0.0,        -3.0*l2,    0.0,        0.0,   0.0,     22.0*l,  0.0,        4.0*l2,     0.0,
        0.0,   -13.0*l, 0.0,     0.0,        0.0,        -3.0*l2,    0.0,   -22.0*l, 0.0,     0.0,        0.0,        4.0*l2,
    ];

    Mat12::from_row_slice(&data) * (rho * a * l / 420.0)
}

/// Equivalent nodal load vector for a uniformly distributed load
/// `[qx,qy,qz,mx,my,mz]` over an element of the given length, per the
/// standard fixed-end beam tables.
pub fn element_distributed_load(load: &[f64; 6], length: f64) -> Vec12 {
    let [qx, qy, qz, mx, my, mz] = *load;
    let l = length;
    let l2 = l * l;

    Vec12::from_row_slice(&[
        qx * l / 2.0,
        qy * l / 2.0 - mz,
        qz * l / 2.0 + my,
        mx * l / 2.0,
        -qz * l2 / 12.0,
        qy * l2 / 12.0,
        qx * l / 2.0,
        qy * l / 2.0 + mz,
        qz * l / 2.0 - my,
        mx * l / 2.0,
        qz * l2 / 12.0,
        -qy * l2 / 12.0,
    ])
}

/// 6x12 shape function matrix at relative position `xi` in [0, 1]; linear
/// interpolation for axial/torsion, cubic Hermite for bending.
#[rustfmt::skip]
pub fn shape_function_matrix(xi: f64, length: f64) -> nalgebra::SMatrix<f64, 6, 12> {
    let l = length;

    let n1 = 1.0 - xi;
    let n2 = xi;
    let n3 = 1.0 - 3.0 * xi.powi(2) + 2.0 * xi.powi(3);
    let n4 = 3.0 * xi.powi(2) - 2.0 * xi.powi(3);
    let n5 = l * (xi - 2.0 * xi.powi(2) + xi.powi(3));
    let n6 = l * (-xi.powi(2) + xi.powi(3));

    let m1 = 1.0 - xi;
    let m2 = xi;
    let m3 = -(6.0 / l) * (xi - xi.powi(2));
    let m4 = (6.0 / l) * (xi - xi.powi(2));
    let m5 = 1.0 - 4.0 * xi + 3.0 * xi.powi(2);
    let m6 = -2.0 * xi + 3.0 * xi.powi(2);

    let mut n = nalgebra::SMatrix::<f64, 6, 12>::zeros();

    n[(0, 0)] = n1;
    n[(0, 6)] = n2;

    n[(1, 1)] = n3;
    n[(1, 5)] = n5;
    n[(1, 7)] = n4;
    n[(1, 11)] = n6;

    n[(2, 2)] = n3;
    n[(2, 4)] = -n5;
    n[(2, 8)] = n4;
    n[(2, 10)] = -n6;

    n[(3, 3)] = m1;
    n[(3, 9)] = m2;

    n[(4, 2)] = m3;
    n[(4, 4)] = m5;
    n[(4, 8)] = m4;
    n[(4, 10)] = m6;

    n[(5, 1)] = -m3;
    n[(5, 5)] = m5;
    n[(5, 7)] = -m4;
    n[(5, 11)] = m6;

    n
}

/// Solve a dense linear system via LU decomposition. Returns `None` if the
/// matrix is singular.
pub fn solve_linear_system(a: &Mat, b: &Vec) -> Option<Vec> {
    a.clone().lu().solve(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn local_stiffness_is_symmetric() {
        let k = element_local_stiffness(200e9, 77e9, 0.01, 1e-4, 2e-4, 1e-5, 10.0);
        for i in 0..12 {
            for j in 0..12 {
                assert_relative_eq!(k[(i, j)], k[(j, i)], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn local_mass_is_symmetric() {
        let m = element_local_mass(7850.0, 0.01, 1e-4, 2e-4, 10.0);
        for i in 0..12 {
            for j in 0..12 {
                assert_relative_eq!(m[(i, j)], m[(j, i)], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn degenerate_orientation_is_rejected() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let up = Vec3::new(1.0, 0.0, 0.0);
        assert!(local_axes_from_up(x, up).is_none());
    }

    #[test]
    fn local_axes_are_orthonormal() {
        let x = unit_vector(Vec3::new(1.0, 1.0, 0.0));
        let up = Vec3::new(0.0, 0.0, 1.0);
        let (y, z) = local_axes_from_up(x, up).unwrap();
        assert_relative_eq!(x.dot(&y), 0.0, epsilon = 1e-12);
        assert_relative_eq!(x.dot(&z), 0.0, epsilon = 1e-12);
        assert_relative_eq!(y.dot(&z), 0.0, epsilon = 1e-12);
        assert_relative_eq!(y.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(z.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn shape_functions_are_identity_at_endpoints() {
        let n0 = shape_function_matrix(0.0, 2.0);
        let n1 = shape_function_matrix(1.0, 2.0);
        // At xi=0, node-1 translations/rotations map with unit weight.
        assert_relative_eq!(n0[(0, 0)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(n0[(3, 3)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(n0[(0, 6)], 0.0, epsilon = 1e-12);
        // At xi=1, node-2 translations/rotations map with unit weight.
        assert_relative_eq!(n1[(0, 6)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(n1[(3, 9)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(n1[(0, 0)], 0.0, epsilon = 1e-12);
    }
}
