//! Element (component D): per-element local 12x12 stiffness and mass
//! matrices, 12x1 load vector, and the rotation to the global frame.
//!
//! Grounded on `math::element_local_stiffness`/`element_local_mass` (ported
//! from `element.py::stiffness_matrix_local`/`mass_matrix_local`) and
//! `math::element_transformation_matrix` (`element.py::transformation_matrix`).

use crate::elements::{CrossSection, Material};
use crate::error::{FrameError, FrameResult};
use crate::math::{
    self, element_local_mass, element_local_stiffness, local_axes_from_up, unit_vector, Mat12,
    Vec12, Vec3,
};

/// A beam element bounded by two consecutive mesh points.
#[derive(Debug, Clone)]
pub struct Element {
    /// UID of the mesh point at endpoint 1, if it is a named node.
    pub p1_uid: Option<String>,
    /// UID of the mesh point at endpoint 2, if it is a named node.
    pub p2_uid: Option<String>,
    /// Global node indices of the two endpoints.
    pub node_indices: [usize; 2],
    /// Global DOF indices, in local-node order (0..6 = endpoint 1, 6..12 = endpoint 2).
    pub dofs: [usize; 12],

    pub length: f64,
    pub x_axis: Vec3,
    pub y_axis: Vec3,
    pub z_axis: Vec3,
    /// Local<-global rotation: `v_local = t * v_global`.
    pub t: Mat12,

    pub e: f64,
    pub g: f64,
    pub rho: f64,
    pub a: f64,
    pub iy: f64,
    pub iz: f64,
    pub j: f64,
    pub up: Vec3,

    /// Accumulated 12x1 load vector, global frame.
    pub f_glob: Vec12,
    /// Accumulated 12x12 mass matrix (consistent + any point masses), global frame.
    pub m_glob: Mat12,
}

impl Element {
    /// Construct an element between two global-frame points.
    ///
    /// `up` must not be (numerically) parallel to the element's axis, or
    /// `DegenerateOrientation` is raised.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        p1_coord: Vec3,
        p2_coord: Vec3,
        p1_uid: Option<String>,
        p2_uid: Option<String>,
        node_indices: [usize; 2],
        material: &Material,
        section: &CrossSection,
        up: Vec3,
    ) -> FrameResult<Self> {
        let delta = p2_coord - p1_coord;
        let length = delta.norm();
        if length == 0.0 {
            return Err(FrameError::ZeroSegment(
                p1_uid.clone().unwrap_or_default(),
            ));
        }
        let x_axis = unit_vector(delta);
        let (y_axis, z_axis) = local_axes_from_up(x_axis, up).ok_or_else(|| {
            FrameError::DegenerateOrientation(p1_uid.clone().unwrap_or_default())
        })?;
        let t = math::element_transformation_matrix(x_axis, y_axis, z_axis);

        let k_base = node_indices[0] * 6;
        let k_base2 = node_indices[1] * 6;
        let mut dofs = [0usize; 12];
        for i in 0..6 {
            dofs[i] = k_base + i;
            dofs[6 + i] = k_base2 + i;
        }

        let m_loc = element_local_mass(material.rho, section.a, section.iy, section.iz, length);
        let m_glob = t.transpose() * m_loc * t;

        Ok(Self {
            p1_uid,
            p2_uid,
            node_indices,
            dofs,
            length,
            x_axis,
            y_axis,
            z_axis,
            t,
            e: material.e,
            g: material.g,
            rho: material.rho,
            a: section.a,
            iy: section.iy,
            iz: section.iz,
            j: section.j,
            up,
            f_glob: Vec12::zeros(),
            m_glob,
        })
    }

    /// Local 12x12 stiffness matrix.
    pub fn stiffness_local(&self) -> Mat12 {
        element_local_stiffness(self.e, self.g, self.a, self.iy, self.iz, self.j, self.length)
    }

    /// Global-frame 12x12 stiffness matrix: `T^T K_loc T`.
    pub fn stiffness_global(&self) -> Mat12 {
        self.t.transpose() * self.stiffness_local() * self.t
    }

    /// Add a nodal point load `[Fx,Fy,Fz,Mx,My,Mz]` at the given endpoint (1 or 2).
    ///
    /// If `local_sys`, the load is given in the element's local frame and is
    /// pre-multiplied by `T` before being added to the global load vector.
    pub fn apply_point_load(&mut self, endpoint: u8, load: [f64; 6], local_sys: bool) -> FrameResult<()> {
        let mut v = Vec12::zeros();
        let offset = match endpoint {
            1 => 0,
            2 => 6,
            other => {
                return Err(FrameError::DimensionMismatch(format!(
                    "invalid element endpoint {other}, expected 1 or 2"
                )))
            }
        };
        for i in 0..6 {
            v[offset + i] = load[i];
        }
        if local_sys {
            v = self.t * v;
        }
        self.f_glob += v;
        Ok(())
    }

    /// Add an equivalent-nodal contribution for a uniformly distributed
    /// load `[qx,qy,qz,mx,my,mz]` acting over this element's full length.
    ///
    /// If `local_sys`, pre-multiplied by `T` (SPEC_FULL §4.D; this is the
    /// same convention as `apply_point_load`, matching the late `framat`
    /// draft rather than the transpose some earlier drafts use).
    pub fn apply_distributed_load(&mut self, load: [f64; 6], local_sys: bool) {
        let mut v = math::element_distributed_load(&load, self.length);
        if local_sys {
            v = self.t * v;
        }
        self.f_glob += v;
    }

    /// Add a lumped mass at the given endpoint (1 or 2) to the
    /// translational 3x3 sub-block of the global mass matrix.
    pub fn apply_point_mass(&mut self, endpoint: u8, mass: f64) -> FrameResult<()> {
        let offset = match endpoint {
            1 => 0,
            2 => 6,
            other => {
                return Err(FrameError::DimensionMismatch(format!(
                    "invalid element endpoint {other}, expected 1 or 2"
                )))
            }
        };
        for i in 0..3 {
            self.m_glob[(offset + i, offset + i)] += mass;
        }
        Ok(())
    }

    /// Shape-function matrix evaluated at relative position `xi` in `[0, 1]`.
    pub fn shape_functions(&self, xi: f64) -> nalgebra::SMatrix<f64, 6, 12> {
        math::shape_function_matrix(xi, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_element() -> Element {
        let mat = Material::unit("m");
        let sec = CrossSection::unit("s");
        Element::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Some("a".into()),
            Some("b".into()),
            [0, 1],
            &mat,
            &sec,
            Vec3::new(0.0, 0.0, 1.0),
        )
        .unwrap()
    }

    #[test]
    fn degenerate_orientation_is_rejected() {
        let mat = Material::unit("m");
        let sec = CrossSection::unit("s");
        let result = Element::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            None,
            None,
            [0, 1],
            &mat,
            &sec,
            Vec3::new(1.0, 0.0, 0.0),
        );
        assert!(matches!(result, Err(FrameError::DegenerateOrientation(_))));
    }

    #[test]
    fn dofs_follow_node_indices() {
        let e = unit_element();
        assert_eq!(e.dofs, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn global_stiffness_is_symmetric() {
        let e = unit_element();
        let k = e.stiffness_global();
        for i in 0..12 {
            for j in 0..12 {
                assert!((k[(i, j)] - k[(j, i)]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn point_load_lands_at_correct_endpoint() {
        let mut e = unit_element();
        e.apply_point_load(2, [0.0, 0.0, -1.0, 0.0, 0.0, 0.0], false).unwrap();
        assert!((e.f_glob[8] - (-1.0)).abs() < 1e-12);
        assert!(e.f_glob[2].abs() < 1e-12);
    }

    #[test]
    fn point_mass_adds_to_translational_block() {
        let mut e = unit_element();
        let before = e.m_glob[(0, 0)];
        e.apply_point_mass(1, 5.0).unwrap();
        assert!((e.m_glob[(0, 0)] - (before + 5.0)).abs() < 1e-12);
        assert!((e.m_glob[(1, 1)] - (e.m_glob[(1, 1)])).abs() < 1e-12);
    }
}
