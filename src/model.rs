//! Driver (component I): builder over the declarative model, sequencing
//! B (mesh) -> C (abstract mesh) -> D (element formulation) -> E (assembler)
//! -> F (constraints) -> G (solver) -> H (result projection).
//!
//! Grounded on the teacher's `FEModel` builder/validation/`analyze_linear`
//! pipeline shape (`src/model.rs`), rebuilt around beam/polyline semantics.

use std::collections::HashMap;

use log::{debug, info};

use crate::abstract_mesh::AbstractMesh;
use crate::analysis::{AnalysisEvent, AnalysisOptions};
use crate::assembler;
use crate::constraints::{self, BoundaryConditions, Connect, Fix};
use crate::element::Element;
use crate::elements::{CrossSection, Material};
use crate::error::{FrameError, FrameResult};
use crate::loads::{DistributedLoad, DofSymbol, PointLoad, PointMass};
use crate::math::{Mat, Vec3};
use crate::mesh::{self, SupportPoint};
use crate::results::{AnalysisResults, Tensors};
use crate::solver;

/// A named node as given by the caller, before meshing.
#[derive(Debug, Clone)]
pub struct BeamNode {
    pub uid: String,
    pub coord: Vec3,
}

impl BeamNode {
    pub fn new(uid: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            uid: uid.into(),
            coord: Vec3::new(x, y, z),
        }
    }
}

/// A property assignment over a `[from, to]` named-node range on a beam.
#[derive(Debug, Clone)]
struct RangeAssignment<T> {
    from: String,
    to: String,
    value: T,
}

/// One 3D polyline beam: named nodes plus per-segment property/load assignments.
#[derive(Debug, Clone)]
pub struct Beam {
    nodes: Vec<BeamNode>,
    nelem: usize,
    orientations: Vec<RangeAssignment<Vec3>>,
    materials: Vec<RangeAssignment<String>>,
    cross_sections: Vec<RangeAssignment<String>>,
    point_loads: Vec<PointLoad>,
    distr_loads: Vec<DistributedLoad>,
    point_masses: Vec<PointMass>,
}

impl Beam {
    pub fn new(nodes: Vec<BeamNode>, nelem: usize) -> Self {
        Self {
            nodes,
            nelem,
            orientations: Vec::new(),
            materials: Vec::new(),
            cross_sections: Vec::new(),
            point_loads: Vec::new(),
            distr_loads: Vec::new(),
            point_masses: Vec::new(),
        }
    }

    pub fn set_orientation(&mut self, from: impl Into<String>, to: impl Into<String>, up: Vec3) {
        self.orientations.push(RangeAssignment {
            from: from.into(),
            to: to.into(),
            value: up,
        });
    }

    pub fn set_material(&mut self, from: impl Into<String>, to: impl Into<String>, uid: impl Into<String>) {
        self.materials.push(RangeAssignment {
            from: from.into(),
            to: to.into(),
            value: uid.into(),
        });
    }

    pub fn set_cross_section(&mut self, from: impl Into<String>, to: impl Into<String>, uid: impl Into<String>) {
        self.cross_sections.push(RangeAssignment {
            from: from.into(),
            to: to.into(),
            value: uid.into(),
        });
    }

    pub fn add_point_load(&mut self, load: PointLoad) {
        self.point_loads.push(load);
    }

    pub fn add_distr_load(&mut self, load: DistributedLoad) {
        self.distr_loads.push(load);
    }

    pub fn add_point_mass(&mut self, mass: PointMass) {
        self.point_masses.push(mass);
    }
}

/// Intermediate per-element record, before material/cross-section/orientation
/// assignments are resolved and an [`Element`] can be constructed.
struct ElementBlueprint {
    p1_coord: Vec3,
    p2_coord: Vec3,
    p1_uid: Option<String>,
    p2_uid: Option<String>,
    node_indices: [usize; 2],
    up: Option<Vec3>,
    material_uid: Option<String>,
    cross_section_uid: Option<String>,
}

fn resolve_range(
    blueprints: &[ElementBlueprint],
    beam_idx: usize,
    from: &str,
    to: &str,
) -> FrameResult<(usize, usize)> {
    let start = blueprints
        .iter()
        .position(|e| e.p1_uid.as_deref() == Some(from))
        .ok_or_else(|| FrameError::UnknownUid(from.to_string()))?;
    match blueprints[start..].iter().position(|e| e.p2_uid.as_deref() == Some(to)) {
        Some(rel) => Ok((start, start + rel)),
        None => {
            if blueprints.iter().position(|e| e.p2_uid.as_deref() == Some(to)).is_some() {
                Err(FrameError::MisorderedRange {
                    beam: beam_idx.to_string(),
                    from: from.to_string(),
                    to: to.to_string(),
                })
            } else {
                Err(FrameError::UnknownUid(to.to_string()))
            }
        }
    }
}

fn resolve_node(blueprints: &[ElementBlueprint], uid: &str) -> FrameResult<(usize, u8)> {
    for (idx, bp) in blueprints.iter().enumerate() {
        if bp.p1_uid.as_deref() == Some(uid) {
            return Ok((idx, 1));
        }
        if bp.p2_uid.as_deref() == Some(uid) {
            return Ok((idx, 2));
        }
    }
    Err(FrameError::UnknownUid(uid.to_string()))
}

/// The full declarative model: materials, cross-sections, beams, and
/// boundary conditions.
#[derive(Default)]
pub struct FrameModel {
    materials: HashMap<String, Material>,
    cross_sections: HashMap<String, CrossSection>,
    beams: Vec<Beam>,
    bc: BoundaryConditions,
}

impl FrameModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_material(&mut self, material: Material) -> FrameResult<()> {
        if self.materials.contains_key(&material.uid) {
            return Err(FrameError::DuplicateUid(material.uid.clone()));
        }
        self.materials.insert(material.uid.clone(), material);
        Ok(())
    }

    pub fn add_cross_section(&mut self, section: CrossSection) -> FrameResult<()> {
        if self.cross_sections.contains_key(&section.uid) {
            return Err(FrameError::DuplicateUid(section.uid.clone()));
        }
        self.cross_sections.insert(section.uid.clone(), section);
        Ok(())
    }

    pub fn add_beam(&mut self, beam: Beam) -> FrameResult<()> {
        if beam.nodes.len() < 2 {
            return Err(FrameError::InsufficientSupport(format!(
                "beam {} has {} named node(s)",
                self.beams.len(),
                beam.nodes.len()
            )));
        }
        if beam.nelem == 0 {
            return Err(FrameError::InvalidSchema("nelem must be >= 1".into()));
        }
        let mut seen = std::collections::HashSet::new();
        for node in &beam.nodes {
            if node.uid.is_empty() {
                return Err(FrameError::InvalidSchema("named node uid must not be empty".into()));
            }
            if !seen.insert(node.uid.clone()) {
                return Err(FrameError::DuplicateUid(node.uid.clone()));
            }
        }
        self.beams.push(beam);
        Ok(())
    }

    pub fn fix(&mut self, node: impl Into<String>, fix: Vec<DofSymbol>) {
        self.bc.fix.push(Fix::new(node, fix));
    }

    pub fn connect(&mut self, node1: impl Into<String>, node2: impl Into<String>, fix: Vec<DofSymbol>) {
        self.bc.connect.push(Connect::new(node1, node2, fix));
    }

    /// Run components B and C: mesh every beam and build fully-resolved
    /// elements into an [`AbstractMesh`].
    pub fn build_mesh(&self) -> FrameResult<AbstractMesh> {
        let mut glob_num: HashMap<String, usize> = HashMap::new();
        let mut node_counter = 0usize;
        let mut elements_by_beam = Vec::with_capacity(self.beams.len());
        let mut named_nodes_by_beam = Vec::with_capacity(self.beams.len());
        let mut dof_offset_by_beam = Vec::with_capacity(self.beams.len());

        for (beam_idx, beam) in self.beams.iter().enumerate() {
            let support_points: Vec<SupportPoint> = beam
                .nodes
                .iter()
                .map(|n| SupportPoint::new(n.uid.clone(), n.coord))
                .collect();
            let mesh_points = mesh::mesh_polyline(&support_points, beam.nelem)?;

            named_nodes_by_beam.push(beam.nodes.iter().map(|n| (n.uid.clone(), n.coord)).collect());
            dof_offset_by_beam.push(node_counter * 6);

            let node_index: Vec<usize> = mesh_points
                .iter()
                .map(|_| {
                    let idx = node_counter;
                    node_counter += 1;
                    idx
                })
                .collect();

            for (point, &idx) in mesh_points.iter().zip(node_index.iter()) {
                if let Some(uid) = &point.uid {
                    if glob_num.insert(uid.clone(), idx).is_some() {
                        return Err(FrameError::DuplicateUid(uid.clone()));
                    }
                }
            }

            let mut blueprints: Vec<ElementBlueprint> = mesh_points
                .windows(2)
                .enumerate()
                .map(|(k, w)| ElementBlueprint {
                    p1_coord: w[0].coord,
                    p2_coord: w[1].coord,
                    p1_uid: w[0].uid.clone(),
                    p2_uid: w[1].uid.clone(),
                    node_indices: [node_index[k], node_index[k + 1]],
                    up: None,
                    material_uid: None,
                    cross_section_uid: None,
                })
                .collect();

            for assignment in &beam.orientations {
                let (start, end) = resolve_range(&blueprints, beam_idx, &assignment.from, &assignment.to)?;
                for bp in &mut blueprints[start..=end] {
                    bp.up = Some(assignment.value);
                }
            }
            for assignment in &beam.materials {
                let (start, end) = resolve_range(&blueprints, beam_idx, &assignment.from, &assignment.to)?;
                for bp in &mut blueprints[start..=end] {
                    bp.material_uid = Some(assignment.value.clone());
                }
            }
            for assignment in &beam.cross_sections {
                let (start, end) = resolve_range(&blueprints, beam_idx, &assignment.from, &assignment.to)?;
                for bp in &mut blueprints[start..=end] {
                    bp.cross_section_uid = Some(assignment.value.clone());
                }
            }

            let mut elements = Vec::with_capacity(blueprints.len());
            for bp in &blueprints {
                let up = bp.up.ok_or_else(|| FrameError::MissingProperty {
                    beam: beam_idx.to_string(),
                    from: bp.p1_uid.clone().unwrap_or_default(),
                    to: bp.p2_uid.clone().unwrap_or_default(),
                    property: "orientation",
                })?;
                let material_uid = bp.material_uid.as_ref().ok_or_else(|| FrameError::MissingProperty {
                    beam: beam_idx.to_string(),
                    from: bp.p1_uid.clone().unwrap_or_default(),
                    to: bp.p2_uid.clone().unwrap_or_default(),
                    property: "material",
                })?;
                let section_uid = bp.cross_section_uid.as_ref().ok_or_else(|| FrameError::MissingProperty {
                    beam: beam_idx.to_string(),
                    from: bp.p1_uid.clone().unwrap_or_default(),
                    to: bp.p2_uid.clone().unwrap_or_default(),
                    property: "cross_section",
                })?;
                let material = self
                    .materials
                    .get(material_uid)
                    .ok_or_else(|| FrameError::UnknownUid(material_uid.clone()))?;
                let section = self
                    .cross_sections
                    .get(section_uid)
                    .ok_or_else(|| FrameError::UnknownUid(section_uid.clone()))?;

                elements.push(Element::new(
                    bp.p1_coord,
                    bp.p2_coord,
                    bp.p1_uid.clone(),
                    bp.p2_uid.clone(),
                    bp.node_indices,
                    material,
                    section,
                    up,
                )?);
            }

            for load in &beam.point_loads {
                let (idx, endpoint) = resolve_node(&blueprints, &load.at)?;
                elements[idx].apply_point_load(endpoint, load.load, load.local_sys)?;
            }
            for load in &beam.distr_loads {
                let (start, end) = resolve_range(&blueprints, beam_idx, &load.from, &load.to)?;
                for element in &mut elements[start..=end] {
                    element.apply_distributed_load(load.load, load.local_sys);
                }
            }
            for mass in &beam.point_masses {
                let (idx, endpoint) = resolve_node(&blueprints, &mass.at)?;
                elements[idx].apply_point_mass(endpoint, mass.mass)?;
            }

            debug!(
                "beam {beam_idx}: {} named node(s), {} element(s)",
                beam.nodes.len(),
                elements.len()
            );
            elements_by_beam.push(elements);
        }

        let n_elements: usize = elements_by_beam.iter().map(Vec::len).sum();
        info!(
            "meshed {} beam(s): {n_elements} element(s), {node_counter} node(s), {} dof(s)",
            self.beams.len(),
            node_counter * 6
        );

        Ok(AbstractMesh::new(elements_by_beam, named_nodes_by_beam, glob_num, dof_offset_by_beam))
    }

    /// Run the full pipeline: mesh, assemble, constrain, solve, project.
    pub fn run(&self, options: &AnalysisOptions) -> FrameResult<AnalysisResults> {
        let mesh = self.build_mesh()?;
        options.report(AnalysisEvent::Meshed {
            n_beams: mesh.nbeams(),
            n_elements: mesh.elements_by_beam.iter().map(Vec::len).sum(),
            n_nodes: mesh.ndofs() / 6,
            n_dofs: mesh.ndofs(),
        });

        let assembled = assembler::assemble(&mesh)?;
        info!(
            "assembled global tensors: {} dof(s), density {:.4}",
            mesh.ndofs(),
            assembled.density
        );
        options.report(AnalysisEvent::Assembled {
            nnz: assembled.k.nnz(),
            density: assembled.density,
        });

        let (b_mat, b_vec) = constraints::build_constraints(&mesh, &self.bc)?;

        let k_dense = densify(&assembled.k);
        let solution = solver::solve(&k_dense, &b_mat, &assembled.f, &b_vec)?;
        info!("solved {} dof(s) against {} constraint row(s)", mesh.ndofs(), b_mat.nrows());
        options.report(AnalysisEvent::Solved);

        let tensors = Tensors {
            k: assembled.k,
            m: assembled.m,
            f: assembled.f,
            b: b_mat,
            u: solution.u,
            f_react: solution.reactions,
        };
        AnalysisResults::assemble(mesh, tensors)
    }
}

fn densify(csr: &nalgebra_sparse::CsrMatrix<f64>) -> Mat {
    nalgebra_sparse::convert::serial::convert_csr_dense(csr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_cantilever(nelem: usize) -> FrameModel {
        let mut model = FrameModel::new();
        model.add_material(Material::unit("m")).unwrap();
        model.add_cross_section(CrossSection::unit("s")).unwrap();
        let mut beam = Beam::new(
            vec![BeamNode::new("root", 0.0, 0.0, 0.0), BeamNode::new("tip", 1.0, 0.0, 0.0)],
            nelem,
        );
        beam.set_orientation("root", "tip", Vec3::new(0.0, 0.0, 1.0));
        beam.set_material("root", "tip", "m");
        beam.set_cross_section("root", "tip", "s");
        beam.add_point_load(PointLoad::new("tip", [0.0, 0.0, -1.0, 0.0, 0.0, 0.0], false));
        model.add_beam(beam).unwrap();
        model.fix("root", vec![DofSymbol::All]);
        model
    }

    #[test]
    fn cantilever_tip_load_matches_closed_form() {
        let model = unit_cantilever(10);
        let results = model.run(&AnalysisOptions::default()).unwrap();
        let tip = results.mesh.global_node_index("tip").unwrap();
        assert_relative_eq!(results.comp_u.uz[tip], -1.0 / 3.0, epsilon = 1e-4);
        assert_relative_eq!(results.comp_u.thy[tip], 0.5, epsilon = 1e-4);
        assert_relative_eq!(results.comp_u.ux[tip], 0.0, epsilon = 1e-8);
        assert_relative_eq!(results.comp_u.uy[tip], 0.0, epsilon = 1e-8);
        assert_relative_eq!(results.comp_u.thz[tip], 0.0, epsilon = 1e-8);
    }

    #[test]
    fn fixed_node_has_exact_zero_displacement() {
        let model = unit_cantilever(4);
        let results = model.run(&AnalysisOptions::default()).unwrap();
        let root = results.mesh.global_node_index("root").unwrap();
        assert_eq!(results.comp_u.ux[root], 0.0);
        assert_eq!(results.comp_u.uy[root], 0.0);
        assert_eq!(results.comp_u.uz[root], 0.0);
        assert_eq!(results.comp_u.thx[root], 0.0);
        assert_eq!(results.comp_u.thy[root], 0.0);
        assert_eq!(results.comp_u.thz[root], 0.0);
    }

    #[test]
    fn missing_property_is_reported() {
        let mut model = FrameModel::new();
        model.add_material(Material::unit("m")).unwrap();
        model.add_cross_section(CrossSection::unit("s")).unwrap();
        let mut beam = Beam::new(
            vec![BeamNode::new("a", 0.0, 0.0, 0.0), BeamNode::new("b", 1.0, 0.0, 0.0)],
            1,
        );
        beam.set_material("a", "b", "m");
        beam.set_cross_section("a", "b", "s");
        // orientation left unassigned
        model.add_beam(beam).unwrap();
        assert!(matches!(model.build_mesh(), Err(FrameError::MissingProperty { .. })));
    }

    #[test]
    fn unknown_material_uid_is_reported() {
        let mut model = FrameModel::new();
        model.add_cross_section(CrossSection::unit("s")).unwrap();
        let mut beam = Beam::new(
            vec![BeamNode::new("a", 0.0, 0.0, 0.0), BeamNode::new("b", 1.0, 0.0, 0.0)],
            1,
        );
        beam.set_orientation("a", "b", Vec3::new(0.0, 0.0, 1.0));
        beam.set_material("a", "b", "does-not-exist");
        beam.set_cross_section("a", "b", "s");
        model.add_beam(beam).unwrap();
        assert!(matches!(model.build_mesh(), Err(FrameError::UnknownUid(_))));
    }
}
