//! frame-analysis - a native Rust 3D linear-static frame-analysis core
//!
//! Meshes polyline beams into Euler-Bernoulli 12-DOF elements, assembles
//! global stiffness/mass tensors, and solves the constrained static system
//! via a Lagrange-multiplier (KKT) formulation:
//! - Polyline beam meshing, proportional to segment length
//! - 3D Euler-Bernoulli frame elements with a consistent mass matrix
//! - Sparse COO->CSR assembly of the global tensors
//! - Single-point and rigid multipoint (connect) constraints
//! - A dense LU solve of the augmented `[[K, B^T], [B, 0]]` system
//!
//! ## Example
//! ```rust
//! use frame_analysis::prelude::*;
//!
//! let mut model = FrameModel::new();
//! model.add_material(Material::steel("steel")).unwrap();
//! model.add_cross_section(CrossSection::rectangular("rect", 0.3, 0.5).unwrap()).unwrap();
//!
//! let mut beam = Beam::new(
//!     vec![BeamNode::new("root", 0.0, 0.0, 0.0), BeamNode::new("tip", 10.0, 0.0, 0.0)],
//!     8,
//! );
//! beam.set_orientation("root", "tip", Vec3::new(0.0, 0.0, 1.0));
//! beam.set_material("root", "tip", "steel");
//! beam.set_cross_section("root", "tip", "rect");
//! beam.add_point_load(PointLoad::new("tip", [0.0, -10_000.0, 0.0, 0.0, 0.0, 0.0], false));
//! model.add_beam(beam).unwrap();
//!
//! model.fix("root", vec![DofSymbol::All]);
//!
//! let results = model.run(&AnalysisOptions::default()).unwrap();
//! let tip = results.mesh.global_node_index("tip").unwrap();
//! println!("tip deflection: {}", results.comp_u.uy[tip]);
//! ```

pub mod abstract_mesh;
pub mod analysis;
pub mod assembler;
pub mod constraints;
pub mod element;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod mesh;
pub mod model;
pub mod results;
pub mod solver;

/// Re-export of the common types needed to build and run a model.
pub mod prelude {
    pub use crate::abstract_mesh::AbstractMesh;
    pub use crate::analysis::{AnalysisEvent, AnalysisOptions};
    pub use crate::constraints::{BoundaryConditions, Connect, Fix};
    pub use crate::element::Element;
    pub use crate::elements::{CrossSection, Material};
    pub use crate::error::{FrameError, FrameResult};
    pub use crate::loads::{DistributedLoad, DofSymbol, PointLoad, PointMass};
    pub use crate::math::Vec3;
    pub use crate::model::{Beam, BeamNode, FrameModel};
    pub use crate::results::{AnalysisResults, DisplacementView, ForceView};
}
