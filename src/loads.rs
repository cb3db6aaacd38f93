//! Load records and the DOF-symbol vocabulary used by boundary conditions.
//!
//! Restructured away from the teacher's single-axis `LoadDirection` model
//! (ungrounded in this crate's six-component load schema) toward `framat`'s
//! six-component arrays: every load carries `[x, y, z, about-x, about-y, about-z]`.

use serde::{Deserialize, Serialize};

/// A concentrated force/moment applied at a named node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointLoad {
    /// UID of the node the load acts on.
    pub at: String,
    /// `[Fx, Fy, Fz, Mx, My, Mz]`.
    pub load: [f64; 6],
    /// If true, `load` is given in the element's local frame and is
    /// rotated into the global frame before assembly.
    pub local_sys: bool,
}

impl PointLoad {
    pub fn new(at: impl Into<String>, load: [f64; 6], local_sys: bool) -> Self {
        Self {
            at: at.into(),
            load,
            local_sys,
        }
    }
}

/// A uniformly distributed force/moment applied along a named-node range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// UID of the named node the range starts at.
    pub from: String,
    /// UID of the named node the range ends at.
    pub to: String,
    /// `[qx, qy, qz, mx, my, mz]` per unit length.
    pub load: [f64; 6],
    /// If true, `load` is given in the element's local frame.
    pub local_sys: bool,
}

impl DistributedLoad {
    pub fn new(from: impl Into<String>, to: impl Into<String>, load: [f64; 6], local_sys: bool) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            load,
            local_sys,
        }
    }
}

/// A concentrated, non-structural mass at a named node (contributes to `M` only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointMass {
    /// UID of the node the mass acts on.
    pub at: String,
    /// Mass in kg; must be `> 0`.
    pub mass: f64,
}

impl PointMass {
    pub fn new(at: impl Into<String>, mass: f64) -> Self {
        Self {
            at: at.into(),
            mass,
        }
    }
}

/// DOF symbols usable in `fix`/`connect` boundary conditions.
///
/// The later `framat` draft spells rotational DOFs `thx/thy/thz`; an earlier
/// draft used `tx/ty/tz`. This crate adopts `thx/thy/thz` only (SPEC_FULL §9
/// open question #1) and has no parser for the rejected spelling in the
/// first place, since the core takes typed values rather than strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DofSymbol {
    Ux,
    Uy,
    Uz,
    Thx,
    Thy,
    Thz,
    /// All six DOFs at the node.
    All,
}

impl DofSymbol {
    /// Column offset within the node's 6-DOF block, or `None` for `All`
    /// (callers expand `All` to the six individual offsets instead).
    pub fn offset(self) -> Option<usize> {
        match self {
            DofSymbol::Ux => Some(0),
            DofSymbol::Uy => Some(1),
            DofSymbol::Uz => Some(2),
            DofSymbol::Thx => Some(3),
            DofSymbol::Thy => Some(4),
            DofSymbol::Thz => Some(5),
            DofSymbol::All => None,
        }
    }
}
