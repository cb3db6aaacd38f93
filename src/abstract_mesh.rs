//! Abstract beam mesh (component C): the immutable container of per-beam
//! element sequences, the named-node UID -> global-index map, UID range
//! queries, and bounding-box queries.
//!
//! Grounded on the teacher's `src/model.rs` UID -> id map / per-member
//! storage pattern, and on `framat/fem/beamline.py`'s node -> parent-element
//! adjacency (`node.parent_element`/`elem_loc` bookkeeping, reproduced here
//! as `element_by_named_node`).

use std::collections::HashMap;

use crate::element::Element;
use crate::error::{FrameError, FrameResult};
use crate::math::Vec3;

fn fold_bbox<'a>(coords: impl Iterator<Item = &'a Vec3>) -> Option<(Vec3, Vec3)> {
    coords.fold(None, |bbox, coord| match bbox {
        None => Some((*coord, *coord)),
        Some((min, max)) => Some((
            Vec3::new(min.x.min(coord.x), min.y.min(coord.y), min.z.min(coord.z)),
            Vec3::new(max.x.max(coord.x), max.y.max(coord.y), max.z.max(coord.z)),
        )),
    })
}

/// Container of per-beam element sequences and UID bookkeeping.
pub struct AbstractMesh {
    /// Elements of each beam, in mesh order.
    pub elements_by_beam: Vec<Vec<Element>>,
    /// Named nodes of each beam, in beam order, as `(uid, coord)` pairs.
    pub named_nodes_by_beam: Vec<Vec<(String, Vec3)>>,
    /// UID -> global node index, over every named node in the model.
    pub glob_num: HashMap<String, usize>,
    /// DOF offset of each beam's first node within the global DOF vector.
    pub dof_offset_by_beam: Vec<usize>,
}

impl AbstractMesh {
    pub(crate) fn new(
        elements_by_beam: Vec<Vec<Element>>,
        named_nodes_by_beam: Vec<Vec<(String, Vec3)>>,
        glob_num: HashMap<String, usize>,
        dof_offset_by_beam: Vec<usize>,
    ) -> Self {
        Self {
            elements_by_beam,
            named_nodes_by_beam,
            glob_num,
            dof_offset_by_beam,
        }
    }

    /// Number of beams in the mesh.
    pub fn nbeams(&self) -> usize {
        self.elements_by_beam.len()
    }

    /// Total number of global DOFs: `6 * total mesh points`.
    pub fn ndofs(&self) -> usize {
        self.elements_by_beam
            .iter()
            .map(|elements| 6 * (elements.len() + 1))
            .sum()
    }

    /// Number of DOFs owned by beam `i`: `6 * (nelements_i + 1)`.
    pub fn ndofs_beam(&self, beam_idx: usize) -> usize {
        6 * (self.elements_by_beam[beam_idx].len() + 1)
    }

    /// Global node index of a named node.
    pub fn global_node_index(&self, uid: &str) -> FrameResult<usize> {
        self.glob_num
            .get(uid)
            .copied()
            .ok_or_else(|| FrameError::UnknownUid(uid.to_string()))
    }

    /// Elements of `beam_idx`, contiguous from the element whose endpoint 1
    /// carries UID `uid1` up to and including the element whose endpoint 2
    /// carries UID `uid2`.
    pub fn iter_from_to(&self, beam_idx: usize, uid1: &str, uid2: &str) -> FrameResult<&[Element]> {
        let elements = &self.elements_by_beam[beam_idx];

        let start = elements
            .iter()
            .position(|e| e.p1_uid.as_deref() == Some(uid1))
            .ok_or_else(|| FrameError::UnknownUid(uid1.to_string()))?;

        let end = elements[start..]
            .iter()
            .position(|e| e.p2_uid.as_deref() == Some(uid2));

        let end = match end {
            Some(rel) => start + rel,
            None => {
                // uid2 might still be present earlier in the beam, which means
                // the caller gave the range in the wrong order.
                let anywhere = elements.iter().position(|e| e.p2_uid.as_deref() == Some(uid2));
                return match anywhere {
                    Some(_) => Err(FrameError::MisorderedRange {
                        beam: beam_idx.to_string(),
                        from: uid1.to_string(),
                        to: uid2.to_string(),
                    }),
                    None => Err(FrameError::UnknownUid(uid2.to_string())),
                };
            }
        };

        Ok(&elements[start..=end])
    }

    /// Mutable access to the same contiguous range as [`iter_from_to`].
    pub fn iter_from_to_mut(
        &mut self,
        beam_idx: usize,
        uid1: &str,
        uid2: &str,
    ) -> FrameResult<&mut [Element]> {
        let elements = &self.elements_by_beam[beam_idx];
        let start = elements
            .iter()
            .position(|e| e.p1_uid.as_deref() == Some(uid1))
            .ok_or_else(|| FrameError::UnknownUid(uid1.to_string()))?;
        let end = elements[start..]
            .iter()
            .position(|e| e.p2_uid.as_deref() == Some(uid2));
        let end = match end {
            Some(rel) => start + rel,
            None => {
                let anywhere = elements.iter().position(|e| e.p2_uid.as_deref() == Some(uid2));
                return match anywhere {
                    Some(_) => Err(FrameError::MisorderedRange {
                        beam: beam_idx.to_string(),
                        from: uid1.to_string(),
                        to: uid2.to_string(),
                    }),
                    None => Err(FrameError::UnknownUid(uid2.to_string())),
                };
            }
        };
        Ok(&mut self.elements_by_beam[beam_idx][start..=end])
    }

    /// The element adjacent to a named node and which endpoint (1 or 2)
    /// carries its UID.
    ///
    /// For a node shared by two elements (an interior named node), the
    /// earlier element in beam order owns it (mirroring `parent_element`
    /// bookkeeping: node1 is checked before node2 on each element in turn,
    /// so an interior node is always found as the node2 of the preceding
    /// element before the scan would reach the following element's node1).
    pub fn element_by_named_node(&self, beam_idx: usize, uid: &str) -> FrameResult<(usize, u8)> {
        let elements = &self.elements_by_beam[beam_idx];
        for (idx, element) in elements.iter().enumerate() {
            if element.p1_uid.as_deref() == Some(uid) {
                return Ok((idx, 1));
            }
            if element.p2_uid.as_deref() == Some(uid) {
                return Ok((idx, 2));
            }
        }
        Err(FrameError::UnknownUid(uid.to_string()))
    }

    /// Axis-aligned bounding box `(min, max)` over every named node in the model.
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        fold_bbox(self.named_nodes_by_beam.iter().flatten().map(|(_, c)| c))
    }

    /// Axis-aligned bounding box over a single beam's named nodes.
    pub fn bounding_box_beam(&self, beam_idx: usize) -> Option<(Vec3, Vec3)> {
        fold_bbox(self.named_nodes_by_beam[beam_idx].iter().map(|(_, c)| c))
    }
}
