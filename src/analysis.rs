//! Analysis options and the passive-reporter hook.
//!
//! Trimmed from the teacher's `AnalysisOptions` (`analysis/mod.rs`) to what
//! this spec's scope supports: no `PDelta`/`Modal`/`Nonlinear` variants, since
//! those name analysis features excluded by the Non-goals (SPEC_FULL §1),
//! and there is no ambient-stack obligation to keep option fields whose
//! feature was dropped.

/// An informational event emitted at a pipeline milestone, for embedders
/// that want visibility without depending on the `log` facade.
#[derive(Debug, Clone)]
pub enum AnalysisEvent {
    /// Meshing finished: `(n_beams, n_elements, n_nodes, n_dofs)`.
    Meshed {
        n_beams: usize,
        n_elements: usize,
        n_nodes: usize,
        n_dofs: usize,
    },
    /// Global tensor assembly finished: `(nnz, density)`.
    Assembled { nnz: usize, density: f64 },
    /// The constrained solve finished successfully.
    Solved,
}

/// Options controlling one `FrameModel::run` call.
pub struct AnalysisOptions {
    /// If true, the solver densifies the sparse-assembled `K` before the
    /// dense LU solve (SPEC_FULL §4.G allows either path); if false, `K` is
    /// accumulated and densified the same way but the distinction is kept
    /// for callers that want to record which path ran.
    pub sparse: bool,
    /// Passive reporter for informational events; never influences control
    /// flow (SPEC_FULL §7: "no component reads another's work-in-progress
    /// state").
    pub reporter: Option<Box<dyn Fn(AnalysisEvent)>>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            sparse: true,
            reporter: None,
        }
    }
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reporter(mut self, reporter: impl Fn(AnalysisEvent) + 'static) -> Self {
        self.reporter = Some(Box::new(reporter));
        self
    }

    pub(crate) fn report(&self, event: AnalysisEvent) {
        if let Some(reporter) = &self.reporter {
            reporter(event);
        }
    }
}
