//! Retessellation parameters.

/// What to do with a cell whose crossing pattern is unsupported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViolationPolicy {
    /// Abort the whole retessellation with
    /// [`RetessError::ContractViolation`](crate::RetessError::ContractViolation).
    #[default]
    Fail,

    /// Copy the offending cell unchanged, record its index, and continue.
    /// The output may then have cracks along that cell's faces.
    KeepOriginal,
}

/// Parameters for isosurface retessellation.
#[derive(Debug, Clone)]
pub struct RetessParams {
    /// Decompose cells on the rayon thread pool.
    pub parallel: bool,

    /// Minimum tetrahedron count before parallel decomposition kicks in.
    pub parallel_threshold: usize,

    /// Handling of cells with an unsupported crossing pattern.
    pub violation_policy: ViolationPolicy,
}

impl Default for RetessParams {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 4096,
            violation_policy: ViolationPolicy::default(),
        }
    }
}

impl RetessParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters that always decompose on the calling thread.
    #[must_use]
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Set whether to decompose in parallel.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the parallel threshold.
    #[must_use]
    pub const fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Set the violation policy.
    #[must_use]
    pub const fn with_violation_policy(mut self, policy: ViolationPolicy) -> Self {
        self.violation_policy = policy;
        self
    }

    /// Whether a mesh with `tet_count` cells is decomposed in parallel.
    #[must_use]
    pub const fn use_parallel(&self, tet_count: usize) -> bool {
        self.parallel && tet_count >= self.parallel_threshold
    }
}
