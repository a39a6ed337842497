//! Detection parameters.

/// Parameters for iso-value crossing detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectParams {
    /// The field value the isosurface passes through.
    pub iso_value: f64,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self { iso_value: 0.0 }
    }
}

impl DetectParams {
    /// Create parameters for the given iso value.
    #[must_use]
    pub const fn new(iso_value: f64) -> Self {
        Self { iso_value }
    }

    /// Set the iso value.
    #[must_use]
    pub const fn with_iso_value(mut self, iso_value: f64) -> Self {
        self.iso_value = iso_value;
        self
    }
}
