use serde::{Deserialize, Serialize};

/// One chemical entity and the 1D peak positions (ppm) picked from its
/// reference spectrum. The optimizer only reorders membership of components,
/// it never edits their peaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    #[serde(default)]
    peaks: Vec<f64>,
}

impl Component {
    pub fn new(name: impl Into<String>, peaks: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            peaks,
        }
    }

    /// Peak positions in input order.
    pub fn peaks(&self) -> &[f64] {
        &self.peaks
    }

    /// A zero position is a missing peak. A component is scoreable when at
    /// least one position is non-zero.
    pub fn has_peaks(&self) -> bool {
        self.peaks.iter().any(|&p| p != 0.0)
    }

    /// The first `cap` peaks, or `None` when that prefix holds no usable
    /// position.
    pub fn leading_peaks(&self, cap: usize) -> Option<&[f64]> {
        let prefix = &self.peaks[..self.peaks.len().min(cap)];
        if prefix.iter().any(|&p| p != 0.0) {
            Some(prefix)
        } else {
            None
        }
    }
}

/// Indices of the components that can be scored, in input order.
pub fn scoreable_indices(components: &[Component]) -> Vec<usize> {
    components
        .iter()
        .enumerate()
        .filter(|(_, c)| c.has_peaks())
        .map(|(i, _)| i)
        .collect()
}
