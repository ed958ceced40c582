use serde::Serialize;

use crate::audio::AudioStats;
use crate::fft::{ComplexNumber, DecompositionStep};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComplexValue {
    pub real: f64,
    pub imag: f64,
}

impl From<ComplexNumber> for ComplexValue {
    fn from(c: ComplexNumber) -> Self {
        ComplexValue { real: c.re, imag: c.im }
    }
}

pub fn to_values(values: &[ComplexNumber]) -> Vec<ComplexValue> {
    values.iter().copied().map(ComplexValue::from).collect()
}

/// A decomposition step as handed to the visualization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    pub level: usize,
    pub data: Vec<ComplexValue>,
}

impl From<&DecompositionStep> for StepView {
    fn from(step: &DecompositionStep) -> Self {
        StepView {
            level: step.level,
            data: to_values(&step.data),
        }
    }
}

/// Everything the front-end needs to draw one analysis window.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub stats: Option<AudioStats>,
    /// Length of the transformed window after padding.
    pub window_size: usize,
    pub input: Vec<ComplexValue>,
    pub spectrum: Vec<ComplexValue>,
    pub magnitude: Vec<f64>,
    pub phase: Vec<f64>,
    pub steps: Vec<StepView>,
}
