use std::f64::consts::PI;

use crate::fft::ComplexNumber;

/// Magnitude `sqrt(re^2 + im^2)` of every coefficient.
pub fn magnitude_spectrum(spectrum: &[ComplexNumber]) -> Vec<f64> {
    spectrum.iter().map(|c| c.norm()).collect()
}

/// Phase `atan2(im, re)` of every coefficient, in radians within `(-PI, PI]`.
pub fn phase_spectrum(spectrum: &[ComplexNumber]) -> Vec<f64> {
    spectrum
        .iter()
        .map(|c| {
            let phase = c.arg();
            // atan2(-0.0, x < 0) lands on -PI, which belongs to PI.
            if phase <= -PI { PI } else { phase }
        })
        .collect()
}
