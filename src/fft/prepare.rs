use crate::fft::{ComplexNumber, complex};

/// Converts real samples into a zero-padded complex sequence whose length is
/// the next power of two at or above the sample count.
///
/// An empty input yields a single zero value.
pub fn prepare(samples: &[f64]) -> Vec<ComplexNumber> {
    let target_length = samples.len().next_power_of_two();
    let mut padded = vec![complex(0.0, 0.0); target_length];
    for (slot, &sample) in padded.iter_mut().zip(samples) {
        slot.re = sample;
    }
    padded
}
