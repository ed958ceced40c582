use num_complex::Complex;
use rustfft::FftPlanner;
use std::f64::consts::PI;

use crate::error::FftError;
use crate::fft::ComplexNumber;

/// Performs the Fast Fourier Transform on a power-of-two-length sequence.
///
/// Returns the DFT coefficients in natural order (index 0 is the DC
/// component). The input is left untouched.
pub fn fft(input: &[ComplexNumber]) -> Result<Vec<ComplexNumber>, FftError> {
    if input.len() <= 1 {
        return Ok(input.to_vec());
    }
    check_power_of_two(input.len())?;
    Ok(recursive_fft(input))
}

/// Iterative counterpart of [`fft`] backed by `rustfft`, selected by
/// `Config::planned`. Produces the same coefficients up to floating-point
/// rounding.
pub fn fft_planned(input: &[ComplexNumber]) -> Result<Vec<ComplexNumber>, FftError> {
    if input.len() <= 1 {
        return Ok(input.to_vec());
    }
    check_power_of_two(input.len())?;

    let mut planner = FftPlanner::<f64>::new();
    let plan = planner.plan_fft_forward(input.len());
    let mut buffer = input.to_vec();
    plan.process(&mut buffer);
    Ok(buffer)
}

/// Splits a slice into its even-indexed and odd-indexed elements, keeping
/// the relative order inside each half.
pub fn split_even_odd<T: Clone>(data: &[T]) -> (Vec<T>, Vec<T>) {
    let even: Vec<T> = data.iter().step_by(2).cloned().collect();
    let odd: Vec<T> = data.iter().skip(1).step_by(2).cloned().collect();
    (even, odd)
}

fn check_power_of_two(len: usize) -> Result<(), FftError> {
    if len.is_power_of_two() {
        Ok(())
    } else {
        Err(FftError::InvalidInput { len })
    }
}

// Length is already known to be a power of two here.
fn recursive_fft(data: &[ComplexNumber]) -> Vec<ComplexNumber> {
    let n = data.len();
    if n <= 1 {
        return data.to_vec();
    }

    let (even, odd) = split_even_odd(data);
    let fft_even = recursive_fft(&even);
    let fft_odd = recursive_fft(&odd);

    let half = n / 2;
    let mut result = vec![Complex::new(0.0, 0.0); n];
    for k in 0..half {
        let twiddle = Complex::from_polar(1.0, -2.0 * PI * k as f64 / n as f64);
        let odd_term = twiddle * fft_odd[k];
        result[k] = fft_even[k] + odd_term;
        result[k + half] = fft_even[k] - odd_term;
    }

    result
}
