use num_complex::Complex;

/// A single complex value of a sequence. Arithmetic (`+`, `-`, `*`) comes from
/// `num_complex` and always yields a new value.
pub type ComplexNumber = Complex<f64>;

/// Builds a complex number from its real and imaginary parts.
pub fn complex(real: f64, imag: f64) -> ComplexNumber {
    Complex::new(real, imag)
}

/// Compares two values component-wise with a tolerance that is absolute near
/// zero and relative for larger magnitudes.
pub fn approx_eq(a: ComplexNumber, b: ComplexNumber, tolerance: f64) -> bool {
    let scale = a.norm().max(b.norm()).max(1.0);
    (a.re - b.re).abs() <= tolerance * scale && (a.im - b.im).abs() <= tolerance * scale
}
