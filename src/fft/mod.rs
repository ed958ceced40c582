mod complex;
pub use complex::*;
mod fft;
pub use fft::*;
mod prepare;
pub use prepare::*;
mod spectrum;
pub use spectrum::*;
mod steps;
pub use steps::*;
