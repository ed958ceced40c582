mod downsample;
pub use downsample::*;
mod stats;
pub use stats::*;
