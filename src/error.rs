use std::io;

use thiserror::Error;

/// Raised by the transform when its input cannot be processed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FftError {
    #[error("length must be a power of two (got {len})")]
    InvalidInput { len: usize },
}

/// Errors produced while decoding a WAV container into samples.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to read audio: {0}")]
    Io(#[from] io::Error),
    #[error("invalid WAV header: {0}")]
    InvalidHeader(String),
    #[error("unsupported WAV format: {0}")]
    UnsupportedFormat(String),
    #[error("missing `{0}` chunk")]
    MissingChunk(&'static str),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Audio(#[from] AudioError),
    #[error(transparent)]
    Fft(#[from] FftError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = FftError::InvalidInput { len: 3 };
        assert_eq!(err.to_string(), "length must be a power of two (got 3)");
    }

    #[test]
    fn test_analysis_error_is_transparent() {
        let err: AnalysisError = AudioError::MissingChunk("data").into();
        assert_eq!(err.to_string(), "missing `data` chunk");
    }
}
