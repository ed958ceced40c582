//! Runtime configuration read from `WAVEFFT_*` environment variables.

use crate::utils::{get_env, parse_or};

pub const DEFAULT_WINDOW_SIZE: usize = 2048;
pub const DEFAULT_STEPS_WINDOW: usize = 16;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;
/// Largest analysis window accepted from any source.
pub const MAX_WINDOW_SIZE: usize = 65536;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Number of samples the input is downsampled to before the transform.
    pub window_size: usize,
    /// Number of leading prepared values traced for the step view.
    pub steps_window: usize,
    /// Run the transform through the planned iterative path instead of the recursive one.
    pub planned: bool,
    pub host: String,
    pub port: u16,
    /// Upper bound on an uploaded WAV body.
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window_size: DEFAULT_WINDOW_SIZE,
            steps_window: DEFAULT_STEPS_WINDOW,
            planned: false,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| get_env(key, None))
    }

    /// Builds a config from a variable lookup. Missing, malformed or zero sizes
    /// keep their defaults; window sizes are capped at `MAX_WINDOW_SIZE`.
    pub fn from_vars<F: Fn(&str) -> String>(lookup: F) -> Self {
        let defaults = Config::default();
        let host = lookup("WAVEFFT_HOST");

        Config {
            window_size: window(parse_or(&lookup("WAVEFFT_WINDOW"), defaults.window_size))
                .unwrap_or(defaults.window_size),
            steps_window: positive(parse_or(&lookup("WAVEFFT_STEPS_WINDOW"), defaults.steps_window))
                .unwrap_or(defaults.steps_window),
            host: if host.trim().is_empty() { defaults.host } else { host.trim().to_string() },
            planned: parse_or(&lookup("WAVEFFT_PLANNED"), defaults.planned),
            port: parse_or(&lookup("WAVEFFT_PORT"), defaults.port),
            max_upload_bytes: positive(parse_or(&lookup("WAVEFFT_MAX_UPLOAD"), defaults.max_upload_bytes))
                .unwrap_or(defaults.max_upload_bytes),
        }
    }

    pub fn with_window_size(mut self, window_size: Option<usize>) -> Self {
        if let Some(size) = window_size.and_then(window) {
            self.window_size = size;
        }
        self
    }

    pub fn with_steps_window(mut self, steps_window: Option<usize>) -> Self {
        if let Some(size) = steps_window.and_then(positive) {
            self.steps_window = size;
        }
        self
    }

    pub fn with_planned(mut self, planned: bool) -> Self {
        self.planned = self.planned || planned;
        self
    }
}

fn positive(value: usize) -> Option<usize> {
    (value > 0).then_some(value)
}

fn window(value: usize) -> Option<usize> {
    positive(value).map(|size| size.min(MAX_WINDOW_SIZE))
}
