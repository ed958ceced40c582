use std::path::Path;
use std::time::Instant;

use slog::info;

use crate::audio::{audio_stats, downsample};
use crate::config::Config;
use crate::error::{AnalysisError, FftError};
use crate::fft::{ComplexNumber, fft, fft_planned, get_steps, magnitude_spectrum, phase_spectrum, prepare};
use crate::models::{AnalysisReport, StepView, to_values};
use crate::utils;
use crate::wav::{self, AudioData};

/// Runs the full pipeline over decoded samples: downsample, pad, transform,
/// then derive the spectra and the decomposition trace.
pub fn analyze(samples: &[f64], sample_rate: u32, config: &Config) -> Result<AnalysisReport, FftError> {
    let window = downsample(samples, config.window_size);
    let prepared = prepare(&window);
    let spectrum = if config.planned {
        fft_planned(&prepared)?
    } else {
        fft(&prepared)?
    };

    Ok(AnalysisReport {
        stats: audio_stats(samples, sample_rate),
        window_size: prepared.len(),
        input: to_values(&prepared),
        magnitude: magnitude_spectrum(&spectrum),
        phase: phase_spectrum(&spectrum),
        spectrum: to_values(&spectrum),
        steps: trace_window(&prepared, config.steps_window),
    })
}

/// Traces the first `steps_window` prepared values, rounded up to a power of
/// two and capped at the prepared length.
pub fn trace_window(prepared: &[ComplexNumber], steps_window: usize) -> Vec<StepView> {
    // Clamp first: rounding an unbounded request up would overflow.
    let trace_len = steps_window.min(prepared.len()).next_power_of_two().min(prepared.len());
    get_steps(&prepared[..trace_len]).iter().map(StepView::from).collect()
}

/// Loads a WAV file and analyzes it.
pub fn analyze_file<P: AsRef<Path>>(path: P, config: &Config) -> Result<AnalysisReport, AnalysisError> {
    let audio = wav::load_wav(&path)?;
    let logger = utils::get_logger();
    info!(logger, "loaded audio";
        "path" => path.as_ref().display().to_string(),
        "samples" => audio.samples.len(),
        "sample_rate" => audio.sample_rate,
        "duration_s" => audio.duration());
    analyze_audio(&audio, config)
}

/// Decodes an uploaded WAV buffer and analyzes it.
pub fn analyze_bytes(bytes: &[u8], config: &Config) -> Result<AnalysisReport, AnalysisError> {
    let audio = wav::load_wav_bytes(bytes)?;
    analyze_audio(&audio, config)
}

fn analyze_audio(audio: &AudioData, config: &Config) -> Result<AnalysisReport, AnalysisError> {
    let start = Instant::now();
    let report = analyze(&audio.samples, audio.sample_rate, config)?;

    let logger = utils::get_logger();
    info!(logger, "analysis complete";
        "window" => report.window_size,
        "steps" => report.steps.len(),
        "elapsed_us" => start.elapsed().as_micros() as u64);
    Ok(report)
}
