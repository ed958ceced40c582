use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use crate::analysis;
use crate::audio::{audio_stats, downsample};
use crate::config::Config;
use crate::fft::prepare;
use crate::wav;

/// Writes one JSON document followed by a newline.
fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn ensure_exists(file_path: &str) -> Result<()> {
    if !Path::new(file_path).exists() {
        bail!("file '{}' does not exist", file_path);
    }
    Ok(())
}

/// Writes the full analysis report for a WAV file.
pub fn analyze<W: Write>(out: &mut W, file_path: &str, config: &Config, pretty: bool) -> Result<()> {
    ensure_exists(file_path)?;
    let report = analysis::analyze_file(file_path, config)
        .with_context(|| format!("failed to analyze {}", file_path))?;
    write_json(out, &report, pretty)
}

/// Writes only the decomposition trace of the prepared window.
pub fn steps<W: Write>(out: &mut W, file_path: &str, config: &Config, pretty: bool) -> Result<()> {
    ensure_exists(file_path)?;
    let audio = wav::load_wav(file_path).with_context(|| format!("failed to read {}", file_path))?;
    let prepared = prepare(&downsample(&audio.samples, config.window_size));
    write_json(out, &analysis::trace_window(&prepared, config.steps_window), pretty)
}

/// Writes min/max/mean statistics of a WAV file.
pub fn stats<W: Write>(out: &mut W, file_path: &str, pretty: bool) -> Result<()> {
    ensure_exists(file_path)?;
    let audio = wav::load_wav(file_path).with_context(|| format!("failed to read {}", file_path))?;
    match audio_stats(&audio.samples, audio.sample_rate) {
        Some(stats) => write_json(out, &stats, pretty),
        None => bail!("'{}' contains no samples", file_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use serde_json::Value;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_ramp(dir: &TempDir, len: i16) -> PathBuf {
        let path = dir.path().join("ramp.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for i in 0..len {
            writer.write_sample(i * 100).unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    fn documents(out: &[u8]) -> Vec<Value> {
        serde_json::Deserializer::from_slice(out)
            .into_iter::<Value>()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_analyze_writes_single_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_ramp(&dir, 100);
        let config = Config::default().with_window_size(Some(8)).with_steps_window(Some(2));

        let mut out = Vec::new();
        analyze(&mut out, path.to_str().unwrap(), &config, false).unwrap();

        let docs = documents(&out);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["window_size"], 8);
        assert_eq!(docs[0]["steps"].as_array().unwrap().len(), 2);
        assert_eq!(docs[0]["magnitude"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn test_steps_writes_trace() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_ramp(&dir, 100);
        let config = Config::default().with_window_size(Some(16)).with_steps_window(Some(4));

        let mut out = Vec::new();
        steps(&mut out, path.to_str().unwrap(), &config, true).unwrap();

        let docs = documents(&out);
        assert_eq!(docs.len(), 1);
        let trace = docs[0].as_array().unwrap();
        assert_eq!(trace.len(), 4);
        assert_eq!(trace[0]["level"], 0);
        assert_eq!(trace[1]["level"], 1);
        // Downsampled by 6: samples 0, 600, 1200, 1800 scaled to [-1, 1]; evens first.
        let reordered: Vec<f64> = trace[1]["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["real"].as_f64().unwrap())
            .collect();
        assert_eq!(
            reordered,
            vec![0.0, 1200.0 / 32768.0, 600.0 / 32768.0, 1800.0 / 32768.0]
        );
    }

    #[test]
    fn test_stats_writes_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_ramp(&dir, 10);

        let mut out = Vec::new();
        stats(&mut out, path.to_str().unwrap(), false).unwrap();

        let docs = documents(&out);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["length"], 10);
        assert_eq!(docs[0]["sample_rate"], 8000);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let mut out = Vec::new();
        let err = analyze(&mut out, "no/such/file.wav", &Config::default(), false).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        assert!(stats(&mut out, "no/such/file.wav", false).is_err());
        assert!(out.is_empty());
    }
}
