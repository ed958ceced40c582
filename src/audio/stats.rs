use serde::Serialize;

/// Summary of a decoded sample buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioStats {
    pub max: f64,
    pub min: f64,
    pub avg: f64,
    pub length: usize,
    pub sample_rate: u32,
}

/// Computes min/max/mean of a buffer. Returns `None` for an empty buffer.
pub fn audio_stats(samples: &[f64], sample_rate: u32) -> Option<AudioStats> {
    if samples.is_empty() {
        return None;
    }

    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let avg = samples.iter().sum::<f64>() / samples.len() as f64;

    Some(AudioStats {
        max,
        min,
        avg,
        length: samples.len(),
        sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_stats() {
        let stats = audio_stats(&[0.5, -1.0, 0.25, 0.25], 22050).unwrap();
        assert_eq!(stats.max, 0.5);
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.avg, 0.0);
        assert_eq!(stats.length, 4);
        assert_eq!(stats.sample_rate, 22050);
    }

    #[test]
    fn test_audio_stats_empty() {
        assert!(audio_stats(&[], 44100).is_none());
    }
}
