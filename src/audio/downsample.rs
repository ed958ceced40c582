/// Reduces a sample buffer to `target_length` values by keeping every
/// `len / target_length`-th sample.
///
/// Buffers that are already no longer than the target are returned as-is.
pub fn downsample(input: &[f64], target_length: usize) -> Vec<f64> {
    if target_length == 0 {
        return Vec::new();
    }
    if input.len() <= target_length {
        return input.to_vec();
    }

    let step = input.len() / target_length;
    input.iter().step_by(step).take(target_length).copied().collect()
}
