use crate::fft::{ComplexNumber, split_even_odd};

/// One snapshot of the even/odd reordering performed by the transform.
#[derive(Debug, Clone, PartialEq)]
pub struct DecompositionStep<T = ComplexNumber> {
    /// Recursion depth that produced this snapshot; 0 for the untouched input.
    pub level: usize,
    pub data: Vec<T>,
}

/// Records the divide-and-conquer splits of the transform for visualization.
///
/// The first step is a copy of the input. Every sub-array longer than one
/// element then contributes `evens ++ odds`, walking the even half completely
/// before the odd half.
pub fn get_steps<T: Clone>(input: &[T]) -> Vec<DecompositionStep<T>> {
    let mut steps = vec![DecompositionStep {
        level: 0,
        data: input.to_vec(),
    }];
    trace(input, 0, &mut steps);
    steps
}

fn trace<T: Clone>(data: &[T], level: usize, steps: &mut Vec<DecompositionStep<T>>) {
    if data.len() <= 1 {
        return;
    }

    let (even, odd) = split_even_odd(data);
    let mut reordered = Vec::with_capacity(data.len());
    reordered.extend_from_slice(&even);
    reordered.extend_from_slice(&odd);
    steps.push(DecompositionStep {
        level: level + 1,
        data: reordered,
    });

    trace(&even, level + 1, steps);
    trace(&odd, level + 1, steps);
}
