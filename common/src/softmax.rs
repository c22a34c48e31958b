/// Softmax over `logits`, in place. Shifted by the max logit for numerical stability.
pub fn softmax_in_place(logits: &mut [f32]) {
    let max = logits.iter().cloned().fold(f32::MIN, f32::max);

    for logit in logits.iter_mut() {
        *logit = (*logit - max).exp();
    }

    let sum = logits.iter().sum::<f32>();
    if sum > 0.0 {
        for p in logits.iter_mut() {
            *p /= sum;
        }
    }
}

pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let mut probabilities = logits.to_vec();
    softmax_in_place(&mut probabilities);
    probabilities
}
