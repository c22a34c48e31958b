/// Mean of an accumulated total over a visit count. Zero when nothing has been accumulated yet.
pub fn mean_or_zero(total: f32, count: usize) -> f32 {
    if count == 0 {
        0.0
    } else {
        total / count as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_mean_or_zero_no_count() {
        assert_eq!(mean_or_zero(3.0, 0), 0.0);
    }

    #[test]
    fn test_mean_or_zero() {
        assert_approx_eq!(mean_or_zero(-1.5, 3), -0.5);
    }
}
