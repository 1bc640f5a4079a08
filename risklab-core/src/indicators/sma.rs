//! Simple moving average over the trailing window.

/// Mean of the last `period` values. `None` when the series is too short
/// or the period is zero.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::testing::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn sma_of_trailing_window() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_approx(sma(&values, 3).unwrap(), 4.0, DEFAULT_EPSILON);
        assert_approx(sma(&values, 5).unwrap(), 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_insufficient_data_is_none() {
        assert_eq!(sma(&[1.0, 2.0], 3), None);
        assert_eq!(sma(&[1.0], 0), None);
        assert_eq!(sma(&[], 1), None);
    }
}
