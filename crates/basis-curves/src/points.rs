//! Shared validation for tenor-keyed point sets.

use crate::error::{CurveError, CurveResult};

/// Validates `(tenor, value)` pairs and returns them sorted by tenor.
///
/// Tenors must be finite and positive and may not repeat; values must be
/// finite. `what` names the curve in error messages.
pub(crate) fn sorted_points<I>(points: I, what: &str) -> CurveResult<(Vec<f64>, Vec<f64>)>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut points: Vec<(f64, f64)> = points.into_iter().collect();
    if points.is_empty() {
        return Err(CurveError::insufficient_points(1, 0));
    }

    for &(tenor, value) in &points {
        if !tenor.is_finite() || tenor <= 0.0 {
            return Err(CurveError::invalid_value(format!(
                "{what} tenor must be positive and finite, got {tenor}"
            )));
        }
        if !value.is_finite() {
            return Err(CurveError::invalid_value(format!(
                "{what} value at tenor {tenor} is not finite"
            )));
        }
    }

    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    if let Some(pair) = points.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(CurveError::DuplicateTenor { tenor: pair[0].0 });
    }

    Ok(points.into_iter().unzip())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_by_tenor() {
        let (tenors, values) = sorted_points([(5.0, 0.2), (1.0, 0.1)], "rate").unwrap();
        assert_eq!(tenors, vec![1.0, 5.0]);
        assert_eq!(values, vec![0.1, 0.2]);
    }

    #[test]
    fn test_rejects_bad_points() {
        assert!(matches!(
            sorted_points(Vec::new(), "rate"),
            Err(CurveError::InsufficientPoints { .. })
        ));
        assert!(sorted_points([(0.0, 0.1)], "rate").is_err());
        assert!(sorted_points([(-1.0, 0.1)], "rate").is_err());
        assert!(sorted_points([(1.0, f64::NAN)], "rate").is_err());
        assert!(matches!(
            sorted_points([(2.0, 0.1), (2.0, 0.2)], "rate"),
            Err(CurveError::DuplicateTenor { .. })
        ));
    }
}
