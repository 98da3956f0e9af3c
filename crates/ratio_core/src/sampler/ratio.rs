//! Ratio-of-means statistic.

/// Arithmetic mean of a slice. NaN for an empty slice.
#[inline]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// `mean(x) / mean(y)`.
///
/// IEEE-754 division is used as is: a zero denominator gives `±inf`, or NaN
/// when the numerator is zero as well. Callers receive these values
/// unchanged; they are part of the statistic's distribution.
///
/// # Examples
///
/// ```rust
/// use ratio_core::sampler::ratio_of_means;
///
/// assert_eq!(ratio_of_means(&[2.0, 4.0], &[1.0, 2.0]), 2.0);
/// assert!(ratio_of_means(&[1.0], &[0.0]).is_infinite());
/// ```
#[inline]
pub fn ratio_of_means(x: &[f64], y: &[f64]) -> f64 {
    mean(x) / mean(y)
}
