use crate::errors::StatsError;

/// Median of `values`; the mean of the two middle elements for even lengths.
pub fn median(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::Empty);
    }
    if let Some(&bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(StatsError::NotFinite(bad));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(sorted[mid])
    } else {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Geometric mean computed as `exp(mean(ln x))`.
///
/// Every value must be finite and strictly positive; anything else is an
/// error rather than a NaN or a silently skipped sample.
pub fn geometric_mean(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::Empty);
    }

    let mut log_sum = 0.0;
    for &v in values {
        if !v.is_finite() {
            return Err(StatsError::NotFinite(v));
        }
        if v <= 0.0 {
            return Err(StatsError::NonPositive(v));
        }
        log_sum += v.ln();
    }

    Ok((log_sum / values.len() as f64).exp())
}
