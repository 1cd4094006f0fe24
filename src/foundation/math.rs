/// Clamp `value` into `[start, end]`, letting `start` win when the range is inverted.
pub(crate) fn clamp(start: f64, value: f64, end: f64) -> f64 {
    start.max(value.min(end))
}

/// Sum of the strictly positive entries.
pub(crate) fn sum_positive(values: &[f64]) -> f64 {
    values.iter().copied().filter(|v| *v > 0.0).sum()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
