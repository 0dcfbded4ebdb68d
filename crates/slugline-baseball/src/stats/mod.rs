// Pure transforms over fetched batting data.

pub mod category;
pub mod events;
pub mod games;
pub mod predict;
pub mod season;
pub mod trend;

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean, or `None` for an empty sample.
pub(crate) fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_to_cents() {
        assert!((round2(0.12 + 0.15 + 0.06) - 0.33).abs() < 1e-12);
        assert!((round2(1.005_1) - 1.01).abs() < 1e-12);
        assert!((round2(2.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(Vec::<f64>::new()), None);
    }

    #[test]
    fn mean_of_values() {
        assert_eq!(mean([1.0, 2.0, 3.0]), Some(2.0));
    }
}
