//! Random sample data set for the "generate sample data" widget.

use rand::Rng;
use serde::Serialize;

use super::numbers::format_fixed2;

/// Number of values in a generated sample.
pub const SAMPLE_SIZE: usize = 10;

/// Smallest and largest value a sample may contain.
pub const SAMPLE_RANGE: (u32, u32) = (1, 100);

/// Ten random integers with their mean and maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleData {
    pub values: Vec<u32>,
    /// Mean with two decimals.
    pub mean: String,
    pub max: u32,
}

impl SampleData {
    /// Draw a sample from `rng`.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let (low, high) = SAMPLE_RANGE;
        let values: Vec<u32> = (0..SAMPLE_SIZE)
            .map(|_| rng.random_range(low..=high))
            .collect();
        Self::from_values(values)
    }

    /// Draw a sample from the thread-local generator.
    pub fn random() -> Self {
        Self::generate(&mut rand::rng())
    }

    fn from_values(values: Vec<u32>) -> Self {
        let total: u32 = values.iter().sum();
        let mean = if values.is_empty() {
            0.0
        } else {
            f64::from(total) / values.len() as f64
        };
        let max = values.iter().copied().max().unwrap_or(0);
        Self {
            values,
            mean: format_fixed2(mean),
            max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_shape_and_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let sample = SampleData::generate(&mut rng);
            assert_eq!(sample.values.len(), SAMPLE_SIZE);
            assert!(sample.values.iter().all(|v| (1..=100).contains(v)));
            assert_eq!(sample.max, *sample.values.iter().max().unwrap());
        }
    }

    #[test]
    fn test_generate_is_deterministic_for_seed() {
        let a = SampleData::generate(&mut StdRng::seed_from_u64(42));
        let b = SampleData::generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary_values() {
        let sample = SampleData::from_values(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 100]);
        assert_eq!(sample.mean, "14.50");
        assert_eq!(sample.max, 100);
    }

    #[test]
    fn test_summary_mean_rounds_ties_up() {
        // 1001 / 8 = 125.125
        let sample = SampleData::from_values(vec![100, 100, 100, 100, 100, 100, 100, 301]);
        assert_eq!(sample.mean, "125.13");
    }
}
