//! Interactive demo calculators from the course pages.

pub mod numbers;
pub mod sample;

pub use numbers::{evaluate, mean_summary, parse_numbers, Aggregate, FunctionResult, MeanSummary};
pub use sample::SampleData;
