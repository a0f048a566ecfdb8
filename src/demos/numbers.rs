//! Number-list calculators behind the "try it" widgets.
//!
//! Input is free text with comma-separated numbers. Each piece is parsed
//! leniently: leading whitespace is ignored and the longest leading decimal
//! number is taken, so `"12kg"` reads as 12 and `"n/a"` is skipped.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utilities::errors::DemoError;

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").unwrap());

/// Parse comma-separated numbers, dropping pieces with no leading number.
pub fn parse_numbers(input: &str) -> Vec<f64> {
    input
        .split(',')
        .filter_map(|piece| parse_leading_number(piece.trim()))
        .collect()
}

fn parse_leading_number(piece: &str) -> Option<f64> {
    let m = LEADING_NUMBER.find(piece)?;
    m.as_str().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Shortest round-trip rendering; integral values print without decimals.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    format!("{}", value)
}

/// Two decimals, rounding ties away from zero (`0.125` → `0.13`).
pub fn format_fixed2(value: f64) -> String {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return format!("{:.2}", value);
    }
    let rounded = scaled.round() / 100.0;
    if rounded == 0.0 {
        return "0.00".to_string();
    }
    format!("{:.2}", rounded)
}

fn finite(value: f64) -> Result<f64, DemoError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DemoError::OutOfRange)
    }
}

fn mean(numbers: &[f64]) -> Result<f64, DemoError> {
    if numbers.is_empty() {
        return Err(DemoError::NoNumbers);
    }
    finite(numbers.iter().sum::<f64>() / numbers.len() as f64)
}

// ---------------------------------------------------------------------------
// Spreadsheet functions
// ---------------------------------------------------------------------------

/// The spreadsheet functions offered by the formula demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    Sum,
    Average,
    Max,
    Min,
}

impl Aggregate {
    pub const ALL: [Aggregate; 4] = [Self::Sum, Self::Average, Self::Max, Self::Min];

    /// Spreadsheet name, e.g. `SUM`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sum => "SUM",
            Self::Average => "AVERAGE",
            Self::Max => "MAX",
            Self::Min => "MIN",
        }
    }

    /// Reduce `numbers`; fails on an empty slice or an overflowing result.
    pub fn apply(self, numbers: &[f64]) -> Result<f64, DemoError> {
        if numbers.is_empty() {
            return Err(DemoError::NoNumbers);
        }
        let value: f64 = match self {
            Self::Sum => numbers.iter().sum(),
            Self::Average => mean(numbers)?,
            Self::Max => numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Min => numbers.iter().copied().fold(f64::INFINITY, f64::min),
        };
        finite(value)
    }

    /// Formula-bar style result: `=SUM(...) = 15`.
    ///
    /// AVERAGE is shown with two decimals.
    pub fn display(self, value: f64) -> String {
        let shown = match self {
            Self::Average => format_fixed2(value),
            _ => format_number(value),
        };
        format!("={}(...) = {}", self.label(), shown)
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Aggregate {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "average" | "avg" => Ok(Self::Average),
            "max" => Ok(Self::Max),
            "min" => Ok(Self::Min),
            _ => Err(DemoError::UnknownFunction {
                name: s.to_string(),
            }),
        }
    }
}

/// Result of running one spreadsheet function over user input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionResult {
    pub function: Aggregate,
    pub value: f64,
    pub display: String,
}

/// Parse `input` and apply `function`.
pub fn evaluate(function: Aggregate, input: &str) -> Result<FunctionResult, DemoError> {
    let numbers = parse_numbers(input);
    let value = function.apply(&numbers)?;
    Ok(FunctionResult {
        function,
        value,
        display: function.display(value),
    })
}

// ---------------------------------------------------------------------------
// Mean calculator
// ---------------------------------------------------------------------------

/// Parsed numbers and their mean rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanSummary {
    pub numbers: Vec<f64>,
    pub mean: String,
}

pub fn mean_summary(input: &str) -> Result<MeanSummary, DemoError> {
    let numbers = parse_numbers(input);
    let value = mean(&numbers)?;
    Ok(MeanSummary {
        numbers,
        mean: format_fixed2(value),
    })
}
