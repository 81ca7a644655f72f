//! Descriptive statistics over a set of centrality values

use serde::Serialize;
use statrs::statistics::{Data, OrderStatistics, Statistics};

/// Mean, population standard deviation, median and range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Descriptive {
    pub mean: f64,
    /// Population standard deviation (divides by n)
    pub std_dev: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl Descriptive {
    /// Summarize `values`; `None` when empty
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut data = Data::new(values.to_vec());

        Some(Descriptive {
            mean: values.iter().mean(),
            std_dev: values.iter().population_std_dev(),
            median: OrderStatistics::median(&mut data),
            min: Statistics::min(values.iter()),
            max: Statistics::max(values.iter()),
        })
    }
}
