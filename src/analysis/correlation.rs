//! Spearman rank correlation between centrality measures

use super::centrality::{CentralityMeasure, CentralityScores};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Spearman rho and its two-sided p-value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correlation {
    pub rho: f64,
    /// Under the null of no monotonic association; `None` when n < 3
    pub p_value: Option<f64>,
}

/// Average ranks (1-based); tied values share the mean of their positions
pub fn rank(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut indexed: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j < n && indexed[j].1 == indexed[i].1 {
            j += 1;
        }

        let avg_rank = (i + j) as f64 / 2.0 + 0.5;
        for item in &indexed[i..j] {
            ranks[item.0] = avg_rank;
        }
        i = j;
    }

    ranks
}

fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

/// Two-sided p-value of rho via Student's t with n - 2 degrees of freedom
fn p_value(rho: f64, n: usize) -> Option<f64> {
    if n < 3 {
        return None;
    }
    if rho.abs() >= 1.0 {
        return Some(0.0);
    }

    let df = (n - 2) as f64;
    let t = rho * (df / ((1.0 - rho) * (1.0 + rho))).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
}

/// Spearman rank correlation of two equally long samples.
///
/// `None` when the lengths differ, n < 2, or either sample is constant.
pub fn spearman(x: &[f64], y: &[f64]) -> Option<Correlation> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let rho = pearson(&rank(x), &rank(y))?;
    Some(Correlation {
        rho,
        p_value: p_value(rho, x.len()),
    })
}

/// Pairwise Spearman correlations among degree, betweenness and closeness
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub degree_betweenness: Option<Correlation>,
    pub degree_closeness: Option<Correlation>,
    pub betweenness_closeness: Option<Correlation>,
}

impl CorrelationMatrix {
    /// Correlate all three measures over the full node set
    pub fn from_scores(scores: &CentralityScores) -> Self {
        let degree = scores.values(CentralityMeasure::Degree);
        let betweenness = scores.values(CentralityMeasure::Betweenness);
        let closeness = scores.values(CentralityMeasure::Closeness);

        CorrelationMatrix {
            degree_betweenness: spearman(&degree, &betweenness),
            degree_closeness: spearman(&degree, &closeness),
            betweenness_closeness: spearman(&betweenness, &closeness),
        }
    }

    /// Correlation of a pair of measures, in either order
    pub fn pair(&self, a: CentralityMeasure, b: CentralityMeasure) -> Option<Correlation> {
        use CentralityMeasure::*;
        match (a, b) {
            (Degree, Betweenness) | (Betweenness, Degree) => self.degree_betweenness,
            (Degree, Closeness) | (Closeness, Degree) => self.degree_closeness,
            (Betweenness, Closeness) | (Closeness, Betweenness) => self.betweenness_closeness,
            _ => None,
        }
    }

    /// Matrix cell; the diagonal is exactly 1.0
    pub fn rho(&self, a: CentralityMeasure, b: CentralityMeasure) -> Option<f64> {
        if a == b {
            return Some(1.0);
        }
        self.pair(a, b).map(|c| c.rho)
    }

    /// 3x3 matrix in [`CentralityMeasure::ALL`] order
    pub fn rows(&self) -> [[Option<f64>; 3]; 3] {
        let all = CentralityMeasure::ALL;
        let mut rows = [[None; 3]; 3];
        for (i, a) in all.iter().enumerate() {
            for (j, b) in all.iter().enumerate() {
                rows[i][j] = self.rho(*a, *b);
            }
        }
        rows
    }
}
