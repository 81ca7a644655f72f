//! Dataset profile: geographic and temporal distribution of trials

use crate::records::TrialRecord;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Trials per country
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub trials: usize,
}

/// Geographic distribution, most trials first (ties by country name)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeographicDistribution {
    pub countries: Vec<CountryCount>,
}

impl GeographicDistribution {
    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    /// Countries hosting more than one trial
    pub fn multi_trial_countries(&self) -> usize {
        self.countries.iter().filter(|c| c.trials > 1).count()
    }
}

/// New and cumulative trials for one start year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub new_trials: usize,
    pub cumulative: usize,
}

/// Temporal distribution over the full year range, gaps filled with zero
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemporalDistribution {
    pub years: Vec<YearCount>,
    /// Trials without a usable start date
    pub missing_dates: usize,
}

impl TemporalDistribution {
    pub fn year_range(&self) -> Option<(i32, i32)> {
        Some((self.years.first()?.year, self.years.last()?.year))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetProfile {
    pub total_trials: usize,
    pub geographic: GeographicDistribution,
    pub temporal: TemporalDistribution,
}

/// Column holding a trial's start date
pub const START_DATE_COLUMN: &str = "start_date";

/// Parse the year out of a registry date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `DD/MM/YYYY`, `Month YYYY`,
/// `Month DD, YYYY`, `YYYY-MM`, bare `YYYY`, and date-times written as
/// `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_start_year(raw: &str) -> Option<i32> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%B %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date.year());
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(datetime.year());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("1 {}", s), "%d %B %Y") {
        return Some(date.year());
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d") {
        return Some(date.year());
    }
    if s.len() == 4 {
        return s.parse::<i32>().ok();
    }
    None
}

pub fn geographic_distribution(trials: &[TrialRecord]) -> GeographicDistribution {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for trial in trials {
        if let Some(country) = trial.country.as_deref().filter(|c| !c.trim().is_empty()) {
            *counts.entry(country).or_default() += 1;
        }
    }

    let mut countries: Vec<CountryCount> = counts
        .into_iter()
        .map(|(country, trials)| CountryCount {
            country: country.to_string(),
            trials,
        })
        .collect();
    // BTreeMap already ordered by name; stable sort keeps that for ties
    countries.sort_by(|a, b| b.trials.cmp(&a.trials));

    GeographicDistribution { countries }
}

pub fn temporal_distribution(trials: &[TrialRecord]) -> TemporalDistribution {
    let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
    let mut missing_dates = 0;

    for trial in trials {
        match trial
            .attribute(START_DATE_COLUMN)
            .as_deref()
            .and_then(parse_start_year)
        {
            Some(year) => *per_year.entry(year).or_default() += 1,
            None => missing_dates += 1,
        }
    }

    if missing_dates > 0 {
        warn!("{} trials missing start dates", missing_dates);
    }

    let mut years = Vec::new();
    if let (Some(&min), Some(&max)) = (per_year.keys().next(), per_year.keys().next_back()) {
        let mut cumulative = 0;
        for year in min..=max {
            let new_trials = per_year.get(&year).copied().unwrap_or(0);
            cumulative += new_trials;
            years.push(YearCount {
                year,
                new_trials,
                cumulative,
            });
        }
    }

    TemporalDistribution {
        years,
        missing_dates,
    }
}

pub fn profile_dataset(trials: &[TrialRecord]) -> DatasetProfile {
    DatasetProfile {
        total_trials: trials.len(),
        geographic: geographic_distribution(trials),
        temporal: temporal_distribution(trials),
    }
}
