//! Aggregations behind the report pages. Every function takes a filtered view
//! (`&[&EnrichedRecord]`) and returns plain serializable rows in a
//! deterministic order.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::records::EnrichedRecord;
use crate::season::Season;

pub const DEFAULT_TOP_STATES: usize = 10;
pub const DEFAULT_TOP_CAUSES: usize = 8;

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    count: usize,
    duration_sum: f64,
    duration_count: usize,
    area_sum: f64,
    area_count: usize,
}

impl Accumulator {
    fn push(&mut self, record: &EnrichedRecord) {
        self.count += 1;
        if let Some(days) = record.duration_days {
            self.duration_sum += days as f64;
            self.duration_count += 1;
        }
        if let Some(area) = record.area_m2 {
            self.area_sum += area;
            self.area_count += 1;
        }
    }

    fn mean_duration(&self) -> Option<f64> {
        mean(self.duration_sum, self.duration_count)
    }

    fn total_area(&self) -> Option<f64> {
        (self.area_count > 0).then_some(self.area_sum)
    }

    fn mean_area(&self) -> Option<f64> {
        mean(self.area_sum, self.area_count)
    }
}

fn mean(sum: f64, count: usize) -> Option<f64> {
    (count > 0).then(|| sum / count as f64)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Overview {
    pub total_fires: usize,
    pub mean_duration_days: Option<f64>,
    pub total_area_m2: Option<f64>,
    pub mean_area_m2: Option<f64>,
}

pub fn overview(records: &[&EnrichedRecord]) -> Overview {
    let mut acc = Accumulator::default();
    for record in records {
        acc.push(record);
    }
    Overview {
        total_fires: acc.count,
        mean_duration_days: acc.mean_duration(),
        total_area_m2: acc.total_area(),
        mean_area_m2: acc.mean_area(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyTrend {
    pub year: i32,
    pub fires: usize,
    pub mean_duration_days: Option<f64>,
    pub mean_area_m2: Option<f64>,
    pub total_area_m2: Option<f64>,
}

/// One row per fire year, ascending. Records without a year are skipped.
pub fn yearly_trends(records: &[&EnrichedRecord]) -> Vec<YearlyTrend> {
    let mut by_year: BTreeMap<i32, Accumulator> = BTreeMap::new();
    for record in records {
        if let Some(year) = record.fire_year() {
            by_year.entry(year).or_default().push(record);
        }
    }
    by_year
        .into_iter()
        .map(|(year, acc)| YearlyTrend {
            year,
            fires: acc.count,
            mean_duration_days: acc.mean_duration(),
            mean_area_m2: acc.mean_area(),
            total_area_m2: acc.total_area(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonCount {
    pub season: Season,
    pub fires: usize,
}

/// Most active season first; ties keep calendar order.
pub fn season_counts(records: &[&EnrichedRecord]) -> Vec<SeasonCount> {
    let mut counts: BTreeMap<Season, usize> = BTreeMap::new();
    for season in records.iter().filter_map(|record| record.season) {
        *counts.entry(season).or_insert(0) += 1;
    }
    let mut rows: Vec<SeasonCount> = counts
        .into_iter()
        .map(|(season, fires)| SeasonCount { season, fires })
        .collect();
    // stable sort keeps the calendar order from the map for equal counts
    rows.sort_by(|a, b| b.fires.cmp(&a.fires));
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: u32,
    pub fires: usize,
}

pub fn monthly_counts(records: &[&EnrichedRecord]) -> Vec<MonthCount> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for month in records.iter().filter_map(|record| record.month) {
        *counts.entry(month).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(month, fires)| MonthCount { month, fires })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSummary {
    pub code: String,
    pub name: String,
    pub fires: usize,
    pub total_area_m2: Option<f64>,
    pub mean_area_m2: Option<f64>,
}

/// Per-state totals ordered by state code. Records without a state code are
/// skipped.
pub fn state_breakdown(records: &[&EnrichedRecord]) -> Vec<StateSummary> {
    let mut by_state: BTreeMap<(String, String), Accumulator> = BTreeMap::new();
    for record in records {
        let Some(code) = record.state_code() else {
            continue;
        };
        let name = record
            .state_name
            .clone()
            .unwrap_or_else(|| code.to_string());
        by_state
            .entry((code.to_string(), name))
            .or_default()
            .push(record);
    }
    by_state
        .into_iter()
        .map(|((code, name), acc)| StateSummary {
            code,
            name,
            fires: acc.count,
            total_area_m2: acc.total_area(),
            mean_area_m2: acc.mean_area(),
        })
        .collect()
}

pub fn top_states_by_count(records: &[&EnrichedRecord], limit: usize) -> Vec<StateSummary> {
    let mut rows = state_breakdown(records);
    rows.sort_by(|a, b| b.fires.cmp(&a.fires));
    rows.truncate(limit);
    rows
}

pub fn top_states_by_area(records: &[&EnrichedRecord], limit: usize) -> Vec<StateSummary> {
    let mut rows: Vec<StateSummary> = state_breakdown(records)
        .into_iter()
        .filter(|row| row.total_area_m2.is_some())
        .collect();
    rows.sort_by(|a, b| {
        let a = a.total_area_m2.unwrap_or_default();
        let b = b.total_area_m2.unwrap_or_default();
        b.total_cmp(&a)
    });
    rows.truncate(limit);
    rows
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CauseCount {
    pub cause: String,
    pub fires: usize,
}

/// Most frequent causes first; ties are alphabetical.
pub fn cause_counts(records: &[&EnrichedRecord], limit: usize) -> Vec<CauseCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for cause in records.iter().filter_map(|record| record.cause()) {
        *counts.entry(cause).or_insert(0) += 1;
    }
    let mut rows: Vec<CauseCount> = counts
        .into_iter()
        .map(|(cause, fires)| CauseCount {
            cause: cause.to_string(),
            fires,
        })
        .collect();
    rows.sort_by(|a, b| b.fires.cmp(&a.fires));
    rows.truncate(limit);
    rows
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapRow {
    pub year: i32,
    /// January first.
    pub months: [usize; 12],
}

/// Fire counts per (year, discovery month). Years without any counted fire
/// are omitted.
pub fn month_year_heatmap(records: &[&EnrichedRecord]) -> Vec<HeatmapRow> {
    let mut rows: BTreeMap<i32, [usize; 12]> = BTreeMap::new();
    for record in records {
        let (Some(year), Some(month)) = (record.fire_year(), record.month) else {
            continue;
        };
        if !(1..=12).contains(&month) {
            continue;
        }
        rows.entry(year).or_insert([0; 12])[month as usize - 1] += 1;
    }
    rows.into_iter()
        .map(|(year, months)| HeatmapRow { year, months })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Insights {
    pub peak_season: Option<SeasonCount>,
    pub largest_burned_state: Option<StateSummary>,
    pub top_cause: Option<CauseCount>,
}

pub fn insights(records: &[&EnrichedRecord]) -> Insights {
    Insights {
        peak_season: season_counts(records).into_iter().next(),
        largest_burned_state: top_states_by_area(records, 1).into_iter().next(),
        top_cause: cause_counts(records, 1).into_iter().next(),
    }
}
