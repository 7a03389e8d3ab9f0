use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::records::EnrichedRecord;
use crate::season::Season;

const DEFAULT_YEAR_WINDOW: usize = 5;
const DEFAULT_STATE_COUNT: usize = 10;

/// Downstream selection over the enriched set. Empty selections do not
/// restrict their dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub years: Option<RangeInclusive<i32>>,
    /// Matched against the resolved state name or the raw code.
    pub states: BTreeSet<String>,
    pub seasons: BTreeSet<Season>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_years(mut self, years: RangeInclusive<i32>) -> Self {
        self.years = Some(years);
        self
    }

    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_seasons<I>(mut self, seasons: I) -> Self
    where
        I: IntoIterator<Item = Season>,
    {
        self.seasons = seasons.into_iter().collect();
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.years.is_none() && self.states.is_empty() && self.seasons.is_empty()
    }

    /// A record with an absent field never matches a restricted dimension.
    pub fn matches(&self, record: &EnrichedRecord) -> bool {
        if let Some(years) = &self.years {
            match record.fire_year() {
                Some(year) if years.contains(&year) => {}
                _ => return false,
            }
        }

        if !self.states.is_empty() {
            let by_name = record
                .state_name
                .as_deref()
                .is_some_and(|name| self.states.contains(name));
            let by_code = record
                .state_code()
                .is_some_and(|code| self.states.contains(code));
            if !by_name && !by_code {
                return false;
            }
        }

        if !self.seasons.is_empty() {
            match record.season {
                Some(season) if self.seasons.contains(&season) => {}
                _ => return false,
            }
        }

        true
    }

    /// New view over `records`, in source order.
    pub fn apply<'a>(&self, records: &'a [EnrichedRecord]) -> Vec<&'a EnrichedRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

pub fn available_years(records: &[EnrichedRecord]) -> Vec<i32> {
    records
        .iter()
        .filter_map(EnrichedRecord::fire_year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn available_states(records: &[EnrichedRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.state_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn available_seasons(records: &[EnrichedRecord]) -> Vec<Season> {
    records
        .iter()
        .filter_map(|record| record.season)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Initial selection offered to a user: the latest five years, the first ten
/// states alphabetically and every season present.
pub fn default_filter(records: &[EnrichedRecord]) -> RecordFilter {
    let years = available_years(records);
    let recent = &years[years.len().saturating_sub(DEFAULT_YEAR_WINDOW)..];
    let mut filter = RecordFilter::new()
        .with_states(
            available_states(records)
                .into_iter()
                .take(DEFAULT_STATE_COUNT),
        )
        .with_seasons(available_seasons(records));
    if let (Some(first), Some(last)) = (recent.first(), recent.last()) {
        filter = filter.with_years(*first..=*last);
    }
    filter
}
