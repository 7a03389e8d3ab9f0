use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How a date column is encoded in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DateEncoding {
    /// Astronomical Julian Day number, fractional part is the time of day.
    JulianDay,
    /// Calendar date written as text (`DATEGREG_*` columns).
    Gregorian,
}

impl DateEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateEncoding::JulianDay => "julian_day",
            DateEncoding::Gregorian => "gregorian",
        }
    }
}

impl fmt::Display for DateEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A date field as it appeared in the source, before calendar decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawDate {
    JulianDay(f64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FireColumn {
    RecordId,
    FireYear,
    Cause,
    FireSize,
    State,
    FireName,
    Discovery,
    Containment,
}

impl FireColumn {
    pub fn canonical_name(&self) -> &'static str {
        match self {
            FireColumn::RecordId => "record_id",
            FireColumn::FireYear => "fire_year",
            FireColumn::Cause => "cause",
            FireColumn::FireSize => "fire_size_acres",
            FireColumn::State => "state",
            FireColumn::FireName => "fire_name",
            FireColumn::Discovery => "discovery_date",
            FireColumn::Containment => "containment_date",
        }
    }
}

/// Result of classifying a single header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Fire(FireColumn),
    Date {
        column: FireColumn,
        encoding: DateEncoding,
    },
    Passthrough,
}

/// Header layout of a fire record file. Every known column is optional; the
/// index points into the raw CSV record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceSchema {
    pub headers: Vec<String>,
    pub record_id: Option<usize>,
    pub fire_year: Option<usize>,
    pub cause: Option<usize>,
    pub fire_size: Option<usize>,
    pub state: Option<usize>,
    pub fire_name: Option<usize>,
    pub discovery: Option<(usize, DateEncoding)>,
    pub containment: Option<(usize, DateEncoding)>,
    /// Columns carried through unchanged, in source order.
    pub passthrough: Vec<(usize, String)>,
}

impl SourceSchema {
    pub fn has(&self, column: FireColumn) -> bool {
        match column {
            FireColumn::RecordId => self.record_id.is_some(),
            FireColumn::FireYear => self.fire_year.is_some(),
            FireColumn::Cause => self.cause.is_some(),
            FireColumn::FireSize => self.fire_size.is_some(),
            FireColumn::State => self.state.is_some(),
            FireColumn::FireName => self.fire_name.is_some(),
            FireColumn::Discovery => self.discovery.is_some(),
            FireColumn::Containment => self.containment.is_some(),
        }
    }

    pub fn passthrough_names(&self) -> impl Iterator<Item = &str> {
        self.passthrough.iter().map(|(_, name)| name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub record_id: Option<i64>,
    pub fire_year: Option<i32>,
    pub cause: Option<String>,
    pub fire_size_acres: Option<f64>,
    pub state: Option<String>,
    pub fire_name: Option<String>,
    pub discovery: Option<RawDate>,
    pub containment: Option<RawDate>,
    /// Values aligned with [`SourceSchema::passthrough`].
    pub passthrough: Vec<Option<String>>,
}

/// Per-load bookkeeping: rows read and fields that degraded to absent
/// because they could not be decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    pub rows: usize,
    pub short_rows: usize,
    pub field_failures: BTreeMap<String, usize>,
}

impl ParseReport {
    pub(crate) fn record_failure(&mut self, column: FireColumn) {
        *self
            .field_failures
            .entry(column.canonical_name().to_string())
            .or_insert(0) += 1;
    }

    pub fn total_field_failures(&self) -> usize {
        self.field_failures.values().sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub schema: SourceSchema,
    pub records: Vec<RawRecord>,
    pub report: ParseReport,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRow {
    pub code: String,
    pub name: String,
}
