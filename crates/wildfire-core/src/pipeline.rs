use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use wildfire_parser::{read_fire_records, RawDate, RawRecord, RawTable, SourceSchema};

use crate::area::{acres_to_square_meters, square_meters_to_hectares};
use crate::config::PipelineConfig;
use crate::dates::decode_raw_date;
use crate::duration::{duration_days, sanitize_duration, MAX_DURATION_DAYS};
use crate::error::Result;
use crate::records::{EnrichedRecord, FieldAvailability};
use crate::reference::{load_state_reference, StateLookup};
use crate::season::season_for_month;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    #[default]
    Loaded,
    Failed {
        reason: String,
    },
}

/// Counts of values that were present in the source but did not survive
/// derivation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQuality {
    pub field_failures: usize,
    pub undecodable_dates: usize,
    pub negative_durations: usize,
    pub overlong_durations: usize,
}

impl DataQuality {
    pub fn cleared_durations(&self) -> usize {
        self.negative_durations + self.overlong_durations
    }
}

/// Everything one load cycle produces. Immutable once built; filters and
/// reports borrow from it.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub records: Vec<EnrichedRecord>,
    pub code_to_name: BTreeMap<String, String>,
    pub name_to_code: BTreeMap<String, String>,
    pub schema: SourceSchema,
    pub availability: FieldAvailability,
    pub quality: DataQuality,
    pub status: LoadStatus,
    pub warnings: Vec<String>,
}

impl PipelineOutput {
    /// Empty result for a load that could not read its source.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            status: LoadStatus::Failed {
                reason: reason.into(),
            },
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.status, LoadStatus::Loaded)
    }

    pub fn state_lookup(&self) -> StateLookup {
        StateLookup::from_code_to_name(self.code_to_name.clone())
    }

    pub fn into_parts(
        self,
    ) -> (
        Vec<EnrichedRecord>,
        BTreeMap<String, String>,
        BTreeMap<String, String>,
    ) {
        (self.records, self.code_to_name, self.name_to_code)
    }
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Loads both sources and derives every record. Never fails: a source
    /// that cannot be read yields an empty output with `LoadStatus::Failed`.
    pub fn run(&self) -> PipelineOutput {
        match self.try_run() {
            Ok(output) => output,
            Err(err) => {
                error!(
                    path = %self.config.fires_path.display(),
                    error = %err,
                    "Fire record load failed"
                );
                PipelineOutput::failed(err.to_string())
            }
        }
    }

    fn try_run(&self) -> Result<PipelineOutput> {
        let table = read_fire_records(&self.config.fires_path)?;
        let reference = load_state_reference(&self.config.states_path);

        let mut output = enrich(table, reference.lookup);
        output.warnings.extend(reference.warning);

        info!(
            records = output.records.len(),
            states = output.code_to_name.len(),
            field_failures = output.quality.field_failures,
            cleared_durations = output.quality.cleared_durations(),
            "Fire records derived"
        );
        Ok(output)
    }
}

/// Derives every record of an already-parsed table.
pub fn enrich(table: RawTable, lookup: StateLookup) -> PipelineOutput {
    let RawTable {
        schema,
        records,
        report,
    } = table;
    let availability = FieldAvailability::from_schema(&schema);

    let mut quality = DataQuality {
        field_failures: report.total_field_failures(),
        ..DataQuality::default()
    };
    let records: Vec<EnrichedRecord> = records
        .into_iter()
        .map(|raw| derive_record(raw, &availability, &lookup, &mut quality))
        .collect();

    if quality.cleared_durations() > 0 || quality.undecodable_dates > 0 {
        debug!(
            negative = quality.negative_durations,
            overlong = quality.overlong_durations,
            undecodable_dates = quality.undecodable_dates,
            "Out-of-range values cleared"
        );
    }

    let (code_to_name, name_to_code) = lookup.into_maps();
    PipelineOutput {
        records,
        code_to_name,
        name_to_code,
        schema,
        availability,
        quality,
        status: LoadStatus::Loaded,
        warnings: Vec::new(),
    }
}

pub fn derive_record(
    raw: RawRecord,
    availability: &FieldAvailability,
    lookup: &StateLookup,
    quality: &mut DataQuality,
) -> EnrichedRecord {
    let state_name = if availability.state_name {
        lookup.resolve(raw.state.as_deref())
    } else {
        None
    };

    let discovery_date = decode_tracked(
        availability.discovery_date,
        raw.discovery.as_ref(),
        quality,
    );
    let containment_date = decode_tracked(
        availability.containment_date,
        raw.containment.as_ref(),
        quality,
    );

    let duration = if availability.duration {
        let computed = duration_days(discovery_date, containment_date);
        match computed {
            Some(days) if days < 0 => quality.negative_durations += 1,
            Some(days) if days > MAX_DURATION_DAYS => quality.overlong_durations += 1,
            _ => {}
        }
        sanitize_duration(computed)
    } else {
        None
    };

    let calendar_date = discovery_date.filter(|_| availability.calendar);
    let month = calendar_date.map(|date| date.month());
    let day = calendar_date.map(|date| date.day());
    let day_of_week = calendar_date.map(|date| date.weekday().num_days_from_monday());
    let season = season_for_month(month);

    let area_m2 = if availability.area {
        acres_to_square_meters(raw.fire_size_acres)
    } else {
        None
    };
    let area_hectares = square_meters_to_hectares(area_m2);

    EnrichedRecord {
        raw,
        state_name,
        discovery_date,
        containment_date,
        duration_days: duration,
        month,
        day,
        day_of_week,
        season,
        area_m2,
        area_hectares,
    }
}

fn decode_tracked(
    available: bool,
    value: Option<&RawDate>,
    quality: &mut DataQuality,
) -> Option<NaiveDate> {
    if !available {
        return None;
    }
    let decoded = decode_raw_date(value);
    if value.is_some() && decoded.is_none() {
        quality.undecodable_dates += 1;
    }
    decoded
}
