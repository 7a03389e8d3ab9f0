use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wildfire_parser::{FireColumn, RawRecord, SourceSchema};

use crate::season::Season;

/// A source row together with everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub raw: RawRecord,
    pub state_name: Option<String>,
    pub discovery_date: Option<NaiveDate>,
    pub containment_date: Option<NaiveDate>,
    pub duration_days: Option<i64>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    /// Monday = 0 through Sunday = 6.
    pub day_of_week: Option<u32>,
    pub season: Option<Season>,
    pub area_m2: Option<f64>,
    pub area_hectares: Option<f64>,
}

impl EnrichedRecord {
    pub fn fire_year(&self) -> Option<i32> {
        self.raw.fire_year
    }

    pub fn state_code(&self) -> Option<&str> {
        self.raw.state.as_deref()
    }

    pub fn cause(&self) -> Option<&str> {
        self.raw.cause.as_deref()
    }
}

/// Which derived fields the source columns allow at all. Decided once per
/// load from the header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAvailability {
    pub state_name: bool,
    pub discovery_date: bool,
    pub containment_date: bool,
    pub duration: bool,
    pub calendar: bool,
    pub area: bool,
}

impl FieldAvailability {
    pub fn from_schema(schema: &SourceSchema) -> Self {
        let discovery = schema.has(FireColumn::Discovery);
        let containment = schema.has(FireColumn::Containment);
        Self {
            state_name: schema.has(FireColumn::State),
            discovery_date: discovery,
            containment_date: containment,
            duration: discovery && containment,
            calendar: discovery,
            area: schema.has(FireColumn::FireSize),
        }
    }
}
