use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::*;
use tracing::info;
use wildfire_parser::FireColumn;

use crate::dates::days_since_unix_epoch;
use crate::error::{PipelineError, Result};
use crate::pipeline::PipelineOutput;
use crate::records::EnrichedRecord;

/// Builds a frame with the source columns that were present, the derived
/// columns the schema allows and the pass-through columns as strings.
pub fn to_dataframe(output: &PipelineOutput) -> Result<DataFrame> {
    let records = &output.records;
    let schema = &output.schema;
    let availability = &output.availability;
    let mut cols: Vec<Column> = Vec::new();

    if schema.has(FireColumn::RecordId) {
        let values: Vec<Option<i64>> = records.iter().map(|r| r.raw.record_id).collect();
        cols.push(Series::new(FireColumn::RecordId.canonical_name().into(), values).into());
    }
    if schema.has(FireColumn::FireYear) {
        let values: Vec<Option<i32>> = records.iter().map(|r| r.raw.fire_year).collect();
        cols.push(Series::new(FireColumn::FireYear.canonical_name().into(), values).into());
    }
    if schema.has(FireColumn::Cause) {
        let values: Vec<Option<&str>> = records.iter().map(|r| r.cause()).collect();
        cols.push(Series::new(FireColumn::Cause.canonical_name().into(), values).into());
    }
    if schema.has(FireColumn::FireSize) {
        let values: Vec<Option<f64>> = records.iter().map(|r| r.raw.fire_size_acres).collect();
        cols.push(Series::new(FireColumn::FireSize.canonical_name().into(), values).into());
    }
    if schema.has(FireColumn::State) {
        let values: Vec<Option<&str>> = records.iter().map(|r| r.state_code()).collect();
        cols.push(Series::new(FireColumn::State.canonical_name().into(), values).into());
    }
    if schema.has(FireColumn::FireName) {
        let values: Vec<Option<&str>> = records.iter().map(|r| r.raw.fire_name.as_deref()).collect();
        cols.push(Series::new(FireColumn::FireName.canonical_name().into(), values).into());
    }

    if availability.state_name {
        let values: Vec<Option<&str>> = records.iter().map(|r| r.state_name.as_deref()).collect();
        cols.push(Series::new("state_name".into(), values).into());
    }
    if availability.discovery_date {
        cols.push(date_column(
            FireColumn::Discovery.canonical_name(),
            records.iter().map(|r| r.discovery_date),
        )?);
    }
    if availability.containment_date {
        cols.push(date_column(
            FireColumn::Containment.canonical_name(),
            records.iter().map(|r| r.containment_date),
        )?);
    }
    if availability.duration {
        let values: Vec<Option<i64>> = records.iter().map(|r| r.duration_days).collect();
        cols.push(Series::new("duration_days".into(), values).into());
    }
    if availability.calendar {
        cols.extend(calendar_columns(records));
    }
    if availability.area {
        let m2: Vec<Option<f64>> = records.iter().map(|r| r.area_m2).collect();
        let ha: Vec<Option<f64>> = records.iter().map(|r| r.area_hectares).collect();
        cols.push(Series::new("area_m2".into(), m2).into());
        cols.push(Series::new("area_hectares".into(), ha).into());
    }

    let mut taken: HashSet<String> = cols.iter().map(|col| col.name().to_string()).collect();
    for (position, (_, name)) in schema.passthrough.iter().enumerate() {
        let values: Vec<Option<&str>> = records
            .iter()
            .map(|r| r.raw.passthrough.get(position).and_then(|v| v.as_deref()))
            .collect();
        let name = unique_name(name, &mut taken);
        cols.push(Series::new(name.into(), values).into());
    }

    if cols.is_empty() {
        return Ok(DataFrame::empty());
    }
    Ok(DataFrame::new(cols)?)
}

/// Pass-through headers may repeat or shadow a derived column; later ones get
/// a `_1`, `_2`, ... suffix.
fn unique_name(name: &str, taken: &mut HashSet<String>) -> String {
    let mut candidate = name.to_string();
    let mut suffix = 1;
    while taken.contains(&candidate) {
        candidate = format!("{name}_{suffix}");
        suffix += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

fn date_column(name: &str, dates: impl Iterator<Item = Option<NaiveDate>>) -> Result<Column> {
    let days: Vec<Option<i32>> = dates
        .map(|date| date.map(days_since_unix_epoch))
        .collect();
    let series = Series::new(name.into(), days).cast(&DataType::Date)?;
    Ok(series.into())
}

fn calendar_columns(records: &[EnrichedRecord]) -> Vec<Column> {
    let month: Vec<Option<u32>> = records.iter().map(|r| r.month).collect();
    let day: Vec<Option<u32>> = records.iter().map(|r| r.day).collect();
    let day_of_week: Vec<Option<u32>> = records.iter().map(|r| r.day_of_week).collect();
    let season: Vec<Option<&str>> = records
        .iter()
        .map(|r| r.season.map(|s| s.as_str()))
        .collect();
    vec![
        Series::new("month".into(), month).into(),
        Series::new("day".into(), day).into(),
        Series::new("day_of_week".into(), day_of_week).into(),
        Series::new("season".into(), season).into(),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Parquet,
}

impl ExportFormat {
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(ExportFormat::Csv),
            "parquet" | "pq" => Some(ExportFormat::Parquet),
            _ => None,
        }
    }
}

pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    CsvWriter::new(file).finish(df)?;
    info!(path = %path.display(), rows = df.height(), "Wrote CSV export");
    Ok(())
}

pub fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    ParquetWriter::new(file).finish(df)?;
    info!(path = %path.display(), rows = df.height(), "Wrote Parquet export");
    Ok(())
}

pub fn export(output: &PipelineOutput, path: &Path, format: ExportFormat) -> Result<DataFrame> {
    if !output.is_loaded() {
        return Err(PipelineError::Validation(
            "cannot export a dataset that failed to load".to_string(),
        ));
    }
    let mut df = to_dataframe(output)?;
    match format {
        ExportFormat::Csv => write_csv(&mut df, path)?,
        ExportFormat::Parquet => write_parquet(&mut df, path)?,
    }
    Ok(df)
}
