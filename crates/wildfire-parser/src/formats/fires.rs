use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use tracing::debug;

use crate::errors::ParserError;
use crate::model::{
    ColumnRole, DateEncoding, FireColumn, ParseReport, RawDate, RawRecord, RawTable, SourceSchema,
};

use super::common::{
    cell_text, clean_optional, normalize_header, parse_optional_f64, parse_optional_i32,
    parse_optional_i64, InvalidField,
};

const TABLE: &str = "fires";

pub fn classify_column(column: &str) -> ColumnRole {
    let upper = column
        .trim_start_matches('\u{feff}')
        .trim()
        .to_ascii_uppercase();
    match upper.as_str() {
        "OBJECTID" | "FOD_ID" => ColumnRole::Fire(FireColumn::RecordId),
        "FIRE_YEAR" => ColumnRole::Fire(FireColumn::FireYear),
        "STAT_CAUSE_DESCR" | "NWCG_GENERAL_CAUSE" => ColumnRole::Fire(FireColumn::Cause),
        "FIRE_SIZE" => ColumnRole::Fire(FireColumn::FireSize),
        "STATE" => ColumnRole::Fire(FireColumn::State),
        "FIRE_NAME" => ColumnRole::Fire(FireColumn::FireName),
        "DISCOVERY_DATE" => ColumnRole::Date {
            column: FireColumn::Discovery,
            encoding: DateEncoding::JulianDay,
        },
        "DATEGREG_DISCOVERY" => ColumnRole::Date {
            column: FireColumn::Discovery,
            encoding: DateEncoding::Gregorian,
        },
        "CONT_DATE" => ColumnRole::Date {
            column: FireColumn::Containment,
            encoding: DateEncoding::JulianDay,
        },
        "DATEGREG_CONT" => ColumnRole::Date {
            column: FireColumn::Containment,
            encoding: DateEncoding::Gregorian,
        },
        _ => ColumnRole::Passthrough,
    }
}

/// Builds the schema from a header row. The first column claiming a role
/// keeps it; later duplicates are passed through. For dates a Julian column
/// wins over a Gregorian one regardless of order.
pub fn build_schema(headers: &[String]) -> SourceSchema {
    let mut schema = SourceSchema {
        headers: headers.to_vec(),
        ..SourceSchema::default()
    };

    for (index, header) in headers.iter().enumerate() {
        let displaced = match classify_column(header) {
            ColumnRole::Fire(column) => match scalar_slot(&mut schema, column) {
                Some(slot) if slot.is_none() => {
                    *slot = Some(index);
                    None
                }
                _ => Some(index),
            },
            ColumnRole::Date { column, encoding } => {
                let slot = if column == FireColumn::Discovery {
                    &mut schema.discovery
                } else {
                    &mut schema.containment
                };
                let current = *slot;
                match current {
                    None => {
                        *slot = Some((index, encoding));
                        None
                    }
                    Some((existing, DateEncoding::Gregorian))
                        if encoding == DateEncoding::JulianDay =>
                    {
                        *slot = Some((index, encoding));
                        Some(existing)
                    }
                    Some(_) => Some(index),
                }
            }
            ColumnRole::Passthrough => Some(index),
        };

        if let Some(index) = displaced {
            schema.passthrough.push((index, headers[index].clone()));
        }
    }

    schema.passthrough.sort_by_key(|(index, _)| *index);
    schema
}

fn scalar_slot(schema: &mut SourceSchema, column: FireColumn) -> Option<&mut Option<usize>> {
    match column {
        FireColumn::RecordId => Some(&mut schema.record_id),
        FireColumn::FireYear => Some(&mut schema.fire_year),
        FireColumn::Cause => Some(&mut schema.cause),
        FireColumn::FireSize => Some(&mut schema.fire_size),
        FireColumn::State => Some(&mut schema.state),
        FireColumn::FireName => Some(&mut schema.fire_name),
        FireColumn::Discovery | FireColumn::Containment => None,
    }
}

pub fn read_fire_records(path: &Path) -> Result<RawTable, ParserError> {
    let file = File::open(path).map_err(|source| ParserError::Open {
        table: TABLE,
        path: path.to_path_buf(),
        source,
    })?;
    parse_fire_records(file)
}

pub fn parse_fire_records<R: Read>(reader: R) -> Result<RawTable, ParserError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header_record = csv_reader
        .byte_headers()
        .map_err(|err| ParserError::csv(TABLE, err))?
        .clone();
    if header_record.is_empty() {
        return Err(ParserError::MissingHeader { table: TABLE });
    }
    let headers: Vec<String> = header_record.iter().map(normalize_header).collect();
    let schema = build_schema(&headers);

    let mut report = ParseReport::default();
    let mut records = Vec::new();
    let mut row = ByteRecord::new();
    while csv_reader
        .read_byte_record(&mut row)
        .map_err(|err| ParserError::csv(TABLE, err))?
    {
        if row.len() < headers.len() {
            report.short_rows += 1;
        }
        records.push(decode_row(&schema, &row, &mut report));
    }
    report.rows = records.len();

    debug!(
        rows = report.rows,
        short_rows = report.short_rows,
        field_failures = report.total_field_failures(),
        "parsed fire records"
    );

    Ok(RawTable {
        schema,
        records,
        report,
    })
}

fn decode_row(schema: &SourceSchema, row: &ByteRecord, report: &mut ParseReport) -> RawRecord {
    let record_id = field(row, FireColumn::RecordId, schema.record_id, report);
    let fire_year = field(row, FireColumn::FireYear, schema.fire_year, report);
    let cause = clean_optional(field(row, FireColumn::Cause, schema.cause, report));
    let fire_size = field(row, FireColumn::FireSize, schema.fire_size, report);
    let state = clean_optional(field(row, FireColumn::State, schema.state, report));
    let fire_name = clean_optional(field(row, FireColumn::FireName, schema.fire_name, report));
    let discovery_index = schema.discovery.map(|(idx, _)| idx);
    let discovery = field(row, FireColumn::Discovery, discovery_index, report);
    let containment_index = schema.containment.map(|(idx, _)| idx);
    let containment = field(row, FireColumn::Containment, containment_index, report);

    let record_id = typed(FireColumn::RecordId, parse_optional_i64(record_id), report);
    let fire_year = typed(FireColumn::FireYear, parse_optional_i32(fire_year), report);
    let fire_size_acres = typed(FireColumn::FireSize, parse_optional_f64(fire_size), report);
    let discovery = raw_date(FireColumn::Discovery, schema.discovery, discovery, report);
    let containment = raw_date(FireColumn::Containment, schema.containment, containment, report);

    let passthrough = schema
        .passthrough
        .iter()
        .map(|(index, _)| {
            row.get(*index)
                .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
                .filter(|value| !value.is_empty())
        })
        .collect();

    RawRecord {
        record_id,
        fire_year,
        cause,
        fire_size_acres,
        state,
        fire_name,
        discovery,
        containment,
        passthrough,
    }
}

fn field<'r>(
    row: &'r ByteRecord,
    column: FireColumn,
    index: Option<usize>,
    report: &mut ParseReport,
) -> Option<&'r str> {
    match cell_text(row, index?) {
        Ok(text) => text,
        Err(InvalidField) => {
            report.record_failure(column);
            None
        }
    }
}

fn typed<T>(
    column: FireColumn,
    parsed: Result<Option<T>, InvalidField>,
    report: &mut ParseReport,
) -> Option<T> {
    match parsed {
        Ok(value) => value,
        Err(InvalidField) => {
            report.record_failure(column);
            None
        }
    }
}

fn raw_date(
    column: FireColumn,
    layout: Option<(usize, DateEncoding)>,
    text: Option<&str>,
    report: &mut ParseReport,
) -> Option<RawDate> {
    let (_, encoding) = layout?;
    match encoding {
        DateEncoding::JulianDay => {
            typed(column, parse_optional_f64(text), report).map(RawDate::JulianDay)
        }
        DateEncoding::Gregorian => text.map(|value| RawDate::Text(value.to_string())),
    }
}
