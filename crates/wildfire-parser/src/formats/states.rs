use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use tracing::warn;

use crate::errors::ParserError;
use crate::model::StateRow;

use super::common::{cell_text, normalize_header};

const TABLE: &str = "state_reference";

const CODE_HEADERS: &[&str] = &[
    "alpha code",
    "alpha_code",
    "code",
    "state_code",
    "abbreviation",
    "abbr",
    "postal",
    "postal code",
    "postal_code",
    "usps",
];
const NAME_HEADERS: &[&str] = &["state", "state_name", "name"];

/// Locates the code and name columns. Named headers win; with one side named
/// the other is the remaining one of the first two columns; with neither the
/// first two columns are taken as code, name.
fn locate_columns(headers: &[String]) -> Result<(usize, usize), ParserError> {
    let find = |candidates: &[&str]| {
        headers.iter().position(|header| {
            candidates
                .iter()
                .any(|candidate| header.eq_ignore_ascii_case(candidate))
        })
    };

    match (find(CODE_HEADERS), find(NAME_HEADERS)) {
        (Some(code), Some(name)) if code != name => Ok((code, name)),
        _ if headers.len() < 2 => Err(ParserError::InvalidHeader {
            table: TABLE,
            message: format!("expected 2 columns, found {}", headers.len()),
        }),
        (Some(code), _) => Ok((code, other_of_first_two(code))),
        (_, Some(name)) => Ok((other_of_first_two(name), name)),
        _ => {
            warn!(
                headers = ?headers,
                "State reference headers not recognised, reading columns as code, name"
            );
            Ok((0, 1))
        }
    }
}

fn other_of_first_two(index: usize) -> usize {
    if index == 0 {
        1
    } else {
        0
    }
}

pub fn read_state_reference(path: &Path) -> Result<Vec<StateRow>, ParserError> {
    let file = File::open(path).map_err(|source| ParserError::Open {
        table: TABLE,
        path: path.to_path_buf(),
        source,
    })?;
    parse_state_reference(file)
}

/// Rows with an empty code or name are skipped.
pub fn parse_state_reference<R: Read>(reader: R) -> Result<Vec<StateRow>, ParserError> {
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
    let (code_index, name_index) = locate_columns(&headers)?;

    let mut rows = Vec::new();
    let mut record = ByteRecord::new();
    while csv_reader
        .read_byte_record(&mut record)
        .map_err(|err| ParserError::csv(TABLE, err))?
    {
        let code = cell_text(&record, code_index).ok().flatten();
        let name = cell_text(&record, name_index).ok().flatten();
        if let (Some(code), Some(name)) = (code, name) {
            rows.push(StateRow {
                code: code.to_string(),
                name: name.to_string(),
            });
        }
    }

    Ok(rows)
}
