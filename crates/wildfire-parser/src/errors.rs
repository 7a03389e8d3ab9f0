use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("{table} source '{path}' could not be opened: {source}")]
    Open {
        table: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{table} CSV error: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{table} file did not contain a header row")]
    MissingHeader { table: &'static str },

    #[error("{table} header row invalid: {message}")]
    InvalidHeader {
        table: &'static str,
        message: String,
    },
}

impl ParserError {
    pub(crate) fn csv(table: &'static str, source: csv::Error) -> Self {
        ParserError::Csv { table, source }
    }
}
