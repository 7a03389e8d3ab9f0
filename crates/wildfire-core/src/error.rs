// crates/wildfire-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source parsing failed: {0}")]
    Parser(#[from] wildfire_parser::ParserError),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("Configuration file could not be parsed: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
