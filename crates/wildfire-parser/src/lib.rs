pub mod errors;
pub mod formats;
pub mod model;

pub use errors::ParserError;
pub use formats::{
    build_schema, classify_column, parse_fire_records, parse_state_reference, read_fire_records,
    read_state_reference,
};
pub use model::{
    ColumnRole, DateEncoding, FireColumn, ParseReport, RawDate, RawRecord, RawTable, SourceSchema,
    StateRow,
};
