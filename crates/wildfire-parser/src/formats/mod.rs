mod common;
mod fires;
mod states;

pub use fires::{build_schema, classify_column, parse_fire_records, read_fire_records};
pub use states::{parse_state_reference, read_state_reference};
