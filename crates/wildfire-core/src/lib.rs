pub mod analytics;
pub mod area;
pub mod cache;
pub mod config;
pub mod dates;
pub mod duration;
pub mod error;
pub mod filters;
pub mod frame;
pub mod pipeline;
pub mod records;
pub mod reference;
pub mod season;

pub use cache::{DatasetCache, Epoch};
pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use filters::RecordFilter;
pub use pipeline::{DataQuality, LoadStatus, Pipeline, PipelineOutput};
pub use records::{EnrichedRecord, FieldAvailability};
pub use reference::StateLookup;
pub use season::Season;
