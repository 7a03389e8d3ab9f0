use std::collections::BTreeMap;
use std::path::Path;

use tracing::{info, warn};
use wildfire_parser::{read_state_reference, StateRow};

/// Code to name mapping and its inverse. Ordered maps keep repeated loads
/// identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateLookup {
    code_to_name: BTreeMap<String, String>,
    name_to_code: BTreeMap<String, String>,
}

impl StateLookup {
    /// Later rows overwrite earlier ones, in both directions.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = StateRow>,
    {
        let code_to_name: BTreeMap<String, String> = rows
            .into_iter()
            .map(|row| (row.code, row.name))
            .collect();
        Self::from_code_to_name(code_to_name)
    }

    pub fn from_code_to_name(code_to_name: BTreeMap<String, String>) -> Self {
        let name_to_code = code_to_name
            .iter()
            .map(|(code, name)| (name.clone(), code.clone()))
            .collect();
        Self {
            code_to_name,
            name_to_code,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.code_to_name.is_empty()
    }

    pub fn len(&self) -> usize {
        self.code_to_name.len()
    }

    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.code_to_name.get(code).map(String::as_str)
    }

    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.name_to_code.get(name).map(String::as_str)
    }

    /// Display name for a raw state code; unknown codes stand for themselves.
    pub fn resolve(&self, code: Option<&str>) -> Option<String> {
        let code = code?;
        Some(self.name_for(code).unwrap_or(code).to_string())
    }

    pub fn code_to_name(&self) -> &BTreeMap<String, String> {
        &self.code_to_name
    }

    pub fn name_to_code(&self) -> &BTreeMap<String, String> {
        &self.name_to_code
    }

    pub fn into_maps(self) -> (BTreeMap<String, String>, BTreeMap<String, String>) {
        (self.code_to_name, self.name_to_code)
    }
}

/// Outcome of loading the reference table. A failed load still yields a
/// usable (empty) lookup together with the reason.
#[derive(Debug, Clone, Default)]
pub struct ReferenceLoad {
    pub lookup: StateLookup,
    pub warning: Option<String>,
}

pub fn load_state_reference(path: &Path) -> ReferenceLoad {
    match read_state_reference(path) {
        Ok(rows) => {
            let lookup = StateLookup::from_rows(rows);
            info!(
                path = %path.display(),
                states = lookup.len(),
                "Loaded state reference"
            );
            ReferenceLoad {
                lookup,
                warning: None,
            }
        }
        Err(err) => {
            let message = format!("state reference unavailable, using raw state codes: {err}");
            warn!(path = %path.display(), error = %err, "State reference unavailable");
            ReferenceLoad {
                lookup: StateLookup::default(),
                warning: Some(message),
            }
        }
    }
}
