//! Hand-authored components glossary: `{"亻": "person", ...}`.

use std::collections::HashMap;
use std::path::Path;

use hanzi_core::ComponentsTable;
use tracing::info;

use crate::Result;

pub fn parse_components(json: &str) -> serde_json::Result<ComponentsTable> {
    serde_json::from_str::<HashMap<String, String>>(json).map(ComponentsTable::new)
}

pub fn load_components(path: &Path) -> Result<ComponentsTable> {
    let table = ComponentsTable::new(crate::read_json(path)?);
    info!("Loaded {} component meanings from {}", table.len(), path.display());
    Ok(table)
}
