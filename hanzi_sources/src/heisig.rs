//! Heisig decomposition index (JSON) and glossary (text).

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use hanzi_core::{DecompositionTable, GlossaryEntry, GlossaryTable};
use tracing::{info, warn};

use crate::{Result, SourceError};

/// Parse `{"好": ["女", "子"], ...}`.
pub fn parse_decomposition(json: &str) -> serde_json::Result<DecompositionTable> {
    serde_json::from_str::<HashMap<String, Vec<String>>>(json).map(DecompositionTable::new)
}

pub fn load_decomposition(path: &Path) -> Result<DecompositionTable> {
    let table = DecompositionTable::new(crate::read_json(path)?);
    info!("Loaded {} heisig decompositions from {}", table.len(), path.display());
    Ok(table)
}

/// Parse glossary lines of the form `好[好] hao3 <frame> meaning words…`.
///
/// Blank lines and lines starting with `/` are skipped. A line with fewer
/// than four fields, or whose first field has no `[traditional]` part, is
/// logged and skipped.
pub fn parse_glossary(reader: impl BufRead) -> std::io::Result<GlossaryTable> {
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() || line.starts_with('/') {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            warn!("heisig dict: line too short [len={}]: {line}", parts.len());
            continue;
        }
        let Some((simplified, traditional)) = parts[0].split_once('[') else {
            warn!("heisig dict: missing traditional form: {}", parts[0]);
            continue;
        };
        entries.push(GlossaryEntry {
            simplified: simplified.to_string(),
            traditional: traditional.trim_end_matches(']').to_string(),
            reading: parts[1].to_string(),
            meaning: parts[3..].join(" "),
        });
    }
    Ok(entries.into_iter().collect())
}

pub fn load_glossary(path: &Path) -> Result<GlossaryTable> {
    let table = parse_glossary(crate::open(path)?).map_err(|e| SourceError::io(path, e))?;
    info!("Loaded {} heisig glossary entries from {}", table.len(), path.display());
    Ok(table)
}
