//! CC-CEDICT bilingual dictionary.

use std::io::BufRead;
use std::path::Path;
use std::sync::OnceLock;

use hanzi_core::{BilingualEntry, BilingualTable};
use regex::Regex;
use tracing::{info, warn};

use crate::{Result, SourceError};

static LINE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// `Traditional [Simplified] [reading] /def/def/`
#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn line_pattern() -> &'static Regex {
    LINE_PATTERN.get_or_init(|| {
        Regex::new(r"^(\S+)(?:[ \t]+([^\s\[]+))?\s*\[([^\]]*)\]\s*(.*)$")
            .expect("Static regex pattern is guaranteed to be valid")
    })
}

/// Parse a single dictionary line. Returns `None` for comments and lines
/// that do not look like an entry.
#[must_use]
pub fn parse_line(line: &str) -> Option<BilingualEntry> {
    if line.starts_with('#') || line.trim().is_empty() {
        return None;
    }
    let caps = line_pattern().captures(line.trim_end())?;
    let traditional = caps.get(1)?.as_str().to_string();
    let simplified = caps
        .get(2)
        .map_or_else(|| traditional.clone(), |m| m.as_str().to_string());
    let reading = caps.get(3)?.as_str().trim().to_lowercase();
    let definitions = caps
        .get(4)?
        .as_str()
        .trim()
        .trim_matches('/')
        .split('/')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(ToString::to_string)
        .collect();

    Some(BilingualEntry {
        traditional,
        simplified,
        reading,
        definitions,
    })
}

/// Parse a whole dictionary. Entries for the same simplified key keep their
/// file order.
pub fn parse_cedict(reader: impl BufRead) -> std::io::Result<BilingualTable> {
    let mut table = BilingualTable::default();
    for line in reader.lines() {
        let line = line?;
        match parse_line(&line) {
            Some(entry) => table.push(entry),
            None if line.starts_with('#') || line.trim().is_empty() => {}
            None => warn!("cedict: skipping malformed line: {line}"),
        }
    }
    Ok(table)
}

pub fn load_cedict(path: &Path) -> Result<BilingualTable> {
    let table = parse_cedict(crate::open(path)?).map_err(|e| SourceError::io(path, e))?;
    info!("Loaded {} cedict keys from {}", table.len(), path.display());
    Ok(table)
}
