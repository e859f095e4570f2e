//! Mnemonic table: bases keyed by reading, mnemonics keyed by character.

use std::collections::HashMap;
use std::path::Path;

use hanzi_core::MnemonicTable;
use serde::Deserialize;
use tracing::info;

use crate::Result;

#[derive(Debug, Default, Deserialize)]
struct MnemonicFile {
    #[serde(default)]
    bases: HashMap<String, String>,
    #[serde(default)]
    mnemonics: HashMap<String, String>,
}

impl From<MnemonicFile> for MnemonicTable {
    fn from(file: MnemonicFile) -> Self {
        let bases = file
            .bases
            .into_iter()
            .map(|(reading, base)| (reading.to_lowercase(), base))
            .collect();
        Self::new(bases, file.mnemonics)
    }
}

/// Parse `{"bases": {"hao": "…"}, "mnemonics": {"好": "…"}}`. Either
/// section may be absent.
pub fn parse_mnemonics(json: &str) -> serde_json::Result<MnemonicTable> {
    serde_json::from_str::<MnemonicFile>(json).map(MnemonicTable::from)
}

pub fn load_mnemonics(path: &Path) -> Result<MnemonicTable> {
    let file: MnemonicFile = crate::read_json(path)?;
    info!(
        "Loaded {} mnemonic bases and {} mnemonics from {}",
        file.bases.len(),
        file.mnemonics.len(),
        path.display()
    );
    Ok(file.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanzi_core::MnemonicSource;

    #[test]
    fn parses_both_sections() {
        #[expect(clippy::expect_used, reason = "test: fixture is valid json")]
        let table = parse_mnemonics(
            r#"{"bases": {"Hao": "Harry in the hall"}, "mnemonics": {"好": "mother and child"}}"#,
        )
        .expect("fixture is valid json");

        assert_eq!(table.base("hao3"), Ok("Harry in the hall".to_string()));
        assert_eq!(table.mnemonic("好"), Ok("mother and child".to_string()));
    }

    #[test]
    fn sections_are_optional() {
        #[expect(clippy::expect_used, reason = "test: fixture is valid json")]
        let table = parse_mnemonics("{}").expect("fixture is valid json");
        assert!(table.base("hao3").is_err());
    }
}
