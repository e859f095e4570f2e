//! CJKVI ideographic description sequences (`ids.txt`).

use std::io::BufRead;
use std::path::Path;

use hanzi_core::DecompositionTable;
use hanzi_core::text::is_ideographic_description;
use tracing::info;

use crate::{Result, SourceError};

/// Parse lines like `U+597D\t好\t⿰女子`. Comment lines start with `#`.
pub fn parse_ids(reader: impl BufRead) -> std::io::Result<DecompositionTable> {
    let mut rows = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            continue;
        }
        rows.push((parts[1].to_string(), constituents(parts[2])));
    }
    Ok(rows.into_iter().collect())
}

/// Constituents of an IDS: description characters dropped, stopping at the
/// first region tag (`[`).
fn constituents(ids: &str) -> Vec<String> {
    ids.chars()
        .take_while(|c| *c != '[')
        .filter(|c| !is_ideographic_description(*c) && !c.is_whitespace())
        .map(String::from)
        .collect()
}

pub fn load_ids(path: &Path) -> Result<DecompositionTable> {
    let table = parse_ids(crate::open(path)?).map_err(|e| SourceError::io(path, e))?;
    info!("Loaded {} cjkvi decompositions from {}", table.len(), path.display());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanzi_core::DecompositionSource;

    #[test]
    fn strips_description_characters() {
        assert_eq!(constituents("⿰女子"), vec!["女", "子"]);
        assert_eq!(constituents("⿱⿰木木木"), vec!["木", "木", "木"]);
    }

    #[test]
    fn stops_at_region_tag() {
        assert_eq!(constituents("⿰言兑[GTK]"), vec!["言", "兑"]);
    }

    #[test]
    fn parses_ids_file() {
        let input = "\
# CHISE IDS
U+597D\t好\t⿰女子
U+4E00\t一\t一
U+4E8C\t二
";
        #[expect(clippy::expect_used, reason = "test: in-memory read cannot fail")]
        let table = parse_ids(input.as_bytes()).expect("in-memory read cannot fail");

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.constituents("好"),
            Some(["女".to_string(), "子".to_string()].as_slice())
        );
        // 一 lists itself; the resolver filters that out later
        assert_eq!(table.constituents("一"), Some(["一".to_string()].as_slice()));
    }
}
