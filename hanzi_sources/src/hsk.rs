//! HSK leveled vocabulary: a directory of TSV files, one file per level.
//!
//! The file stem is the level tag (`1.tsv` → level "1"). Rows are
//! `word<TAB>pinyin<TAB>meaning`; rows with fewer columns are ignored.

use std::io::BufRead;
use std::path::Path;

use hanzi_core::{LeveledEntry, LeveledTable};
use tracing::{debug, info};

use crate::{Result, SourceError};

/// Strip alternatives (`｜…`) and annotations (`（…`) from a cell.
#[must_use]
pub fn clean(cell: &str) -> &str {
    let head = cell.split('｜').next().unwrap_or_default().trim();
    head.split('（').next().unwrap_or_default().trim()
}

/// Parse one level file into `(key, entry)` rows, in file order.
pub fn parse_level(reader: impl BufRead, level: &str) -> std::io::Result<Vec<(String, LeveledEntry)>> {
    let mut rows = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let cells: Vec<&str> = line.split('\t').collect();
        if cells.len() < 3 {
            continue;
        }
        let key = clean(cells[0]);
        if key.is_empty() {
            continue;
        }
        rows.push((
            key.to_string(),
            LeveledEntry {
                raw: cells[0].to_string(),
                reading: clean(cells[1]).to_string(),
                meaning: cells[2].trim().to_string(),
                level: level.to_string(),
            },
        ));
    }
    Ok(rows)
}

/// Load every file of `dir`, in file-name order. A key present in several
/// files keeps the entry of the last file read.
pub fn load_hsk(dir: &Path) -> Result<LeveledTable> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| SourceError::io(dir, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| SourceError::io(dir, e))?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    let mut table = LeveledTable::default();
    for path in files {
        let level = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let rows = parse_level(crate::open(&path)?, &level).map_err(|e| SourceError::io(&path, e))?;
        debug!("hsk level {level}: {} rows", rows.len());
        for (key, entry) in rows {
            table.insert(key, entry);
        }
    }
    info!("Loaded {} hsk entries from {}", table.len(), dir.display());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_alternatives_and_annotations() {
        assert_eq!(clean("爸爸｜爸"), "爸爸");
        assert_eq!(clean("本（量词）"), "本");
        assert_eq!(clean(" bàba ｜ bà "), "bàba");
        assert_eq!(clean("好"), "好");
    }

    #[test]
    fn parses_rows_with_level() {
        let input = "爱\tài\tlove\n八\tbā\teight\nbroken row\n本（量词）\tběn\tmeasure word for books\n";
        #[expect(clippy::expect_used, reason = "test: in-memory read cannot fail")]
        let rows = parse_level(input.as_bytes(), "1").expect("in-memory read cannot fail");

        let keys: Vec<&str> = rows.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["爱", "八", "本"]);
        assert_eq!(rows[2].1.raw, "本（量词）");
        assert!(rows.iter().all(|(_, e)| e.level == "1"));
    }
}
