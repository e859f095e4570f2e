use std::fmt::Write;

use hanzi_core::MergedEntryTable;

/// Build the mnemonic-base display string for a hanzi card: one
/// `<source> - <reading><br><fragment><br>` line per (source, reading)
/// bucket, in table order. Buckets without a fragment still get a line.
#[must_use]
pub fn assemble_mnemonic_base(entries: &MergedEntryTable) -> String {
    entries.iter().fold(String::new(), |mut out, entry| {
        let _ = write!(
            out,
            "{} - {}<br>{}<br>",
            entry.source, entry.reading, entry.mnemonic_base
        );
        out
    })
}
