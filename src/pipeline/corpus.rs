//! Commit corpus assembly and bounding.
//!
//! Retrieved records are rendered into one git-log shaped text blob, the same
//! textual shape a user-supplied log has, so local and remote corpora are
//! indistinguishable to the analyzer.

use std::fmt::Write as _;

use crate::ports::commit_search::RawCommitRecord;

/// Visible separator between rendered commit records.
pub const RECORD_SEPARATOR: &str = "------------------------------------------------";

/// Maximum corpus size submitted to the analyzer, in bytes. Guards the
/// model's context window.
pub const MAX_CORPUS_LEN: usize = 950_000;

/// Renders retrieved records into a single corpus string.
#[must_use]
pub fn format_corpus(records: &[RawCommitRecord]) -> String {
    let blocks: Vec<String> = records.iter().map(format_record).collect();
    blocks.join(&format!("\n\n{RECORD_SEPARATOR}\n\n"))
}

fn format_record(record: &RawCommitRecord) -> String {
    let mut block = String::new();
    let _ = writeln!(block, "commit {}", record.sha);
    let _ = writeln!(block, "Author: {}", record.author);
    let _ = writeln!(block, "Date:   {}", record.date);
    if let Some(url) = &record.html_url {
        let _ = writeln!(block, "Link:   {url}");
    }
    block.push('\n');
    for line in record.message.lines() {
        if line.is_empty() {
            block.push('\n');
        } else {
            let _ = writeln!(block, "    {line}");
        }
    }
    block.truncate(block.trim_end().len());
    block
}

/// Bounds the corpus to [`MAX_CORPUS_LEN`], cutting on a char boundary.
///
/// Returns the bounded slice and whether anything was cut.
#[must_use]
pub fn truncate(corpus: &str) -> (&str, bool) {
    if corpus.len() <= MAX_CORPUS_LEN {
        return (corpus, false);
    }
    let mut end = MAX_CORPUS_LEN;
    while !corpus.is_char_boundary(end) {
        end -= 1;
    }
    (&corpus[..end], true)
}
