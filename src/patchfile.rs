/*
    The frozen patch/diff file line format: one hunk per line,
    "<a_start> <a_end> <b_start> <b_end>\n". Ingestion stops at the
    first line that doesn't parse into exactly four integers; hunks
    read before that line stand.
*/

use std::fmt::Write as _;

use crate::types::{Hunk, View};

// ingestion stops at the first line that isn't exactly four
// whitespace-separated unsigned integers; hunks parsed before that
// line are returned as-is. a blank trailing line (or no trailing
// newline) is not a failure, it just yields nothing further to parse.
pub fn parse(text: &str) -> Vec<Hunk> {
    let mut hunks = Vec::new();
    for line in text.lines() {
        match parse_line(line) {
            Some(hunk) => hunks.push(hunk),
            None => {
                if line.trim().is_empty() {
                    continue;
                }
                log::debug!("patch file ingestion stopped at unparseable line: {line:?}");
                break;
            }
        }
    }
    hunks
}

fn parse_line(line: &str) -> Option<Hunk> {
    let mut fields = line.split_whitespace();
    let a_start: usize = fields.next()?.parse().ok()?;
    let a_end: usize = fields.next()?.parse().ok()?;
    let b_start: usize = fields.next()?.parse().ok()?;
    let b_end: usize = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(Hunk::new(View::new(a_start, a_end), View::new(b_start, b_end)))
}

/// Formats a hunk list into patch-file text, one `<a_start> <a_end>
/// <b_start> <b_end>` line per hunk.
pub fn format(hunks: &[Hunk]) -> String {
    let mut out = String::new();
    for hunk in hunks {
        let _ = writeln!(
            out,
            "{} {} {} {}",
            hunk.view_a.start, hunk.view_a.end, hunk.view_b.start, hunk.view_b.end
        );
    }
    out
}
