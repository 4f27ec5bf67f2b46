//! Console and JSON rendering of the driver reports

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

use cribslide_core::{match_count, AggregateReport, Pruner, RowCell, SweepReport, Tableau, Text};

/// Wrapper written to stdout for `--json`.
#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    command: &'a str,
    generated_at: DateTime<Utc>,
    keyword: &'a str,
    alphabet: String,
    report: &'a T,
}

pub fn print_json<T: Serialize>(command: &str, tableau: &Tableau, report: &T) -> Result<()> {
    let envelope = Envelope {
        command,
        generated_at: Utc::now(),
        keyword: tableau.keyword(),
        alphabet: tableau.alphabet_string(),
        report,
    };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

#[derive(Serialize)]
pub struct TableauView {
    pub rows: Vec<String>,
}

impl TableauView {
    /// Each row is the keyed alphabet rotated left by its index.
    pub fn new(tableau: &Tableau) -> Self {
        let alphabet = tableau.alphabet_string();
        let rows = (0..alphabet.len())
            .map(|i| format!("{}{}", &alphabet[i..], &alphabet[..i]))
            .collect();
        Self { rows }
    }
}

/// One inspected offset.
#[derive(Serialize)]
pub struct RowView {
    pub offset: usize,
    pub cells: Vec<RowCell>,
}

pub fn tableau(tableau: &Tableau) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n  TABLEAU ({})", tableau.keyword());
    let _ = writeln!(out, "  =======\n");
    for (i, row) in TableauView::new(tableau).rows.iter().enumerate() {
        let _ = writeln!(out, "  {:2}  {}", i, spaced(row));
    }
    out.push('\n');
    out
}

pub fn sweep(report: &SweepReport, top_n: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n  CRIB SWEEP (top {top_n} per pair)");
    let _ = writeln!(out, "  ==========\n");

    for section in &report.sections {
        let _ = writeln!(out, "  === {} / {} ===", section.cipher_label, section.crib_label);
        if section.results.is_empty() {
            let _ = writeln!(out, "  (no surviving offsets)\n");
            continue;
        }

        let width = section
            .results
            .iter()
            .map(|r| r.pattern.len())
            .max()
            .unwrap_or(0)
            .max(7);
        let _ = writeln!(out, "  {:>6}  {:<width$}  {:>5}  Key run", "Offset", "Pattern", "Score");
        let _ = writeln!(out, "  {:->6}  {:-<width$}  {:->5}  -------", "", "", "");
        for r in &section.results {
            let _ = writeln!(
                out,
                "  {:>6}  {:<width$}  {:>5}  {}",
                r.offset, r.pattern, r.score, r.key_run
            );
        }
        out.push('\n');
    }

    match report.best() {
        Some((section, best)) => {
            let _ = writeln!(
                out,
                "  Best: {} at offset {} of {} (crib {}, score {})",
                best.pattern, best.offset, section.cipher_label, section.crib_label, best.score
            );
        }
        None => {
            let _ = writeln!(out, "  No results");
        }
    }
    if report.cancelled {
        let _ = writeln!(out, "  [!] Interrupted: {} sections completed", report.sections.len());
    }
    out.push('\n');
    out
}

pub fn aggregate(report: &AggregateReport, pruner: &Pruner) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n  SLIDE RANKING");
    let _ = writeln!(out, "  =============\n");

    let pruned: Vec<&str> = pruner.keywords().iter().map(Text::as_str).collect();
    let _ = writeln!(
        out,
        "  Slices: {}   Candidates: {}   Shown: {}   Pruned: {}",
        report.slices_scanned,
        report.candidates,
        report.records.len(),
        if pruned.is_empty() { "-".to_string() } else { pruned.join(", ") }
    );
    if report.cancelled {
        let _ = writeln!(out, "  [!] Interrupted: partial ranking");
    }
    out.push('\n');

    if report.records.is_empty() {
        let _ = writeln!(out, "  No candidates\n");
        return out;
    }

    let width = report
        .records
        .iter()
        .map(|r| r.result.pattern.len())
        .max()
        .unwrap_or(0)
        .max(8);
    let _ = writeln!(
        out,
        "  {:>5}  {:<width$}  {:>5}  {:>6}  {:<6}  {:<10}  {:>7}  Key run",
        "Rank", "Pattern", "Score", "Offset", "Cipher", "Source", "Slice"
    );
    for (i, record) in report.records.iter().enumerate() {
        let r = &record.result;
        let _ = writeln!(
            out,
            "  {:>5}  {:<width$}  {:>5}  {:>6}  {:<6}  {:<10}  {:>7}  {}",
            format!("#{:02}", i + 1),
            r.pattern,
            r.score,
            r.offset,
            record.cipher_label,
            record.plain_label,
            record.slice_start,
            r.key_run
        );
    }
    out.push('\n');
    out
}

pub fn rows(cipher_label: &str, crib: &Text, expected: Option<&Text>, rows: &[RowView]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n  ROW INSPECTION: {} / {}", cipher_label, crib);
    let _ = writeln!(out, "  ==============");
    if let Some(expected) = expected {
        let _ = writeln!(out, "  Expected key: {expected}");
    }
    out.push('\n');

    for row in rows {
        let cells = &row.cells;
        match expected {
            Some(_) => {
                let _ = writeln!(
                    out,
                    "  Offset {}  ({}/{} match)",
                    row.offset,
                    match_count(cells),
                    cells.len()
                );
            }
            None => {
                let _ = writeln!(out, "  Offset {}", row.offset);
            }
        }

        line(&mut out, "Cipher", cells, |c| c.cipher_symbol.to_string());
        line(&mut out, "C idx", cells, |c| c.cipher_index.to_string());
        line(&mut out, "Plain", cells, |c| c.plain_symbol.to_string());
        line(&mut out, "P idx", cells, |c| c.plain_index.to_string());
        line(&mut out, "Delta", cells, |c| c.delta.to_string());
        line(&mut out, "K idx", cells, |c| c.key_index.to_string());
        line(&mut out, "Key", cells, |c| c.key_symbol.to_string());
        if expected.is_some() {
            line(&mut out, "Expect", cells, |c| {
                c.expected_symbol.map(String::from).unwrap_or_default()
            });
            line(&mut out, "Match", cells, |c| match c.matches_expected {
                Some(true) => "+".to_string(),
                Some(false) => "x".to_string(),
                None => String::new(),
            });
        }
        out.push('\n');
    }
    out
}

fn line(out: &mut String, label: &str, cells: &[RowCell], cell: impl Fn(&RowCell) -> String) {
    let _ = write!(out, "  {label:<7}");
    for c in cells {
        let _ = write!(out, "{:>3}", cell(c));
    }
    out.push('\n');
}

fn spaced(row: &str) -> String {
    let mut spaced = String::with_capacity(row.len() * 2);
    for (i, c) in row.chars().enumerate() {
        if i > 0 {
            spaced.push(' ');
        }
        spaced.push(c);
    }
    spaced
}
