//! Cribslide CLI
//!
//! Slides candidate plaintext fragments across Kryptos-style ciphertexts and
//! ranks alignments by how short and regular the implied key pattern is.

mod render;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::ops::Range;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cribslide_config::{kryptos, CorpusConfig, SlideConfig};
use cribslide_core::{compute_row, sweep, Aggregator, CancelFlag, LabeledText, Scanner, Text};

#[derive(Parser)]
#[command(name = "cribslide")]
#[command(about = "Crib sliding and key-period ranking for keyed-tableau ciphers")]
#[command(version)]
struct Cli {
    /// Configuration file (YAML, or JSON with a .json extension)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Corpus file; its sections replace the configured ones
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Primary key seeding the tableau
    #[arg(short, long, global = true)]
    key: Option<String>,

    /// Print the report as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PruneArgs {
    /// Additional known keyword to prune (repeatable)
    #[arg(long = "prune", value_name = "KEYWORD")]
    keywords: Vec<String>,

    /// Ignore the configured pruning list
    #[arg(long)]
    no_prune: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the keyed alphabet
    Tableau,

    /// Show the effective configuration as YAML
    Config,

    /// Slide each crib across each ciphertext
    Scan {
        /// Ciphertext label (repeatable, default: all)
        #[arg(long = "cipher", value_name = "LABEL")]
        ciphers: Vec<String>,

        /// Crib text (repeatable, default: corpus crib list)
        #[arg(long = "crib", value_name = "TEXT")]
        cribs: Vec<String>,

        /// Largest key period searched
        #[arg(long)]
        max_pattern: Option<usize>,

        /// Results kept per cipher/crib pair
        #[arg(long)]
        top: Option<usize>,

        #[command(flatten)]
        prune: PruneArgs,
    },

    /// Slide every window of the plaintext sources across each ciphertext
    Slide {
        /// Plaintext source label (repeatable, default: all)
        #[arg(long = "plain", value_name = "LABEL")]
        plains: Vec<String>,

        /// Ciphertext label (repeatable, default: all)
        #[arg(long = "cipher", value_name = "LABEL")]
        ciphers: Vec<String>,

        /// Shortest window
        #[arg(long)]
        min: Option<usize>,

        /// Longest window
        #[arg(long)]
        max: Option<usize>,

        /// Largest key period searched
        #[arg(long)]
        max_pattern: Option<usize>,

        /// Results kept per slice
        #[arg(long)]
        top: Option<usize>,

        /// Records in the final report
        #[arg(long)]
        limit: Option<usize>,

        #[command(flatten)]
        prune: PruneArgs,
    },

    /// Show the full arithmetic of one crib alignment
    Row {
        /// Ciphertext label
        #[arg(long = "cipher", value_name = "LABEL")]
        cipher: Option<String>,

        /// Crib text
        #[arg(long)]
        crib: Option<String>,

        /// Expected key pattern, cycled across the row
        #[arg(long)]
        expect: Option<String>,

        /// Single offset
        #[arg(long, conflicts_with = "offsets")]
        offset: Option<usize>,

        /// Offset range, e.g. 0..10 or 5..=8
        #[arg(long, default_value = "0..10")]
        offsets: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = SlideConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(path) = &cli.corpus {
        let file = CorpusConfig::load(path)
            .with_context(|| format!("Failed to load corpus {}", path.display()))?;
        config.corpus = std::mem::take(&mut config.corpus).overlay(file);
    }
    if let Some(key) = &cli.key {
        config.primary_key = key.clone();
    }

    tracing::debug!(key = %config.primary_key, prune = ?config.prune, "Configuration ready");

    let json = cli.json;
    match cli.command {
        Commands::Tableau => cmd_tableau(config, json),
        Commands::Config => cmd_config(config),
        Commands::Scan { ciphers, cribs, max_pattern, top, prune } => {
            if let Some(n) = max_pattern {
                config.sweep.max_pattern_len = n;
            }
            if let Some(n) = top {
                config.sweep.top_n = n;
            }
            apply_prune(&mut config, prune);
            cmd_scan(config, ciphers, cribs, json).await
        }
        Commands::Slide { plains, ciphers, min, max, max_pattern, top, limit, prune } => {
            let slide = &mut config.slide;
            if let Some(n) = min {
                slide.min_slice = n;
            }
            if let Some(n) = max {
                slide.max_slice = n;
            }
            if let Some(n) = max_pattern {
                slide.max_pattern_len = n;
            }
            if let Some(n) = top {
                slide.top_per_slice = n;
            }
            if let Some(n) = limit {
                slide.limit = n;
            }
            apply_prune(&mut config, prune);
            cmd_slide(config, plains, ciphers, json).await
        }
        Commands::Row { cipher, crib, expect, offset, offsets } => {
            cmd_row(config, cipher, crib, expect, offset, &offsets, json)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "cribslide={level},cribslide_core={level},cribslide_config={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn apply_prune(config: &mut SlideConfig, prune: PruneArgs) {
    if prune.no_prune {
        config.prune.clear();
    }
    config.prune.extend(prune.keywords);
}

/// Flips the returned flag on Ctrl-C.
fn watch_interrupt() -> CancelFlag {
    let cancel = CancelFlag::new();
    let handle = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n[!] Interrupted - stopping and keeping partial results...");
            handle.cancel();
        }
    });
    cancel
}

// ═══════════════════════════════════════════════════════════
// COMMANDS
// ═══════════════════════════════════════════════════════════

fn cmd_tableau(config: SlideConfig, json: bool) -> Result<()> {
    config.validate()?;
    let tableau = config.tableau()?;
    if json {
        render::print_json("tableau", &tableau, &render::TableauView::new(&tableau))
    } else {
        print!("{}", render::tableau(&tableau));
        Ok(())
    }
}

fn cmd_config(config: SlideConfig) -> Result<()> {
    config.validate()?;
    print!("{}", config.to_yaml()?);
    Ok(())
}

async fn cmd_scan(
    config: SlideConfig,
    ciphers: Vec<String>,
    cribs: Vec<String>,
    json: bool,
) -> Result<()> {
    config.validate().context("Invalid scan settings")?;
    let normalizer = config.normalizer()?;
    let corpus = config.corpus()?;
    let ciphers = corpus.select_ciphers(&ciphers)?;
    let cribs = if cribs.is_empty() {
        corpus.cribs.clone()
    } else {
        cribs
            .iter()
            .map(|raw| {
                let entry = LabeledText::normalized(raw.trim(), raw, &normalizer);
                if entry.text.is_empty() {
                    bail!("Crib {raw:?} has no letters");
                }
                Ok(entry)
            })
            .collect::<Result<Vec<_>>>()?
    };

    let cancel = watch_interrupt();
    let tableau = config.tableau()?;
    let pruner = config.pruner()?;
    let params = config.sweep_params();

    let (tableau, report) = tokio::task::spawn_blocking(move || {
        let scanner = Scanner::new(&tableau, &pruner, params);
        let report = sweep(&scanner, &ciphers, &cribs, &cancel);
        (tableau, report)
    })
    .await
    .context("Scan task failed")?;

    if json {
        render::print_json("scan", &tableau, &report)
    } else {
        print!("{}", render::sweep(&report, params.top_n));
        Ok(())
    }
}

async fn cmd_slide(
    config: SlideConfig,
    plains: Vec<String>,
    ciphers: Vec<String>,
    json: bool,
) -> Result<()> {
    config.validate().context("Invalid slide settings")?;
    let corpus = config.corpus()?;
    let plains = corpus.select_plaintexts(&plains)?;
    let ciphers = corpus.select_ciphers(&ciphers)?;

    let cancel = watch_interrupt();
    let tableau = config.tableau()?;
    let pruner = config.pruner()?;
    let params = config.aggregate_params();
    let style = ProgressStyle::with_template(
        "  {spinner} [{elapsed_precise}] {bar:40} {pos}/{len} slices  {msg}",
    )?
    .progress_chars("=> ");

    let (tableau, pruner, report) = tokio::task::spawn_blocking(move || {
        let aggregator = Aggregator::new(&tableau, &pruner, params);
        let bar = ProgressBar::new(aggregator.total_slices(&plains) as u64);
        bar.set_style(style);

        let report = aggregator.run_with_progress(&plains, &ciphers, &cancel, |p| {
            if p.slices_done % 50 == 0 || p.slices_done == p.slices_total {
                bar.set_position(p.slices_done as u64);
                bar.set_message(format!(
                    "{} @{:4} len {:2}  {} hits",
                    p.plain_label, p.slice_start, p.slice_len, p.candidates
                ));
            }
        });
        bar.finish_and_clear();
        (tableau, pruner, report)
    })
    .await
    .context("Slide task failed")?;

    if json {
        render::print_json("slide", &tableau, &report)
    } else {
        print!("{}", render::aggregate(&report, &pruner));
        Ok(())
    }
}

fn cmd_row(
    config: SlideConfig,
    cipher: Option<String>,
    crib: Option<String>,
    expect: Option<String>,
    offset: Option<usize>,
    offsets: &str,
    json: bool,
) -> Result<()> {
    config.validate()?;
    let normalizer = config.normalizer()?;
    let tableau = config.tableau()?;
    let corpus = config.corpus()?;

    let (demo_cipher, demo_crib, demo_expect) = kryptos::ROW_DEMO;
    let demo = crib.is_none();
    let label = cipher.unwrap_or_else(|| demo_cipher.to_string());
    let cipher = corpus
        .cipher(&label)
        .with_context(|| format!("Unknown ciphertext label: {label}"))?;
    let crib = normalizer.normalize(crib.as_deref().unwrap_or(demo_crib));
    if crib.is_empty() {
        bail!("Crib has no letters");
    }
    let expected: Option<Text> = match expect {
        Some(raw) => Some(normalizer.normalize(&raw)),
        None if demo => Some(normalizer.normalize(demo_expect)),
        None => None,
    };

    let Some(last) = cipher.text.len().checked_sub(crib.len()) else {
        bail!(
            "Crib ({} letters) is longer than {} ({} letters)",
            crib.len(),
            cipher.label,
            cipher.text.len()
        );
    };
    let range = row_offsets(offset, offsets, last)?;

    let rows = range
        .map(|off| {
            compute_row(&tableau, &crib, &cipher.text, off, expected.as_ref()).map(|cells| render::RowView {
                offset: off,
                cells,
            })
        })
        .collect::<cribslide_core::Result<Vec<_>>>()?;

    if json {
        render::print_json("row", &tableau, &rows)
    } else {
        print!("{}", render::rows(&cipher.label, &crib, expected.as_ref(), &rows));
        Ok(())
    }
}

/// Offsets to inspect, with the end clamped to `last` (the final valid
/// offset). A start past `last` or an empty range is an error.
fn row_offsets(offset: Option<usize>, spec: &str, last: usize) -> Result<Range<usize>> {
    let range = match offset {
        Some(n) => single(n)?,
        None => parse_offsets(spec)?,
    };
    if range.start > last {
        bail!("Offset {} out of range: valid offsets are 0..={last}", range.start);
    }
    if range.is_empty() {
        bail!("Empty offset range {}..{}", range.start, range.end);
    }
    Ok(range.start..range.end.min(last + 1))
}

fn single(n: usize) -> Result<Range<usize>> {
    let end = n.checked_add(1).context("Offset too large")?;
    Ok(n..end)
}

/// `A..B` (exclusive) or `A..=B`.
fn parse_offsets(spec: &str) -> Result<Range<usize>> {
    let parse = |s: &str| -> Result<usize> {
        s.trim()
            .parse()
            .with_context(|| format!("Invalid offset {s:?} in range {spec:?}"))
    };
    if let Some((a, b)) = spec.split_once("..=") {
        let end = parse(b)?;
        Ok(parse(a)?..single(end)?.end)
    } else if let Some((a, b)) = spec.split_once("..") {
        Ok(parse(a)?..parse(b)?)
    } else {
        single(parse(spec)?)
    }
}
