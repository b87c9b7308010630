use std::fs;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use probe_map::ByteMap;
use probe_map::TableConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Count the words of the input and print one `<count> <word>` line per
/// distinct word.
#[derive(Parser, Debug)]
#[command(name = "word_count")]
struct Args {
    /// Files to read; standard input when none are given
    files: Vec<PathBuf>,

    /// Lowercase words and strip everything but ASCII letters and digits
    #[arg(long)]
    lowercase: bool,

    /// Print the most frequent words first
    #[arg(long)]
    sort: bool,

    /// Print table statistics to stderr (needs the `stats` feature)
    #[arg(long)]
    stats: bool,

    /// Slots allocated up front, rounded up to a power of two
    #[arg(long, default_value_t = 16)]
    initial_capacity: usize,

    /// How far from its home slot a word may be placed
    #[arg(long, default_value_t = 16, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    max_probe_length: usize,

    /// Share of slots, in percent, in use before the table grows
    #[arg(long, default_value_t = 70, value_parser = clap::value_parser!(u8).range(1..=100))]
    max_load_percent: u8,
}

impl Args {
    fn config(&self) -> TableConfig {
        TableConfig::new()
            .with_initial_capacity(self.initial_capacity)
            .with_max_probe_length(self.max_probe_length)
            .with_max_load_percent(self.max_load_percent)
    }
}

fn normalize(word: &[u8]) -> Vec<u8> {
    word.iter()
        .filter(|b| b.is_ascii_alphanumeric())
        .map(u8::to_ascii_lowercase)
        .collect()
}

fn count_words(counts: &mut ByteMap<u64>, text: &[u8], lowercase: bool) -> anyhow::Result<()> {
    for raw in text.split(u8::is_ascii_whitespace).filter(|w| !w.is_empty()) {
        let normalized;
        let word = if lowercase {
            normalized = normalize(raw);
            if normalized.is_empty() {
                continue;
            }
            normalized.as_slice()
        } else {
            raw
        };

        match counts.get_mut(word) {
            Some(count) => *count += 1,
            None => {
                counts.put(word, 1).context("map full")?;
            }
        }
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path).with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut text)
                .context("failed to read standard input")?;
            Ok(text)
        }
    }
}

#[cfg(feature = "stats")]
fn print_stats(counts: &ByteMap<u64>) {
    let hist = counts.probe_histogram();
    eprintln!("displacement histogram:");
    for (distance, entries) in hist.iter().enumerate().filter(|(_, n)| **n > 0) {
        eprintln!("  {distance:>3}: {entries}");
    }
    let stats = counts.debug_stats();
    eprintln!(
        "{} words, {} slots, {:.2}% load, max displacement {}",
        stats.len,
        stats.capacity,
        stats.load_factor * 100.0,
        stats.max_displacement
    );
}

#[cfg(not(feature = "stats"))]
fn print_stats(_counts: &ByteMap<u64>) {
    tracing::warn!("statistics need the `stats` feature");
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();
    let mut counts: ByteMap<u64> = ByteMap::with_config(args.config());

    if args.files.is_empty() {
        count_words(&mut counts, &read_input(None)?, args.lowercase)?;
    } else {
        for path in args.files.iter() {
            count_words(&mut counts, &read_input(Some(path))?, args.lowercase)?;
        }
    }

    tracing::debug!(
        words = counts.len(),
        capacity = counts.capacity(),
        "finished counting"
    );
    if args.stats {
        print_stats(&counts);
    }

    let mut entries: Vec<(Box<[u8]>, u64)> = counts.drain().collect();
    if args.sort {
        entries.sort_by(|(a_word, a), (b_word, b)| b.cmp(a).then_with(|| a_word.cmp(b_word)));
    }

    let mut out = BufWriter::new(std::io::stdout().lock());
    for (word, count) in entries {
        write!(out, "{count} ")?;
        out.write_all(&word)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    Ok(())
}
