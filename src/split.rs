//! Drives the engine over an input file and hands segments to the writer.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use icsplit_core::{LineReader, SplitConfig, SplitStats, Splitter, TextEncoding};
use tracing::{debug, warn};

use crate::output::{OutputFile, OutputNaming, StagedWriter};

/// Everything one split run needs, after flags and config are merged.
#[derive(Debug, Clone)]
pub struct Options {
    pub input: PathBuf,
    pub split: SplitConfig,
    pub encoding: TextEncoding,
    pub naming: OutputNaming,
    pub overwrite: bool,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct SplitOutcome {
    pub files: Vec<OutputFile>,
    pub stats: SplitStats,
    pub dry_run: bool,
}

/// Split `options.input`, calling `on_file` as each segment is produced.
///
/// Nothing is written unless the whole input splits cleanly.
pub fn run(options: &Options, mut on_file: impl FnMut(&OutputFile)) -> Result<SplitOutcome> {
    let input = &options.input;
    let file = File::open(input)
        .with_context(|| format!("Failed to open input file {}", input.display()))?;
    let lines = LineReader::new(BufReader::new(file), options.encoding);

    let mut segments = Splitter::new(options.split)
        .split(lines)
        .with_context(|| format!("Failed to split {}", input.display()))?;

    let mut writer = (!options.dry_run).then(|| {
        StagedWriter::new(options.naming.clone(), options.encoding, options.overwrite)
    });
    let mut files = Vec::new();

    for segment in segments.by_ref() {
        let segment = segment.with_context(|| format!("Failed to split {}", input.display()))?;
        debug!(
            index = segment.index(),
            bytes = segment.byte_size(),
            events = segment.event_count(),
            "segment ready"
        );

        if let Some(writer) = writer.as_mut() {
            writer.stage(&segment)?;
        }

        let output = OutputFile::new(&options.naming, &segment);
        on_file(&output);
        files.push(output);
    }

    let stats = segments.stats();
    if stats.skipped_lines > 0 {
        warn!(
            lines = stats.skipped_lines,
            "dropped lines found outside of events"
        );
    }

    if let Some(writer) = writer {
        debug!(files = writer.staged_count(), "committing output");
        writer.commit()?;
    }

    Ok(SplitOutcome {
        files,
        stats,
        dry_run: options.dry_run,
    })
}
