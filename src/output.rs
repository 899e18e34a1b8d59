//! Output file naming and all-or-nothing writing of segments.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use icsplit_core::{Segment, TextEncoding};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

/// Where output files go and what they are called.
#[derive(Debug, Clone)]
pub struct OutputNaming {
    dir: PathBuf,
    prefix: String,
}

impl OutputNaming {
    /// Name outputs after `input`, next to it unless `dir` is given.
    pub fn for_input(input: &Path, prefix: Option<String>, dir: Option<PathBuf>) -> Self {
        let dir = dir.unwrap_or_else(|| {
            input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        });
        let prefix = prefix.unwrap_or_else(|| default_prefix(input));

        Self { dir, prefix }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `{prefix}_part{index}.ics`, index starting at 1
    pub fn file_name(&self, index: usize) -> String {
        format!("{}_part{}.ics", self.prefix, index)
    }

    pub fn path(&self, index: usize) -> PathBuf {
        self.dir.join(self.file_name(index))
    }
}

/// The input's file name without a trailing `.ics` (any case).
pub fn default_prefix(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "calendar".to_string());

    let cut = name.len().saturating_sub(4);
    match name.get(cut..) {
        Some(ext) if ext.eq_ignore_ascii_case(".ics") => name[..cut].to_string(),
        _ => name,
    }
}

/// Description of one output file, written or (in a dry run) planned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    pub index: usize,
    pub file_name: String,
    #[serde(skip)]
    pub path: PathBuf,
    pub bytes: u64,
    pub events: usize,
}

impl OutputFile {
    pub fn new(naming: &OutputNaming, segment: &Segment) -> Self {
        Self {
            index: segment.index(),
            file_name: naming.file_name(segment.index()),
            path: naming.path(segment.index()),
            bytes: segment.byte_size(),
            events: segment.event_count(),
        }
    }
}

/// Writes each segment to a temporary file in the output directory and
/// moves them all into place on [`commit`](StagedWriter::commit).
///
/// Dropping the writer without committing deletes every staged file.
pub struct StagedWriter {
    naming: OutputNaming,
    encoding: TextEncoding,
    overwrite: bool,
    staged: Vec<(NamedTempFile, PathBuf)>,
}

impl StagedWriter {
    pub fn new(naming: OutputNaming, encoding: TextEncoding, overwrite: bool) -> Self {
        Self {
            naming,
            encoding,
            overwrite,
            staged: Vec::new(),
        }
    }

    pub fn stage(&mut self, segment: &Segment) -> Result<()> {
        let path = self.naming.path(segment.index());
        if !self.overwrite && path.exists() {
            anyhow::bail!(
                "Output file already exists: {}\n\
                Use --overwrite to replace existing files.",
                path.display()
            );
        }

        let mut file = NamedTempFile::new_in(self.naming.dir()).with_context(|| {
            format!(
                "Failed to create temporary file in {}",
                self.naming.dir().display()
            )
        })?;

        {
            let mut writer = BufWriter::new(file.as_file_mut());
            for line in segment.lines() {
                writer.write_all(&self.encoding.encode(line.text()))?;
            }
            writer
                .flush()
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }

        debug!(index = segment.index(), path = %path.display(), "staged segment");
        self.staged.push((file, path));
        Ok(())
    }

    pub fn staged_count(&self) -> usize {
        self.staged.len()
    }

    /// Move every staged file to its final name.
    pub fn commit(self) -> Result<()> {
        for (file, path) in self.staged {
            let persisted = if self.overwrite {
                file.persist(&path)
            } else {
                file.persist_noclobber(&path)
            };
            persisted
                .map_err(|e| e.error)
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
            debug!(path = %path.display(), "committed");
        }
        Ok(())
    }
}
