//! Terminal rendering of split results.

use icsplit_core::ByteSize;
use owo_colors::OwoColorize;

use crate::output::OutputFile;
use crate::split::SplitOutcome;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for OutputFile {
    fn render(&self) -> String {
        let details = format!(
            "({}, {} {})",
            ByteSize::new(self.bytes),
            self.events,
            pluralize("event", self.events)
        );
        format!("  {} {}", self.file_name.green(), details.dimmed())
    }
}

impl Render for SplitOutcome {
    fn render(&self) -> String {
        let count = self.files.len();
        let action = if self.dry_run { "Would split" } else { "Split" };

        let mut lines = vec![format!(
            "{} into {} {}:",
            action,
            count,
            pluralize("file", count)
        )];
        lines.extend(self.files.iter().map(Render::render));

        if self.stats.skipped_lines > 0 {
            let note = format!(
                "Dropped {} {} outside of events",
                self.stats.skipped_lines,
                pluralize("line", self.stats.skipped_lines)
            );
            lines.push(note.yellow().to_string());
        }

        lines.join("\n")
    }
}

/// Simple pluralization helper
fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icsplit_core::SplitStats;
    use std::path::PathBuf;

    fn file(index: usize, bytes: u64, events: usize) -> OutputFile {
        OutputFile {
            index,
            file_name: format!("cal_part{index}.ics"),
            path: PathBuf::from(format!("/tmp/cal_part{index}.ics")),
            bytes,
            events,
        }
    }

    fn outcome(files: Vec<OutputFile>, dry_run: bool) -> SplitOutcome {
        SplitOutcome {
            stats: SplitStats {
                segments: files.len(),
                events: files.iter().map(|f| f.events).sum(),
                skipped_lines: 0,
            },
            files,
            dry_run,
        }
    }

    #[test]
    fn test_render_summary() {
        let rendered = outcome(vec![file(1, 2048, 2), file(2, 1024 * 1024 + 1, 1)], false).render();

        assert!(rendered.starts_with("Split into 2 files:"));
        assert!(rendered.contains("cal_part1.ics"));
        assert!(rendered.contains("(2 KB, 2 events)"));
        assert!(rendered.contains("(1.0 MB, 1 event)"));
    }

    #[test]
    fn test_render_dry_run_single_file() {
        let rendered = outcome(vec![file(1, 512, 0)], true).render();
        assert!(rendered.starts_with("Would split into 1 file:"));
        assert!(rendered.contains("(0 KB, 0 events)"));
    }

    #[test]
    fn test_render_mentions_dropped_lines() {
        let mut result = outcome(vec![file(1, 512, 1)], false);
        result.stats.skipped_lines = 1;
        assert!(result.render().contains("Dropped 1 line outside of events"));
    }
}
