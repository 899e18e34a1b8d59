mod config;
mod output;
mod render;
mod split;
mod tui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use icsplit_core::{ByteSize, SplitConfig, TextEncoding};
use output::OutputNaming;
use render::Render;
use split::Options;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_MAX_SIZE: ByteSize = ByteSize::new(1024 * 1024);
const DEFAULT_ENCODING: &str = "utf-8";

#[derive(Parser, Debug)]
#[command(name = "icsplit", version)]
#[command(about = "Split large ICS calendar files into smaller, independently valid calendars")]
#[command(after_help = "Example: icsplit calendar.ics -s 500K -n 50")]
struct Cli {
    /// Input .ics calendar file to split
    input: PathBuf,

    /// Maximum size per output file, e.g. 500K or 1M [default: 1M]
    #[arg(short, long)]
    size: Option<ByteSize>,

    /// Maximum number of events per output file
    #[arg(short = 'n', long = "number")]
    max_events: Option<usize>,

    /// File encoding [default: utf-8]
    #[arg(short, long)]
    encoding: Option<String>,

    /// Prefix for output files (default: input file name without .ics)
    #[arg(short, long)]
    output_prefix: Option<String>,

    /// Directory for output files (default: next to the input file)
    #[arg(short = 'd', long)]
    output_dir: Option<PathBuf>,

    /// Suppress the summary
    #[arg(short, long)]
    quiet: bool,

    /// Show what would be created without writing files
    #[arg(long)]
    dry_run: bool,

    /// Overwrite existing output files
    #[arg(long)]
    overwrite: bool,

    /// Print the resulting files as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Use this config file instead of ~/.config/icsplit/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = config::load_config(cli.config.as_deref())?;
    let options = resolve_options(&cli, cfg)?;
    debug!(?options, "resolved options");

    let show_progress = !cli.quiet && !cli.json;
    let spinner = show_progress.then(|| {
        tui::create_spinner(format!("Splitting {}", options.input.display()))
    });

    let result = split::run(&options, |file| {
        if let Some(spinner) = &spinner {
            spinner.set_message(format!("Splitting {} ({})", options.input.display(), file.file_name));
        }
    });
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let outcome = result?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome.files)?);
    } else if !cli.quiet {
        println!("{}", outcome.render());
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("icsplit=debug,icsplit_core=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Merge command-line flags over the config file.
fn resolve_options(cli: &Cli, cfg: config::Config) -> Result<Options> {
    let max_size = cli.size.or(cfg.max_size).unwrap_or(DEFAULT_MAX_SIZE);
    let mut split = SplitConfig::from_size(max_size)?;
    if let Some(max_events) = cli.max_events.or(cfg.max_events) {
        split = split.with_max_events(max_events)?;
    }

    let label = cli
        .encoding
        .as_deref()
        .or(cfg.encoding.as_deref())
        .unwrap_or(DEFAULT_ENCODING);
    let encoding = TextEncoding::for_label(label)?;

    let output_dir = cli
        .output_dir
        .clone()
        .or_else(|| cfg.output_dir.as_deref().map(config::expand_path));
    let naming = OutputNaming::for_input(&cli.input, cli.output_prefix.clone(), output_dir);

    Ok(Options {
        input: cli.input.clone(),
        split,
        encoding,
        naming,
        overwrite: cli.overwrite || cfg.overwrite,
        dry_run: cli.dry_run,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("icsplit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let options = resolve_options(&cli(&["cal.ics"]), config::Config::default()).unwrap();

        assert_eq!(options.split.max_bytes(), 1024 * 1024);
        assert!(options.split.max_events().is_none());
        assert!(options.encoding.is_utf8());
        assert!(!options.overwrite);
        assert!(!options.dry_run);
        assert_eq!(options.naming.file_name(1), "cal_part1.ics");
    }

    #[test]
    fn test_flags_override_config() {
        let cfg = config::Config {
            max_size: Some(ByteSize::new(2048)),
            max_events: Some(10),
            encoding: Some("latin1".into()),
            overwrite: false,
            output_dir: Some("/from/config".into()),
        };
        let cli = cli(&["cal.ics", "-s", "500K", "-n", "5", "-o", "chunk", "-d", "/from/flag"]);

        let options = resolve_options(&cli, cfg).unwrap();

        assert_eq!(options.split.max_bytes(), 500 * 1024);
        assert_eq!(options.split.max_events().map(|n| n.get()), Some(5));
        assert_eq!(options.encoding.name(), "windows-1252");
        assert_eq!(options.naming.path(1), PathBuf::from("/from/flag/chunk_part1.ics"));
    }

    #[test]
    fn test_config_fills_missing_flags() {
        let cfg = config::Config {
            max_size: Some(ByteSize::new(2048)),
            overwrite: true,
            output_dir: Some("/from/config".into()),
            ..Default::default()
        };

        let options = resolve_options(&cli(&["cal.ics", "--dry-run"]), cfg).unwrap();

        assert_eq!(options.split.max_bytes(), 2048);
        assert!(options.overwrite);
        assert!(options.dry_run);
        assert_eq!(options.naming.dir(), std::path::Path::new("/from/config"));
    }

    #[test]
    fn test_invalid_size_flag_is_rejected() {
        let result = Cli::try_parse_from(["icsplit", "cal.ics", "-s", "invalid"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let err = resolve_options(&cli(&["cal.ics", "-s", "0K"]), config::Config::default()).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_unknown_encoding_is_rejected() {
        let err = resolve_options(&cli(&["cal.ics", "-e", "klingon"]), config::Config::default()).unwrap_err();
        assert!(err.to_string().contains("Unsupported encoding"));
    }
}
