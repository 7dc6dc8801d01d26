use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use deadfiles::core::config::normalize_extensions;
use deadfiles::core::usage::files_in_directory;
use deadfiles::core::{
    classify_usage, DependencyAnalyzer, ResolverConfig, ResolverJsonConfig, StdioSink, TeeSink,
    VecSink,
};
use deadfiles::formatters::{JsonCompactFormatter, TextFormatter};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "deadfiles",
    version = "0.1.0",
    author = "deadfiles developers",
    about = "Find files and directories that nothing in the project references"
)]
struct Cli {
    /// Project root directory
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Comma-separated entry files or directories, relative to the root
    #[arg(short, long, value_name = "PATHS", value_delimiter = ',')]
    entry: Vec<String>,

    /// Comma-separated extensions whose files are scanned for references
    #[arg(short = 'x', long, value_name = "EXTS", value_delimiter = ',')]
    extensions: Vec<String>,

    /// Diagnostic verbosity: 1 = errors, 2 = warnings, 3 = info
    #[arg(short, long, value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(1..=3))]
    log_level: Option<u8>,

    /// JSON config file; command-line flags take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format: text, json
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the JSON report here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Comma-separated text reports to print
    #[arg(
        long,
        value_name = "REPORTS",
        value_enum,
        value_delimiter = ',',
        default_values_t = [ReportKind::UnusedFiles, ReportKind::UnusedDirs]
    )]
    report: Vec<ReportKind>,

    /// Only list unused files at least this large
    #[arg(long, value_name = "KB", default_value_t = 0.0)]
    threshold_kb: f64,

    /// Comma-separated extensions left out of the unused files listing
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    exclude_ext: Vec<String>,

    /// Directory, relative to the root, for the used-in-dir and unused-in-dir reports
    #[arg(long, value_name = "DIR")]
    dir: Option<String>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum ReportKind {
    UnusedFiles,
    UnusedDirs,
    UsedInDir,
    UnusedInDir,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

fn build_config(cli: &Cli) -> Result<ResolverConfig> {
    let file_config = match &cli.config {
        Some(path) => ResolverJsonConfig::from_file(path)?,
        None => ResolverJsonConfig::default(),
    };

    let root = match (&cli.input, &file_config.root) {
        (Some(input), _) => input.clone(),
        (None, Some(root)) => PathBuf::from(root),
        (None, None) => {
            bail!("no project root given; pass --input or set \"root\" in the config file")
        }
    };
    let entry_points = if cli.entry.is_empty() {
        file_config.entry_points.clone()
    } else {
        cli.entry.clone()
    };
    let extensions = if cli.extensions.is_empty() {
        file_config.extensions.clone()
    } else {
        cli.extensions.clone()
    };

    let mut config = ResolverConfig::new(root)
        .with_entry_points(entry_points)
        .with_extensions(extensions);
    if let Some(level) = cli.log_level.or(file_config.log_level) {
        config = config.with_log_level(level);
    }
    Ok(config)
}

fn status(enabled: bool, message: impl Display) {
    if enabled {
        println!("{}", message);
    }
}

fn run(cli: Cli) -> Result<()> {
    let start_time = Instant::now();
    let config = build_config(&cli)?;

    if !config.root.is_dir() {
        bail!("project root is not a directory: {}", config.root.display());
    }

    // stdout carries the JSON document unless it goes to a file
    let show_status = cli.format == OutputFormat::Text || cli.output.is_some();

    status(show_status, "DEADFILES - Unused File Analysis");
    status(show_status, format!("Root: {}", config.root.display()));
    status(show_status, format!("Entry points: {:?}", config.entry_points));
    status(show_status, format!("Extensions: {:?}", config.extensions));

    let stdio_sink = StdioSink::new(config.log_level);
    let collector = VecSink::new();
    let sink = TeeSink::new(&stdio_sink, &collector);

    let analyzer = DependencyAnalyzer::new(config);
    let closure = analyzer.analyze(&sink);
    let root = analyzer.config().root.clone();
    let usage = classify_usage(&root, &closure.reachable);

    status(
        show_status,
        format!(
            "Analysis completed in {:.2}s: {} used, {} unused files",
            start_time.elapsed().as_secs_f64(),
            usage.used_files.len(),
            usage.unused_files.len()
        ),
    );

    match cli.format {
        OutputFormat::Text => {
            let exclude: BTreeSet<String> = normalize_extensions(&cli.exclude_ext);
            let formatter = TextFormatter::new();
            let stdout = io::stdout();
            let mut out = stdout.lock();

            for report in &cli.report {
                match report {
                    ReportKind::UnusedFiles => formatter.write_unused_files(
                        &mut out,
                        &root,
                        &usage,
                        cli.threshold_kb,
                        &exclude,
                    )?,
                    ReportKind::UnusedDirs => formatter.write_unused_directories(&mut out, &usage)?,
                    ReportKind::UsedInDir | ReportKind::UnusedInDir => {
                        let dir = cli.dir.as_deref().context(
                            "--dir is required for the used-in-dir and unused-in-dir reports",
                        )?;
                        let used = *report == ReportKind::UsedInDir;
                        if let Some((dir, files)) =
                            files_in_directory(&root, dir, &closure.reachable, used, &sink)
                        {
                            formatter.write_directory_files(&mut out, &dir, &files, used)?;
                        }
                    }
                }
                writeln!(out)?;
            }
        }
        OutputFormat::Json => {
            let formatter = JsonCompactFormatter::new();
            let diagnostics = collector.snapshot();
            match &cli.output {
                Some(path) => {
                    formatter.format_to_file(&root, &closure, &usage, &diagnostics, path)?;
                    status(show_status, format!("JSON output: {}", path.display()));
                }
                None => {
                    let json = formatter.format_report(&root, &closure, &usage, &diagnostics)?;
                    println!("{}", json);
                }
            }
        }
    }

    status(
        show_status,
        format!(
            "Total execution time: {:.2}s",
            start_time.elapsed().as_secs_f64()
        ),
    );

    Ok(())
}
