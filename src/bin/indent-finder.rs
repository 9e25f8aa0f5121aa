//! indent-finder CLI - Report the indentation style of source files.

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use indent_finder::driver::{analyze_paths, AnalysisOptions, FileReport, MAX_BYTES};
use indent_finder::errors::{exit_code, IndentError};
use indent_finder::output::{format_json, format_line, OutputFormat};
use indent_finder::resolve::{Verdict, DEFAULT_TAB_WIDTH};
use indent_finder::walker::{collect_files, WalkOptions};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Display the indentation used in the given files.
///
/// Possible answers are `space X`, `tab X` and `mixed tab X space Y`.
/// Mixed means tabs of 8 columns at the start of the line, then spaces
/// up to the next indentation level.
#[derive(Parser)]
#[command(name = "indent-finder")]
#[command(version)]
struct Cli {
    /// Files or directories to analyse
    #[arg(required_unless_present = "completions")]
    paths: Vec<PathBuf>,

    /// Output suitable to use inside vim
    #[arg(long, conflicts_with = "json")]
    vim_output: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Tab width reported for tab indented files
    #[arg(long, default_value_t = DEFAULT_TAB_WIDTH)]
    default_tab_width: usize,

    /// Indentation width reported when nothing can be decided
    #[arg(long, default_value_t = 4)]
    default_spaces: usize,

    /// Fall back to tabs instead of spaces when nothing can be decided
    #[arg(long)]
    default_to_tabs: bool,

    /// Bytes read from the start of each file
    #[arg(long, default_value_t = MAX_BYTES)]
    max_bytes: usize,

    /// Include hidden files when expanding directories
    #[arg(long)]
    hidden: bool,

    /// Do not apply .gitignore rules when expanding directories
    #[arg(long)]
    no_ignore: bool,

    /// Follow symbolic links when expanding directories
    #[arg(long)]
    follow_symlinks: bool,

    /// Log analysis decisions to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Cli {
    fn analysis_options(&self) -> AnalysisOptions {
        let options = AnalysisOptions {
            default_tab_width: self.default_tab_width,
            default_result: Verdict::Space {
                width: self.default_spaces,
            },
            max_bytes: self.max_bytes,
        };
        if self.default_to_tabs {
            options.default_to_tabs()
        } else {
            options
        }
    }

    fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.vim_output {
            OutputFormat::Vim
        } else {
            OutputFormat::Plain
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        generate(shell, &mut Cli::command(), "indent-finder", &mut std::io::stdout());
        return;
    }

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            if cli.json {
                #[derive(Serialize)]
                struct ErrorOutput {
                    error: String,
                }

                let payload = ErrorOutput {
                    error: e.to_string(),
                };

                let json = serde_json::to_string(&payload)
                    .unwrap_or_else(|_| "{\"error\":\"serialization failed\"}".to_string());
                eprintln!("{json}");
            } else if !cli.vim_output {
                eprintln!("error: {}", e);
            }
            std::process::exit(exit_code(&e));
        }
    }
}

/// Logs go to stderr so that stdout stays clean for the editor.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "indent_finder=debug"
    } else {
        "indent_finder=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Analyse every requested file and print the results.
///
/// Returns the exit code of the first per-file failure, or 0. In vim mode
/// failed files are skipped and the run still succeeds.
fn run(cli: &Cli) -> Result<i32, IndentError> {
    let walk_opts = WalkOptions {
        include_hidden: cli.hidden,
        respect_gitignore: !cli.no_ignore,
        follow_symlinks: cli.follow_symlinks,
        ..Default::default()
    };

    let mut files = Vec::new();
    for path in &cli.paths {
        if path.is_dir() {
            let found = collect_files(path, &walk_opts)?;
            if found.is_empty() {
                return Err(IndentError::NoFilesFound(path.clone()));
            }
            files.extend(found);
        } else {
            // Missing files are reported per file by the driver.
            files.push(path.clone());
        }
    }

    let options = cli.analysis_options();
    let reports = analyze_paths(&files, &options);
    let failure = reports
        .iter()
        .find_map(|r| r.result.as_ref().err())
        .map_or(0, exit_code);

    let format = cli.output_format();
    if format == OutputFormat::Json {
        println!("{}", format_json(&reports)?);
        return Ok(failure);
    }

    print_reports(&reports, format, &options, files.len() > 1);
    if format == OutputFormat::Vim {
        return Ok(0);
    }
    Ok(failure)
}

fn print_reports(
    reports: &[FileReport],
    format: OutputFormat,
    options: &AnalysisOptions,
    with_path: bool,
) {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for report in reports {
        match &report.result {
            Ok(verdict) => {
                let line = format_line(
                    &report.path,
                    verdict,
                    format,
                    options.default_tab_width,
                    with_path,
                );
                writeln!(out, "{}", line).ok();
            }
            // Errors never reach vim: it would execute them as commands.
            Err(_) if format == OutputFormat::Vim => {}
            Err(e) => {
                out.flush().ok();
                eprintln!("error: {}", e);
            }
        }
    }
}
