//! CLI entry point for zonefence.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `zonefence-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zonefence_app::{
    CheckInput, ExplainOutput, OutputFormat, format_explain, format_rules, parse_report_json,
    render_report, run_check, run_explain, run_rules, serialize_report, verdict_exit_code,
};

/// Exit code for configuration and runtime errors.
const EXIT_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "zonefence",
    version,
    about = "Folder-based architecture guardrails for TypeScript projects"
)]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CheckFormat {
    Text,
    Json,
    Markdown,
    Github,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RulesFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check import boundaries in the specified directory.
    Check {
        /// Directory to check.
        #[arg(default_value = ".")]
        path: Utf8PathBuf,

        /// Path to tsconfig.json (default: nearest one at or above PATH).
        #[arg(long, short)]
        config: Option<Utf8PathBuf>,

        /// Disable colored output.
        #[arg(long)]
        no_color: bool,

        /// Output format for stdout.
        #[arg(long, value_enum, default_value_t = CheckFormat::Text)]
        format: CheckFormat,

        /// Also write the JSON report to this file.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,
    },

    /// Show the effective policy of every directory.
    Rules {
        /// Directory to inspect.
        #[arg(default_value = ".")]
        path: Utf8PathBuf,

        #[arg(long, value_enum, default_value_t = RulesFormat::Text)]
        format: RulesFormat,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a rule or violation code with remediation guidance.
    Explain {
        /// The rule (e.g., "import-boundary") or code (e.g., "denied_import") to explain.
        identifier: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("zonefence error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "zonefence=debug" } else { "zonefence=warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    match cli.cmd {
        Commands::Check {
            path,
            config,
            no_color,
            format,
            report_out,
        } => cmd_check(&path, config.as_deref(), no_color, format, report_out.as_deref()),
        Commands::Rules { path, format } => cmd_rules(&path, format),
        Commands::Md { report, output } => cmd_md(&report, output.as_deref()),
        Commands::Explain { identifier } => Ok(cmd_explain(&identifier)),
    }
}

fn canonical_dir(path: &Utf8Path) -> anyhow::Result<Utf8PathBuf> {
    let abs = std::fs::canonicalize(path).with_context(|| format!("resolve path: {path}"))?;
    let abs = Utf8PathBuf::from_path_buf(abs)
        .map_err(|p| anyhow::anyhow!("path is not valid UTF-8: {}", p.display()))?;
    if !abs.is_dir() {
        anyhow::bail!("not a directory: {path}");
    }
    Ok(abs)
}

fn cmd_check(
    path: &Utf8Path,
    config: Option<&Utf8Path>,
    no_color: bool,
    format: CheckFormat,
    report_out: Option<&Utf8Path>,
) -> anyhow::Result<u8> {
    let root = canonical_dir(path)?;
    let tsconfig = config
        .map(|c| {
            std::fs::canonicalize(c)
                .with_context(|| format!("resolve tsconfig: {c}"))
                .and_then(|p| {
                    Utf8PathBuf::from_path_buf(p)
                        .map_err(|p| anyhow::anyhow!("path is not valid UTF-8: {}", p.display()))
                })
        })
        .transpose()?;

    let output = run_check(CheckInput {
        root: &root,
        tsconfig: tsconfig.as_deref(),
    })?;
    let report = output.report;

    if let Some(out) = report_out {
        write_file(out, &serialize_report(&report)?).context("write report")?;
    }

    let color = !no_color && std::env::var_os("NO_COLOR").is_none();
    let rendered = match format {
        CheckFormat::Text => {
            println!("Checking import boundaries in: {root}\n");
            if report.data.imports_checked == 0 {
                println!("No imports found to check.");
                return Ok(0);
            }
            render_report(&report, OutputFormat::Text { color })?
        }
        CheckFormat::Json => render_report(&report, OutputFormat::Json)?,
        CheckFormat::Markdown => render_report(&report, OutputFormat::Markdown)?,
        CheckFormat::Github => render_report(&report, OutputFormat::Github)?,
    };
    print!("{rendered}");

    Ok(verdict_exit_code(report.verdict) as u8)
}

fn cmd_rules(path: &Utf8Path, format: RulesFormat) -> anyhow::Result<u8> {
    let root = canonical_dir(path)?;
    let rules = run_rules(&root)?;
    match format {
        RulesFormat::Text => print!("{}", format_rules(&rules)),
        RulesFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&rules).context("serialize rules")?
            );
        }
    }
    Ok(0)
}

fn write_file(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, data).with_context(|| format!("write: {path}"))
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<u8> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {report_path}"))?;
    let report = parse_report_json(&report_text)?;
    let md = render_report(&report, OutputFormat::Markdown)?;

    match output {
        Some(out_path) => write_file(out_path, md.as_bytes()).context("write markdown output")?,
        None => print!("{md}"),
    }
    Ok(0)
}

fn cmd_explain(identifier: &str) -> u8 {
    let output = run_explain(identifier);
    let text = format_explain(&output);
    match output {
        ExplainOutput::Found { .. } => {
            print!("{text}");
            0
        }
        ExplainOutput::NotFound { .. } => {
            eprint!("{text}");
            1
        }
    }
}
