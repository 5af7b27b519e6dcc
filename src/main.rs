use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser};
use gitstat_core::{AnalysisMode, GitStatConfig, GitStatError, OutputFormat};
use gitstat_history::collect::collect_stats;
use gitstat_history::source::GitCli;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_CONFIG: &str = ".gitstat.toml";

#[derive(Parser)]
#[command(
    name = "gitstat",
    version,
    about = "Repository statistics from local git history",
    long_about = "Repository statistics from local git history.\n\n\
                   Reports contributors, branches and file types, and optionally\n\
                   churn hotspots or author activity. Works offline on local git data.\n\n\
                   Examples:\n  \
                     gitstat                             Analyze the current repository\n  \
                     gitstat --hotspots                  Include hotspot analysis\n  \
                     gitstat --activity                  Include author activity analysis\n  \
                     gitstat --output json               Output in JSON format\n  \
                     gitstat --hotspots --output json    Hotspots in JSON format\n\n\
                   Exit codes:\n  \
                     0  Success\n  \
                     1  General error\n  \
                     2  Not a git repository",
    disable_version_flag = true,
    args_override_self = true
)]
struct Cli {
    /// Output format: text or json
    #[arg(long, default_value = "text")]
    output: OutputFormat,

    /// Analyze and display file hotspots (high churn)
    #[arg(long, overrides_with = "activity")]
    hotspots: bool,

    /// Analyze author activity over time
    #[arg(long, overrides_with = "hotspots")]
    activity: bool,

    /// Path to configuration file (default: .gitstat.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn mode(&self) -> AnalysisMode {
        if self.hotspots {
            AnalysisMode::Hotspots
        } else if self.activity {
            AnalysisMode::Activity
        } else {
            AnalysisMode::Basic
        }
    }
}

/// Parse arguments; help and version exit 0, any usage error exits 1.
fn parse_cli() -> Cli {
    let command = Cli::command().arg(
        Arg::new("version")
            .short('v')
            .long("version")
            .action(ArgAction::Version)
            .help("Print version"),
    );

    let parsed = command
        .try_get_matches()
        .and_then(|matches| Cli::from_arg_matches(&matches));

    match parsed {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(explicit: Option<&Path>, root: &Path) -> Result<GitStatConfig, GitStatError> {
    match explicit {
        Some(path) => GitStatConfig::from_file(path),
        None => {
            let default_path = root.join(DEFAULT_CONFIG);
            if default_path.exists() {
                GitStatConfig::from_file(&default_path)
            } else {
                Ok(GitStatConfig::default())
            }
        }
    }
}

/// Top-level directory of the working tree containing `cwd`.
///
/// A bare repository has no working tree and counts as not a repository.
fn working_tree_root(cwd: &Path) -> Result<PathBuf, GitStatError> {
    git2::Repository::discover(cwd)
        .ok()
        .and_then(|repo| repo.workdir().map(Path::to_path_buf))
        .ok_or_else(|| GitStatError::NotARepository(cwd.to_path_buf()))
}

fn spinner() -> indicatif::ProgressBar {
    let pb = indicatif::ProgressBar::new_spinner();
    if let Ok(style) = indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})")
    {
        pb.set_style(style);
    }
    pb.set_message("Reading git history...");
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn run(cli: &Cli) -> Result<(), GitStatError> {
    let cwd = std::env::current_dir()?;
    let root = working_tree_root(&cwd)?;
    let config = load_config(cli.config.as_deref(), &root)?;

    // `git log` paths are root-relative; every query must run from the root.
    let source = GitCli::new(&root);
    let repo_name = source
        .workdir()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    let mode = cli.mode();
    debug!(
        repository = %repo_name,
        workdir = %source.workdir().display(),
        %mode,
        format = %cli.output,
        "collecting statistics"
    );

    let progress = (cli.output == OutputFormat::Text && std::io::stderr().is_terminal())
        .then(spinner);

    let today = chrono::Local::now().date_naive();
    let stats = collect_stats(&source, &repo_name, &config, mode, today);

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let report = gitstat_report::render(&stats, &config.display, cli.output)?;
    print!("{report}");
    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = parse_cli();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
