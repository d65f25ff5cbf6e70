//! corpus_sweep CLI - randomized corpus regression sweep
//!
//! # Examples
//!
//! ```bash
//! # Sweep a corpus with an external test harness
//! corpus_sweep ~/corpus \
//!     --decode-cmd "luajit tests/Test.lua -o" \
//!     --compress-cmd "luajit tests/Test.lua -c"
//!
//! # Reproduce a failing order
//! corpus_sweep ~/corpus --seed 42 \
//!     --decode-cmd "harness decode" --compress-cmd "harness roundtrip"
//!
//! # Raise the size threshold and skip backup files too
//! corpus_sweep ~/corpus --max-size 4M --exclude compress --exclude .bak \
//!     --decode-cmd "harness decode" --compress-cmd "harness roundtrip"
//!
//! # Show what would be probed, without probing
//! corpus_sweep ~/corpus --list
//!
//! # Generate shell completions
//! corpus_sweep --completions bash > ~/.bash_completion.d/corpus_sweep
//! ```

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use corpus_sweep::{
    collect_candidates, shuffle_candidates, CandidateFilter, CommandProber, Driver, Error, Verdict,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(serde::Deserialize)]
struct Config {
    harness: Option<HarnessConfig>,
    filter: Option<FilterConfig>,
}

#[derive(serde::Deserialize)]
struct HarnessConfig {
    decode: Option<String>,
    compress: Option<String>,
    scratch: Option<PathBuf>,
}

#[derive(serde::Deserialize)]
struct FilterConfig {
    max_size: Option<String>,
    exclude: Option<Vec<String>>,
}

#[derive(Parser)]
#[command(
    name = "corpus_sweep",
    about = "Randomized corpus regression sweep - every file the library decodes must round-trip",
    version,
    after_help = "EXAMPLES:
    corpus_sweep ~/corpus --decode-cmd 'harness decode' --compress-cmd 'harness roundtrip'
    corpus_sweep ~/corpus --seed 42 --decode-cmd 'harness decode' --compress-cmd 'harness roundtrip'
    corpus_sweep ~/corpus --list"
)]
struct Cli {
    /// Root directory to scan for probe candidates
    #[arg(required_unless_present = "completions")]
    root: Option<PathBuf>,

    /// Decode probe command; the candidate path is appended
    #[arg(long, value_name = "CMD")]
    decode_cmd: Option<String>,

    /// Compress probe command; the candidate path and scratch path are appended
    #[arg(long, value_name = "CMD")]
    compress_cmd: Option<String>,

    /// Scratch output path for compress probes (overwritten every probe)
    #[arg(long)]
    scratch: Option<PathBuf>,

    /// Maximum candidate file size (e.g., 512K, 1M)
    #[arg(long, value_parser = parse_size)]
    max_size: Option<u64>,

    /// Skip paths containing this substring (can be repeated)
    #[arg(long = "exclude", value_name = "MARKER")]
    exclude_markers: Vec<String>,

    /// Fix the shuffle seed for a reproducible iteration order
    #[arg(long)]
    seed: Option<u64>,

    /// List the shuffled candidates without probing
    #[arg(short, long)]
    list: bool,

    /// Quiet mode - only show warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Verbose mode - show sweep totals and decode-probe rejections
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completions for the specified shell
    #[arg(long, value_enum)]
    completions: Option<Shell>,
}

fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_uppercase();
    let (num, multiplier) = if s.ends_with("G") || s.ends_with("GB") {
        let num_str = s.trim_end_matches("GB").trim_end_matches('G');
        (num_str, 1024 * 1024 * 1024)
    } else if s.ends_with("M") || s.ends_with("MB") {
        let num_str = s.trim_end_matches("MB").trim_end_matches('M');
        (num_str, 1024 * 1024)
    } else if s.ends_with("K") || s.ends_with("KB") {
        let num_str = s.trim_end_matches("KB").trim_end_matches('K');
        (num_str, 1024)
    } else {
        (s.as_str(), 1)
    };

    num.parse::<u64>()
        .map(|n| n * multiplier)
        .map_err(|_| format!("Invalid size: {}", s))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle completions generation
    if let Some(shell) = cli.completions {
        generate(shell, &mut Cli::command(), "corpus_sweep", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::RoundTrip { path, code }) => {
            eprintln!("{} ERROR: Exit code is {}", path, code);
            propagate_exit_code(code)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = load_config(cli.verbose);

    let filter = build_filter(&cli, config.as_ref());
    let root = cli.root.as_deref().expect("clap enforces the root argument");
    let mut candidates = collect_candidates(root, &filter);

    if cli.verbose {
        println!(
            "Collected {} candidates under {}.",
            candidates.len(),
            root.display()
        );
    }

    if cli.list {
        shuffle_candidates(&mut candidates, cli.seed);
        for path in &candidates {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let prober = build_prober(&cli, config.as_ref())?;
    let quiet = cli.quiet;
    let verbose = cli.verbose;

    let report = Driver::new(prober)
        .seed(cli.seed)
        .on_outcome(move |path, verdict| match verdict {
            Verdict::Passed => {
                if !quiet {
                    println!("{} OK", path.display());
                }
            }
            Verdict::Unreadable => {
                eprintln!("WARNING: cannot open: {}", path.display());
            }
            Verdict::Rejected { code } => {
                if verbose {
                    eprintln!(
                        "{} rejected by decode probe (exit code {})",
                        path.display(),
                        code
                    );
                }
            }
        })
        .run(candidates)?;

    if cli.verbose {
        println!(
            "Swept {} candidates: {} passed, {} rejected, {} unreadable.",
            report.candidates, report.passed, report.rejected, report.unreadable
        );
    }

    Ok(())
}

fn build_filter(cli: &Cli, config: Option<&Config>) -> CandidateFilter {
    let mut filter = CandidateFilter::default();
    let file_filter = config.and_then(|c| c.filter.as_ref());

    if let Some(max_size) = file_filter.and_then(|f| f.max_size.as_deref()) {
        match parse_size(max_size) {
            Ok(n) => filter.max_file_size = n,
            Err(e) => eprintln!("Warning: ignoring max_size from config: {}", e),
        }
    }
    if let Some(exclude) = file_filter.and_then(|f| f.exclude.clone()) {
        filter.exclude_markers = exclude;
    }

    // Command line wins over the config file.
    if let Some(n) = cli.max_size {
        filter.max_file_size = n;
    }
    if !cli.exclude_markers.is_empty() {
        filter.exclude_markers = cli.exclude_markers.clone();
    }

    filter
}

fn build_prober(cli: &Cli, config: Option<&Config>) -> Result<CommandProber, Error> {
    let harness = config.and_then(|c| c.harness.as_ref());

    let decode = cli
        .decode_cmd
        .clone()
        .or_else(|| harness.and_then(|h| h.decode.clone()))
        .ok_or(Error::EmptyCommand { role: "decode" })?;
    let compress = cli
        .compress_cmd
        .clone()
        .or_else(|| harness.and_then(|h| h.compress.clone()))
        .ok_or(Error::EmptyCommand { role: "compress" })?;
    let scratch = cli
        .scratch
        .clone()
        .or_else(|| harness.and_then(|h| h.scratch.clone()))
        .unwrap_or_else(|| std::env::temp_dir().join("corpus_sweep.out"));

    CommandProber::new(&decode, &compress, scratch)
}

/// Mirror the failing probe's exit status. `ExitCode` only carries a byte;
/// a code whose low byte is zero still has to read as a failure.
fn propagate_exit_code(code: i32) -> ExitCode {
    let byte = (code & 0xff) as u8;
    if byte == 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::from(byte)
    }
}

fn load_config(verbose: bool) -> Option<Config> {
    let config_dir = dirs_next::config_dir()?;
    let config_path = config_dir.join("corpus_sweep.toml");

    if config_path.exists() {
        if verbose {
            println!("Reading config from: {}", config_path.display());
        }
        match std::fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str::<Config>(&content) {
                Ok(config) => return Some(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file {}: {}",
                        config_path.display(),
                        e
                    );
                }
            },
            Err(e) => {
                eprintln!(
                    "Warning: Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
        }
    }
    None
}
