use clap::Parser;
use hierscan::{write_json, ScanConfig, ScanError, Scanner};
use log::error;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version)]
#[command(about = "Find C++ classes deriving from root classes and describe their constructors", long_about = None)]
struct Args {
    /// Directory scanned recursively for headers
    #[arg(short, long)]
    input: PathBuf,

    /// Write the JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory searched for #include targets (repeatable)
    #[arg(long = "include-path", value_name = "DIR")]
    include_paths: Vec<PathBuf>,

    /// Root base class name (repeatable)
    #[arg(long = "root-class", value_name = "NAME", required = true)]
    root_classes: Vec<String>,

    /// Header extension to scan (repeatable, default .h)
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Parse headers in parallel
    #[arg(long)]
    parallel: bool,

    /// Skip headers with syntax errors instead of scanning what was recovered
    #[arg(long)]
    strict: bool,

    /// Only scan declarations written in each header itself
    #[arg(long)]
    no_follow_includes: bool,

    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn scan_config(&self) -> ScanConfig {
        let mut config = if self.strict {
            ScanConfig::strict()
        } else {
            ScanConfig::default()
        };

        config = config
            .with_parallel(self.parallel)
            .with_include_paths(self.include_paths.iter().cloned());
        if !self.extensions.is_empty() {
            config = config.with_header_extensions(self.extensions.iter().cloned());
        }
        config.parse.follow_includes = !self.no_follow_includes;
        config
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> Result<(), ScanError> {
    let scanner = Scanner::cpp(args.scan_config());
    let report = scanner.scan(&args.input, &args.root_classes)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| ScanError::Output(format!("{}: {e}", path.display())))?;
            write_json(&report.records, BufWriter::new(file))
        }
        None => write_json(&report.records, io::stdout().lock()),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
