use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser as _;
use ide_prune::paths::{DEFAULT_FILTER, DEFAULT_RETAIN_FROM};
use ide_prune::{LinePrompt, Locations, Summary};
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
#[command(version, about)]
struct Options {
    /// Case-insensitive name fragment identifying the IDE's folders
    #[arg(long, default_value = DEFAULT_FILTER)]
    filter: String,

    /// Parent folder to scan, may be repeated (replaces the default list)
    #[arg(long = "parent", value_name = "PATH")]
    parents: Vec<String>,

    /// Folder holding the installed app bundles; the newest one is kept
    #[arg(long, value_name = "PATH", default_value = DEFAULT_RETAIN_FROM)]
    retain_from: String,

    /// Print the outcome as JSON on stdout; progress moves to stderr
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Use verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let options = Options::parse();
    init_tracing(options.verbose);

    match real_main(options) {
        Ok(summary) if summary.has_failures() => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn real_main(options: Options) -> anyhow::Result<Summary> {
    let parents = if options.parents.is_empty() {
        Locations::default().parents().to_vec()
    } else {
        options.parents
    };
    let locations = Locations::new(parents, options.retain_from, &options.filter);

    if options.json {
        let mut prompt = LinePrompt::stdin_stderr();
        let summary = ide_prune::run(&locations, &mut prompt, &mut io::stderr())?;
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &summary)?;
        writeln!(stdout)?;
        Ok(summary)
    } else {
        let mut prompt = LinePrompt::stdio();
        ide_prune::run(&locations, &mut prompt, &mut io::stdout())
    }
}
