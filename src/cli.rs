// Command-line front end shared by the `hcasl` and `hcasl-char` binaries.
//
// The two binaries have the same surface; only the unit mode and the
// program name differ. Flags follow the classic tool: -n/-o/-v plus
// positional input files, with `-` meaning stdin on both sides.

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, CommandFactory, FromArgMatches, Parser, ValueHint};

use crate::io::{self, Input, Mode};

/// Sliding-window stream printer.
#[derive(Parser, Debug)]
#[command(about = "Repeat 'head -c N' with a 1-unit shift per output line")]
struct Cli {
    /// Print the N units per line (N >= 1).
    #[arg(
        short = 'n',
        value_name = "N",
        default_value_t = 8,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    units: u64,

    /// Place output in FILE, or stdout (`-`).
    #[arg(short = 'o', value_name = "FILE", default_value = "-")]
    output: String,

    /// Show program's version number and exit.
    #[arg(short = 'v', action = ArgAction::SetTrue)]
    version: bool,

    /// Output run stats as JSON to stderr.
    #[arg(long = "json")]
    json_output: bool,

    /// Input files (`-` means stdin; no files reads stdin once).
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    files: Vec<String>,
}

fn parse(program: &'static str) -> Cli {
    let cmd = Cli::command().name(program);
    let matches = cmd.get_matches();
    // Matches came from the same definition, so this cannot fail.
    Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

/// Main CLI entry point for both binaries. Parses arguments, runs every
/// configured source against one shared window, maps the result to an exit
/// status.
pub fn run(mode: Mode, program: &'static str) -> ! {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = parse(program);

    if cli.version {
        eprintln!("{program} {}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    let width = cli.units as usize;

    let output_path = (cli.output != "-").then(|| PathBuf::from(&cli.output));
    let mut sink = match io::open_sink(output_path.as_deref()) {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("{program}: {}: {e}", cli.output);
            process::exit(1);
        }
    };

    let inputs: Vec<Input> = cli.files.iter().map(|arg| Input::from_arg(arg)).collect();

    let report = match io::run(&inputs, mode, width, &mut sink) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{program}: {e}");
            process::exit(1);
        }
    };

    for failure in &report.failures {
        eprintln!("{program}: {}: {}", failure.input, failure.error);
    }

    if let Err(e) = sink.flush() {
        eprintln!("{program}: write flush error: {e}");
        process::exit(1);
    }

    if cli.json_output {
        let json = serde_json::json!({
            "program": program,
            "width": width,
            "sources": report.sources,
            "units": report.units,
            "lines": report.lines,
            "open_failures": report.failures.len(),
        });
        eprintln!("{json}");
    }

    process::exit(if report.success() { 0 } else { 1 });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
