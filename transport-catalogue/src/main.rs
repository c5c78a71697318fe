use std::io::{self, BufReader, BufWriter};
use std::process::ExitCode;

use tracing::error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use transport_catalogue::requests::{RequestError, make_base, process_requests};

const USAGE: &str = "Usage: transport-catalogue [make_base|process_requests]";

/// Log to stderr so stdout carries only the JSON response.
fn init_logger() {
    let default_level = LevelFilter::INFO;
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    let env_filter = EnvFilter::try_new(rust_log).unwrap_or_else(|err| {
        eprintln!(
            "invalid {}, falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            err,
        );
        EnvFilter::new(default_level.to_string())
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn run(mode: &str) -> Result<(), RequestError> {
    let input = BufReader::new(io::stdin().lock());
    match mode {
        "make_base" => make_base(input),
        _ => process_requests(input, BufWriter::new(io::stdout().lock())),
    }
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let mode = match (args.next(), args.next()) {
        (Some(mode), None) if mode == "make_base" || mode == "process_requests" => mode,
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    init_logger();

    match run(&mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(mode = %mode, "{e}");
            ExitCode::FAILURE
        }
    }
}
