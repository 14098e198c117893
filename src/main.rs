use clap::{App, Arg};
use postsmith::build::{build_site, Error};
use postsmith::config::Config;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let matches = App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("root")
                .short("r")
                .long("root")
                .value_name("DIR")
                .takes_value(true)
                .help("The project directory (defaults to the current directory)"),
        )
        .get_matches();

    let root = matches
        .value_of("root")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    if let Err(e) = run(&root) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(root: &Path) -> Result<(), Error> {
    info!("{} starting", env!("CARGO_PKG_NAME"));
    let config = Config::from_directory(root)?;
    let summary = build_site(&config)?;
    info!("Done: {} post(s) built.", summary.posts_built);
    Ok(())
}

/// Sends log lines to stderr. `RUST_LOG` overrides the default `info` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
