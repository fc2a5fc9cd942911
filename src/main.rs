use std::process::ExitCode;

use clap::Parser;
use roam_pub::constants as C;
use roam_pub::{Cli, Command};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let settings = cmd::load::settings(cli.lenient);
    tracing::debug!(file = %cli.command.file().display(), ?settings, "running command");

    let result = match cli.command {
        Command::Validate { file } => cmd::validate::run(&settings, &file, cli.json),
        Command::Normalize { file, pretty } => cmd::normalize::run(&settings, &file, pretty),
        Command::Tree { file } => cmd::tree::run(&settings, &file, cli.json),
        Command::Files { file } => cmd::files::run(&settings, &file, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by `ROAM_PUB_LOG` (default `warn`)
fn init_logging() {
    let filter = EnvFilter::try_from_env(C::ENV_LOG).unwrap_or_else(|_| EnvFilter::new(C::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

mod cmd {
    pub mod load;
    pub mod validate;
    pub mod normalize;
    pub mod tree;
    pub mod files;
}
