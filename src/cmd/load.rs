//! Shared input handling for subcommands

use std::path::Path;

use roam_pub::{Network, NormalizedGraph, Normalizer, Result, Settings};

/// Environment settings with command-line flags applied on top
pub fn settings(lenient: bool) -> Settings {
    let settings = Settings::from_env();
    if lenient {
        settings.with_strict_headings(false)
    } else {
        settings
    }
}

pub fn network(file: &Path) -> Result<Network> {
    Network::load(file)
}

/// Load, pre-validate and normalize `file`
pub fn graph(settings: &Settings, file: &Path) -> Result<NormalizedGraph> {
    let network = network(file)?;
    Normalizer::new(settings.clone()).normalize(&network)
}
