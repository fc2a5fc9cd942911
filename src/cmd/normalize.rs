use std::path::Path;

use roam_pub::{Result, Settings};

pub fn run(settings: &Settings, file: &Path, pretty: bool) -> Result<()> {
    let graph = super::load::graph(settings, file)?;
    tracing::info!(vertices = graph.len(), roots = graph.roots.len(), "normalized network");

    let out = if pretty {
        serde_json::to_string_pretty(&graph)?
    } else {
        serde_json::to_string(&graph)?
    };
    println!("{}", out);
    Ok(())
}
