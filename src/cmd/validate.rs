use std::path::Path;

use roam_pub::{Result, Settings};

pub fn run(settings: &Settings, file: &Path, json: bool) -> Result<()> {
    let network = super::load::network(file)?;
    let result = network.validate(settings);

    if json {
        let report = serde_json::json!({
            "file": file.display().to_string(),
            "entities": network.len(),
            "valid": result.is_valid(),
            "errors": result.messages(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if result.is_valid() {
        println!("{}: {} entities, ok", file.display(), network.len());
    }

    result.into_result()
}
