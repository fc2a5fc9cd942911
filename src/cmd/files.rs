use std::path::Path;

use roam_pub::{Result, Settings, VertexKind};

pub fn run(settings: &Settings, file: &Path, json: bool) -> Result<()> {
    let graph = super::load::graph(settings, file)?;

    let files: Vec<(&str, &str, &str)> = graph
        .file_references()
        .filter_map(|v| match &v.kind {
            VertexKind::FileReference {
                source_url, file_name, ..
            } => Some((v.stable_id.as_str(), file_name.as_str(), source_url.as_str())),
            _ => None,
        })
        .collect();

    if json {
        let list: Vec<serde_json::Value> = files
            .iter()
            .map(|(uid, name, source)| serde_json::json!({"uid": uid, "file-name": name, "source": source}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else if files.is_empty() {
        println!("No managed files");
    } else {
        for (uid, name, source) in &files {
            println!("{}\t{}\t{}", uid, name, source);
        }
    }
    Ok(())
}
