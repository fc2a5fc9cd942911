use std::path::Path;

use roam_pub::tree::{build_forest, render_outline, TreeNode};
use roam_pub::{Result, Settings};

pub fn run(settings: &Settings, file: &Path, json: bool) -> Result<()> {
    let graph = super::load::graph(settings, file)?;
    let forest = build_forest(&graph);

    if json {
        let trees: Vec<serde_json::Value> = forest.iter().map(to_json).collect();
        println!("{}", serde_json::to_string_pretty(&trees)?);
    } else {
        print!("{}", render_outline(&forest));
    }
    Ok(())
}

/// Nested `{uid, vertex-type, text, children}` objects
fn to_json(node: &TreeNode<'_>) -> serde_json::Value {
    serde_json::json!({
        "uid": node.vertex.stable_id,
        "vertex-type": node.vertex.kind.tag(),
        "text": node.vertex.text,
        "children": node.children.iter().map(to_json).collect::<Vec<_>>(),
    })
}
