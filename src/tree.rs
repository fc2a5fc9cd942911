//! Tree view over a normalized graph
//!
//! Expands each root depth-first along `children`. Child ids missing from the
//! graph are skipped, and a vertex already on the current path is not
//! expanded again. Building, walking and dropping use explicit stacks, so a
//! long chain of nested blocks cannot exhaust the thread stack.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use crate::constants as C;
use crate::vertex::{NormalizedGraph, NormalizedVertex, VertexKind};

/// One vertex with its expanded children, borrowing from the graph
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<'a> {
    pub vertex: &'a NormalizedVertex,
    pub children: Vec<TreeNode<'a>>,
}

impl<'a> TreeNode<'a> {
    /// Visit this node and its descendants in pre-order with their depth
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&TreeNode<'a>, usize),
    {
        let mut pending = vec![(self, 0usize)];
        while let Some((node, depth)) = pending.pop() {
            visit(node, depth);
            pending.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
    }

    /// Number of nodes in this subtree
    pub fn size(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_, _| count += 1);
        count
    }
}

impl Drop for TreeNode<'_> {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Build one tree per root, in root order
pub fn build_forest(graph: &NormalizedGraph) -> Vec<TreeNode<'_>> {
    let index = graph.by_stable_id();
    graph.roots().map(|root| expand(root, &index)).collect()
}

/// Partially built node on the expansion stack
struct Frame<'a> {
    vertex: &'a NormalizedVertex,
    next_child: usize,
    children: Vec<TreeNode<'a>>,
}

impl<'a> Frame<'a> {
    fn new(vertex: &'a NormalizedVertex) -> Self {
        Self {
            vertex,
            next_child: 0,
            children: Vec::with_capacity(vertex.children.len()),
        }
    }
}

fn expand<'a>(root: &'a NormalizedVertex, index: &HashMap<&str, &'a NormalizedVertex>) -> TreeNode<'a> {
    let mut stack = vec![Frame::new(root)];
    let mut on_path: HashSet<&'a str> = HashSet::from([root.stable_id.as_str()]);
    let mut finished = None;

    while let Some(frame) = stack.last_mut() {
        let parent = frame.vertex;
        if let Some(id) = parent.children.get(frame.next_child) {
            frame.next_child += 1;
            let Some(child) = index.get(id.as_str()).copied() else {
                tracing::debug!(parent = %parent.stable_id, child = %id, "child missing from graph");
                continue;
            };
            if !on_path.insert(child.stable_id.as_str()) {
                tracing::warn!(parent = %parent.stable_id, child = %id, "cycle in children; not expanding");
                continue;
            }
            stack.push(Frame::new(child));
            continue;
        }

        let Some(done) = stack.pop() else {
            break;
        };
        on_path.remove(done.vertex.stable_id.as_str());
        let node = TreeNode {
            vertex: done.vertex,
            children: done.children,
        };
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => finished = Some(node),
        }
    }

    finished.unwrap_or_else(|| TreeNode {
        vertex: root,
        children: Vec::new(),
    })
}

/// Indented one-line-per-vertex outline of a forest
pub fn render_outline(forest: &[TreeNode<'_>]) -> String {
    let mut out = String::new();
    for tree in forest {
        tree.walk(&mut |node, depth| {
            let _ = writeln!(
                out,
                "{}{} [{}] {}",
                C::OUTLINE_INDENT.repeat(depth),
                marker(&node.vertex.kind),
                node.vertex.stable_id,
                first_line(node.vertex.text.as_deref()),
            );
        });
    }
    out
}

fn marker(kind: &VertexKind) -> String {
    match kind {
        VertexKind::Page => "page".to_string(),
        VertexKind::BlockContent => "-".to_string(),
        VertexKind::BlockHeading { level } => "#".repeat(level.get() as usize),
        VertexKind::FileReference { file_name, .. } => format!("file:{}", file_name),
    }
}

fn first_line(text: Option<&str>) -> &str {
    match text.and_then(|t| t.lines().next()).map(str::trim) {
        Some(line) if !line.is_empty() => line,
        _ => C::EMPTY_TEXT_PLACEHOLDER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, StableId};

    fn uid(s: &str) -> StableId {
        StableId::new(s).unwrap()
    }

    fn vertex(id: &str, kind: VertexKind, text: &str, children: &[&str]) -> NormalizedVertex {
        NormalizedVertex {
            stable_id: uid(id),
            kind,
            text: Some(text.to_string()),
            children: children.iter().map(|c| uid(c)).collect(),
            refs: Vec::new(),
        }
    }

    fn graph() -> NormalizedGraph {
        NormalizedGraph {
            vertices: vec![
                vertex("page", VertexKind::Page, "Test", &["head", "plain"]),
                vertex(
                    "head",
                    VertexKind::BlockHeading {
                        level: HeadingLevel::new(2).unwrap(),
                    },
                    "Section",
                    &["leaf"],
                ),
                vertex("leaf", VertexKind::BlockContent, "leaf text", &[]),
                vertex("plain", VertexKind::BlockContent, "", &["gone"]),
            ],
            roots: vec![uid("page")],
        }
    }

    #[test]
    fn test_build_forest() {
        let graph = graph();
        let forest = build_forest(&graph);
        assert_eq!(forest.len(), 1);
        let root = &forest[0];
        assert_eq!(root.vertex.stable_id.as_str(), "page");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].children[0].vertex.stable_id.as_str(), "leaf");
        // missing child skipped
        assert!(root.children[1].children.is_empty());
        assert_eq!(root.size(), 4);
    }

    #[test]
    fn test_walk_is_preorder_with_depth() {
        let graph = graph();
        let forest = build_forest(&graph);
        let mut seen = Vec::new();
        forest[0].walk(&mut |node, depth| seen.push((node.vertex.stable_id.to_string(), depth)));
        let expected = [("page", 0), ("head", 1), ("leaf", 2), ("plain", 1)];
        assert_eq!(
            seen,
            expected.iter().map(|(id, d)| (id.to_string(), *d)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_cycle_is_not_expanded() {
        let graph = NormalizedGraph {
            vertices: vec![
                vertex("a", VertexKind::BlockContent, "a", &["b"]),
                vertex("b", VertexKind::BlockContent, "b", &["a"]),
            ],
            roots: vec![uid("a")],
        };
        let forest = build_forest(&graph);
        assert_eq!(forest[0].size(), 2);
    }

    #[test]
    fn test_shared_child_expands_under_each_parent() {
        let graph = NormalizedGraph {
            vertices: vec![
                vertex("p", VertexKind::Page, "P", &["x", "y"]),
                vertex("x", VertexKind::BlockContent, "x", &["s"]),
                vertex("y", VertexKind::BlockContent, "y", &["s"]),
                vertex("s", VertexKind::BlockContent, "s", &[]),
            ],
            roots: vec![uid("p")],
        };
        assert_eq!(build_forest(&graph)[0].size(), 5);
    }

    #[test]
    fn test_deep_chain() {
        let depth = 100_000;
        let names: Vec<String> = (0..depth).map(|i| format!("n{}", i)).collect();
        let vertices = (0..depth)
            .map(|i| NormalizedVertex {
                stable_id: uid(&names[i]),
                kind: VertexKind::BlockContent,
                text: None,
                children: names.get(i + 1).map(|next| vec![uid(next)]).unwrap_or_default(),
                refs: Vec::new(),
            })
            .collect();
        let graph = NormalizedGraph {
            vertices,
            roots: vec![uid("n0")],
        };

        let forest = build_forest(&graph);
        assert_eq!(forest[0].size(), depth);
        let mut deepest = 0;
        forest[0].walk(&mut |_, d| deepest = deepest.max(d));
        assert_eq!(deepest, depth - 1);
    }

    #[test]
    fn test_unknown_root_skipped() {
        let mut graph = graph();
        graph.roots.insert(0, uid("nowhere"));
        assert_eq!(build_forest(&graph).len(), 1);
    }

    #[test]
    fn test_render_outline() {
        let graph = graph();
        let outline = render_outline(&build_forest(&graph));
        assert_eq!(
            outline,
            "page [page] Test\n  ## [head] Section\n    - [leaf] leaf text\n  - [plain] (empty)\n"
        );
    }
}
