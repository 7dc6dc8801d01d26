use petgraph::{graph::EdgeIndex, graph::NodeIndex, Directed, Graph};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Absolute paths of every file found to be in use during a run.
pub type ReachableSet = BTreeSet<PathBuf>;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileNode {
    pub path: PathBuf,
    /// Reached directly from a configured entry point
    pub is_entry: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReferenceEdge {
    /// The quoted literal as written in the source file
    pub literal: String,
}

pub type ReferenceGraph = Graph<FileNode, ReferenceEdge, Directed>;

pub struct GraphBuilder {
    graph: ReferenceGraph,
    node_map: HashMap<PathBuf, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Index of the node for `path`, inserting it if needed
    pub fn add_file(&mut self, path: &Path) -> NodeIndex {
        if let Some(&index) = self.node_map.get(path) {
            return index;
        }
        let index = self.graph.add_node(FileNode {
            path: path.to_path_buf(),
            is_entry: false,
        });
        self.node_map.insert(path.to_path_buf(), index);
        index
    }

    pub fn mark_entry(&mut self, path: &Path) {
        let index = self.add_file(path);
        self.graph[index].is_entry = true;
    }

    /// Records `source -> target`. Returns None when the edge already exists.
    pub fn add_reference(
        &mut self,
        source: &Path,
        target: &Path,
        literal: &str,
    ) -> Option<EdgeIndex> {
        let source_idx = self.add_file(source);
        let target_idx = self.add_file(target);
        if self.graph.find_edge(source_idx, target_idx).is_some() {
            return None;
        }
        Some(self.graph.add_edge(
            source_idx,
            target_idx,
            ReferenceEdge {
                literal: literal.to_string(),
            },
        ))
    }

    pub fn build(self) -> ReferenceGraph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
