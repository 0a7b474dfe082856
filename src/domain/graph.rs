//! Dependency graph for tasks
//!
//! Builds a directed graph from task dependency lists and computes which
//! tasks participate in at least one cycle. Uses petgraph for the graph
//! representation.
//!
//! Cycles are detected, not prevented: a batch with circular dependencies
//! still ranks, the members just carry a score penalty. References to IDs
//! not present in the batch are inert; they never become graph nodes and
//! cannot participate in a cycle.

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

use super::id::TaskId;
use super::task::Task;

/// White/gray/black DFS colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Not yet visited
    White,
    /// On the current traversal path
    Gray,
    /// Fully explored
    Black,
}

/// A dependency graph over the task IDs present in one batch
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// The underlying directed graph; an edge task -> dep means "task depends on dep"
    graph: DiGraph<TaskId, ()>,

    /// Map from TaskId to node index
    node_map: HashMap<TaskId, NodeIndex>,
}

impl DependencyGraph {
    /// Creates an empty dependency graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Builds a graph from a batch of tasks
    ///
    /// Tasks without an ID are skipped entirely; dependency references to
    /// IDs outside the batch are dropped.
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut graph = Self::new();

        // First pass: add all nodes
        let tasks: Vec<_> = tasks.into_iter().collect();
        for task in &tasks {
            if let Some(id) = task.id {
                graph.add_node(id);
            }
        }

        // Second pass: add edges, ignoring dangling references
        for task in &tasks {
            if let Some(id) = task.id {
                for dep in &task.dependencies {
                    graph.add_edge(id, *dep);
                }
            }
        }

        graph
    }

    /// Adds a task node to the graph
    pub fn add_node(&mut self, id: TaskId) {
        if !self.node_map.contains_key(&id) {
            let idx = self.graph.add_node(id);
            self.node_map.insert(id, idx);
        }
    }

    /// Adds a dependency edge: `task` depends on `dep`
    ///
    /// Returns false when either endpoint is not a batch member.
    pub fn add_edge(&mut self, task: TaskId, dep: TaskId) -> bool {
        match (self.node_map.get(&task), self.node_map.get(&dep)) {
            (Some(&from), Some(&to)) => {
                self.graph.add_edge(from, to, ());
                true
            }
            _ => false,
        }
    }

    /// Returns true if the ID is a graph member
    pub fn contains(&self, id: TaskId) -> bool {
        self.node_map.contains_key(&id)
    }

    /// Returns the number of tasks in the graph
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }

    /// Returns the direct dependencies of a task that are batch members
    pub fn dependencies(&self, id: TaskId) -> Vec<TaskId> {
        let idx = match self.node_map.get(&id) {
            Some(idx) => *idx,
            None => return vec![],
        };

        self.graph
            .neighbors(idx)
            .map(|n| self.graph[n])
            .collect()
    }

    /// Returns the set of task IDs that lie on at least one cycle
    ///
    /// Three-color depth-first traversal: every node is used as a DFS root
    /// exactly once, and when an edge reaches a gray node, the whole path
    /// segment from that node's first occurrence to the top of the stack is
    /// marked as cycle members. A self-loop is a cycle of size one.
    /// Runs in O(V + E).
    pub fn cycle_members(&self) -> HashSet<TaskId> {
        let mut color = vec![Color::White; self.graph.node_count()];
        let mut in_cycle = HashSet::new();

        for root in self.graph.node_indices() {
            if color[root.index()] != Color::White {
                continue;
            }

            // Iterative DFS; frames hold each node's remaining neighbors,
            // `path` mirrors the gray chain for cycle extraction.
            let mut path: Vec<NodeIndex> = Vec::new();
            let mut frames: Vec<(NodeIndex, Vec<NodeIndex>, usize)> = Vec::new();

            color[root.index()] = Color::Gray;
            path.push(root);
            frames.push((root, self.graph.neighbors(root).collect(), 0));

            while let Some(frame) = frames.last_mut() {
                let node = frame.0;
                let next = if frame.2 < frame.1.len() {
                    let n = frame.1[frame.2];
                    frame.2 += 1;
                    Some(n)
                } else {
                    None
                };

                match next {
                    None => {
                        color[node.index()] = Color::Black;
                        path.pop();
                        frames.pop();
                    }
                    Some(n) => match color[n.index()] {
                        Color::Gray => {
                            // Found a cycle: everything from the first
                            // occurrence of n to the end of the path is on it.
                            if let Some(pos) = path.iter().position(|&p| p == n) {
                                for &member in &path[pos..] {
                                    in_cycle.insert(self.graph[member]);
                                }
                            }
                        }
                        Color::Black => {}
                        Color::White => {
                            color[n.index()] = Color::Gray;
                            path.push(n);
                            let neighbors = self.graph.neighbors(n).collect();
                            frames.push((n, neighbors, 0));
                        }
                    },
                }
            }
        }

        in_cycle
    }
}

/// Returns the IDs of all tasks participating in at least one dependency cycle
pub fn detect_cycles(tasks: &[Task]) -> HashSet<TaskId> {
    DependencyGraph::from_tasks(tasks).cycle_members()
}
