//! # Knowledge Graph
//!
//! The in-memory graph for Maladex.
//!
//! Diseases and symptoms are nodes; undirected weighted edges carry the
//! empirical association strength between them. The graph is bipartite by
//! convention, not enforcement: edges between two diseases or two symptoms
//! are representable and the engine tolerates them.
//!
//! All data structures use `BTreeMap` for deterministic ordering.
//! The graph is loaded once and read-only during search, so concurrent
//! read-only searches over a shared graph need no locking.

use crate::{Association, Node, NodeId, NodeKind, Term};
use std::collections::BTreeMap;

// =============================================================================
// GRAPH
// =============================================================================

/// The main Graph structure.
///
/// Uses `BTreeMap` exclusively for deterministic ordering.
/// No `HashMap` allowed.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Node storage: NodeId -> Node
    nodes: BTreeMap<NodeId, Node>,

    /// Symmetric adjacency: node -> (neighbor -> association).
    /// Each undirected edge is stored in both directions with one weight.
    adjacency: BTreeMap<NodeId, BTreeMap<NodeId, Association>>,

    /// Reverse lookup: Term -> NodeId
    term_index: BTreeMap<Term, NodeId>,

    /// Next available NodeId
    next_node_id: u64,
}

impl Graph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node for the given term. Returns the NodeId.
    ///
    /// Idempotent per term: re-inserting an existing term returns the
    /// existing NodeId and keeps the kind of the first insertion.
    pub fn insert_node(&mut self, term: Term, kind: NodeKind) -> NodeId {
        if let Some(&node_id) = self.term_index.get(&term) {
            return node_id;
        }

        let node_id = NodeId(self.next_node_id);
        self.next_node_id = self.next_node_id.saturating_add(1);

        self.term_index.insert(term.clone(), node_id);
        self.nodes.insert(node_id, Node::new(node_id, term, kind));

        node_id
    }

    /// Insert or update the undirected association between two nodes.
    ///
    /// If the edge exists, the strength is replaced (not accumulated).
    /// Endpoints that don't exist, and self-loops, are silently ignored.
    pub fn insert_association(&mut self, a: NodeId, b: NodeId, strength: Association) {
        if a == b || !self.nodes.contains_key(&a) || !self.nodes.contains_key(&b) {
            return;
        }
        self.adjacency.entry(a).or_default().insert(b, strength);
        self.adjacency.entry(b).or_default().insert(a, strength);
    }

    /// Lookup a node by its NodeId.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Resolve a normalized term to its NodeId.
    #[must_use]
    pub fn resolve(&self, term: &Term) -> Option<NodeId> {
        self.term_index.get(term).copied()
    }

    /// Get the association strength between two nodes.
    #[must_use]
    pub fn association(&self, a: NodeId, b: NodeId) -> Option<Association> {
        self.adjacency.get(&a)?.get(&b).copied()
    }

    /// Iterate the neighbors of a node in NodeId order.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, Association)> + '_ {
        self.adjacency
            .get(&node)
            .into_iter()
            .flat_map(|targets| targets.iter().map(|(k, v)| (*k, *v)))
    }

    /// Iterate all nodes in NodeId order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterate all undirected edges once, endpoints in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, Association)> + '_ {
        self.adjacency.iter().flat_map(|(from, targets)| {
            targets
                .iter()
                .filter(move |(to, _)| *from < **to)
                .map(move |(to, strength)| (*from, *to, *strength))
        })
    }

    /// Get the total number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    /// Count the nodes of a given kind.
    #[must_use]
    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes.values().filter(|n| n.kind == kind).count()
    }
}

// =============================================================================
// SERIALIZATION SUPPORT
// =============================================================================

use serde::{Deserialize, Serialize};

/// Serializable representation of the graph for persistence.
///
/// Each undirected edge appears once, endpoints in ascending NodeId order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<(NodeId, NodeId, Association)>,
    pub next_node_id: u64,
}

impl From<&Graph> for SerializableGraph {
    fn from(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes.values().cloned().collect(),
            edges: graph.edges().collect(),
            next_node_id: graph.next_node_id,
        }
    }
}

impl From<SerializableGraph> for Graph {
    fn from(sg: SerializableGraph) -> Self {
        let mut graph = Graph::new();
        graph.next_node_id = sg.next_node_id;

        for node in sg.nodes {
            graph.term_index.insert(node.term.clone(), node.id);
            graph.nodes.insert(node.id, node);
        }

        for (a, b, strength) in sg.edges {
            graph.insert_association(a, b, strength);
        }

        graph
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup_node() {
        let mut graph = Graph::new();
        let id = graph.insert_node(Term::normalize("fever"), NodeKind::Symptom);

        let node = graph.node(id);
        assert!(node.is_some());
        assert_eq!(node.map(|n| n.term.as_str()), Some("fever"));
        assert_eq!(node.map(|n| n.kind), Some(NodeKind::Symptom));
    }

    #[test]
    fn insert_duplicate_term_returns_same_node() {
        let mut graph = Graph::new();
        let first = graph.insert_node(Term::normalize("abscess"), NodeKind::Disease);
        let second = graph.insert_node(Term::normalize("abscess"), NodeKind::Disease);

        assert_eq!(first, second);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn duplicate_term_keeps_first_kind() {
        let mut graph = Graph::new();
        let first = graph.insert_node(Term::normalize("cyst"), NodeKind::Symptom);
        let second = graph.insert_node(Term::normalize("cyst"), NodeKind::Disease);

        assert_eq!(first, second);
        assert_eq!(graph.node(first).map(|n| n.kind), Some(NodeKind::Symptom));
    }

    #[test]
    fn resolve_finds_normalized_terms() {
        let mut graph = Graph::new();
        let id = graph.insert_node(Term::normalize("Sore Throat "), NodeKind::Symptom);

        assert_eq!(graph.resolve(&Term::normalize("sore throat")), Some(id));
        assert_eq!(graph.resolve(&Term::normalize("unknown")), None);
    }

    #[test]
    fn association_is_symmetric() {
        let mut graph = Graph::new();
        let d = graph.insert_node(Term::normalize("abscess"), NodeKind::Disease);
        let s = graph.insert_node(Term::normalize("fever"), NodeKind::Symptom);

        graph.insert_association(d, s, Association::new(0.119));

        assert_eq!(graph.association(d, s), Some(Association::new(0.119)));
        assert_eq!(graph.association(s, d), Some(Association::new(0.119)));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn insert_association_replaces_strength() {
        let mut graph = Graph::new();
        let d = graph.insert_node(Term::normalize("abscess"), NodeKind::Disease);
        let s = graph.insert_node(Term::normalize("pain"), NodeKind::Symptom);

        graph.insert_association(d, s, Association::new(0.1));
        graph.insert_association(d, s, Association::new(0.3));

        assert_eq!(graph.association(s, d), Some(Association::new(0.3)));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn insert_association_ignores_dangling_and_self_loops() {
        let mut graph = Graph::new();
        let node = graph.insert_node(Term::normalize("fever"), NodeKind::Symptom);
        let dangling = NodeId(999);

        graph.insert_association(node, dangling, Association::new(0.5));
        graph.insert_association(dangling, node, Association::new(0.5));
        graph.insert_association(node, node, Association::new(0.5));

        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn neighbors_in_deterministic_order() {
        let mut graph = Graph::new();
        let s = graph.insert_node(Term::normalize("pain"), NodeKind::Symptom);
        let d1 = graph.insert_node(Term::normalize("abscess"), NodeKind::Disease);
        let d2 = graph.insert_node(Term::normalize("ulcer"), NodeKind::Disease);

        // Insert edges in non-sorted order
        graph.insert_association(s, d2, Association::new(0.2));
        graph.insert_association(s, d1, Association::new(0.4));

        let neighbors: Vec<_> = graph.neighbors(s).map(|(n, _)| n).collect();
        assert_eq!(neighbors, vec![d1, d2]);
    }

    #[test]
    fn count_kind_splits_populations() {
        let mut graph = Graph::new();
        graph.insert_node(Term::normalize("abscess"), NodeKind::Disease);
        graph.insert_node(Term::normalize("fever"), NodeKind::Symptom);
        graph.insert_node(Term::normalize("pain"), NodeKind::Symptom);

        assert_eq!(graph.count_kind(NodeKind::Disease), 1);
        assert_eq!(graph.count_kind(NodeKind::Symptom), 2);
    }

    #[test]
    fn serialization_roundtrip() {
        let mut graph = Graph::new();
        let d = graph.insert_node(Term::normalize("abscess"), NodeKind::Disease);
        let s = graph.insert_node(Term::normalize("fever"), NodeKind::Symptom);
        graph.insert_association(d, s, Association::new(0.119));

        let serializable = SerializableGraph::from(&graph);
        let restored = Graph::from(serializable);

        assert_eq!(graph.node_count(), restored.node_count());
        assert_eq!(graph.edge_count(), restored.edge_count());
        assert_eq!(restored.association(d, s), Some(Association::new(0.119)));
        assert_eq!(restored.resolve(&Term::normalize("fever")), Some(s));
    }
}
