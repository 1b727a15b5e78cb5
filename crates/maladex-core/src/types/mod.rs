//! # Core Type Definitions
//!
//! This module contains all core types for the Maladex knowledge graph:
//! - Graph identifiers (`NodeId`, `Term`)
//! - Node polymorphism (`NodeKind`, `Node`)
//! - Edge weights (`Association`) and the traversal cost model
//! - Output structures (`RankedDisease`)
//! - Error types (`MaladexError`)
//!
//! ## Determinism Guarantees
//!
//! All orderable types implement `Ord` for deterministic iteration in
//! `BTreeMap`/`BTreeSet`. The only floating-point value in the system is the
//! association strength and costs derived from it; every comparison on those
//! goes through `f64::total_cmp`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// GRAPH IDENTIFIERS
// =============================================================================

/// Unique identifier for a node in the graph.
///
/// Assigned densely in insertion order, which makes it the natural
/// deterministic tie-break key for search frontiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Normalized node identity as it appears in the external vocabulary.
///
/// Terms are always trimmed and lowercased; construct them through
/// [`Term::normalize`] so the same spelling variants collapse to one node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Term(pub String);

impl Term {
    /// Create a term from raw text, trimming whitespace and lowercasing.
    #[must_use]
    pub fn normalize(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().trim().to_lowercase())
    }

    /// Get the term as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the term is empty after normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// NODE
// =============================================================================

/// The two node populations of the bipartite knowledge graph.
///
/// Every node is exactly one of these, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// An observable finding; search seeds come from this population.
    Symptom,
    /// A candidate diagnosis; search sinks, collected into the ranking.
    Disease,
}

/// A node in the knowledge graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// The internal node identifier.
    pub id: NodeId,
    /// The normalized vocabulary term this node represents.
    pub term: Term,
    /// Which side of the bipartite graph the node belongs to.
    pub kind: NodeKind,
}

impl Node {
    /// Create a new node.
    #[must_use]
    pub fn new(id: NodeId, term: Term, kind: NodeKind) -> Self {
        Self { id, term, kind }
    }
}

// =============================================================================
// ASSOCIATION (EDGE WEIGHT)
// =============================================================================

/// Empirical association strength between a disease and a symptom.
///
/// Well-formed data carries values in (0, 1]: the observed frequency of the
/// symptom given the disease. A value ≤ 0 (including the 0.0 that callers use
/// to encode a missing weight) is legal graph data but impassable during
/// search: its traversal cost is infinite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Association(pub f64);

impl Association {
    /// Create a new association with the given strength.
    #[must_use]
    pub const fn new(strength: f64) -> Self {
        Self(strength)
    }

    /// Get the raw strength value.
    #[must_use]
    pub const fn strength(self) -> f64 {
        self.0
    }

    /// The cost of traversing this edge: `-ln(strength)`.
    ///
    /// Treating the strength as an independent-evidence probability, summing
    /// these costs along a path multiplies the probabilities, so a lower
    /// cumulative cost means more probable joint evidence. Strengths ≤ 0
    /// (and NaN) yield an infinite cost: the edge exists but cannot be used.
    #[must_use]
    pub fn traversal_cost(self) -> f64 {
        if self.0 > 0.0 {
            -self.0.ln()
        } else {
            f64::INFINITY
        }
    }
}

// =============================================================================
// RANKING OUTPUT
// =============================================================================

/// One entry of the ranking engine output.
///
/// Lower cost means higher likelihood. Serialized with the cost at 3-decimal
/// precision by the app layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDisease {
    /// The disease term.
    pub term: Term,
    /// Minimum cumulative traversal cost from any seed symptom.
    pub cost: f64,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Maladex system.
///
/// - No silent failures outside the cost model (broken edge weights are a
///   semantic choice, not an error)
/// - The CORE never panics; all errors are recoverable at the caller
#[derive(Debug, Error)]
pub enum MaladexError {
    /// An association-table row could not be parsed.
    #[error("Invalid association record: {0}")]
    InvalidRecord(String),

    /// No symptom in the session matched the graph vocabulary.
    #[error("No valid symptoms found in the graph vocabulary")]
    NoValidSymptoms,

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred (app layer only; the core takes in-memory input).
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
