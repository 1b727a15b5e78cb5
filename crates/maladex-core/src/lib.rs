//! # maladex-core
//!
//! The deterministic ranking engine for Maladex - THE LOGIC.
//!
//! This crate ranks candidate diagnoses given a set of observed symptoms,
//! using a weighted bipartite knowledge graph: diseases and symptoms are
//! nodes, edge weights are empirical association strengths in (0, 1].
//! A multi-source best-first search accumulates negative-log costs from all
//! symptom seeds at once and returns every reachable disease, cheapest
//! (most likely) first.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Performs no I/O; it consumes an in-memory graph and a seed list
//! - Is deterministic: `BTreeMap` storage, NodeId/term tie-breaks everywhere
//! - Never mutates the graph during search; concurrent read-only searches
//!   over a shared graph are safe by construction
//! - Never panics; broken edge weights degrade to impassable edges

// =============================================================================
// MODULES
// =============================================================================

pub mod formats;
pub mod graph;
pub mod ingestor;
pub mod primitives;
pub mod ranking;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Association, MaladexError, Node, NodeId, NodeKind, RankedDisease, Term};

// =============================================================================
// RE-EXPORTS: Graph & Engine
// =============================================================================

pub use graph::{Graph, SerializableGraph};
pub use ingestor::Ingestor;
pub use ranking::{rank_diseases, remaining_cost_estimate};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{GraphFileHeader, graph_from_bytes, graph_to_bytes};
