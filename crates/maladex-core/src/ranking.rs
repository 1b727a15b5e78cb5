//! # Ranking Engine
//!
//! Multi-source best-first search from observed symptoms to candidate
//! diagnoses.
//!
//! The frontier starts pre-seeded with every symptom node at accumulated
//! cost 0 and expands outward along finite-cost edges. Disease nodes are
//! sinks: the first time one is popped its accumulated cost is final and its
//! neighbors are not relaxed, so rankings never chain disease→disease
//! through shared symptoms. The queue drains fully, since every reachable
//! disease must be ranked, not just the nearest one.
//!
//! Determinism: equal-priority frontier entries break ties on ascending
//! NodeId, and equal-cost diseases in the output break ties on term.

use crate::graph::Graph;
use crate::{NodeId, NodeKind, RankedDisease};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

// =============================================================================
// FRONTIER STATE
// =============================================================================

/// One frontier entry: a node with its accumulated cost and the heuristic
/// estimate of the total cost through it.
///
/// `Ord` is reversed so `BinaryHeap` pops the minimum estimate, with
/// ascending NodeId as the tie-break.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    estimate: f64,
    node: NodeId,
    accumulated: f64,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// =============================================================================
// HEURISTIC ESTIMATOR
// =============================================================================

/// Lower-bound estimate of the remaining cost from `node` to any disease.
///
/// A disease node needs 0 further cost to become itself. For any other node
/// the estimate is the minimum traversal cost over its incident edges, the
/// cheapest single hop out. An isolated node estimates 0.
///
/// The min-incident-edge estimate is an approximation, not a proven
/// admissible heuristic for arbitrary graphs; the search still relaxes
/// edges exhaustively, so final costs do not depend on it.
#[must_use]
pub fn remaining_cost_estimate(graph: &Graph, node: NodeId) -> f64 {
    if graph.node(node).is_some_and(|n| n.kind == NodeKind::Disease) {
        return 0.0;
    }

    graph
        .neighbors(node)
        .map(|(_, assoc)| assoc.traversal_cost())
        .min_by(f64::total_cmp)
        .unwrap_or(0.0)
}

// =============================================================================
// MULTI-SOURCE SEARCH
// =============================================================================

/// Rank every disease reachable from the seed symptoms.
///
/// Returns `(disease, cumulative cost)` pairs ascending by cost; lower cost
/// means higher likelihood. Seeds absent from the graph are skipped; an empty
/// seed slice yields an empty ranking. Diseases with no finite-cost path to
/// any seed are absent from the result, never scored as infinite.
#[must_use]
pub fn rank_diseases(graph: &Graph, seeds: &[NodeId]) -> Vec<RankedDisease> {
    let mut frontier = BinaryHeap::new();
    let mut best_cost: BTreeMap<NodeId, f64> = BTreeMap::new();
    let mut visited: BTreeSet<NodeId> = BTreeSet::new();

    for &seed in seeds {
        if graph.node(seed).is_none() {
            continue;
        }
        frontier.push(Frontier {
            estimate: remaining_cost_estimate(graph, seed),
            node: seed,
            accumulated: 0.0,
        });
        best_cost.insert(seed, 0.0);
    }

    while let Some(Frontier {
        node, accumulated, ..
    }) = frontier.pop()
    {
        // Stale entry from a superseded path
        if !visited.insert(node) {
            continue;
        }

        let Some(current) = graph.node(node) else {
            continue;
        };

        if current.kind == NodeKind::Disease {
            // Diseases are sinks: record the cost, never relax outward
            best_cost.insert(node, accumulated);
            continue;
        }

        for (neighbor, assoc) in graph.neighbors(node) {
            if visited.contains(&neighbor) {
                continue;
            }
            let step = assoc.traversal_cost();
            if step.is_infinite() {
                continue;
            }
            let candidate = accumulated + step;
            if best_cost.get(&neighbor).is_none_or(|&known| candidate < known) {
                best_cost.insert(neighbor, candidate);
                frontier.push(Frontier {
                    estimate: candidate + remaining_cost_estimate(graph, neighbor),
                    node: neighbor,
                    accumulated: candidate,
                });
            }
        }
    }

    let mut ranking: Vec<RankedDisease> = graph
        .nodes()
        .filter(|n| n.kind == NodeKind::Disease)
        .filter_map(|n| {
            best_cost.get(&n.id).map(|&cost| RankedDisease {
                term: n.term.clone(),
                cost,
            })
        })
        .collect();

    ranking.sort_by(|a, b| a.cost.total_cmp(&b.cost).then_with(|| a.term.cmp(&b.term)));
    ranking
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Association, Term};

    fn symptom(graph: &mut Graph, term: &str) -> NodeId {
        graph.insert_node(Term::normalize(term), NodeKind::Symptom)
    }

    fn disease(graph: &mut Graph, term: &str) -> NodeId {
        graph.insert_node(Term::normalize(term), NodeKind::Disease)
    }

    #[test]
    fn estimate_is_zero_for_disease_nodes() {
        let mut graph = Graph::new();
        let d = disease(&mut graph, "abscess");
        let s = symptom(&mut graph, "fever");
        graph.insert_association(d, s, Association::new(0.2));

        assert_eq!(remaining_cost_estimate(&graph, d), 0.0);
    }

    #[test]
    fn estimate_is_cheapest_incident_hop() {
        let mut graph = Graph::new();
        let s = symptom(&mut graph, "fever");
        let d1 = disease(&mut graph, "abscess");
        let d2 = disease(&mut graph, "flu");
        graph.insert_association(s, d1, Association::new(0.2));
        graph.insert_association(s, d2, Association::new(0.8));

        let estimate = remaining_cost_estimate(&graph, s);
        assert!((estimate - Association::new(0.8).traversal_cost()).abs() < 1e-12);
    }

    #[test]
    fn estimate_is_zero_for_isolated_nodes() {
        let mut graph = Graph::new();
        let s = symptom(&mut graph, "fever");
        assert_eq!(remaining_cost_estimate(&graph, s), 0.0);
    }

    #[test]
    fn estimate_is_infinite_when_all_edges_broken() {
        let mut graph = Graph::new();
        let s = symptom(&mut graph, "fever");
        let d = disease(&mut graph, "abscess");
        graph.insert_association(s, d, Association::new(0.0));

        assert!(remaining_cost_estimate(&graph, s).is_infinite());
    }

    #[test]
    fn single_edge_cost_is_negative_log() {
        let mut graph = Graph::new();
        let s = symptom(&mut graph, "fever");
        let d = disease(&mut graph, "abscess");
        graph.insert_association(s, d, Association::new(0.5));

        let ranking = rank_diseases(&graph, &[s]);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].term.as_str(), "abscess");
        assert!((ranking[0].cost - 0.693).abs() < 1e-3);
    }

    #[test]
    fn cheaper_indirect_path_wins() {
        // s --0.1-- d (cost ≈ 2.303) versus s --0.9-- m --0.8-- d (≈ 0.328)
        let mut graph = Graph::new();
        let s = symptom(&mut graph, "nausea");
        let m = symptom(&mut graph, "heartburn");
        let d = disease(&mut graph, "acid reflux");
        graph.insert_association(s, d, Association::new(0.1));
        graph.insert_association(s, m, Association::new(0.9));
        graph.insert_association(m, d, Association::new(0.8));

        let ranking = rank_diseases(&graph, &[s]);
        assert_eq!(ranking.len(), 1);
        assert!((ranking[0].cost - 0.328).abs() < 1e-3);
    }

    #[test]
    fn broken_edges_never_form_a_path() {
        let mut graph = Graph::new();
        let s = symptom(&mut graph, "fever");
        let d = disease(&mut graph, "abscess");
        graph.insert_association(s, d, Association::new(0.0));

        assert!(rank_diseases(&graph, &[s]).is_empty());
    }

    #[test]
    fn unreachable_diseases_are_excluded() {
        let mut graph = Graph::new();
        let s = symptom(&mut graph, "fever");
        let d = disease(&mut graph, "abscess");
        disease(&mut graph, "gout");
        graph.insert_association(s, d, Association::new(0.4));

        let ranking = rank_diseases(&graph, &[s]);
        assert_eq!(ranking.len(), 1);
        assert!(ranking.iter().all(|r| r.term.as_str() != "gout"));
    }

    #[test]
    fn empty_seed_set_returns_empty_ranking() {
        let mut graph = Graph::new();
        let s = symptom(&mut graph, "fever");
        let d = disease(&mut graph, "abscess");
        graph.insert_association(s, d, Association::new(0.4));

        assert!(rank_diseases(&graph, &[]).is_empty());
    }

    #[test]
    fn unknown_seeds_are_skipped() {
        let mut graph = Graph::new();
        let s = symptom(&mut graph, "fever");
        let d = disease(&mut graph, "abscess");
        graph.insert_association(s, d, Association::new(0.4));

        let ranking = rank_diseases(&graph, &[NodeId(999), s]);
        assert_eq!(ranking.len(), 1);
    }

    #[test]
    fn multiple_seeds_take_the_nearest_source() {
        let mut graph = Graph::new();
        let s1 = symptom(&mut graph, "fever");
        let s2 = symptom(&mut graph, "pain");
        let d = disease(&mut graph, "abscess");
        graph.insert_association(s1, d, Association::new(0.1));
        graph.insert_association(s2, d, Association::new(0.9));

        let ranking = rank_diseases(&graph, &[s1, s2]);
        assert_eq!(ranking.len(), 1);
        // Cost comes from the stronger association, not the weaker
        assert!((ranking[0].cost - Association::new(0.9).traversal_cost()).abs() < 1e-12);
    }

    #[test]
    fn diseases_are_sinks() {
        // d1 and d2 share no symptom path except through d1 itself:
        // s --0.5-- d1 --0.5-- d2. Stopping at d1 leaves d2 unranked.
        let mut graph = Graph::new();
        let s = symptom(&mut graph, "fever");
        let d1 = disease(&mut graph, "abscess");
        let d2 = disease(&mut graph, "sepsis");
        graph.insert_association(s, d1, Association::new(0.5));
        graph.insert_association(d1, d2, Association::new(0.5));

        let ranking = rank_diseases(&graph, &[s]);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].term.as_str(), "abscess");
    }

    #[test]
    fn ordering_is_non_decreasing_with_term_tie_break() {
        let mut graph = Graph::new();
        let s = symptom(&mut graph, "fever");
        let d1 = disease(&mut graph, "ulcer");
        let d2 = disease(&mut graph, "abscess");
        let d3 = disease(&mut graph, "gout");
        graph.insert_association(s, d1, Association::new(0.5));
        graph.insert_association(s, d2, Association::new(0.5));
        graph.insert_association(s, d3, Association::new(0.9));

        let ranking = rank_diseases(&graph, &[s]);
        assert_eq!(ranking.len(), 3);
        for pair in ranking.windows(2) {
            assert!(pair[0].cost <= pair[1].cost);
        }
        // Equal costs fall back to term order
        assert_eq!(ranking[0].term.as_str(), "gout");
        assert_eq!(ranking[1].term.as_str(), "abscess");
        assert_eq!(ranking[2].term.as_str(), "ulcer");
    }

    #[test]
    fn repeated_invocations_are_identical() {
        let mut graph = Graph::new();
        let s1 = symptom(&mut graph, "fever");
        let s2 = symptom(&mut graph, "pain");
        let m = symptom(&mut graph, "chills");
        let d1 = disease(&mut graph, "abscess");
        let d2 = disease(&mut graph, "flu");
        graph.insert_association(s1, d1, Association::new(0.119));
        graph.insert_association(s1, m, Association::new(0.7));
        graph.insert_association(m, d2, Association::new(0.3));
        graph.insert_association(s2, d1, Association::new(0.318));
        graph.insert_association(s2, d2, Association::new(0.05));

        let first = rank_diseases(&graph, &[s1, s2]);
        let second = rank_diseases(&graph, &[s1, s2]);
        assert_eq!(first, second);
    }
}
