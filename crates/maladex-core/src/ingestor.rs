//! # Ingestor Module
//!
//! Association-table validation and graph construction for Maladex CORE.
//!
//! - Parse `symptom (weight)` cells into nodes and edges
//! - Reject malformed rows with the offending cell named
//! - No semantic inference or synonym resolution
//!
//! File I/O lives in the app layer; the ingestor only sees rows that have
//! already been read.

use crate::graph::Graph;
use crate::primitives::{MAX_TABLE_RECORDS, MAX_TERM_LENGTH};
use crate::{Association, MaladexError, NodeId, NodeKind, Term};

/// The Ingestor turns tabular association records into a knowledge graph.
///
/// One record = one disease plus a comma-separated list of
/// `symptom (strength)` entries, e.g.
/// `pain (0.318), fever (0.119), swelling (0.112)`.
pub struct Ingestor;

impl Ingestor {
    /// Validate a normalized term.
    ///
    /// A term is valid if it is non-empty and within the length limit.
    pub fn validate_term(term: &Term) -> Result<(), MaladexError> {
        if term.is_empty() {
            return Err(MaladexError::InvalidRecord("empty term".to_string()));
        }
        if term.as_str().len() > MAX_TERM_LENGTH {
            return Err(MaladexError::InvalidRecord(format!(
                "term exceeds {} bytes",
                MAX_TERM_LENGTH
            )));
        }
        Ok(())
    }

    /// Parse one `symptom (strength)` cell into a term and an association.
    ///
    /// The strength is the trailing parenthesized float; everything before
    /// it is the symptom name. A strength ≤ 0 parses fine; the engine
    /// treats such edges as impassable, which is a cost-model choice, not a
    /// table defect.
    pub fn parse_symptom_cell(cell: &str) -> Result<(Term, Association), MaladexError> {
        let cell = cell.trim();
        let Some((name, raw_strength)) = cell.rsplit_once(' ') else {
            return Err(MaladexError::InvalidRecord(format!(
                "expected 'symptom (strength)', got '{}'",
                cell
            )));
        };

        let strength: f64 = raw_strength
            .trim_matches(['(', ')'])
            .parse()
            .map_err(|_| {
                MaladexError::InvalidRecord(format!("unparseable strength in '{}'", cell))
            })?;

        let term = Term::normalize(name);
        Self::validate_term(&term)?;

        Ok((term, Association::new(strength)))
    }

    /// Ingest one association record: a disease and its symptom cell.
    ///
    /// Returns the NodeId of the disease node.
    pub fn ingest_record(
        graph: &mut Graph,
        disease: &str,
        symptoms: &str,
    ) -> Result<NodeId, MaladexError> {
        let disease_term = Term::normalize(disease);
        Self::validate_term(&disease_term)?;

        let disease_node = graph.insert_node(disease_term, NodeKind::Disease);

        for cell in symptoms.split(',') {
            if cell.trim().is_empty() {
                continue;
            }
            let (symptom_term, strength) = Self::parse_symptom_cell(cell)?;
            let symptom_node = graph.insert_node(symptom_term, NodeKind::Symptom);
            graph.insert_association(disease_node, symptom_node, strength);
        }

        Ok(disease_node)
    }

    /// Ingest a whole table of `(disease, symptoms)` records into a fresh
    /// graph.
    ///
    /// # Errors
    /// Returns `MaladexError::InvalidRecord` if:
    /// - The table exceeds `MAX_TABLE_RECORDS`
    /// - Any record fails to parse
    pub fn ingest_table<'a, I>(records: I) -> Result<Graph, MaladexError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut graph = Graph::new();
        let mut count = 0usize;

        for (disease, symptoms) in records {
            count += 1;
            if count > MAX_TABLE_RECORDS {
                return Err(MaladexError::InvalidRecord(format!(
                    "table exceeds {} records",
                    MAX_TABLE_RECORDS
                )));
            }
            Self::ingest_record(&mut graph, disease, symptoms)?;
        }

        Ok(graph)
    }
}

// =============================================================================
// TESTS
// =============================================================================
