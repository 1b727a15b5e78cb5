//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! All vocabulary filtering and file I/O happens here; the core only ever
//! sees validated in-memory structures.

use maladex_core::{
    Graph, Ingestor, MaladexError, NodeId, NodeKind, SerializableGraph, Term,
    graph_from_bytes, graph_to_bytes, primitives::MAX_SESSION_SYMPTOMS, rank_diseases,
};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum file size for association tables (100 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_TABLE_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Maximum file size for persisted graphs (256 MB, the format's own cap).
const MAX_GRAPH_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Maximum file size for symptom lists (1 MB).
const MAX_SYMPTOMS_FILE_SIZE: u64 = 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), MaladexError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| MaladexError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(MaladexError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate an input file path.
///
/// Canonicalizes the path to resolve symlinks and "..", ensures it exists
/// and is a regular file. This prevents path traversal into unintended
/// locations.
fn validate_file_path(path: &Path) -> Result<PathBuf, MaladexError> {
    let canonical = path.canonicalize().map_err(|e| {
        MaladexError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(MaladexError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate an output file path.
///
/// For output files, the parent directory must exist and be a directory.
fn validate_output_path(path: &Path) -> Result<PathBuf, MaladexError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        MaladexError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(MaladexError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| MaladexError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// BUILD COMMAND
// =============================================================================

/// Build a knowledge graph from a disease-symptom association table.
///
/// The table is CSV with a header row and two columns: the disease term and
/// a comma-separated list of `symptom (strength)` cells.
pub fn cmd_build(table: &Path, output: &Path) -> Result<(), MaladexError> {
    tracing::info!("Building knowledge graph from {:?}", table);

    let validated_table = validate_file_path(table)?;
    validate_file_size(&validated_table, MAX_TABLE_FILE_SIZE)?;
    let validated_output = validate_output_path(output)?;

    let mut reader = csv::Reader::from_path(&validated_table)
        .map_err(|e| MaladexError::IoError(format!("Cannot open table: {}", e)))?;

    let mut records: Vec<(String, String)> = Vec::new();
    for result in reader.records() {
        let record =
            result.map_err(|e| MaladexError::InvalidRecord(format!("Bad CSV row: {}", e)))?;
        let disease = record
            .get(0)
            .ok_or_else(|| MaladexError::InvalidRecord("Row missing disease column".to_string()))?;
        let symptoms = record
            .get(1)
            .ok_or_else(|| MaladexError::InvalidRecord("Row missing symptoms column".to_string()))?;
        records.push((disease.to_string(), symptoms.to_string()));
    }

    let graph = Ingestor::ingest_table(records.iter().map(|(d, s)| (d.as_str(), s.as_str())))?;

    let data = graph_to_bytes(&graph)?;
    std::fs::write(&validated_output, &data)
        .map_err(|e| MaladexError::IoError(format!("Write graph: {}", e)))?;

    println!(
        "Built knowledge graph: {} diseases, {} symptoms, {} associations",
        graph.count_kind(NodeKind::Disease),
        graph.count_kind(NodeKind::Symptom),
        graph.edge_count()
    );
    println!("Saved to {:?}", validated_output);

    Ok(())
}

// =============================================================================
// DIAGNOSE COMMAND
// =============================================================================

/// Rank candidate diseases for a symptom list.
///
/// Unknown symptoms are dropped with a warning before the engine runs. Zero
/// valid symptoms is a failure; an empty ranking is a reportable outcome.
pub fn cmd_diagnose(graph_path: &Path, symptoms: &Path, output: &Path) -> Result<(), MaladexError> {
    let graph = load_graph(graph_path)?;

    tracing::info!("Loading symptoms from {:?}", symptoms);
    let session = read_symptoms(symptoms)?;
    println!(
        "Loaded symptoms: {:?}",
        session.iter().map(Term::as_str).collect::<Vec<_>>()
    );

    // Filter against the graph vocabulary before invoking the engine
    let (seeds, unknown): (Vec<_>, Vec<_>) = session
        .iter()
        .map(|term| (term, graph.resolve(term)))
        .partition(|(_, node)| node.is_some());

    if !unknown.is_empty() {
        let dropped: Vec<&str> = unknown.iter().map(|(term, _)| term.as_str()).collect();
        tracing::warn!(
            "Symptoms not present in the knowledge graph, ignored: {:?}",
            dropped
        );
    }

    let seeds: Vec<NodeId> = seeds.into_iter().filter_map(|(_, node)| node).collect();
    if seeds.is_empty() {
        return Err(MaladexError::NoValidSymptoms);
    }

    tracing::info!("Ranking diseases from {} seed symptoms", seeds.len());
    let ranking = rank_diseases(&graph, &seeds);

    if ranking.is_empty() {
        println!("No diseases identified based on the provided symptoms.");
        return Ok(());
    }

    let validated_output = validate_output_path(output)?;
    let mut contents = String::new();
    for ranked in &ranking {
        let _ = writeln!(contents, "{}\t{:.3}", ranked.term, ranked.cost);
    }
    std::fs::write(&validated_output, contents)
        .map_err(|e| MaladexError::IoError(format!("Write ranking: {}", e)))?;
    println!("Possible diseases have been saved to {:?}", validated_output);

    println!();
    println!("Possible Diseases:");
    for ranked in &ranking {
        println!(
            "  {}  (score, lower is better: {:.3})",
            title_case(ranked.term.as_str()),
            ranked.cost
        );
    }

    Ok(())
}

/// Read a symptom file: one symptom per line, trimmed and lowercased,
/// blank lines skipped.
fn read_symptoms(path: &Path) -> Result<Vec<Term>, MaladexError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_SYMPTOMS_FILE_SIZE)?;

    let contents = std::fs::read_to_string(&validated)
        .map_err(|e| MaladexError::IoError(format!("Read symptoms: {}", e)))?;

    let symptoms: Vec<Term> = contents
        .lines()
        .map(Term::normalize)
        .filter(|term| !term.is_empty())
        .collect();

    if symptoms.len() > MAX_SESSION_SYMPTOMS {
        return Err(MaladexError::IoError(format!(
            "Symptom count {} exceeds maximum {}",
            symptoms.len(),
            MAX_SESSION_SYMPTOMS
        )));
    }

    Ok(symptoms)
}

/// Uppercase the first letter of each word for console display.
fn title_case(term: &str) -> String {
    term.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show graph statistics.
pub fn cmd_status(graph_path: &Path, json_mode: bool) -> Result<(), MaladexError> {
    let graph = load_graph(graph_path)?;

    if json_mode {
        let output = serde_json::json!({
            "graph": graph_path.to_string_lossy(),
            "node_count": graph.node_count(),
            "edge_count": graph.edge_count(),
            "disease_count": graph.count_kind(NodeKind::Disease),
            "symptom_count": graph.count_kind(NodeKind::Symptom),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Maladex Graph Status");
    println!("====================");
    println!("Graph: {:?}", graph_path);
    println!();
    println!("Nodes:        {}", graph.node_count());
    println!("Edges:        {}", graph.edge_count());
    println!("Diseases:     {}", graph.count_kind(NodeKind::Disease));
    println!("Symptoms:     {}", graph.count_kind(NodeKind::Symptom));

    Ok(())
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Export the graph for inspection or visualization.
pub fn cmd_export(graph_path: &Path, output: &Path, format: &str) -> Result<(), MaladexError> {
    let validated_output = validate_output_path(output)?;
    let graph = load_graph(graph_path)?;

    let data = match format {
        "json" => {
            let serializable = SerializableGraph::from(&graph);
            serde_json::to_vec_pretty(&serializable)
                .map_err(|e| MaladexError::SerializationError(e.to_string()))?
        }
        "dot" => render_dot(&graph).into_bytes(),
        _ => {
            return Err(MaladexError::SerializationError(format!(
                "Unknown format: {}. Use: json, dot",
                format
            )));
        }
    };

    std::fs::write(&validated_output, &data)
        .map_err(|e| MaladexError::IoError(format!("Write file: {}", e)))?;

    println!("Exported {} bytes to {:?}", data.len(), validated_output);

    Ok(())
}

/// Render the graph in GraphViz DOT, diseases and symptoms visually distinct.
fn render_dot(graph: &Graph) -> String {
    let mut dot = String::from("graph maladex {\n");
    dot.push_str("    node [style=filled];\n\n");

    for node in graph.nodes() {
        let (shape, color) = match node.kind {
            NodeKind::Disease => ("box", "lightcoral"),
            NodeKind::Symptom => ("ellipse", "lightblue"),
        };
        let _ = writeln!(
            dot,
            "    \"{}\" [shape={}, fillcolor={}];",
            dot_escape(node.term.as_str()),
            shape,
            color
        );
    }

    dot.push('\n');
    for (a, b, strength) in graph.edges() {
        let (Some(from), Some(to)) = (graph.node(a), graph.node(b)) else {
            continue;
        };
        let _ = writeln!(
            dot,
            "    \"{}\" -- \"{}\" [label=\"{:.3}\"];",
            dot_escape(from.term.as_str()),
            dot_escape(to.term.as_str()),
            strength.strength()
        );
    }

    dot.push_str("}\n");
    dot
}

fn dot_escape(term: &str) -> String {
    term.replace('"', "\\\"")
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Load a persisted knowledge graph from disk.
pub fn load_graph(path: &Path) -> Result<Graph, MaladexError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_GRAPH_FILE_SIZE)?;

    let data = std::fs::read(&validated)
        .map_err(|e| MaladexError::IoError(format!("Read graph: {}", e)))?;

    graph_from_bytes(&data)
}

// =============================================================================
// TESTS
// =============================================================================
