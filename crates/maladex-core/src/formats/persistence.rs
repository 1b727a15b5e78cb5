//! # Graph File Format
//!
//! On-disk encoding for persisted knowledge graphs.
//!
//! A graph is built once from an association table and then read on every
//! diagnostic session, so the encoding favors cheap, validated loads: a
//! fixed five-byte prefix (magic `MLDX` plus a format version) identifies
//! the file before any payload work happens, and a postcard-encoded
//! [`SerializableGraph`] follows. Everything in this module is bytes in,
//! bytes out; opening and writing files is the app's job.
//!
//! Loads are defensive because the diagnose command accepts whatever path
//! the operator hands it: the total size is capped and the prefix checked
//! before the payload ever reaches the deserializer, so a mistyped path to
//! some unrelated large file fails fast instead of allocating for garbage.

use crate::{Graph, MaladexError, SerializableGraph, primitives};

/// Upper bound on an encoded graph file.
///
/// A vocabulary of tens of thousands of terms encodes to a few megabytes;
/// anything approaching this cap is not a plausible knowledge graph and is
/// rejected before the deserializer can allocate for it.
pub const MAX_GRAPH_FILE_BYTES: usize = 256 * 1024 * 1024;

/// Encoded prefix length: 4 magic bytes + 1 version byte.
const HEADER_LEN: usize = 5;

// =============================================================================
// FILE HEADER
// =============================================================================

/// Identifies a byte stream as a Maladex graph and pins its format version.
///
/// The version byte lets a future encoding change refuse old files with a
/// clear message instead of misreading them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphFileHeader {
    pub version: u8,
}

impl GraphFileHeader {
    /// Header for the format version this build writes.
    #[must_use]
    pub const fn current() -> Self {
        Self {
            version: primitives::FORMAT_VERSION,
        }
    }

    /// Append the encoded header to `out`.
    fn encode_into(self, out: &mut Vec<u8>) {
        out.extend_from_slice(primitives::MAGIC_BYTES);
        out.push(self.version);
    }

    /// Split `bytes` into a validated header and the payload after it.
    ///
    /// Rejects streams that are too short to carry the prefix, that carry
    /// foreign magic, or that were written by a different format version.
    pub fn parse(bytes: &[u8]) -> Result<(Self, &[u8]), MaladexError> {
        let Some((head, payload)) = bytes.split_at_checked(HEADER_LEN) else {
            return Err(MaladexError::DeserializationError(
                "graph file shorter than its header".to_string(),
            ));
        };

        if head[..4] != *primitives::MAGIC_BYTES {
            return Err(MaladexError::DeserializationError(
                "not a maladex graph file (bad magic)".to_string(),
            ));
        }

        let version = head[4];
        if version != primitives::FORMAT_VERSION {
            return Err(MaladexError::DeserializationError(format!(
                "graph file format v{} is not readable by this build (expected v{})",
                version,
                primitives::FORMAT_VERSION
            )));
        }

        Ok((Self { version }, payload))
    }
}

// =============================================================================
// ENCODE / DECODE
// =============================================================================

/// Encode a graph as a self-identifying byte stream.
pub fn graph_to_bytes(graph: &Graph) -> Result<Vec<u8>, MaladexError> {
    let serializable = SerializableGraph::from(graph);

    let mut out = Vec::new();
    GraphFileHeader::current().encode_into(&mut out);

    postcard::to_extend(&serializable, out)
        .map_err(|e| MaladexError::SerializationError(format!("encode graph: {}", e)))
}

/// Decode a graph from a byte stream produced by [`graph_to_bytes`].
///
/// The size cap and header are checked before the payload is deserialized.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<Graph, MaladexError> {
    if bytes.len() > MAX_GRAPH_FILE_BYTES {
        return Err(MaladexError::DeserializationError(format!(
            "graph file of {} bytes exceeds the {} byte cap",
            bytes.len(),
            MAX_GRAPH_FILE_BYTES
        )));
    }

    let (_, payload) = GraphFileHeader::parse(bytes)?;

    let serializable: SerializableGraph = postcard::from_bytes(payload).map_err(|e| {
        MaladexError::DeserializationError(format!("decode graph payload: {}", e))
    })?;

    Ok(Graph::from(serializable))
}

// =============================================================================
// TESTS
// =============================================================================
