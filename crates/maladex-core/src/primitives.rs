//! # Runtime Constants
//!
//! Hardcoded limits and format constants for the Maladex CORE.
//!
//! These are compiled into the binary and immutable at runtime.

/// Magic bytes for the Maladex binary format header.
///
/// - File Header = Magic Bytes ("MLDX") + Version (u8) before payload.
pub const MAGIC_BYTES: &[u8; 4] = b"MLDX";

/// Current serialization format version.
///
/// Increment this when making breaking changes to the serialization format.
pub const FORMAT_VERSION: u8 = 1;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for a node term (disease or symptom name).
///
/// Terms longer than this are rejected by the Ingestor.
/// This prevents memory exhaustion from malicious or malformed input.
pub const MAX_TERM_LENGTH: usize = 256;

/// Maximum number of rows in a single association table.
///
/// Tables longer than this are rejected to prevent DoS.
pub const MAX_TABLE_RECORDS: usize = 10000;

/// Maximum number of symptoms accepted for one diagnostic session.
///
/// Bounds the seed set of the multi-source search.
pub const MAX_SESSION_SYMPTOMS: usize = 256;
