//! Codec limits and defaults.
//!
//! The bencode format itself places no bound on nesting depth or on declared
//! string length. These defaults keep untrusted input from exhausting the stack
//! while still accepting everything real-world metadata files contain.

// ============================================================================
// Nesting
// ============================================================================

/// Maximum number of nested lists and dictionaries, for both encoding and decoding.
pub const DEFAULT_MAX_DEPTH: usize = 64;

// ============================================================================
// Byte strings
// ============================================================================

/// Maximum declared byte string length accepted by the decoder.
///
/// A declared length is always checked against the remaining input as well, so
/// the default only rejects lengths that cannot be represented at all.
pub const DEFAULT_MAX_STRING_LEN: usize = usize::MAX;
