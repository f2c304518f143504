//! Error types for the character model.
//!
//! Provides [CharacterError], the single error type raised by all mutation
//! entry points of the model and by the [reader](crate::nexml::Reader).
//! Lookup misses are not errors; they surface as [None] or `false` from the
//! respective accessors.

use thiserror::Error;

// =#========================================================================#=
// CHARACTER ERROR
// =#========================================================================#=
/// Errors raised while building or reading a character block.
///
/// Every mutation entry point of the model (`add_*`, `set_*`) validates its
/// input eagerly and fails with one of these kinds; on failure the container
/// is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CharacterError {
    /// Wrong concrete alphabet or role where a specific one was required,
    /// e.g. a Protein states vocabulary added to a Dna format, or a
    /// reference that does not resolve while reading a document.
    #[error("schema violation - {0}")]
    SchemaViolation(String),

    /// A symbol or token fails its alphabet's grammar, e.g. a bad DNA
    /// letter, a non-digit Standard symbol, a malformed Continuous float,
    /// or a codon position outside 1..=3.
    #[error("invalid token - {0}")]
    TokenError(String),

    /// An ambiguity mapping is broken: a member of mismatched alphabet, a
    /// member added to a non-ambiguous state, a missing or cyclic member
    /// reference.
    #[error("invalid ambiguity mapping - {0}")]
    AmbiguityError(String),
}
