//! Typed data model for NeXML character-state matrices.
//!
//! # Structure
//! A character block ([Characters]) is built from, leaves first:
//! * [Alphabet] - one of six fixed vocabularies governing symbol grammar
//!   and structural rules,
//! * [State] / [States] - individual states and named state vocabularies,
//!   including [ambiguous](Ambiguity) states composed of members,
//! * [Char] / [Format] - column definitions and the alphabet-homogeneous
//!   format binding vocabularies and columns,
//! * [Row] / [Cell] / [Seq] / [Matrix] - observations in one of two
//!   [shapes](MatrixShape),
//! * [Characters] - the container tying otus link, format, and matrix
//!   together.
//!
//! # Alphabet closure
//! Every container checks alphabets at its `add_*`/`set_*` boundary, so
//! everything reachable from a block reports the block's alphabet. Id
//! references that can still dangle (char→states, cell→char, cell→state,
//! member→state) are checked by [`Characters::validate`].
//!
//! # Storage policy
//! All id-keyed containers preserve insertion order and overwrite silently
//! on a repeated id (last write wins).

pub mod alphabet;
pub mod characters;
pub mod error;
pub mod format;
pub mod matrix;
pub mod state;

// Alphabet registry
pub use alphabet::Alphabet;
pub use alphabet::CodonPosition;
pub use alphabet::Symbol;
// States
pub use state::Ambiguity;
pub use state::State;
pub use state::States;
// Format
pub use format::Char;
pub use format::Format;
pub use format::FormatEntry;
// Matrix
pub use matrix::Cell;
pub use matrix::CellValue;
pub use matrix::Matrix;
pub use matrix::MatrixShape;
pub use matrix::Row;
pub use matrix::RowPayload;
pub use matrix::Seq;
// Container and errors
pub use characters::Characters;
pub use error::CharacterError;
