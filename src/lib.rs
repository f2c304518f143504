//! Nexchars is a library for building, validating, and serializing NeXML
//! character-state matrices.
//!
//! This crate offers a typed model of the `characters` subtree of the NeXML
//! schema and a serializer/reader pair between that model and generic
//! document nodes.
//! Core functionality provided:
//! - Alphabets: the six fixed vocabularies (Dna, Rna, Protein, Standard,
//!   Restriction, Continuous), each with its own symbol grammar and
//!   structural rules. See [crate::model::Alphabet].
//! - States: plain, uncertain, and polymorphic states with member sets,
//!   grouped into named vocabularies with cycle-checked resolution.
//! - Format: column definitions ([Char](crate::model::Char)) referencing
//!   vocabularies, with codon positions on nucleotide columns.
//! - Matrix: rows in one of two shapes, whole-row sequences
//!   ([Seq](crate::model::Seq)) or per-position observations
//!   ([Cell](crate::model::Cell)), fixed per block.
//! - Document layer: a [Writer](crate::nexml::Writer) producing
//!   [ElementNode](crate::nexml::ElementNode) trees with `xsi:type`
//!   discriminants such as `"nex:DnaSeqs"`, and a
//!   [Reader](crate::nexml::Reader) rebuilding blocks from them.
//!
//! Limitations:
//! - The document layer works on element nodes, not XML text; mapping to
//!   an actual XML library is the host application's job.
//! - Taxon (`otus`/`otu`) references are opaque lookup keys into an
//!   external taxa block, never resolved here.
//!
//! # Usage patterns
//! Blocks are built leaves-first, each `add_*`/`set_*` boundary enforcing
//! that everything reachable from a block shares its alphabet:
//! ```
//! use nexchars::model::{
//!     Alphabet, Char, Characters, Format, Matrix, MatrixShape, Row, Seq,
//! };
//!
//! let mut format = Format::new(Alphabet::Dna);
//! format.add_char(Char::new(Alphabet::Dna, "col1"))?;
//!
//! let mut row = Row::seq_row(Alphabet::Dna, "row1").with_otu("t1");
//! row.set_seq(Seq::new("ACGT"))?;
//! let mut matrix = Matrix::new(Alphabet::Dna, MatrixShape::Seq);
//! matrix.add_row(row)?;
//!
//! let mut block = Characters::new(Alphabet::Dna, MatrixShape::Seq, "c1", "taxa1");
//! block.set_format(format)?;
//! block.set_matrix(matrix)?;
//! block.validate()?;
//!
//! let node = nexchars::serialize_characters(&block);
//! assert_eq!(node.attribute("xsi:type"), Some("nex:DnaSeqs"));
//! # Ok::<(), nexchars::model::CharacterError>(())
//! ```
//!
//! Reading is the inverse and revalidates everything on the way in:
//! ```
//! # use nexchars::model::{Alphabet, Characters, MatrixShape};
//! # let block = Characters::new(Alphabet::Dna, MatrixShape::Seq, "c1", "taxa1");
//! # let node = nexchars::serialize_characters(&block);
//! let reread = nexchars::read_characters(&node)?;
//! assert_eq!(reread.alphabet(), Alphabet::Dna);
//! # Ok::<(), nexchars::model::CharacterError>(())
//! ```

pub mod model;
pub mod nexml;

use crate::model::CharacterError;
use crate::model::Characters;
use crate::nexml::{ElementNode, Reader, Writer};

// ============================================================================
// Quick serialization API
// ============================================================================
/// Serializes a character block to its document node.
///
/// See [`nexml::Writer`] for the per-element serialization surface.
pub fn serialize_characters(characters: &Characters) -> ElementNode {
    Writer::new().serialize_characters(characters)
}

/// Reads a character block back from its document node.
///
/// See [`nexml::Reader`] for full documentation of the decoding rules.
pub fn read_characters(node: &ElementNode) -> Result<Characters, CharacterError> {
    Reader::new().read_characters(node)
}
