//! Reader from [ElementNode] trees back into the typed character model.
//!
//! The [Reader] is the inverse of the [Writer](crate::nexml::Writer): it
//! dispatches on the `xsi:type` discriminant of a `characters` node and
//! rebuilds the block with the same constructor-level checks a hand-built
//! block goes through, so a node tree that decodes successfully is a valid
//! block. Unknown attributes and unknown child tags are ignored, which
//! keeps the reader tolerant of foreign annotations.
//!
//! Member references inside a `states` element may point forward to states
//! not read yet, so they are collected unresolved and checked with
//! [`States::validate_members`] once the element is complete. Cell
//! references need no such deferral: the `format` element precedes the
//! `matrix`, so chars and states are resolved while reading each `cell`.

use crate::model::alphabet::{Alphabet, CodonPosition};
use crate::model::characters::Characters;
use crate::model::error::CharacterError;
use crate::model::format::{Char, Format};
use crate::model::matrix::{Cell, Matrix, MatrixShape, Row, Seq};
use crate::model::state::{State, States};
use crate::nexml::defs::{
    ATTR_CHAR, ATTR_CODON, ATTR_ID, ATTR_LABEL, ATTR_OTU, ATTR_OTUS, ATTR_STATE, ATTR_STATES,
    ATTR_SYMBOL, ATTR_XSI_TYPE, CELL, CHAR, CHARACTERS, FORMAT, MATRIX, MEMBER,
    POLYMORPHIC_STATE_SET, ROW, SEQ, STATE, STATES, UNCERTAIN_STATE_SET, parse_xsi_type,
};
use crate::nexml::node::ElementNode;

// =#========================================================================#=
// READER
// =#========================================================================#=
/// Decoder rebuilding a [Characters] block from its document nodes.
///
/// # Example
/// ```
/// use nexchars::model::{Alphabet, MatrixShape, Characters};
/// use nexchars::nexml::{Reader, Writer};
///
/// let block = Characters::new(Alphabet::Rna, MatrixShape::Cell, "c1", "taxa1");
/// let node = Writer::new().serialize_characters(&block);
/// let reread = Reader::new().read_characters(&node).unwrap();
/// assert_eq!(reread.xsi_type(), "nex:RnaCells");
/// ```
#[derive(Debug, Default)]
pub struct Reader;

impl Reader {
    /// Creates a reader.
    pub fn new() -> Reader {
        Reader
    }

    /// Reads a whole character block from a `characters` node.
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] if the node is not a `characters`
    /// element, a required attribute (`id`, `otus`, `xsi:type`) is missing,
    /// or the `xsi:type` value is not a known alphabet/shape combination;
    /// any error of the nested `format`/`matrix` readers.
    pub fn read_characters(&self, node: &ElementNode) -> Result<Characters, CharacterError> {
        self.expect_tag(node, CHARACTERS)?;
        let id = self.required_attribute(node, ATTR_ID)?;
        let otus = self.required_attribute(node, ATTR_OTUS)?;
        let xsi_type = self.required_attribute(node, ATTR_XSI_TYPE)?;
        let (alphabet, shape) = parse_xsi_type(xsi_type).ok_or_else(|| {
            CharacterError::SchemaViolation(format!(
                "unknown xsi:type '{xsi_type}' on characters '{id}'"
            ))
        })?;

        let mut characters = Characters::new(alphabet, shape, id, otus);
        if let Some(label) = node.attribute(ATTR_LABEL) {
            characters = characters.with_label(label);
        }

        for child in node.children() {
            match child.tag() {
                FORMAT => characters.set_format(self.read_format(child, alphabet)?)?,
                MATRIX => {
                    let matrix =
                        self.read_matrix(child, alphabet, shape, characters.format())?;
                    characters.set_matrix(matrix)?;
                }
                _ => {}
            }
        }
        Ok(characters)
    }

    /// Reads a format definition from a `format` node.
    pub fn read_format(
        &self,
        node: &ElementNode,
        alphabet: Alphabet,
    ) -> Result<Format, CharacterError> {
        self.expect_tag(node, FORMAT)?;
        let mut format = Format::new(alphabet);
        for child in node.children() {
            match child.tag() {
                STATES => format.add_states(self.read_states(child, alphabet)?)?,
                CHAR => format.add_char(self.read_char(child, alphabet)?)?,
                _ => {}
            }
        }
        Ok(format)
    }

    /// Reads a state vocabulary from a `states` node. Member references are
    /// collected as they appear and validated against the complete
    /// vocabulary at the end, so forward references are fine.
    pub fn read_states(
        &self,
        node: &ElementNode,
        alphabet: Alphabet,
    ) -> Result<States, CharacterError> {
        self.expect_tag(node, STATES)?;
        let id = self.required_attribute(node, ATTR_ID)?;
        let mut states = States::new(alphabet, id)?;
        if let Some(label) = node.attribute(ATTR_LABEL) {
            states = states.with_label(label);
        }

        for child in node.children() {
            match child.tag() {
                STATE | UNCERTAIN_STATE_SET | POLYMORPHIC_STATE_SET => {
                    states.add_state(self.read_state(child, alphabet)?)?;
                }
                _ => {}
            }
        }
        states.validate_members()?;
        Ok(states)
    }

    /// Reads a single state from a `state`, `uncertain_state_set`, or
    /// `polymorphic_state_set` node, including its `member` children.
    pub fn read_state(
        &self,
        node: &ElementNode,
        alphabet: Alphabet,
    ) -> Result<State, CharacterError> {
        let id = self.required_attribute(node, ATTR_ID)?;
        let symbol = node.attribute(ATTR_SYMBOL);
        let mut state = match node.tag() {
            STATE => match symbol {
                Some(symbol) => State::new(alphabet, id, symbol)?,
                None => State::without_symbol(alphabet, id)?,
            },
            UNCERTAIN_STATE_SET => State::uncertain(alphabet, id, symbol)?,
            POLYMORPHIC_STATE_SET => State::polymorphic(alphabet, id, symbol)?,
            tag => {
                return Err(CharacterError::SchemaViolation(format!(
                    "state element expected, got '{tag}'"
                )));
            }
        };
        if let Some(label) = node.attribute(ATTR_LABEL) {
            state = state.with_label(label);
        }

        for child in node.children() {
            if child.tag() == MEMBER {
                state.add_member_id(self.required_attribute(child, ATTR_STATE)?)?;
            }
        }
        Ok(state)
    }

    /// Reads a column definition from a `char` node.
    pub fn read_char(
        &self,
        node: &ElementNode,
        alphabet: Alphabet,
    ) -> Result<Char, CharacterError> {
        self.expect_tag(node, CHAR)?;
        let id = self.required_attribute(node, ATTR_ID)?;
        let mut char = Char::new(alphabet, id);
        if let Some(label) = node.attribute(ATTR_LABEL) {
            char = char.with_label(label);
        }
        if let Some(states_id) = node.attribute(ATTR_STATES) {
            char.set_states_id(states_id)?;
        }
        if let Some(codon) = node.attribute(ATTR_CODON) {
            char.set_codon(CodonPosition::parse(codon)?)?;
        }
        Ok(char)
    }

    /// Reads a matrix from a `matrix` node. Cell references are resolved
    /// against `format`, which must already be read.
    pub fn read_matrix(
        &self,
        node: &ElementNode,
        alphabet: Alphabet,
        shape: MatrixShape,
        format: Option<&Format>,
    ) -> Result<Matrix, CharacterError> {
        self.expect_tag(node, MATRIX)?;
        let mut matrix = Matrix::new(alphabet, shape);
        for child in node.children() {
            if child.tag() == ROW {
                matrix.add_row(self.read_row(child, alphabet, shape, format)?)?;
            }
        }
        Ok(matrix)
    }

    /// Reads one row from a `row` node, in the block's shape.
    pub fn read_row(
        &self,
        node: &ElementNode,
        alphabet: Alphabet,
        shape: MatrixShape,
        format: Option<&Format>,
    ) -> Result<Row, CharacterError> {
        self.expect_tag(node, ROW)?;
        let id = self.required_attribute(node, ATTR_ID)?;
        let mut row = match shape {
            MatrixShape::Seq => Row::seq_row(alphabet, id),
            MatrixShape::Cell => Row::cell_row(alphabet, id),
        };
        if let Some(label) = node.attribute(ATTR_LABEL) {
            row = row.with_label(label);
        }
        if let Some(otu) = node.attribute(ATTR_OTU) {
            row = row.with_otu(otu);
        }

        for child in node.children() {
            match child.tag() {
                SEQ => row.set_seq(self.read_seq(child)?)?,
                CELL => row.add_cell(self.read_cell(child, alphabet, format)?)?,
                _ => {}
            }
        }
        Ok(row)
    }

    /// Reads one observation from a `cell` node, resolving its char (and,
    /// for discrete alphabets, its state) in `format`.
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] if the char reference does not
    /// resolve, or if a discrete state reference does not resolve in the
    /// char's vocabulary.
    pub fn read_cell(
        &self,
        node: &ElementNode,
        alphabet: Alphabet,
        format: Option<&Format>,
    ) -> Result<Cell, CharacterError> {
        self.expect_tag(node, CELL)?;
        let char_id = self.required_attribute(node, ATTR_CHAR)?;
        let state = self.required_attribute(node, ATTR_STATE)?;

        let char = format.and_then(|f| f.get_char(char_id)).ok_or_else(|| {
            CharacterError::SchemaViolation(format!(
                "cell references unknown char '{char_id}'"
            ))
        })?;

        if alphabet == Alphabet::Continuous {
            return Cell::continuous(char, state);
        }
        let resolved = char
            .states()
            .and_then(|states_id| format?.get_states(states_id))
            .and_then(|states| states.get(state))
            .ok_or_else(|| {
                CharacterError::SchemaViolation(format!(
                    "cell at char '{char_id}' references unknown state '{state}'"
                ))
            })?;
        Cell::new(char, resolved)
    }

    /// Reads a sequence from a `seq` node's text content.
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] if the node has no text content.
    pub fn read_seq(&self, node: &ElementNode) -> Result<Seq, CharacterError> {
        self.expect_tag(node, SEQ)?;
        match node.text() {
            Some(text) => Ok(Seq::new(text)),
            None => Err(CharacterError::SchemaViolation(
                "seq element without text content".to_string(),
            )),
        }
    }

    /// Errors unless the node carries the expected tag.
    fn expect_tag(&self, node: &ElementNode, tag: &str) -> Result<(), CharacterError> {
        if node.tag() == tag {
            Ok(())
        } else {
            Err(CharacterError::SchemaViolation(format!(
                "'{}' element expected, got '{}'",
                tag,
                node.tag()
            )))
        }
    }

    /// Returns a required attribute value or a schema violation naming it.
    fn required_attribute<'a>(
        &self,
        node: &'a ElementNode,
        name: &str,
    ) -> Result<&'a str, CharacterError> {
        node.attribute(name).ok_or_else(|| {
            CharacterError::SchemaViolation(format!(
                "'{}' element without required attribute '{}'",
                node.tag(),
                name
            ))
        })
    }
}
