//! Serializer from the typed character model to [ElementNode] trees.
//!
//! The [Writer] walks a [Characters] graph and emits one generic node per
//! element, with alphabet-correct `xsi:type` discriminants on the
//! polymorphic `characters` element. Attributes appear in a fixed
//! per-element order, and attributes whose backing value is absent are
//! omitted. Ambiguous states become `uncertain_state_set` or
//! `polymorphic_state_set` elements with nested `member` children;
//! Continuous observations are written as their raw decimal text, never as
//! state-id references.
//!
//! Serialization never fails on a well-formed graph, so no method returns
//! a [Result]; dangling references are caught beforehand by
//! [`Characters::validate`].

use crate::model::characters::Characters;
use crate::model::format::{Char, Format};
use crate::model::matrix::{Cell, CellValue, Matrix, Row, RowPayload, Seq};
use crate::model::state::{Ambiguity, State, States};
use crate::nexml::defs::{
    ATTR_CHAR, ATTR_CODON, ATTR_ID, ATTR_LABEL, ATTR_OTU, ATTR_OTUS, ATTR_STATE, ATTR_STATES,
    ATTR_SYMBOL, ATTR_XSI_TYPE, CELL, CHAR, CHARACTERS, FORMAT, MATRIX, MEMBER,
    POLYMORPHIC_STATE_SET, ROW, SEQ, STATE, STATES, UNCERTAIN_STATE_SET,
};
use crate::nexml::node::ElementNode;

// =#========================================================================#=
// WRITER
// =#========================================================================#=
/// Serializer mapping each typed object of a character block to its
/// document node.
///
/// # Example
/// ```
/// use nexchars::model::{Alphabet, MatrixShape, Characters};
/// use nexchars::nexml::Writer;
///
/// let block = Characters::new(Alphabet::Dna, MatrixShape::Seq, "c1", "taxa1");
/// let node = Writer::new().serialize_characters(&block);
/// assert_eq!(node.attribute("xsi:type"), Some("nex:DnaSeqs"));
/// ```
#[derive(Debug, Default)]
pub struct Writer;

impl Writer {
    /// Creates a writer.
    pub fn new() -> Writer {
        Writer
    }

    /// Serializes a whole character block to a `characters` node with its
    /// `format` and `matrix` children (each omitted when unset).
    pub fn serialize_characters(&self, characters: &Characters) -> ElementNode {
        let mut node = ElementNode::new(CHARACTERS).with_attribute(ATTR_ID, characters.id());
        if let Some(label) = characters.label() {
            node.add_attribute(ATTR_LABEL, label);
        }
        node.add_attribute(ATTR_OTUS, characters.otus());
        node.add_attribute(ATTR_XSI_TYPE, &characters.xsi_type());

        if let Some(format) = characters.format() {
            node.add_child(self.serialize_format(format));
        }
        if let Some(matrix) = characters.matrix() {
            node.add_child(self.serialize_matrix(matrix));
        }
        node
    }

    /// Serializes a format to a `format` node, all vocabularies first,
    /// then all columns.
    pub fn serialize_format(&self, format: &Format) -> ElementNode {
        let mut node = ElementNode::new(FORMAT);
        for states in format.states() {
            node.add_child(self.serialize_states(states));
        }
        for char in format.chars() {
            node.add_child(self.serialize_char(char));
        }
        node
    }

    /// Serializes a state vocabulary to a `states` node; each stored state
    /// is dispatched on its ambiguity kind.
    pub fn serialize_states(&self, states: &States) -> ElementNode {
        let mut node = ElementNode::new(STATES).with_attribute(ATTR_ID, states.id());
        if let Some(label) = states.label() {
            node.add_attribute(ATTR_LABEL, label);
        }
        for state in states.states() {
            node.add_child(self.serialize_state(state));
        }
        node
    }

    /// Serializes a state, choosing `state`, `uncertain_state_set`, or
    /// `polymorphic_state_set` by the state's ambiguity kind.
    pub fn serialize_state(&self, state: &State) -> ElementNode {
        match state.ambiguity() {
            Ambiguity::None => self.state_node(STATE, state),
            Ambiguity::Uncertain => self.serialize_uncertain_state_set(state),
            Ambiguity::Polymorphic => self.serialize_polymorphic_state_set(state),
        }
    }

    /// Serializes an uncertain state to an `uncertain_state_set` node with
    /// its `member` children.
    pub fn serialize_uncertain_state_set(&self, state: &State) -> ElementNode {
        self.state_set_node(UNCERTAIN_STATE_SET, state)
    }

    /// Serializes a polymorphic state to a `polymorphic_state_set` node
    /// with its `member` children.
    pub fn serialize_polymorphic_state_set(&self, state: &State) -> ElementNode {
        self.state_set_node(POLYMORPHIC_STATE_SET, state)
    }

    /// Serializes a member reference to a `member` node.
    pub fn serialize_member(&self, state_id: &str) -> ElementNode {
        ElementNode::new(MEMBER).with_attribute(ATTR_STATE, state_id)
    }

    /// Serializes a column definition to a `char` node.
    pub fn serialize_char(&self, char: &Char) -> ElementNode {
        let mut node = ElementNode::new(CHAR).with_attribute(ATTR_ID, char.id());
        if let Some(label) = char.label() {
            node.add_attribute(ATTR_LABEL, label);
        }
        if let Some(states) = char.states() {
            node.add_attribute(ATTR_STATES, states);
        }
        if let Some(codon) = char.codon() {
            node.add_attribute(ATTR_CODON, &codon.to_string());
        }
        node
    }

    /// Serializes a matrix to a `matrix` node with its `row` children.
    pub fn serialize_matrix(&self, matrix: &Matrix) -> ElementNode {
        let mut node = ElementNode::new(MATRIX);
        for row in matrix.rows() {
            node.add_child(self.serialize_row(row));
        }
        node
    }

    /// Serializes a row, dispatching on its payload shape.
    pub fn serialize_row(&self, row: &Row) -> ElementNode {
        match row.payload() {
            RowPayload::Seq(_) => self.serialize_seq_row(row),
            RowPayload::Cells(_) => self.serialize_cell_row(row),
        }
    }

    /// Serializes a seq row to a `row` node holding its `seq` child
    /// (omitted when the sequence is unset).
    pub fn serialize_seq_row(&self, row: &Row) -> ElementNode {
        let mut node = self.row_node(row);
        if let Some(seq) = row.seq() {
            node.add_child(self.serialize_seq(seq));
        }
        node
    }

    /// Serializes a cell row to a `row` node holding one `cell` child per
    /// observation, in character-column order.
    pub fn serialize_cell_row(&self, row: &Row) -> ElementNode {
        let mut node = self.row_node(row);
        for cell in row.cells().unwrap_or_default() {
            node.add_child(self.serialize_cell(cell));
        }
        node
    }

    /// Serializes a sequence to a `seq` node carrying the raw value as
    /// text content.
    pub fn serialize_seq(&self, seq: &Seq) -> ElementNode {
        ElementNode::new(SEQ).with_text(seq.value())
    }

    /// Serializes a cell to a `cell` node. The `state` attribute is an id
    /// reference for discrete alphabets and the literal decimal token for
    /// Continuous.
    pub fn serialize_cell(&self, cell: &Cell) -> ElementNode {
        let state = match cell.state() {
            CellValue::State(id) => id,
            CellValue::Continuous(token) => token,
        };
        ElementNode::new(CELL)
            .with_attribute(ATTR_CHAR, cell.char())
            .with_attribute(ATTR_STATE, state)
    }

    /// Builds a state-ish node (`state` or a state-set tag) with the
    /// attributes id, label?, symbol?.
    fn state_node(&self, tag: &str, state: &State) -> ElementNode {
        let mut node = ElementNode::new(tag).with_attribute(ATTR_ID, state.id());
        if let Some(label) = state.label() {
            node.add_attribute(ATTR_LABEL, label);
        }
        if let Some(symbol) = state.symbol() {
            node.add_attribute(ATTR_SYMBOL, &symbol.to_string());
        }
        node
    }

    /// Builds an ambiguous state-set node with its member children.
    fn state_set_node(&self, tag: &str, state: &State) -> ElementNode {
        let mut node = self.state_node(tag, state);
        for member in state.members() {
            node.add_child(self.serialize_member(member));
        }
        node
    }

    /// Builds a `row` node with the attributes id, label?, otu?.
    fn row_node(&self, row: &Row) -> ElementNode {
        let mut node = ElementNode::new(ROW).with_attribute(ATTR_ID, row.id());
        if let Some(label) = row.label() {
            node.add_attribute(ATTR_LABEL, label);
        }
        if let Some(otu) = row.otu() {
            node.add_attribute(ATTR_OTU, otu);
        }
        node
    }
}
