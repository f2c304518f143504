//! Matrix model: rows, cells, and sequences.
//!
//! A [Matrix] holds the observations of one character block as [Row]s, in
//! one of two shapes fixed at construction:
//! * [Seq shape](MatrixShape::Seq) - every row holds a whole-row token
//!   string ([Seq]),
//! * [Cell shape](MatrixShape::Cell) - every row holds per-position
//!   observations ([Cell]s) in character-column order.
//!
//! Cells reference their column ([Char](crate::model::Char)) and, for
//! discrete alphabets, their observed [State](crate::model::State) by id;
//! Continuous cells hold the raw decimal token instead.

use crate::model::alphabet::Alphabet;
use crate::model::error::CharacterError;
use crate::model::format::Char;
use crate::model::state::State;
use indexmap::IndexMap;

// =#========================================================================#=
// SEQ
// =#========================================================================#=
/// A whole-row token string, used instead of per-position cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seq {
    value: String,
}

impl Seq {
    /// Creates a sequence from its raw token string.
    pub fn new(value: &str) -> Seq {
        Seq {
            value: value.to_string(),
        }
    }

    /// Returns the raw token string.
    pub fn value(&self) -> &str {
        &self.value
    }
}

// =#========================================================================#=
// CELL
// =#========================================================================#=
/// The observed value of a [Cell]: a state reference for discrete
/// alphabets, or a raw decimal token for Continuous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Id reference to a [State] of the column's vocabulary.
    State(String),
    /// Raw decimal token of a Continuous observation.
    Continuous(String),
}

/// A single observation: one column, one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    alphabet: Alphabet,
    char: String,
    state: CellValue,
}

impl Cell {
    /// Creates a discrete cell observing `state` at column `char`.
    ///
    /// # Arguments
    /// * `char` - The column definition this cell belongs to
    /// * `state` - The observed state, same alphabet as the column
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] if the column is Continuous
    /// (Continuous cells hold raw tokens, see [`Cell::continuous`]) or if
    /// the column's and state's alphabets differ.
    pub fn new(char: &Char, state: &State) -> Result<Cell, CharacterError> {
        if char.alphabet() == Alphabet::Continuous {
            return Err(CharacterError::SchemaViolation(format!(
                "Continuous cell at char '{}' holds a raw token, not a state",
                char.id()
            )));
        }
        if state.alphabet() != char.alphabet() {
            return Err(CharacterError::SchemaViolation(format!(
                "{} state expected at char '{}', got {}",
                char.alphabet(),
                char.id(),
                state.alphabet()
            )));
        }
        Ok(Cell {
            alphabet: char.alphabet(),
            char: char.id().to_string(),
            state: CellValue::State(state.id().to_string()),
        })
    }

    /// Creates a Continuous cell observing the raw decimal `token` at
    /// column `char`.
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] if the column is not Continuous;
    /// [CharacterError::TokenError] if the token fails the float grammar.
    pub fn continuous(char: &Char, token: &str) -> Result<Cell, CharacterError> {
        if char.alphabet() != Alphabet::Continuous {
            return Err(CharacterError::SchemaViolation(format!(
                "{} cell at char '{}' requires a state, not a raw token",
                char.alphabet(),
                char.id()
            )));
        }
        Alphabet::Continuous.validate_symbol(token)?;
        Ok(Cell {
            alphabet: Alphabet::Continuous,
            char: char.id().to_string(),
            state: CellValue::Continuous(token.to_string()),
        })
    }

    /// Returns the alphabet of this cell.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Returns the id of the column this cell belongs to.
    pub fn char(&self) -> &str {
        &self.char
    }

    /// Returns the observed value of this cell.
    pub fn state(&self) -> &CellValue {
        &self.state
    }
}

// =#========================================================================#=
// ROW
// =#========================================================================#=
/// The payload of a [Row]: a whole-row [Seq] or ordered [Cell]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowPayload {
    /// Seq shape; [None] until the sequence is set.
    Seq(Option<Seq>),
    /// Cell shape; cells in character-column order.
    Cells(Vec<Cell>),
}

/// One row of a matrix, linked to a taxon of the external taxon block.
///
/// The `otu` field is a lookup key into that external collaborator, never
/// an owning reference. Cell order within a cell row is the
/// character-column order and round-trips exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: String,
    alphabet: Alphabet,
    otu: Option<String>,
    label: Option<String>,
    payload: RowPayload,
}

impl Row {
    /// Creates a row of [Seq shape](MatrixShape::Seq) with no sequence yet.
    pub fn seq_row(alphabet: Alphabet, id: &str) -> Row {
        Row {
            id: id.to_string(),
            alphabet,
            otu: None,
            label: None,
            payload: RowPayload::Seq(None),
        }
    }

    /// Creates an empty row of [Cell shape](MatrixShape::Cell).
    pub fn cell_row(alphabet: Alphabet, id: &str) -> Row {
        Row {
            id: id.to_string(),
            alphabet,
            otu: None,
            label: None,
            payload: RowPayload::Cells(Vec::new()),
        }
    }

    /// Links this row to a taxon of the external taxon block by id.
    pub fn with_otu(mut self, otu: &str) -> Row {
        self.otu = Some(otu.to_string());
        self
    }

    /// Attaches a label to this row.
    pub fn with_label(mut self, label: &str) -> Row {
        self.label = Some(label.to_string());
        self
    }

    /// Returns the identifier of this row.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the alphabet of this row.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Returns the linked taxon id, if set.
    pub fn otu(&self) -> Option<&str> {
        self.otu.as_deref()
    }

    /// Returns the label of this row, if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the shape of this row's payload.
    pub fn shape(&self) -> MatrixShape {
        match self.payload {
            RowPayload::Seq(_) => MatrixShape::Seq,
            RowPayload::Cells(_) => MatrixShape::Cell,
        }
    }

    /// Returns the payload of this row.
    pub fn payload(&self) -> &RowPayload {
        &self.payload
    }

    /// Sets the sequence of a seq row.
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] if this is a cell row.
    pub fn set_seq(&mut self, seq: Seq) -> Result<(), CharacterError> {
        match &mut self.payload {
            RowPayload::Seq(slot) => {
                *slot = Some(seq);
                Ok(())
            }
            RowPayload::Cells(_) => Err(CharacterError::SchemaViolation(format!(
                "row '{}' holds cells, not a seq",
                self.id
            ))),
        }
    }

    /// Appends a cell to a cell row, preserving call order.
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] if this is a seq row or the
    /// cell's alphabet differs from the row's.
    pub fn add_cell(&mut self, cell: Cell) -> Result<(), CharacterError> {
        if cell.alphabet() != self.alphabet {
            return Err(CharacterError::SchemaViolation(format!(
                "{} cell expected in row '{}', got {}",
                self.alphabet,
                self.id,
                cell.alphabet()
            )));
        }
        match &mut self.payload {
            RowPayload::Cells(cells) => {
                cells.push(cell);
                Ok(())
            }
            RowPayload::Seq(_) => Err(CharacterError::SchemaViolation(format!(
                "row '{}' holds a seq, not cells",
                self.id
            ))),
        }
    }

    /// Returns the sequence of a seq row, or [None] for a cell row or an
    /// unset sequence.
    pub fn seq(&self) -> Option<&Seq> {
        match &self.payload {
            RowPayload::Seq(seq) => seq.as_ref(),
            RowPayload::Cells(_) => None,
        }
    }

    /// Returns the cells of a cell row in column order, or [None] for a
    /// seq row.
    pub fn cells(&self) -> Option<&[Cell]> {
        match &self.payload {
            RowPayload::Cells(cells) => Some(cells),
            RowPayload::Seq(_) => None,
        }
    }
}

// =#========================================================================#=
// MATRIX
// =#========================================================================#=
/// The two row-payload shapes a matrix can have, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixShape {
    /// Every row holds a whole-row [Seq].
    Seq,
    /// Every row holds ordered [Cell]s.
    Cell,
}

impl MatrixShape {
    /// Returns the role suffix used in `xsi:type` discriminants,
    /// `"Seqs"` or `"Cells"`.
    pub fn role(&self) -> &'static str {
        match self {
            MatrixShape::Seq => "Seqs",
            MatrixShape::Cell => "Cells",
        }
    }
}

/// A character matrix: rows keyed by id, one alphabet, one shape.
///
/// Row storage is last-write-wins: a repeated row id overwrites the stored
/// row silently (the same policy as [States](crate::model::States)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    alphabet: Alphabet,
    shape: MatrixShape,
    row_set: IndexMap<String, Row>,
}

impl Matrix {
    /// Creates an empty matrix of the given alphabet and shape.
    pub fn new(alphabet: Alphabet, shape: MatrixShape) -> Matrix {
        Matrix {
            alphabet,
            shape,
            row_set: IndexMap::new(),
        }
    }

    /// Returns the alphabet of this matrix.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Returns the shape of this matrix.
    pub fn shape(&self) -> MatrixShape {
        self.shape
    }

    /// Adds a row, keyed by its id (overwriting on repeat).
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] if the row's payload shape or
    /// alphabet does not match this matrix.
    pub fn add_row(&mut self, row: Row) -> Result<(), CharacterError> {
        if row.shape() != self.shape {
            return Err(CharacterError::SchemaViolation(format!(
                "{:?}-shaped row '{}' cannot be added to a {:?} matrix",
                row.shape(),
                row.id(),
                self.shape
            )));
        }
        if row.alphabet() != self.alphabet {
            return Err(CharacterError::SchemaViolation(format!(
                "{} row expected, got {}",
                self.alphabet,
                row.alphabet()
            )));
        }
        self.row_set.insert(row.id().to_string(), row);
        Ok(())
    }

    /// Returns the row with the given id, or [None].
    pub fn get(&self, id: &str) -> Option<&Row> {
        self.row_set.get(id)
    }

    /// Returns whether a row with the given id is stored.
    pub fn has(&self, id: &str) -> bool {
        self.row_set.contains_key(id)
    }

    /// Returns an iterator over the rows in insertion order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.row_set.values()
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.row_set.len()
    }

    /// Returns whether the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_set.is_empty()
    }
}
