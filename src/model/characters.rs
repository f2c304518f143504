//! The top-level characters container.
//!
//! A [Characters] block ties together the link to an external taxon block,
//! a [Format], and a [Matrix] for one alphabet and one matrix shape. Its
//! `xsi:type` discriminant (e.g. `"nex:DnaSeqs"`) is the only place the
//! alphabet appears in the document form; every descendant element is
//! alphabet-agnostic by tag and inherits the alphabet from here.

use crate::model::alphabet::Alphabet;
use crate::model::error::CharacterError;
use crate::model::format::Format;
use crate::model::matrix::{CellValue, Matrix, MatrixShape};

// =#========================================================================#=
// CHARACTERS
// =#========================================================================#=
/// A character block: otus link, format, and matrix of one alphabet.
///
/// The `otus` field is a lookup key into the external taxon block, not an
/// owning reference. Format and matrix are attached after construction via
/// [`Characters::set_format`] and [`Characters::set_matrix`], which enforce
/// that all three parts agree on alphabet (and, for the matrix, shape).
#[derive(Debug, Clone, PartialEq)]
pub struct Characters {
    id: String,
    otus: String,
    label: Option<String>,
    alphabet: Alphabet,
    shape: MatrixShape,
    format: Option<Format>,
    matrix: Option<Matrix>,
}

impl Characters {
    /// Creates a character block with no format or matrix yet.
    ///
    /// # Arguments
    /// * `alphabet` - The alphabet of every element of this block
    /// * `shape` - The matrix shape (seqs or cells) of this block
    /// * `id` - Identifier of the block
    /// * `otus` - Id of the external taxon block the rows link into
    pub fn new(alphabet: Alphabet, shape: MatrixShape, id: &str, otus: &str) -> Characters {
        Characters {
            id: id.to_string(),
            otus: otus.to_string(),
            label: None,
            alphabet,
            shape,
            format: None,
            matrix: None,
        }
    }

    /// Attaches a label to this block.
    pub fn with_label(mut self, label: &str) -> Characters {
        self.label = Some(label.to_string());
        self
    }

    /// Returns the identifier of this block.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the id of the linked external taxon block.
    pub fn otus(&self) -> &str {
        &self.otus
    }

    /// Returns the label of this block, if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the alphabet of this block.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Returns the matrix shape of this block.
    pub fn shape(&self) -> MatrixShape {
        self.shape
    }

    /// Returns the format of this block, if set.
    pub fn format(&self) -> Option<&Format> {
        self.format.as_ref()
    }

    /// Returns the matrix of this block, if set.
    pub fn matrix(&self) -> Option<&Matrix> {
        self.matrix.as_ref()
    }

    /// Returns the `xsi:type` discriminant of this block, alphabet plus
    /// role, e.g. `"nex:StandardCells"`.
    pub fn xsi_type(&self) -> String {
        format!("nex:{}{}", self.alphabet.name(), self.shape.role())
    }

    /// Sets the format of this block.
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] if the format's alphabet differs
    /// from the block's.
    pub fn set_format(&mut self, format: Format) -> Result<(), CharacterError> {
        if format.alphabet() != self.alphabet {
            return Err(CharacterError::SchemaViolation(format!(
                "{} format expected for block '{}', got {}",
                self.alphabet,
                self.id,
                format.alphabet()
            )));
        }
        self.format = Some(format);
        Ok(())
    }

    /// Sets the matrix of this block.
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] if the matrix's alphabet or shape
    /// differs from the block's.
    pub fn set_matrix(&mut self, matrix: Matrix) -> Result<(), CharacterError> {
        if matrix.alphabet() != self.alphabet {
            return Err(CharacterError::SchemaViolation(format!(
                "{} matrix expected for block '{}', got {}",
                self.alphabet,
                self.id,
                matrix.alphabet()
            )));
        }
        if matrix.shape() != self.shape {
            return Err(CharacterError::SchemaViolation(format!(
                "{:?} matrix expected for block '{}', got {:?}",
                self.shape,
                self.id,
                matrix.shape()
            )));
        }
        self.matrix = Some(matrix);
        Ok(())
    }

    /// Validates the whole block transitively:
    /// * the format itself is valid (see [`Format::validate`]),
    /// * every cell's char reference resolves in the format,
    /// * every discrete cell's state reference resolves in its char's
    ///   vocabulary.
    ///
    /// Alphabet homogeneity of everything reachable is already guaranteed
    /// by the `add_*`/`set_*` boundaries; this checks the references that
    /// can only dangle.
    ///
    /// # Errors
    /// The first [CharacterError] found.
    pub fn validate(&self) -> Result<(), CharacterError> {
        if let Some(format) = &self.format {
            format.validate()?;
        }

        let Some(matrix) = &self.matrix else {
            return Ok(());
        };
        for row in matrix.rows() {
            let Some(cells) = row.cells() else {
                continue;
            };
            for cell in cells {
                let char = self
                    .format
                    .as_ref()
                    .and_then(|f| f.get_char(cell.char()))
                    .ok_or_else(|| {
                        CharacterError::SchemaViolation(format!(
                            "cell in row '{}' references unknown char '{}'",
                            row.id(),
                            cell.char()
                        ))
                    })?;

                if let CellValue::State(state_id) = cell.state() {
                    let resolved = char
                        .states()
                        .and_then(|sid| self.format.as_ref()?.get_states(sid))
                        .is_some_and(|states| states.has(state_id));
                    if !resolved {
                        return Err(CharacterError::SchemaViolation(format!(
                            "cell at char '{}' in row '{}' references unknown state '{}'",
                            char.id(),
                            row.id(),
                            state_id
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
