//! Format definitions: characters (columns) and their vocabularies.
//!
//! Provides [Char], a named column definition referencing a [States]
//! vocabulary, and [Format], the alphabet-homogeneous container binding
//! vocabularies and columns together for one character block. A format
//! never mixes alphabets: every vocabulary and every column added must
//! report the format's fixed alphabet.

use crate::model::alphabet::{Alphabet, CodonPosition};
use crate::model::error::CharacterError;
use crate::model::state::States;
use indexmap::IndexMap;

// =#========================================================================#=
// CHAR
// =#========================================================================#=
/// A named column definition in a matrix.
///
/// A char references a [States] vocabulary by id rather than owning it; the
/// vocabulary lives in the surrounding [Format]. Continuous chars have no
/// vocabulary. Dna and Rna chars may additionally carry a
/// [codon position](CodonPosition).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Char {
    id: String,
    alphabet: Alphabet,
    label: Option<String>,
    states: Option<String>,
    codon: Option<CodonPosition>,
}

impl Char {
    /// Creates a char without a vocabulary reference.
    pub fn new(alphabet: Alphabet, id: &str) -> Char {
        Char {
            id: id.to_string(),
            alphabet,
            label: None,
            states: None,
            codon: None,
        }
    }

    /// Creates a char referencing the given vocabulary.
    ///
    /// # Errors
    /// As for [`Char::set_states`].
    pub fn with_states(
        alphabet: Alphabet,
        id: &str,
        states: &States,
    ) -> Result<Char, CharacterError> {
        let mut char = Char::new(alphabet, id);
        char.set_states(states)?;
        Ok(char)
    }

    /// Attaches a label to this char.
    pub fn with_label(mut self, label: &str) -> Char {
        self.label = Some(label.to_string());
        self
    }

    /// Returns the identifier of this char.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the alphabet of this char.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Returns the label of this char, if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the id of the referenced vocabulary, if set.
    pub fn states(&self) -> Option<&str> {
        self.states.as_deref()
    }

    /// Returns the codon position of this char, if set.
    pub fn codon(&self) -> Option<CodonPosition> {
        self.codon
    }

    /// Sets the vocabulary reference of this char, keyed by the
    /// vocabulary's id.
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] if this char is Continuous (no
    /// vocabularies exist) or if the vocabulary's alphabet differs.
    pub fn set_states(&mut self, states: &States) -> Result<(), CharacterError> {
        if !self.alphabet.has_states() {
            return Err(CharacterError::SchemaViolation(format!(
                "Continuous char '{}' cannot reference a state vocabulary",
                self.id
            )));
        }
        if states.alphabet() != self.alphabet {
            return Err(CharacterError::SchemaViolation(format!(
                "{} states expected for char '{}', got {}",
                self.alphabet,
                self.id,
                states.alphabet()
            )));
        }
        self.states = Some(states.id().to_string());
        Ok(())
    }

    /// Reference by id without alphabet proof; the reader resolves and
    /// revalidates through [`Format::validate`].
    pub(crate) fn set_states_id(&mut self, states_id: &str) -> Result<(), CharacterError> {
        if !self.alphabet.has_states() {
            return Err(CharacterError::SchemaViolation(format!(
                "Continuous char '{}' cannot reference a state vocabulary",
                self.id
            )));
        }
        self.states = Some(states_id.to_string());
        Ok(())
    }

    /// Sets the codon position of this char.
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] unless the alphabet is Dna or Rna.
    pub fn set_codon(&mut self, codon: CodonPosition) -> Result<(), CharacterError> {
        if !self.alphabet.allows_codon() {
            return Err(CharacterError::SchemaViolation(format!(
                "codon position is not legal on a {} char",
                self.alphabet
            )));
        }
        self.codon = Some(codon);
        Ok(())
    }
}

// =#========================================================================#=
// FORMAT
// =#========================================================================#=
/// A reference to an entry of a [Format], either a vocabulary or a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatEntry<'a> {
    /// A [States] vocabulary.
    States(&'a States),
    /// A [Char] column definition.
    Char(&'a Char),
}

/// The format definition of a character block: its [States] vocabularies
/// and its [Char] columns, all of one fixed alphabet.
///
/// Both id spaces use last-write-wins storage: adding under an id that is
/// already present overwrites silently. On id collision *across* the two
/// spaces, [`Format::lookup`] prefers chars over states.
#[derive(Debug, Clone, PartialEq)]
pub struct Format {
    alphabet: Alphabet,
    states_set: IndexMap<String, States>,
    char_set: IndexMap<String, Char>,
}

impl Format {
    /// Creates an empty format for the given alphabet.
    pub fn new(alphabet: Alphabet) -> Format {
        Format {
            alphabet,
            states_set: IndexMap::new(),
            char_set: IndexMap::new(),
        }
    }

    /// Returns the alphabet of this format.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Adds a vocabulary, keyed by its id (overwriting on repeat).
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] if this is a Continuous format
    /// (vocabularies do not exist there) or on alphabet mismatch.
    pub fn add_states(&mut self, states: States) -> Result<(), CharacterError> {
        if !self.alphabet.has_states() {
            return Err(CharacterError::SchemaViolation(
                "a Continuous format has no state vocabularies".to_string(),
            ));
        }
        if states.alphabet() != self.alphabet {
            return Err(CharacterError::SchemaViolation(format!(
                "{} states expected, got {}",
                self.alphabet,
                states.alphabet()
            )));
        }
        self.states_set.insert(states.id().to_string(), states);
        Ok(())
    }

    /// Adds a column definition, keyed by its id (overwriting on repeat).
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] on alphabet mismatch.
    pub fn add_char(&mut self, char: Char) -> Result<(), CharacterError> {
        if char.alphabet() != self.alphabet {
            return Err(CharacterError::SchemaViolation(format!(
                "{} char expected, got {}",
                self.alphabet,
                char.alphabet()
            )));
        }
        self.char_set.insert(char.id().to_string(), char);
        Ok(())
    }

    /// Returns the vocabulary with the given id, or [None].
    pub fn get_states(&self, id: &str) -> Option<&States> {
        self.states_set.get(id)
    }

    /// Returns the char with the given id, or [None].
    pub fn get_char(&self, id: &str) -> Option<&Char> {
        self.char_set.get(id)
    }

    /// Returns whether a vocabulary with the given id is stored.
    pub fn has_states(&self, id: &str) -> bool {
        self.states_set.contains_key(id)
    }

    /// Returns whether a char with the given id is stored.
    pub fn has_char(&self, id: &str) -> bool {
        self.char_set.contains_key(id)
    }

    /// Returns whether either id space holds the given id.
    pub fn has(&self, id: &str) -> bool {
        self.has_char(id) || self.has_states(id)
    }

    /// Looks up an id across both spaces; chars shadow states on collision.
    pub fn lookup(&self, id: &str) -> Option<FormatEntry<'_>> {
        self.char_set
            .get(id)
            .map(FormatEntry::Char)
            .or_else(|| self.states_set.get(id).map(FormatEntry::States))
    }

    /// Returns an iterator over the vocabularies in insertion order.
    pub fn states(&self) -> impl Iterator<Item = &States> {
        self.states_set.values()
    }

    /// Returns an iterator over the chars in insertion order.
    pub fn chars(&self) -> impl Iterator<Item = &Char> {
        self.char_set.values()
    }

    /// Returns an iterator over all entries, all states first, then all
    /// chars, each in insertion order.
    pub fn each(&self) -> impl Iterator<Item = FormatEntry<'_>> {
        self.states_set
            .values()
            .map(FormatEntry::States)
            .chain(self.char_set.values().map(FormatEntry::Char))
    }

    /// Validates this format: every vocabulary's ambiguity mappings hold
    /// (see [`States::validate_members`]) and every char's vocabulary
    /// reference resolves.
    ///
    /// # Errors
    /// The first [CharacterError] found.
    pub fn validate(&self) -> Result<(), CharacterError> {
        for states in self.states_set.values() {
            states.validate_members()?;
        }
        for char in self.char_set.values() {
            if let Some(states_id) = char.states()
                && !self.has_states(states_id)
            {
                return Err(CharacterError::SchemaViolation(format!(
                    "char '{}' references unknown states '{}'",
                    char.id(),
                    states_id
                )));
            }
        }
        Ok(())
    }
}
