//! Alphabet registry for character blocks.
//!
//! Provides the six fixed alphabets of the NeXML characters model as the
//! [Alphabet] enum. Every object in a character block carries exactly one
//! alphabet, which governs:
//! * the symbol grammar, checked by [`Alphabet::validate_symbol`],
//! * whether state vocabularies exist at all ([`Alphabet::has_states`],
//!   false only for [Continuous](Alphabet::Continuous)),
//! * whether codon-position metadata is legal ([`Alphabet::allows_codon`],
//!   true only for Dna and Rna).
//!
//! Validated symbols are captured by [Symbol]; codon positions by
//! [CodonPosition].

use crate::model::error::CharacterError;
use std::fmt;

/// Valid single-letter DNA tokens (IUPAC codes plus gap and missing).
const DNA_TOKENS: &[char] = &[
    'A', 'B', 'C', 'D', 'G', 'H', 'K', 'M', 'N', 'R', 'S', 'T', 'V', 'W', 'X', 'Y', '-', '?',
];

/// Valid single-letter RNA tokens (as DNA with `T` replaced by `U`).
const RNA_TOKENS: &[char] = &[
    'A', 'B', 'C', 'D', 'G', 'H', 'K', 'M', 'N', 'R', 'S', 'U', 'V', 'W', 'X', 'Y', '-', '?',
];

/// Valid single-letter amino acid tokens (one-letter codes plus stop, gap
/// and missing; `J` and `O` are not assigned).
const PROTEIN_TOKENS: &[char] = &[
    '*', '-', '?', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L', 'M', 'N', 'P', 'Q', 'R',
    'S', 'T', 'V', 'W', 'X', 'Y', 'Z',
];

// =#========================================================================#=
// ALPHABET
// =#========================================================================#=
/// One of the six fixed vocabularies governing symbol grammar and structural
/// rules for a character block.
///
/// The alphabet is threaded through construction of every element of a
/// block (format, state vocabularies, characters, matrix rows, cells), and
/// every container checks it at its `add_*`/`set_*` boundary. In the
/// document form it only ever appears inside the `xsi:type` discriminant of
/// the top-level `characters` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alphabet {
    /// Nucleotide data over `A B C D G H K M N R S T V W X Y - ?`.
    Dna,
    /// Nucleotide data over the DNA tokens with `T` replaced by `U`.
    Rna,
    /// Amino acid data over `* - ?` and the one-letter codes except `J`/`O`.
    Protein,
    /// Discrete trait data over single decimal digits.
    Standard,
    /// Restriction site data over `0`/`1`.
    Restriction,
    /// Continuous trait data; raw decimal tokens, no state vocabularies.
    Continuous,
}

impl Alphabet {
    /// Returns the capitalized alphabet name as used in `xsi:type`
    /// discriminants, e.g. `"Dna"` or `"Standard"`.
    pub fn name(&self) -> &'static str {
        match self {
            Alphabet::Dna => "Dna",
            Alphabet::Rna => "Rna",
            Alphabet::Protein => "Protein",
            Alphabet::Standard => "Standard",
            Alphabet::Restriction => "Restriction",
            Alphabet::Continuous => "Continuous",
        }
    }

    /// Parses an alphabet from its `xsi:type` name.
    pub fn from_name(name: &str) -> Option<Alphabet> {
        match name {
            "Dna" => Some(Alphabet::Dna),
            "Rna" => Some(Alphabet::Rna),
            "Protein" => Some(Alphabet::Protein),
            "Standard" => Some(Alphabet::Standard),
            "Restriction" => Some(Alphabet::Restriction),
            "Continuous" => Some(Alphabet::Continuous),
            _ => None,
        }
    }

    /// Returns whether this alphabet has state vocabularies at all.
    /// Only [Continuous](Alphabet::Continuous) does not; its observations
    /// are raw decimal tokens instead of state references.
    pub fn has_states(&self) -> bool {
        !matches!(self, Alphabet::Continuous)
    }

    /// Returns whether codon-position metadata is legal on characters of
    /// this alphabet (Dna and Rna only).
    pub fn allows_codon(&self) -> bool {
        matches!(self, Alphabet::Dna | Alphabet::Rna)
    }

    /// Validates a raw token against this alphabet's symbol grammar.
    ///
    /// # Arguments
    /// * `token` - The raw document token, e.g. `"A"`, `"0"`, or `"-0.9"`
    ///
    /// # Returns
    /// The validated [Symbol]: a letter token for Dna/Rna/Protein, an
    /// integer for Standard/Restriction, or the preserved raw text for
    /// Continuous.
    ///
    /// # Errors
    /// [CharacterError::TokenError] if the token does not match the
    /// grammar.
    pub fn validate_symbol(&self, token: &str) -> Result<Symbol, CharacterError> {
        match self {
            Alphabet::Dna => letter_symbol(token, DNA_TOKENS, "DNA"),
            Alphabet::Rna => letter_symbol(token, RNA_TOKENS, "RNA"),
            Alphabet::Protein => letter_symbol(token, PROTEIN_TOKENS, "Protein"),
            Alphabet::Standard => digit_symbol(token, 9, "Standard"),
            Alphabet::Restriction => digit_symbol(token, 1, "Restriction"),
            Alphabet::Continuous => {
                if is_continuous_token(token) {
                    Ok(Symbol::Continuous(token.to_string()))
                } else {
                    Err(CharacterError::TokenError(format!(
                        "not a valid Continuous token: '{token}'"
                    )))
                }
            }
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Validates a single-letter token against a token table.
fn letter_symbol(
    token: &str,
    table: &[char],
    grammar: &str,
) -> Result<Symbol, CharacterError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if table.contains(&c) => Ok(Symbol::Token(c)),
        _ => Err(CharacterError::TokenError(format!(
            "not a valid {grammar} token: '{token}'"
        ))),
    }
}

/// Validates a single-digit token with the given maximum digit,
/// stored as an integer.
fn digit_symbol(token: &str, max: u8, grammar: &str) -> Result<Symbol, CharacterError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() && (c as u8 - b'0') <= max => {
            Ok(Symbol::Number(c as u8 - b'0'))
        }
        _ => Err(CharacterError::TokenError(format!(
            "not a valid {grammar} token: '{token}'"
        ))),
    }
}

/// Checks a token against the signed decimal float grammar
/// `[+-]?digits(.digits)?`.
fn is_continuous_token(token: &str) -> bool {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.is_none_or(all_digits)
}

// =#========================================================================#=
// SYMBOL
// =#========================================================================#=
/// A symbol validated against an alphabet's grammar.
///
/// Dna/Rna/Protein symbols are single letters, Standard/Restriction symbols
/// are stored as integers, and Continuous tokens keep their raw text.
/// [`Display`](fmt::Display) renders the document token in all cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// Single-letter token of a molecular alphabet.
    Token(char),
    /// Integer symbol of the Standard or Restriction alphabet.
    Number(u8),
    /// Raw decimal token of the Continuous alphabet.
    Continuous(String),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::Token(c) => write!(f, "{c}"),
            Symbol::Number(n) => write!(f, "{n}"),
            Symbol::Continuous(raw) => write!(f, "{raw}"),
        }
    }
}

// =#========================================================================#=
// CODON POSITION
// =#========================================================================#=
/// Codon position metadata for a Dna or Rna character, an integer in 1..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodonPosition(u8);

impl CodonPosition {
    /// Creates a codon position.
    ///
    /// # Errors
    /// [CharacterError::TokenError] if `position` is not 1, 2, or 3.
    pub fn new(position: u8) -> Result<CodonPosition, CharacterError> {
        if (1..=3).contains(&position) {
            Ok(CodonPosition(position))
        } else {
            Err(CharacterError::TokenError(format!(
                "valid codon position expected, got {position}"
            )))
        }
    }

    /// Parses a codon position from its document token.
    ///
    /// # Errors
    /// [CharacterError::TokenError] if the token is not `"1"`, `"2"`,
    /// or `"3"`.
    pub fn parse(token: &str) -> Result<CodonPosition, CharacterError> {
        match token {
            "1" => Ok(CodonPosition(1)),
            "2" => Ok(CodonPosition(2)),
            "3" => Ok(CodonPosition(3)),
            _ => Err(CharacterError::TokenError(format!(
                "valid codon position expected, got '{token}'"
            ))),
        }
    }

    /// Returns the position as an integer in 1..=3.
    pub fn position(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for CodonPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
