//! NeXML element and attribute name constants.
//!
//! This module contains the tag and attribute names of the characters
//! subtree of the NeXML schema, plus parsing of the `xsi:type` polymorphic
//! type discriminant (alphabet + role).

use crate::model::alphabet::Alphabet;
use crate::model::matrix::MatrixShape;

// Element tags
/// Top-level character block element "characters"
pub(crate) const CHARACTERS: &str = "characters";

/// Format definition element "format"
pub(crate) const FORMAT: &str = "format";

/// State vocabulary element "states"
pub(crate) const STATES: &str = "states";

/// Plain state element "state"
pub(crate) const STATE: &str = "state";

/// Uncertain ambiguous state element "uncertain_state_set"
pub(crate) const UNCERTAIN_STATE_SET: &str = "uncertain_state_set";

/// Polymorphic ambiguous state element "polymorphic_state_set"
pub(crate) const POLYMORPHIC_STATE_SET: &str = "polymorphic_state_set";

/// Ambiguity member element "member"
pub(crate) const MEMBER: &str = "member";

/// Column definition element "char"
pub(crate) const CHAR: &str = "char";

/// Matrix element "matrix"
pub(crate) const MATRIX: &str = "matrix";

/// Matrix row element "row"
pub(crate) const ROW: &str = "row";

/// Whole-row sequence element "seq" (value as text content)
pub(crate) const SEQ: &str = "seq";

/// Single observation element "cell"
pub(crate) const CELL: &str = "cell";

// Attribute names
pub(crate) const ATTR_ID: &str = "id";
pub(crate) const ATTR_LABEL: &str = "label";
pub(crate) const ATTR_OTUS: &str = "otus";
pub(crate) const ATTR_OTU: &str = "otu";
pub(crate) const ATTR_SYMBOL: &str = "symbol";
pub(crate) const ATTR_STATES: &str = "states";
pub(crate) const ATTR_STATE: &str = "state";
pub(crate) const ATTR_CHAR: &str = "char";
pub(crate) const ATTR_CODON: &str = "codon";

/// Polymorphic type discriminant attribute "xsi:type"
pub(crate) const ATTR_XSI_TYPE: &str = "xsi:type";

/// Namespace prefix of `xsi:type` discriminant values
pub(crate) const XSI_TYPE_PREFIX: &str = "nex:";

/// Parses an `xsi:type` discriminant value such as `"nex:DnaSeqs"` or
/// `"StandardCells"` into its alphabet and matrix shape.
///
/// # Returns
/// [None] if the value is not an alphabet name followed by `"Seqs"` or
/// `"Cells"`.
pub(crate) fn parse_xsi_type(value: &str) -> Option<(Alphabet, MatrixShape)> {
    let value = value.strip_prefix(XSI_TYPE_PREFIX).unwrap_or(value);
    let (name, shape) = if let Some(name) = value.strip_suffix("Seqs") {
        (name, MatrixShape::Seq)
    } else if let Some(name) = value.strip_suffix("Cells") {
        (name, MatrixShape::Cell)
    } else {
        return None;
    };

    Alphabet::from_name(name).map(|alphabet| (alphabet, shape))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_xsi_type() {
        assert_eq!(
            parse_xsi_type("nex:DnaSeqs"),
            Some((Alphabet::Dna, MatrixShape::Seq))
        );
        assert_eq!(
            parse_xsi_type("StandardCells"),
            Some((Alphabet::Standard, MatrixShape::Cell))
        );
        assert_eq!(parse_xsi_type("nex:DnaTrees"), None);
        assert_eq!(parse_xsi_type("nex:Seqs"), None);
        assert_eq!(parse_xsi_type(""), None);
    }
}
