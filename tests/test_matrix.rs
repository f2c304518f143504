use nexchars::model::{
    Alphabet, Cell, CellValue, Char, CharacterError, Characters, Format, Matrix, MatrixShape,
    Row, RowPayload, Seq, State, States,
};

fn dna_vocabulary() -> States {
    let mut states = States::new(Alphabet::Dna, "sts1").unwrap();
    for (id, symbol) in [("sA", "A"), ("sC", "C"), ("sG", "G"), ("sT", "T")] {
        states
            .add_state(State::new(Alphabet::Dna, id, symbol).unwrap())
            .unwrap();
    }
    states
}

#[test]
fn test_seq_row_holds_sequence() {
    let mut row = Row::seq_row(Alphabet::Dna, "row1").with_otu("t1");
    row.set_seq(Seq::new("ACGT")).unwrap();

    assert_eq!(row.shape(), MatrixShape::Seq);
    assert_eq!(row.seq().unwrap().value(), "ACGT");
    assert_eq!(row.otu(), Some("t1"));
    assert!(row.cells().is_none());
}

#[test]
fn test_row_payload_matches_shape() {
    let mut seq_row = Row::seq_row(Alphabet::Dna, "row1");
    assert!(matches!(seq_row.payload(), RowPayload::Seq(None)));
    seq_row.set_seq(Seq::new("ACGT")).unwrap();
    match seq_row.payload() {
        RowPayload::Seq(Some(seq)) => assert_eq!(seq.value(), "ACGT"),
        payload => panic!("seq payload expected, got {payload:?}"),
    }

    let states = dna_vocabulary();
    let char = Char::with_states(Alphabet::Dna, "c1", &states).unwrap();
    let mut cell_row = Row::cell_row(Alphabet::Dna, "row2");
    cell_row
        .add_cell(Cell::new(&char, states.get("sA").unwrap()).unwrap())
        .unwrap();
    match cell_row.payload() {
        RowPayload::Cells(cells) => assert_eq!(cells.len(), 1),
        payload => panic!("cell payload expected, got {payload:?}"),
    }
}

#[test]
fn test_seq_row_rejects_cells() {
    let states = dna_vocabulary();
    let char = Char::with_states(Alphabet::Dna, "c1", &states).unwrap();
    let cell = Cell::new(&char, states.get("sA").unwrap()).unwrap();

    let mut row = Row::seq_row(Alphabet::Dna, "row1");
    assert!(matches!(
        row.add_cell(cell),
        Err(CharacterError::SchemaViolation(_))
    ));
}

#[test]
fn test_cell_row_preserves_cell_order() {
    let states = dna_vocabulary();
    let c1 = Char::with_states(Alphabet::Dna, "c1", &states).unwrap();
    let c2 = Char::with_states(Alphabet::Dna, "c2", &states).unwrap();

    let mut row = Row::cell_row(Alphabet::Dna, "row1");
    row.add_cell(Cell::new(&c1, states.get("sG").unwrap()).unwrap())
        .unwrap();
    row.add_cell(Cell::new(&c2, states.get("sT").unwrap()).unwrap())
        .unwrap();

    let cells = row.cells().unwrap();
    assert_eq!(cells[0].char(), "c1");
    assert_eq!(cells[1].char(), "c2");
    assert_eq!(cells[0].state(), &CellValue::State("sG".to_string()));
    assert!(row.seq().is_none());
}

#[test]
fn test_cell_row_rejects_seq() {
    let mut row = Row::cell_row(Alphabet::Dna, "row1");
    assert!(matches!(
        row.set_seq(Seq::new("ACGT")),
        Err(CharacterError::SchemaViolation(_))
    ));
}

#[test]
fn test_cell_rejects_alphabet_mismatch() {
    let states = dna_vocabulary();
    let char = Char::new(Alphabet::Rna, "c1");
    assert!(matches!(
        Cell::new(&char, states.get("sA").unwrap()),
        Err(CharacterError::SchemaViolation(_))
    ));
}

#[test]
fn test_continuous_cell_keeps_raw_token() {
    let char = Char::new(Alphabet::Continuous, "c1");
    let cell = Cell::continuous(&char, "-0.9").unwrap();
    assert_eq!(cell.state(), &CellValue::Continuous("-0.9".to_string()));

    assert!(matches!(
        Cell::continuous(&char, "not-a-number"),
        Err(CharacterError::TokenError(_))
    ));
}

#[test]
fn test_continuous_char_rejects_state_cell() {
    let states = dna_vocabulary();
    let char = Char::new(Alphabet::Continuous, "c1");
    assert!(matches!(
        Cell::new(&char, states.get("sA").unwrap()),
        Err(CharacterError::SchemaViolation(_))
    ));
}

#[test]
fn test_matrix_enforces_shape() {
    let mut matrix = Matrix::new(Alphabet::Dna, MatrixShape::Seq);
    assert!(matches!(
        matrix.add_row(Row::cell_row(Alphabet::Dna, "row1")),
        Err(CharacterError::SchemaViolation(_))
    ));
    matrix.add_row(Row::seq_row(Alphabet::Dna, "row1")).unwrap();
    assert_eq!(matrix.len(), 1);
}

#[test]
fn test_matrix_enforces_alphabet() {
    let mut matrix = Matrix::new(Alphabet::Dna, MatrixShape::Seq);
    assert!(matches!(
        matrix.add_row(Row::seq_row(Alphabet::Rna, "row1")),
        Err(CharacterError::SchemaViolation(_))
    ));
}

#[test]
fn test_matrix_overwrites_on_repeated_row_id() {
    let mut matrix = Matrix::new(Alphabet::Dna, MatrixShape::Seq);
    let mut first = Row::seq_row(Alphabet::Dna, "row1");
    first.set_seq(Seq::new("AAAA")).unwrap();
    let mut second = Row::seq_row(Alphabet::Dna, "row1");
    second.set_seq(Seq::new("CCCC")).unwrap();

    matrix.add_row(first).unwrap();
    matrix.add_row(second).unwrap();
    assert_eq!(matrix.len(), 1);
    assert_eq!(matrix.get("row1").unwrap().seq().unwrap().value(), "CCCC");
}

#[test]
fn test_characters_xsi_type() {
    let block = Characters::new(Alphabet::Dna, MatrixShape::Seq, "c1", "taxa1");
    assert_eq!(block.xsi_type(), "nex:DnaSeqs");
    let block = Characters::new(Alphabet::Standard, MatrixShape::Cell, "c2", "taxa1");
    assert_eq!(block.xsi_type(), "nex:StandardCells");
    let block = Characters::new(Alphabet::Continuous, MatrixShape::Cell, "c3", "taxa1");
    assert_eq!(block.xsi_type(), "nex:ContinuousCells");
}

#[test]
fn test_characters_rejects_mismatched_parts() {
    let mut block = Characters::new(Alphabet::Dna, MatrixShape::Seq, "c1", "taxa1");
    assert!(matches!(
        block.set_format(Format::new(Alphabet::Rna)),
        Err(CharacterError::SchemaViolation(_))
    ));
    assert!(matches!(
        block.set_matrix(Matrix::new(Alphabet::Dna, MatrixShape::Cell)),
        Err(CharacterError::SchemaViolation(_))
    ));
    assert!(matches!(
        block.set_matrix(Matrix::new(Alphabet::Rna, MatrixShape::Seq)),
        Err(CharacterError::SchemaViolation(_))
    ));
}

#[test]
fn test_validate_accepts_resolved_block() {
    let states = dna_vocabulary();
    let char = Char::with_states(Alphabet::Dna, "c1", &states).unwrap();
    let cell = Cell::new(&char, states.get("sA").unwrap()).unwrap();

    let mut format = Format::new(Alphabet::Dna);
    format.add_states(states).unwrap();
    format.add_char(char).unwrap();

    let mut row = Row::cell_row(Alphabet::Dna, "row1").with_otu("t1");
    row.add_cell(cell).unwrap();
    let mut matrix = Matrix::new(Alphabet::Dna, MatrixShape::Cell);
    matrix.add_row(row).unwrap();

    let mut block = Characters::new(Alphabet::Dna, MatrixShape::Cell, "c1", "taxa1");
    block.set_format(format).unwrap();
    block.set_matrix(matrix).unwrap();
    assert!(block.validate().is_ok());
}

#[test]
fn test_validate_rejects_cell_with_unknown_char() {
    let states = dna_vocabulary();
    let detached = Char::with_states(Alphabet::Dna, "ghost", &states).unwrap();
    let cell = Cell::new(&detached, states.get("sA").unwrap()).unwrap();

    let mut format = Format::new(Alphabet::Dna);
    format.add_states(states).unwrap();

    let mut row = Row::cell_row(Alphabet::Dna, "row1");
    row.add_cell(cell).unwrap();
    let mut matrix = Matrix::new(Alphabet::Dna, MatrixShape::Cell);
    matrix.add_row(row).unwrap();

    let mut block = Characters::new(Alphabet::Dna, MatrixShape::Cell, "c1", "taxa1");
    block.set_format(format).unwrap();
    block.set_matrix(matrix).unwrap();
    assert!(matches!(
        block.validate(),
        Err(CharacterError::SchemaViolation(_))
    ));
}

#[test]
fn test_validate_rejects_cell_with_unresolved_state() {
    let states = dna_vocabulary();
    let char = Char::with_states(Alphabet::Dna, "c1", &states).unwrap();
    let stray = State::new(Alphabet::Dna, "sZ", "G").unwrap();
    let cell = Cell::new(&char, &stray).unwrap();

    let mut format = Format::new(Alphabet::Dna);
    format.add_states(states).unwrap();
    format.add_char(char).unwrap();

    let mut row = Row::cell_row(Alphabet::Dna, "row1");
    row.add_cell(cell).unwrap();
    let mut matrix = Matrix::new(Alphabet::Dna, MatrixShape::Cell);
    matrix.add_row(row).unwrap();

    let mut block = Characters::new(Alphabet::Dna, MatrixShape::Cell, "c1", "taxa1");
    block.set_format(format).unwrap();
    block.set_matrix(matrix).unwrap();
    assert!(matches!(
        block.validate(),
        Err(CharacterError::SchemaViolation(_))
    ));
}
