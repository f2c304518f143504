use nexchars::model::{
    Alphabet, Cell, Char, Characters, CodonPosition, Format, Matrix, MatrixShape, Row, Seq,
    State, States,
};
use nexchars::nexml::{ElementNode, Writer};

fn standard_vocabulary() -> States {
    let mut states = States::new(Alphabet::Standard, "sts1").unwrap();
    let one = State::new(Alphabet::Standard, "s1", "1").unwrap();
    let two = State::new(Alphabet::Standard, "s2", "2").unwrap();
    let mut poly = State::polymorphic(Alphabet::Standard, "s4", Some("4")).unwrap();
    poly.add_member(&one).unwrap();
    poly.add_member(&two).unwrap();
    let mut uncertain = State::uncertain(Alphabet::Standard, "s5", Some("5")).unwrap();
    uncertain.add_member(&one).unwrap();
    uncertain.add_member(&two).unwrap();

    states.add_state(one).unwrap();
    states.add_state(two).unwrap();
    states.add_state(poly).unwrap();
    states.add_state(uncertain).unwrap();
    states
}

#[test]
fn test_serialize_characters_attributes() {
    let block = Characters::new(Alphabet::Dna, MatrixShape::Seq, "chars1", "taxa1")
        .with_label("my block");
    let node = Writer::new().serialize_characters(&block);

    assert_eq!(node.tag(), "characters");
    assert_eq!(node.attribute("id"), Some("chars1"));
    assert_eq!(node.attribute("label"), Some("my block"));
    assert_eq!(node.attribute("otus"), Some("taxa1"));
    assert_eq!(node.attribute("xsi:type"), Some("nex:DnaSeqs"));
    assert!(node.children().is_empty());
}

#[test]
fn test_serialize_characters_omits_unset_label() {
    let block = Characters::new(Alphabet::Rna, MatrixShape::Cell, "chars1", "taxa1");
    let node = Writer::new().serialize_characters(&block);
    assert_eq!(node.attribute("label"), None);
    assert_eq!(node.attribute("xsi:type"), Some("nex:RnaCells"));
}

#[test]
fn test_serialize_states_dispatches_on_ambiguity() {
    let node = Writer::new().serialize_states(&standard_vocabulary());

    assert_eq!(node.tag(), "states");
    assert_eq!(node.attribute("id"), Some("sts1"));
    let tags: Vec<&str> = node.children().iter().map(|c| c.tag()).collect();
    assert_eq!(
        tags,
        ["state", "state", "polymorphic_state_set", "uncertain_state_set"]
    );
}

#[test]
fn test_serialize_state_sets_carry_members() {
    let writer = Writer::new();
    let states = standard_vocabulary();
    let expected_members = [
        ElementNode::new("member").with_attribute("state", "s1"),
        ElementNode::new("member").with_attribute("state", "s2"),
    ];

    for (id, tag) in [("s4", "polymorphic_state_set"), ("s5", "uncertain_state_set")] {
        let node = writer.serialize_state(states.get(id).unwrap());
        assert_eq!(node.tag(), tag);
        assert_eq!(node.attribute("id"), Some(id));
        assert_eq!(node.children().len(), 2);
        assert!(node.children()[0].structurally_eq(&expected_members[0]));
        assert!(node.children()[1].structurally_eq(&expected_members[1]));
    }
}

#[test]
fn test_serialize_state_renders_symbol() {
    let writer = Writer::new();
    let state = State::new(Alphabet::Standard, "s1", "1").unwrap();
    let node = writer.serialize_state(&state);
    assert!(node.structurally_eq(
        &ElementNode::new("state")
            .with_attribute("id", "s1")
            .with_attribute("symbol", "1")
    ));

    let bare = State::without_symbol(Alphabet::Standard, "s9").unwrap();
    assert_eq!(writer.serialize_state(&bare).attribute("symbol"), None);
}

#[test]
fn test_serialize_char_with_states_and_codon() {
    let states = standard_vocabulary();
    let char = Char::with_states(Alphabet::Standard, "c1", &states)
        .unwrap()
        .with_label("column one");
    let node = Writer::new().serialize_char(&char);
    assert!(node.structurally_eq(
        &ElementNode::new("char")
            .with_attribute("id", "c1")
            .with_attribute("label", "column one")
            .with_attribute("states", "sts1")
    ));

    let mut codon_char = Char::new(Alphabet::Dna, "c2");
    codon_char.set_codon(CodonPosition::new(3).unwrap()).unwrap();
    let node = Writer::new().serialize_char(&codon_char);
    assert_eq!(node.attribute("codon"), Some("3"));
    assert_eq!(node.attribute("states"), None);
}

#[test]
fn test_serialize_format_states_before_chars() {
    let states = standard_vocabulary();
    let char = Char::with_states(Alphabet::Standard, "c1", &states).unwrap();
    let mut format = Format::new(Alphabet::Standard);
    format.add_char(char).unwrap();
    format.add_states(states).unwrap();

    let node = Writer::new().serialize_format(&format);
    let tags: Vec<&str> = node.children().iter().map(|c| c.tag()).collect();
    assert_eq!(tags, ["states", "char"]);
}

#[test]
fn test_serialize_seq_row() {
    let mut row = Row::seq_row(Alphabet::Dna, "row1")
        .with_label("taxon row")
        .with_otu("t1");
    row.set_seq(Seq::new("ACGT-?")).unwrap();

    let node = Writer::new().serialize_row(&row);
    let expected = ElementNode::new("row")
        .with_attribute("id", "row1")
        .with_attribute("label", "taxon row")
        .with_attribute("otu", "t1")
        .with_child(ElementNode::new("seq").with_text("ACGT-?"));
    assert!(node.structurally_eq(&expected));
}

#[test]
fn test_serialize_cell_row_with_state_references() {
    let states = standard_vocabulary();
    let char = Char::with_states(Alphabet::Standard, "c1", &states).unwrap();
    let mut row = Row::cell_row(Alphabet::Standard, "row1").with_otu("t1");
    row.add_cell(Cell::new(&char, states.get("s2").unwrap()).unwrap())
        .unwrap();

    let node = Writer::new().serialize_row(&row);
    assert_eq!(node.children().len(), 1);
    let cell = &node.children()[0];
    assert!(cell.structurally_eq(
        &ElementNode::new("cell")
            .with_attribute("char", "c1")
            .with_attribute("state", "s2")
    ));
}

#[test]
fn test_serialize_continuous_cell_emits_raw_token() {
    let char = Char::new(Alphabet::Continuous, "cont_char1");
    let cell = Cell::continuous(&char, "-0.9").unwrap();
    let node = Writer::new().serialize_cell(&cell);
    assert!(node.structurally_eq(
        &ElementNode::new("cell")
            .with_attribute("char", "cont_char1")
            .with_attribute("state", "-0.9")
    ));
}

#[test]
fn test_serialize_whole_block() {
    let states = standard_vocabulary();
    let char = Char::with_states(Alphabet::Standard, "c1", &states).unwrap();
    let cell = Cell::new(&char, states.get("s1").unwrap()).unwrap();

    let mut format = Format::new(Alphabet::Standard);
    format.add_states(states).unwrap();
    format.add_char(char).unwrap();

    let mut row = Row::cell_row(Alphabet::Standard, "row1").with_otu("t1");
    row.add_cell(cell).unwrap();
    let mut matrix = Matrix::new(Alphabet::Standard, MatrixShape::Cell);
    matrix.add_row(row).unwrap();

    let mut block = Characters::new(Alphabet::Standard, MatrixShape::Cell, "chars1", "taxa1");
    block.set_format(format).unwrap();
    block.set_matrix(matrix).unwrap();
    block.validate().unwrap();

    let node = nexchars::serialize_characters(&block);
    assert_eq!(node.attribute("xsi:type"), Some("nex:StandardCells"));
    let tags: Vec<&str> = node.children().iter().map(|c| c.tag()).collect();
    assert_eq!(tags, ["format", "matrix"]);
    assert_eq!(node.children()[1].children()[0].children().len(), 1);
}
