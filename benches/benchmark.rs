use criterion::{Criterion, criterion_group, criterion_main};
use nexchars::model::{
    Alphabet, Cell, Char, Characters, Format, Matrix, MatrixShape, Row, Seq, State, States,
};
use nexchars::{read_characters, serialize_characters};

const MATRIX_SIZES: &[(&str, usize, usize)] = &[
    ("Dna50x500", 50, 500),
    ("Dna200x2000", 200, 2000),
];

const CELL_MATRIX_SIZES: &[(&str, usize, usize)] = &[
    ("Standard50x100", 50, 100),
    ("Standard200x500", 200, 500),
];

fn build_dna_seq_block(rows: usize, columns: usize) -> Characters {
    let tokens = ['A', 'C', 'G', 'T'];
    let mut matrix = Matrix::new(Alphabet::Dna, MatrixShape::Seq);
    for r in 0..rows {
        let value: String = (0..columns).map(|c| tokens[(r + c) % 4]).collect();
        let mut row = Row::seq_row(Alphabet::Dna, &format!("row{r}")).with_otu(&format!("t{r}"));
        row.set_seq(Seq::new(&value)).unwrap();
        matrix.add_row(row).unwrap();
    }

    let mut block = Characters::new(Alphabet::Dna, MatrixShape::Seq, "chars1", "taxa1");
    block.set_matrix(matrix).unwrap();
    block
}

fn build_standard_cell_block(rows: usize, columns: usize) -> Characters {
    let mut states = States::new(Alphabet::Standard, "sts1").unwrap();
    for digit in 0..4 {
        let id = format!("s{digit}");
        states
            .add_state(State::new(Alphabet::Standard, &id, &digit.to_string()).unwrap())
            .unwrap();
    }

    let mut format = Format::new(Alphabet::Standard);
    let mut chars = Vec::with_capacity(columns);
    for c in 0..columns {
        let char = Char::with_states(Alphabet::Standard, &format!("c{c}"), &states).unwrap();
        chars.push(char.clone());
        format.add_char(char).unwrap();
    }

    let mut matrix = Matrix::new(Alphabet::Standard, MatrixShape::Cell);
    for r in 0..rows {
        let mut row = Row::cell_row(Alphabet::Standard, &format!("row{r}"));
        for (c, char) in chars.iter().enumerate() {
            let state = states.get(&format!("s{}", (r + c) % 4)).unwrap();
            row.add_cell(Cell::new(char, state).unwrap()).unwrap();
        }
        matrix.add_row(row).unwrap();
    }

    format.add_states(states).unwrap();
    let mut block = Characters::new(Alphabet::Standard, MatrixShape::Cell, "chars1", "taxa1");
    block.set_format(format).unwrap();
    block.set_matrix(matrix).unwrap();
    block
}

fn round_trip(block: &Characters) {
    let node = serialize_characters(block);
    let reread = read_characters(&node).unwrap();
    assert_eq!(reread.id(), "chars1");
}

fn seq_round_trips(c: &mut Criterion) {
    for (name, rows, columns) in MATRIX_SIZES {
        let block = build_dna_seq_block(*rows, *columns);
        c.bench_function(name, |b| {
            b.iter(|| round_trip(&block));
        });
    }
}

fn cell_round_trips(c: &mut Criterion) {
    for (name, rows, columns) in CELL_MATRIX_SIZES {
        let block = build_standard_cell_block(*rows, *columns);
        c.bench_function(name, |b| {
            b.iter(|| round_trip(&block));
        });
    }
}

criterion_group!(seqs, seq_round_trips);
criterion_group! {
    name = cells;
    config = Criterion::default().sample_size(20);
    targets = cell_round_trips
}
criterion_main!(seqs, cells);
