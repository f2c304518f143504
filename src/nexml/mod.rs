//! Document layer: serializing character blocks to generic element nodes
//! and reading them back.
//!
//! The layer is deliberately XML-library agnostic. [ElementNode] is a plain
//! tag/attributes/children tree; the [Writer] produces one per model
//! object, and the [Reader] rebuilds the model from one. Mapping element
//! nodes to and from an actual XML document is the host application's job.
//!
//! # Quick serialization
//! For the common whole-block round trip, use the crate-level functions
//! [serialize_characters](crate::serialize_characters) and
//! [read_characters](crate::read_characters):
//! ```
//! use nexchars::model::{Alphabet, MatrixShape, Characters};
//!
//! let block = Characters::new(Alphabet::Dna, MatrixShape::Seq, "c1", "taxa1");
//! let node = nexchars::serialize_characters(&block);
//! let reread = nexchars::read_characters(&node).unwrap();
//! assert_eq!(reread.id(), "c1");
//! ```

pub mod node;
pub mod reader;
pub mod writer;

mod defs;

pub use node::ElementNode;
pub use reader::Reader;
pub use writer::Writer;
