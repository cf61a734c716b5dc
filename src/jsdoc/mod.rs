//! Documentation-comment reconstruction: tag tokenizer + reassembler.

pub mod reassemble;
pub mod tag;

pub use reassemble::{collect_tag_lines, reassemble, split_description};
pub use tag::{canonicalize, TagLine};
