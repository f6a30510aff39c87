//! Word lists from files and stdin.

mod reader;

pub use reader::{InputReader, parse_words};
