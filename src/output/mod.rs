//! Output module
//!
//! Renders results as UTF-8 JSON with a four-space indent and non-ASCII
//! characters left unescaped, to the console or to a file.

mod writer;

pub use writer::{to_pretty_json, write_json_file, OutputTarget};
