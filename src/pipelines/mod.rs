//! Content sources feeding the extraction engine.

pub mod text;
pub mod url;
