//! Infrastructure layer
//!
//! Handles I/O: reading version files and writing step outputs.

pub mod filesystem;
pub mod output;
