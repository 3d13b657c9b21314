//! Output encoding.

/// PNG encoding and the output file write.
pub mod png;
