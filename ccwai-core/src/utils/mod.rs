//! Small helpers around external tools.

pub mod git;

pub use git::diff_summary;
