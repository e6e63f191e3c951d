//! Greedy map coloring with a scarce last color

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// error type shared by the loaders, the reporting and the executable
pub mod error;

/// map graph (nodes, adjacency by name, visitation order) and coloring checker
pub mod color;

/// ordered palette of recognized color labels
pub mod palette;

/// abbreviation -> full name table for US states and Canadian provinces
pub mod regions;

/// read adjacency lists
pub mod adjacency;

/// text rendering of a colored map
pub mod report;

/// helper and utility methods for executables
pub mod util;

/// greedy colorization and the restart loop
pub mod search;

pub use error::{Error, Result};
