use std::path::PathBuf;

use thiserror::Error;

/// The error type of the crate.
///
/// Only [`Error::MissingInput`] on the adjacency list is fatal for the executable.
/// A greedy attempt that runs out of colors is not an error: it is an expected outcome
/// handled by the restart loop (see [`crate::search::greedy::GreedyOutcome`]).
#[derive(Error, Debug)]
pub enum Error {
    /// A required input file does not exist
    #[error("could not find {}", .0.display())]
    MissingInput(PathBuf),

    /// Filesystem error while reading or writing `path`
    #[error("{}: {source}", path.display())]
    Io {
        /// file being accessed
        path: PathBuf,
        /// underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed line in an input file
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// what went wrong
        message: String,
    },

    /// Palette label that is not part of [`crate::palette::NamedColor`]
    #[error("unrecognized color '{0}'")]
    UnknownColor(String),

    /// Palette label listed twice
    #[error("color '{0}' appears twice in the palette")]
    DuplicateColor(String),

    /// Palette without any color
    #[error("the palette is empty")]
    EmptyPalette,

    /// Statistics serialization failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// wraps an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

/// Result alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = Error::MissingInput(PathBuf::from("adjacent.txt"));
        assert_eq!(e.to_string(), "could not find adjacent.txt");
        let e = Error::UnknownColor("TEAL".to_string());
        assert_eq!(e.to_string(), "unrecognized color 'TEAL'");
        let e = Error::Parse { line: 3, message: "empty node name".to_string() };
        assert_eq!(e.to_string(), "line 3: empty node name");
    }
}
