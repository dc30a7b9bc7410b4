//! Error type shared by all phases. Only the binaries turn an `Error` into a process exit code.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not access {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed graph data: {0}")]
    Format(String),

    #[error("node id {0} is not present in the graph")]
    NodeNotFound(NodeId),

    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),

    #[error("no path found from node {start} to node {goal}")]
    NoPathFound { start: NodeId, goal: NodeId },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::File { path: path.into(), source }
    }

    /// Short reads and writes mean the data is truncated, everything else is an environment failure.
    pub fn from_transfer(source: std::io::Error, what: &str) -> Self {
        match source.kind() {
            std::io::ErrorKind::UnexpectedEof | std::io::ErrorKind::WriteZero => Error::Format(format!("short transfer while {}", what)),
            _ => Error::Io(source),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Error::NoPathFound { .. } => 1,
            Error::Io(_) | Error::File { .. } => 2,
            Error::Format(_) => 3,
            Error::NodeNotFound(_) => 4,
            Error::Config(_) => 5,
            Error::InvariantViolation(_) => 6,
        }
    }
}
