use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while turning markdown into pages.
///
/// Malformed markdown is never an error: ambiguous syntax falls back to a
/// paragraph or to literal text. Only broken tree invariants and I/O fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("leaf node has no value")]
    MissingValue,

    #[error("parent node has an empty tag")]
    EmptyTag,

    #[error("parent node has no children")]
    EmptyChildren,

    #[error("no top-level heading (a line starting with \"# \") found")]
    MissingHeading,

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("static directory {0} does not exist")]
    MissingStaticDir(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
