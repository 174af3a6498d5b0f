//! CLI support for miniquery
//!
//! Provides programmatic access to the `miniquery` commands so other tools
//! can compile programs or run golden-file batches without shelling out.

mod batch;
mod compile;
mod docs;

pub use batch::{format_case, run_batch, BatchOptions, BatchSummary, CaseResult};
pub use compile::{describe_schema, execute_compile, load_options, CompileRequest, CompileResult};
pub use docs::{get_doc_topic, get_docs_overview, DocTopic};

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Could not read or write a file
    #[error("could not access '{}': {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Other IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Schema descriptor could not be used
    #[error(transparent)]
    Schema(#[from] crate::semantic::SchemaError),

    /// Program files could not be listed
    #[error("invalid program directory pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// No program provided
    #[error("No program provided. Pass a file or pipe MiniQuery source to stdin.")]
    NoInput,

    /// Unknown documentation topic
    #[error("Unknown topic: '{0}'\nRun 'miniquery docs' to see available topics.")]
    UnknownTopic(String),
}

impl CliError {
    pub(crate) fn file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CliError::File {
            path: path.into(),
            source,
        }
    }
}
