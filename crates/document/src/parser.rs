// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TOML parsing for scheduling documents (syntactic layer).
//!
//! Produces the generic `toml::Value` tree that the validator and the
//! extractor walk. No schema checks happen here.

use std::path::Path;
use thiserror::Error;

/// Errors that can occur during parsing
#[derive(Debug, Error)]
pub enum ParseError {
    /// TOML syntax error
    #[error("TOML syntax error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error reading file
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parse document text into a tree
pub fn parse_document(content: &str) -> Result<toml::Value, ParseError> {
    let table: toml::Table = toml::from_str(content)?;
    Ok(toml::Value::Table(table))
}

/// Read a document file
pub fn read_document_file(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|e| ParseError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Read and parse a document file
pub fn parse_document_file(path: &Path) -> Result<toml::Value, ParseError> {
    parse_document(&read_document_file(path)?)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
