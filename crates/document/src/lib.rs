// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Scheduling document parsing, validation, and model extraction
//!
//! ```text
//! TOML text → parser → toml::Value → validator → Vec<Violation>
//!                                  → extract   → Document
//! ```

mod extract;
mod model;
mod parser;
mod schema;
mod validator;

pub use extract::{extract_document, ExtractError};
pub use model::{Directives, Document, PreProcessCommands};
pub use parser::{parse_document, parse_document_file, read_document_file, ParseError};
pub use validator::{
    check_violations, validate_document, validate_tree, ValidationErrors, Violation,
};
