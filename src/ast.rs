//! # MiniQuery - Syntax and Intermediate Representation
//!
//! This module defines the data the MiniQuery compiler passes between its
//! stages: the lexical tokens, the parse tree handed over by the parser, and
//! the command IR consumed by the validator and the code generator.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Comparison operators allowed in `FILTER`
//! - **[tree]** - Parse tree: the decoded sub-fields of each command occurrence
//! - **[command]** - Command IR, one node per pipeline stage
//! - **[operand]** - Classification of filter operands (path, number, text)
//!
//! ## Quick Start
//!
//! ```text
//! LOAD "clientes.json"
//! FILTER .cliente.idade >= 18
//! SELECT .cliente.nome, .email
//! SAVE AS "adultos.json"
//! ```
//!
//! ## Core Concepts
//!
//! ### Pipeline Structure
//!
//! A program is a flat list of commands executed top to bottom. Each stage
//! consumes the dataset produced by the previous one:
//!
//! - **LOAD** - read a JSON array from a file
//! - **FILTER** - keep the records matching one comparison
//! - **SELECT** - reshape every record into a plain object of chosen fields
//! - **SAVE AS** - write the current dataset as pretty-printed JSON
//!
//! ### JSON Paths
//!
//! Fields are addressed with dot paths relative to the current record:
//! `.nome`, `.cliente.idade`. Nested segments are accessed defensively in the
//! generated code, so a missing parent yields `undefined` instead of a crash.
pub mod command;
pub mod operand;
pub mod operators;
pub mod tokens;
pub mod tree;

pub use command::Command;
pub use operand::Operand;
pub use operators::Operator;
pub use tokens::Token;
pub use tree::{CommandNode, ParseTree, ValueNode};
