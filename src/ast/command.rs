use std::fmt;

use crate::ast::{
    operand::{is_number_literal, is_path_literal},
    Operator,
};

/// Pipeline command.
///
/// A compiled program is an ordered list of commands; every variant keeps
/// the 1-based source line it came from for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Read a JSON file into the pipeline
    ///
    /// # Example
    /// ```text
    /// LOAD "clientes.json"
    /// ```
    Load { file_path: String, line: usize },

    /// Keep the records for which the comparison holds
    ///
    /// `right_operand` is unquoted text: a path, a number, or string content.
    ///
    /// # Example
    /// ```text
    /// FILTER .cliente.idade >= 18
    /// ```
    Filter {
        left_path: String,
        operator: Operator,
        right_operand: String,
        line: usize,
    },

    /// Project every record onto the listed fields
    ///
    /// # Example
    /// ```text
    /// SELECT .nome, .cliente.idade
    /// ```
    Select { fields: Vec<String>, line: usize },

    /// Write the current dataset to a file
    ///
    /// # Example
    /// ```text
    /// SAVE AS "saida.json"
    /// ```
    Save { output_file: String, line: usize },
}

impl Command {
    pub fn line(&self) -> usize {
        match self {
            Command::Load { line, .. }
            | Command::Filter { line, .. }
            | Command::Select { line, .. }
            | Command::Save { line, .. } => *line,
        }
    }

    /// Keyword naming the command kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Load { .. } => "LOAD",
            Command::Filter { .. } => "FILTER",
            Command::Select { .. } => "SELECT",
            Command::Save { .. } => "SAVE",
        }
    }
}

/// Prints the command back as MiniQuery source.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Load { file_path, .. } => write!(f, "LOAD \"{}\"", file_path),
            Command::Filter {
                left_path,
                operator,
                right_operand,
                ..
            } => {
                f.write_str("FILTER ")?;
                write_operand(f, left_path)?;
                write!(f, " {} ", operator)?;
                write_operand(f, right_operand)
            }
            Command::Select { fields, .. } => write!(f, "SELECT {}", fields.join(", ")),
            Command::Save { output_file, .. } => write!(f, "SAVE AS \"{}\"", output_file),
        }
    }
}

/// Operands that would not lex back as a path or a number are quoted.
fn write_operand(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if is_path_literal(text) || is_number_literal(text) {
        f.write_str(text)
    } else {
        write!(f, "\"{}\"", text)
    }
}
