//! Semantic checks layered on top of the [`Collector`].
//!
//! The validator receives the same callbacks as the collector, lets it build
//! the command, then inspects the result. Problems never abort the walk; they
//! are accumulated as [`Diagnostic`]s and returned together with the commands.

use std::{collections::BTreeMap, fmt};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ast::{
        tree::{FilterNode, LoadNode, SaveNode, SelectNode},
        Command, Operand, ParseTree,
    },
    collector::{walk, Collector, Listener},
};

/// Declared primitive type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Number,
    String,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Number => f.write_str("number"),
            FieldType::String => f.write_str("string"),
        }
    }
}

/// Errors raised while reading a schema descriptor.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid schema descriptor: {0}")]
    Json(#[from] serde_json::Error),

    #[error("schema key '{0}' is not a field path (it must start with '.')")]
    InvalidPath(String),
}

/// Declared types of known field paths.
///
/// The table is not derived from data: it is a fixed set of declarations
/// that the validator installs on every `LOAD`. Paths that are not listed
/// resolve to unknown and are compatible with anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldTypeTable {
    entries: BTreeMap<String, FieldType>,
}

impl FieldTypeTable {
    /// An empty table: every lookup is unknown.
    pub fn empty() -> Self {
        FieldTypeTable {
            entries: BTreeMap::new(),
        }
    }

    /// The declarations used when no schema is supplied.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        table.insert(".idade", FieldType::Number);
        table.insert(".nome", FieldType::String);
        table.insert(".email", FieldType::String);
        table.insert(".cliente.idade", FieldType::Number);
        table.insert(".cliente.nome", FieldType::String);
        table.insert(".valor", FieldType::Number);
        table
    }

    /// Reads a descriptor of the form `{".path": "number" | "string", ...}`.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let table: FieldTypeTable = serde_json::from_str(json)?;
        if let Some(path) = table.entries.keys().find(|k| !k.starts_with('.')) {
            return Err(SchemaError::InvalidPath(path.clone()));
        }
        Ok(table)
    }

    pub fn insert(&mut self, path: impl Into<String>, field_type: FieldType) {
        self.entries.insert(path.into(), field_type);
    }

    /// Declared type of `path`, `None` when unknown.
    pub fn get(&self, path: &str) -> Option<FieldType> {
        self.entries.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FieldTypeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A semantic error tied to the line of the offending command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERROR (Line {}): {}", self.line, self.message)
    }
}

/// Optional checks beyond the default rule set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Report commands that appear before `LOAD`, repeated `LOAD`s, and
    /// `FILTER` after `SELECT`.
    pub strict_order: bool,
}

/// Result of one validation walk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    pub commands: Vec<Command>,
    pub diagnostics: Vec<Diagnostic>,
    pub current_file: Option<String>,
}

impl Analysis {
    /// True when code generation may run.
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Collects commands and checks each one as soon as it is built.
pub struct SemanticValidator<'a> {
    collector: Collector,
    checker: Checker<'a>,
}

/// Rule state carried across the commands of one program.
struct Checker<'a> {
    diagnostics: Vec<Diagnostic>,
    /// Declarations installed on every `LOAD`
    schema: &'a FieldTypeTable,
    /// Declarations in effect for the commands seen so far
    field_types: FieldTypeTable,
    options: ValidationOptions,
    load_seen: bool,
    select_seen: bool,
}

impl<'a> SemanticValidator<'a> {
    pub fn new(schema: &'a FieldTypeTable, options: ValidationOptions) -> Self {
        SemanticValidator {
            collector: Collector::new(),
            checker: Checker {
                diagnostics: Vec::new(),
                schema,
                field_types: FieldTypeTable::empty(),
                options,
                load_seen: false,
                select_seen: false,
            },
        }
    }

    pub fn finish(self) -> Analysis {
        let collection = self.collector.finish();
        Analysis {
            commands: collection.commands,
            diagnostics: self.checker.diagnostics,
            current_file: collection.current_file,
        }
    }
}

impl Checker<'_> {
    fn error(&mut self, line: usize, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            line,
            message: message.into(),
        };
        debug!("semantic error: {}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    fn check(&mut self, command: &Command) {
        if self.options.strict_order {
            self.check_order(command);
        }

        match command {
            Command::Load { file_path, line } => {
                if file_path.trim().is_empty() {
                    self.error(*line, "file path cannot be empty");
                }
                self.field_types = self.schema.clone();
            }
            Command::Filter {
                left_path,
                operator,
                right_operand,
                line,
            } => {
                let left_type = self.field_types.get(left_path);
                let right_type = match Operand::classify(right_operand) {
                    Operand::Path(path) => self.field_types.get(path),
                    Operand::Number(_) => Some(FieldType::Number),
                    Operand::Text(_) => Some(FieldType::String),
                };

                if let (Some(lt), Some(rt)) = (left_type, right_type) {
                    if lt != rt {
                        self.error(
                            *line,
                            format!(
                                "incompatible type: field '{}' is of type {}, but value '{}' is of type {}",
                                left_path, lt, right_operand, rt
                            ),
                        );
                    }
                }

                if left_type == Some(FieldType::String) && !operator.applies_to_strings() {
                    self.error(
                        *line,
                        format!(
                            "operator '{}' is invalid for strings. Use '==' or '!='.",
                            operator
                        ),
                    );
                }
            }
            Command::Select { .. } => {}
            Command::Save { output_file, line } => {
                if output_file.trim().is_empty() {
                    self.error(*line, "output file name cannot be empty");
                }
            }
        }
    }

    fn check_order(&mut self, command: &Command) {
        let line = command.line();
        match command {
            Command::Load { .. } => {
                if self.load_seen {
                    self.error(line, "only one LOAD is allowed per program");
                }
                self.load_seen = true;
            }
            other => {
                if !self.load_seen {
                    self.error(line, format!("{} requires a preceding LOAD", other.keyword()));
                }
                match other {
                    Command::Filter { .. } if self.select_seen => {
                        self.error(line, "FILTER cannot follow SELECT");
                    }
                    Command::Select { .. } => self.select_seen = true,
                    _ => {}
                }
            }
        }
    }
}

impl Listener for SemanticValidator<'_> {
    fn enter_load(&mut self, node: &LoadNode) {
        let command = self.collector.collect_load(node);
        self.checker.check(command);
    }

    fn enter_filter(&mut self, node: &FilterNode) {
        let command = self.collector.collect_filter(node);
        self.checker.check(command);
    }

    fn enter_select(&mut self, node: &SelectNode) {
        let command = self.collector.collect_select(node);
        self.checker.check(command);
    }

    fn enter_save(&mut self, node: &SaveNode) {
        let command = self.collector.collect_save(node);
        self.checker.check(command);
    }
}

/// Collects and validates `tree` in a single pass.
pub fn analyze(tree: &ParseTree, schema: &FieldTypeTable, options: ValidationOptions) -> Analysis {
    let mut validator = SemanticValidator::new(schema, options);
    walk(tree, &mut validator);
    validator.finish()
}
