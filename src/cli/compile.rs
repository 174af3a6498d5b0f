//! Compile a single MiniQuery program

use std::{fs, path::PathBuf};

use super::CliError;
use crate::{
    compiler::{self, CompileOptions},
    parser,
    semantic::{FieldTypeTable, ValidationOptions},
};

/// Options for the compile command
#[derive(Debug, Clone, Default)]
pub struct CompileRequest {
    /// MiniQuery source text
    pub source: Option<String>,
    /// Where to write the generated JavaScript on success
    pub output: Option<PathBuf>,
    /// JSON schema descriptor replacing the built-in field types
    pub schema: Option<PathBuf>,
    /// Enable pipeline ordering checks
    pub strict: bool,
    /// Only validate syntax, don't analyze or generate
    pub syntax_only: bool,
}

/// Result of a compile operation
#[derive(Debug, Clone, PartialEq)]
pub enum CompileResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Compilation succeeded; `report` includes the generated code
    Compiled { report: String, code: String },
    /// Compilation stopped at some stage; `report` lists the errors
    Failed { report: String },
}

impl CompileResult {
    pub fn is_success(&self) -> bool {
        !matches!(self, CompileResult::Failed { .. })
    }
}

/// Builds compile options from CLI settings.
pub fn load_options(schema: Option<&PathBuf>, strict: bool) -> Result<CompileOptions, CliError> {
    let field_types = match schema {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|e| CliError::file(path, e))?;
            let table = FieldTypeTable::from_json_str(&json)?;
            log::debug!("loaded {} field type(s) from {}", table.len(), path.display());
            table
        }
        None => FieldTypeTable::builtin(),
    };

    Ok(CompileOptions {
        field_types,
        validation: ValidationOptions {
            strict_order: strict,
        },
    })
}

/// Execute a compile operation
pub fn execute_compile(request: &CompileRequest) -> Result<CompileResult, CliError> {
    let source = request.source.as_ref().ok_or(CliError::NoInput)?;

    if request.syntax_only {
        return Ok(match parser::parse(source) {
            Ok(_) => CompileResult::SyntaxValid,
            Err(errors) => CompileResult::Failed {
                report: compiler::render_report(&Err(compiler::CompileError::Syntax(errors))),
            },
        });
    }

    let options = load_options(request.schema.as_ref(), request.strict)?;
    let result = compiler::compile(source, &options);
    let report = compiler::render_report(&result);

    match result {
        Ok(compilation) => {
            if let Some(path) = &request.output {
                fs::write(path, &compilation.code).map_err(|e| CliError::file(path, e))?;
                log::debug!("wrote generated code to {}", path.display());
            }
            Ok(CompileResult::Compiled {
                report,
                code: compilation.code,
            })
        }
        Err(_) => Ok(CompileResult::Failed { report }),
    }
}

/// Pretty-printed JSON of the field types a compile would use.
pub fn describe_schema(schema: Option<&PathBuf>) -> Result<String, CliError> {
    let options = load_options(schema, false)?;
    serde_json::to_string_pretty(&options.field_types)
        .map_err(|e| CliError::Schema(e.into()))
}
