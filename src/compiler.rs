//! Staged compilation: syntax → semantics → JavaScript.
//!
//! Each stage runs only when the previous one produced no errors, so a
//! failed compilation never yields partial output.

use std::{
    cell::Cell,
    panic::{self, AssertUnwindSafe},
};

use log::debug;
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::{
    ast::Command,
    codegen,
    parser::{self, SyntaxError},
    semantic::{self, Diagnostic, FieldTypeTable, ValidationOptions},
};

const SUCCESS_BANNER: &str = "✔ ANALYSIS SUCCESSFUL. GENERATED CODE:";
const SEMANTIC_BANNER: &str = "✖ SEMANTIC ERRORS:";
const INTERNAL_BANNER: &str = "💥 UNEXPECTED ERROR DURING COMPILATION:";

/// Settings for one compile unit.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Declarations installed on every `LOAD`
    pub field_types: FieldTypeTable,
    pub validation: ValidationOptions,
}

/// A successful compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    pub commands: Vec<Command>,
    pub code: String,
}

/// Why a compilation stopped. Displays as the report section for the stage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("{}", render_syntax(.0))]
    Syntax(Vec<SyntaxError>),

    #[error("{}", render_semantic(.0))]
    Semantic(Vec<Diagnostic>),

    #[error("{}\n{}", INTERNAL_BANNER, .0)]
    Internal(String),
}

fn render_syntax(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(|e| format!("SYNTAX ERROR: {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_semantic(diagnostics: &[Diagnostic]) -> String {
    let mut text = SEMANTIC_BANNER.to_string();
    for diagnostic in diagnostics {
        text.push('\n');
        text.push_str(&diagnostic.to_string());
    }
    text
}

fn run_stages(source: &str, options: &CompileOptions) -> Result<Compilation, CompileError> {
    let tree = parser::parse(source).map_err(CompileError::Syntax)?;
    debug!("parsed {} command(s)", tree.commands.len());

    let analysis = semantic::analyze(&tree, &options.field_types, options.validation);
    if !analysis.is_valid() {
        return Err(CompileError::Semantic(analysis.diagnostics));
    }

    let code = codegen::generate(&analysis.commands);
    Ok(Compilation {
        commands: analysis.commands,
        code,
    })
}

thread_local! {
    static GUARDED: Cell<bool> = const { Cell::new(false) };
}

/// Wraps the installed panic hook once so that panics raised inside
/// [`guard_stage`] on the current thread go to the log instead of stderr.
static QUIET_HOOK: Lazy<()> = Lazy::new(|| {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if GUARDED.with(Cell::get) {
            debug!("compiler stage panicked: {}", info);
        } else {
            previous(info);
        }
    }));
});

/// Runs `stage`, turning a panic into [`CompileError::Internal`].
pub fn guard_stage<T>(
    stage: impl FnOnce() -> Result<T, CompileError>,
) -> Result<T, CompileError> {
    Lazy::force(&QUIET_HOOK);

    let was_guarded = GUARDED.with(|g| g.replace(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(stage));
    GUARDED.with(|g| g.set(was_guarded));

    outcome.unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown internal error".to_string());
        Err(CompileError::Internal(message))
    })
}

/// Compiles one MiniQuery program.
///
/// A panic in any stage is reported as [`CompileError::Internal`] instead of
/// unwinding into the caller.
pub fn compile(source: &str, options: &CompileOptions) -> Result<Compilation, CompileError> {
    guard_stage(|| run_stages(source, options))
}

/// Renders the textual report for a compilation result.
pub fn render_report(result: &Result<Compilation, CompileError>) -> String {
    let text = match result {
        Ok(compilation) => format!("{}\n\n{}", SUCCESS_BANNER, compilation.code),
        Err(e) => e.to_string(),
    };
    text.trim().to_string()
}

/// Compiles `source` and renders the report in one step.
pub fn compile_to_report(source: &str, options: &CompileOptions) -> String {
    render_report(&compile(source, options))
}
