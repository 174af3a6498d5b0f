//! JavaScript emission for a validated command list.
//!
//! The generated program runs on Node.js: it loads the input with `fs`,
//! narrows it with `Array.prototype.filter`, reshapes it with `map`, and
//! writes the dataset that is current at each `SAVE`.

use log::debug;

use crate::ast::{Command, Operand, Operator};

const PROLOGUE: &str = "// Generated automatically\nconst fs = require('fs');\n\n";

/// Rewrites a JSON path so that every segment after the first is accessed
/// with optional chaining: `.cliente.idade` becomes `.cliente?.idade`.
///
/// Single-segment paths, and text that is not a path, come back unchanged.
pub fn safe_path(path: &str) -> String {
    match path.strip_prefix('.') {
        Some(rest) => format!(".{}", rest.replace('.', "?.")),
        None => path.to_string(),
    }
}

/// Output property name for a selected path: `.cliente.idade` → `cliente_idade`.
pub fn property_name(path: &str) -> String {
    path.strip_prefix('.').unwrap_or(path).replace('.', "_")
}

/// JavaScript expression for the right-hand side of a filter.
fn operand_expr(text: &str) -> String {
    match Operand::classify(text) {
        Operand::Path(path) => format!("item{}", safe_path(path)),
        Operand::Number(n) => n.to_string(),
        // Embedded quotes are not escaped.
        Operand::Text(s) => format!("\"{}\"", s),
    }
}

/// Emits JavaScript for a command list.
///
/// Ordering is not checked: a `FILTER` with no preceding `LOAD` reads from
/// `null`, and later filters always narrow `filteredData`.
#[derive(Debug)]
pub struct JavaScriptGenerator {
    output: String,
    /// Binding that holds the dataset for the next stage
    current_binding: Option<&'static str>,
    filter_chain_started: bool,
}

impl Default for JavaScriptGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaScriptGenerator {
    pub fn new() -> Self {
        JavaScriptGenerator {
            output: PROLOGUE.to_string(),
            current_binding: None,
            filter_chain_started: false,
        }
    }

    fn source(&self) -> &'static str {
        self.current_binding.unwrap_or("null")
    }

    fn emit_line(&mut self, statement: String) {
        debug!("emit: {}", statement);
        self.output.push_str(&statement);
        self.output.push('\n');
    }

    pub fn emit(&mut self, command: &Command) {
        match command {
            Command::Load { file_path, .. } => {
                self.emit_line(format!(
                    "const input = JSON.parse(fs.readFileSync('{}', 'utf-8'));",
                    file_path
                ));
                self.current_binding = Some("input");
            }
            Command::Filter {
                left_path,
                operator,
                right_operand,
                ..
            } => {
                self.emit_filter(left_path, *operator, right_operand);
                self.current_binding = Some("filteredData");
            }
            Command::Select { fields, .. } => {
                let properties: Vec<String> = fields
                    .iter()
                    .map(|field| format!("{}: item{}", property_name(field), safe_path(field)))
                    .collect();
                let object = if properties.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{ {} }}", properties.join(", "))
                };
                self.emit_line(format!(
                    "const result = {}.map(item => ({}));",
                    self.source(),
                    object
                ));
                self.current_binding = Some("result");
            }
            Command::Save { output_file, .. } => {
                self.emit_line(format!(
                    "fs.writeFileSync('{}', JSON.stringify({}, null, 2));",
                    output_file,
                    self.source()
                ));
            }
        }
    }

    fn emit_filter(&mut self, left_path: &str, operator: Operator, right_operand: &str) {
        let predicate = format!(
            "item => item{} {} {}",
            safe_path(left_path),
            operator.to_js(),
            operand_expr(right_operand)
        );

        let declaration = if self.filter_chain_started {
            "filteredData = filteredData".to_string()
        } else {
            format!("const filteredData = {}", self.source())
        };
        self.filter_chain_started = true;

        self.emit_line(format!("{}.filter({});", declaration, predicate));
    }

    pub fn finish(self) -> String {
        self.output
    }
}

/// Generates the complete JavaScript program for `commands`.
pub fn generate(commands: &[Command]) -> String {
    let mut generator = JavaScriptGenerator::new();
    for command in commands {
        generator.emit(command);
    }
    generator.finish()
}
