pub mod ast;
pub mod cli;
pub mod codegen;
pub mod collector;
pub mod compiler;
pub mod lexer;
pub mod parser;
pub mod semantic;

pub use ast::{Command, Operator, ParseTree, Token};
pub use codegen::{generate, JavaScriptGenerator};
pub use collector::{collect, Collection, Collector, Listener};
pub use compiler::{compile, compile_to_report, CompileError, CompileOptions, Compilation};
pub use lexer::{LexError, Lexer, Position};
pub use parser::{parse, Parser, SyntaxError};
pub use semantic::{analyze, Analysis, Diagnostic, FieldType, FieldTypeTable, ValidationOptions};
