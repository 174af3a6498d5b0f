use crate::ast::Operator;

/// A value position inside a `FILTER`, as recognized by the parser.
///
/// Literal texts are stored exactly as they appeared in the source; string
/// literals keep their quotes.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    /// Quoted string literal, e.g. `"Maria"`
    String(String),

    /// Numeric literal, e.g. `18` or `-2.5`
    Number(String),

    /// JSON path, e.g. `.cliente.idade`
    Path(String),
}

impl ValueNode {
    /// Source text of the node.
    pub fn text(&self) -> &str {
        match self {
            ValueNode::String(s) | ValueNode::Number(s) | ValueNode::Path(s) => s,
        }
    }
}

/// `LOAD "<path>"`
#[derive(Debug, Clone, PartialEq)]
pub struct LoadNode {
    /// Quoted string literal
    pub path: String,
    pub line: usize,
}

/// `FILTER <value> <operator> <value>`
#[derive(Debug, Clone, PartialEq)]
pub struct FilterNode {
    pub left: ValueNode,
    pub operator: Operator,
    pub right: ValueNode,
    pub line: usize,
}

/// `SELECT <path>, <path>, ...`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectNode {
    /// Path texts in source order
    pub fields: Vec<String>,
    pub line: usize,
}

/// `SAVE AS "<path>"`
#[derive(Debug, Clone, PartialEq)]
pub struct SaveNode {
    /// Quoted string literal
    pub path: String,
    pub line: usize,
}

/// One recognized command occurrence.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandNode {
    Load(LoadNode),
    Filter(FilterNode),
    Select(SelectNode),
    Save(SaveNode),
}

impl CommandNode {
    /// 1-based line where the command starts.
    pub fn line(&self) -> usize {
        match self {
            CommandNode::Load(node) => node.line,
            CommandNode::Filter(node) => node.line,
            CommandNode::Select(node) => node.line,
            CommandNode::Save(node) => node.line,
        }
    }
}

/// A whole program as handed over by the parser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseTree {
    pub commands: Vec<CommandNode>,
}
