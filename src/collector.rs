//! Parse tree → command IR.
//!
//! [`walk`] visits every command occurrence of a [`ParseTree`] in source
//! order and hands it to a [`Listener`]. The [`Collector`] listener turns each
//! occurrence into one [`Command`]; the semantic validator builds on it.

use log::debug;

use crate::ast::{
    tree::{FilterNode, LoadNode, SaveNode, SelectNode},
    Command, CommandNode, ParseTree, ValueNode,
};

/// Callbacks fired by [`walk`], one per command kind.
pub trait Listener {
    fn enter_load(&mut self, node: &LoadNode);
    fn enter_filter(&mut self, node: &FilterNode);
    fn enter_select(&mut self, node: &SelectNode);
    fn enter_save(&mut self, node: &SaveNode);
}

/// Visits the commands of `tree` in order.
pub fn walk<L: Listener + ?Sized>(tree: &ParseTree, listener: &mut L) {
    for command in &tree.commands {
        match command {
            CommandNode::Load(node) => listener.enter_load(node),
            CommandNode::Filter(node) => listener.enter_filter(node),
            CommandNode::Select(node) => listener.enter_select(node),
            CommandNode::Save(node) => listener.enter_save(node),
        }
    }
}

/// Strips one leading and one trailing `"` when both are present.
pub fn unquote(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Text of a filter operand: string literals lose their quotes, numbers and
/// paths are taken as written.
pub fn classify_operand(node: &ValueNode) -> String {
    match node {
        ValueNode::String(s) => unquote(s).to_string(),
        ValueNode::Number(n) => n.clone(),
        ValueNode::Path(p) => p.clone(),
    }
}

/// Result of collecting one program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    /// Commands in source order
    pub commands: Vec<Command>,

    /// Path of the most recent `LOAD`, if any
    pub current_file: Option<String>,
}

/// Builds the command list. Purely structural: never reports errors.
#[derive(Debug, Default)]
pub struct Collector {
    commands: Vec<Command>,
    current_file: Option<String>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> Collection {
        Collection {
            commands: self.commands,
            current_file: self.current_file,
        }
    }

    fn push(&mut self, command: Command) -> &Command {
        debug!("collected {} (line {})", command.keyword(), command.line());
        let index = self.commands.len();
        self.commands.push(command);
        &self.commands[index]
    }

    /// Appends the `Load` for `node` and returns it.
    pub fn collect_load(&mut self, node: &LoadNode) -> &Command {
        let file_path = unquote(&node.path).to_string();
        self.current_file = Some(file_path.clone());
        self.push(Command::Load {
            file_path,
            line: node.line,
        })
    }

    pub fn collect_filter(&mut self, node: &FilterNode) -> &Command {
        self.push(Command::Filter {
            left_path: classify_operand(&node.left),
            operator: node.operator,
            right_operand: classify_operand(&node.right),
            line: node.line,
        })
    }

    pub fn collect_select(&mut self, node: &SelectNode) -> &Command {
        self.push(Command::Select {
            fields: node.fields.clone(),
            line: node.line,
        })
    }

    pub fn collect_save(&mut self, node: &SaveNode) -> &Command {
        self.push(Command::Save {
            output_file: unquote(&node.path).to_string(),
            line: node.line,
        })
    }
}

impl Listener for Collector {
    fn enter_load(&mut self, node: &LoadNode) {
        self.collect_load(node);
    }

    fn enter_filter(&mut self, node: &FilterNode) {
        self.collect_filter(node);
    }

    fn enter_select(&mut self, node: &SelectNode) {
        self.collect_select(node);
    }

    fn enter_save(&mut self, node: &SaveNode) {
        self.collect_save(node);
    }
}

/// Collects the commands of `tree` without any semantic checks.
pub fn collect(tree: &ParseTree) -> Collection {
    let mut collector = Collector::new();
    walk(tree, &mut collector);
    collector.finish()
}
