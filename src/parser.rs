use std::mem;

use thiserror::Error;

use crate::{
    ast::{
        tree::{FilterNode, LoadNode, SaveNode, SelectNode},
        CommandNode, Operator, ParseTree, Token, ValueNode,
    },
    lexer::{LexError, Lexer, Position},
};

/// A syntax error with its location.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Line {}:{} - {message}", .position.line, .position.column)]
pub struct SyntaxError {
    pub position: Position,
    pub message: String,
}

impl SyntaxError {
    fn new(position: Position, message: impl Into<String>) -> Self {
        SyntaxError {
            position,
            message: message.into(),
        }
    }
}

impl From<LexError> for SyntaxError {
    fn from(e: LexError) -> Self {
        SyntaxError::new(e.position(), e.to_string())
    }
}

/// Parses a MiniQuery program, returning every syntax error found.
pub fn parse(source: &str) -> Result<ParseTree, Vec<SyntaxError>> {
    Parser::new(Lexer::new(source)).parse_program()
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    current_position: Position,
    errors: Vec<SyntaxError>,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        let mut parser = Parser {
            lexer,
            current_token: Token::Eof,
            current_position: Position::default(),
            errors: Vec::new(),
        };
        parser.advance();
        parser
    }

    /// Moves to the next token. Lexical errors are recorded and skipped.
    fn advance(&mut self) {
        loop {
            match self.lexer.next_token() {
                Ok(token) => {
                    self.current_token = token;
                    self.current_position = self.lexer.token_start();
                    return;
                }
                Err(e) => self.errors.push(e.into()),
            }
        }
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        SyntaxError::new(
            self.current_position,
            format!(
                "expected {}, found {}",
                expected,
                self.current_token.describe()
            ),
        )
    }

    /// Skips tokens until the start of the next command.
    fn synchronize(&mut self) {
        while !self.current_token.starts_command() && !self.check(&Token::Eof) {
            self.advance();
        }
    }

    /// Parse a complete program
    pub fn parse_program(mut self) -> Result<ParseTree, Vec<SyntaxError>> {
        let mut commands = vec![];

        while !self.check(&Token::Eof) {
            match self.parse_command() {
                Ok(command) => commands.push(command),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }

        if self.errors.is_empty() {
            Ok(ParseTree { commands })
        } else {
            self.errors.sort_by_key(|e| (e.position.line, e.position.column));
            Err(self.errors)
        }
    }

    fn parse_command(&mut self) -> Result<CommandNode, SyntaxError> {
        let line = self.current_position.line;

        match self.current_token {
            Token::Load => {
                self.advance(); // consume LOAD
                let path = self.expect_string("string literal after LOAD")?;
                Ok(CommandNode::Load(LoadNode { path, line }))
            }
            Token::Filter => {
                self.advance(); // consume FILTER
                let left = self.parse_value()?;
                let operator = self.expect_operator()?;
                let right = self.parse_value()?;
                Ok(CommandNode::Filter(FilterNode {
                    left,
                    operator,
                    right,
                    line,
                }))
            }
            Token::Select => {
                self.advance(); // consume SELECT
                let mut fields = vec![self.expect_path()?];
                while self.check(&Token::Comma) {
                    self.advance();
                    fields.push(self.expect_path()?);
                }
                Ok(CommandNode::Select(SelectNode { fields, line }))
            }
            Token::Save => {
                self.advance(); // consume SAVE
                if !self.check(&Token::As) {
                    return Err(self.unexpected("'AS' after SAVE"));
                }
                self.advance();
                let path = self.expect_string("string literal after SAVE AS")?;
                Ok(CommandNode::Save(SaveNode { path, line }))
            }
            _ => Err(self.unexpected("LOAD, FILTER, SELECT or SAVE")),
        }
    }

    /// value: STRING | NUMBER | jsonPath
    fn parse_value(&mut self) -> Result<ValueNode, SyntaxError> {
        let value = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::String(s) => ValueNode::String(s),
            Token::Number(n) => ValueNode::Number(n),
            Token::Path(p) => ValueNode::Path(p),
            token => {
                self.current_token = token;
                return Err(self.unexpected("a string, number or field path"));
            }
        };
        self.advance();
        Ok(value)
    }

    fn expect_operator(&mut self) -> Result<Operator, SyntaxError> {
        match self.current_token {
            Token::Operator(op) => {
                self.advance();
                Ok(op)
            }
            _ => Err(self.unexpected("a comparison operator")),
        }
    }

    fn expect_string(&mut self, expected: &str) -> Result<String, SyntaxError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::String(s) => {
                self.advance();
                Ok(s)
            }
            token => {
                self.current_token = token;
                Err(self.unexpected(expected))
            }
        }
    }

    fn expect_path(&mut self) -> Result<String, SyntaxError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Path(p) => {
                self.advance();
                Ok(p)
            }
            token => {
                self.current_token = token;
                Err(self.unexpected("a field path"))
            }
        }
    }
}
