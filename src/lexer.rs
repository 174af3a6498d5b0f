use std::fmt;

use thiserror::Error;

use crate::ast::{Operator, Token};

/// Location in the source text: 1-based line, 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors raised while splitting the source into tokens.
///
/// The lexer has always consumed the offending input when it returns one of
/// these, so the caller can keep asking for tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}'")]
    UnexpectedChar { ch: char, position: Position },

    #[error("unterminated string literal")]
    UnterminatedString { position: Position },

    #[error("expected field name after '.'")]
    MissingFieldName { position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedChar { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::MissingFieldName { position } => *position,
        }
    }
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    token_start: Position,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 0,
            token_start: Position { line: 1, column: 0 },
        }
    }

    /// Where the most recently returned token started.
    pub fn token_start(&self) -> Position {
        self.token_start
    }

    fn here(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads `"..."` on a single line. The quotes stay in the token text.
    fn read_string(&mut self) -> Result<String, LexError> {
        let start = self.here();
        let mut result = String::from('"');
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    result.push('"');
                    return Ok(result);
                }
                '\n' => break,
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_number(&mut self) -> String {
        let mut number = String::new();
        let mut is_float = false;

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        number
    }

    fn read_path(&mut self) -> Result<String, LexError> {
        let mut path = String::new();

        while self.current_char() == Some('.') {
            let dot = self.here();
            self.advance();
            if !self
                .current_char()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            {
                return Err(LexError::MissingFieldName { position: dot });
            }
            path.push('.');
            path.push_str(&self.read_identifier());
        }

        Ok(path)
    }

    fn operator(&mut self, op: Operator) -> Token {
        for _ in 0..op.as_str().len() {
            self.advance();
        }
        Token::Operator(op)
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.token_start = self.here();

        let token = match self.current_char() {
            None => Token::Eof,
            Some(',') => {
                self.advance();
                Token::Comma
            }
            Some('.') => Token::Path(self.read_path()?),
            Some('"') => Token::String(self.read_string()?),
            Some('=') if self.peek_char(1) == Some('=') => self.operator(Operator::Equal),
            Some('!') if self.peek_char(1) == Some('=') => self.operator(Operator::NotEqual),
            Some('<') if self.peek_char(1) == Some('=') => self.operator(Operator::LessEqual),
            Some('>') if self.peek_char(1) == Some('=') => self.operator(Operator::GreaterEqual),
            Some('<') => self.operator(Operator::LessThan),
            Some('>') => self.operator(Operator::GreaterThan),
            Some('-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                Token::Number(self.read_number())
            }
            Some(ch) if ch.is_ascii_digit() => Token::Number(self.read_number()),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                let ident = self.read_identifier();

                match ident.as_str() {
                    "LOAD" => Token::Load,
                    "FILTER" => Token::Filter,
                    "SELECT" => Token::Select,
                    "SAVE" => Token::Save,
                    "AS" => Token::As,
                    _ => Token::Identifier(ident),
                }
            }
            Some(ch) => {
                let position = self.here();
                self.advance();
                return Err(LexError::UnexpectedChar { ch, position });
            }
        };

        Ok(token)
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("LOAD FILTER SELECT SAVE AS");
    assert_eq!(lexer.next_token(), Ok(Token::Load));
    assert_eq!(lexer.next_token(), Ok(Token::Filter));
    assert_eq!(lexer.next_token(), Ok(Token::Select));
    assert_eq!(lexer.next_token(), Ok(Token::Save));
    assert_eq!(lexer.next_token(), Ok(Token::As));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_filter_line() {
    let mut lexer = Lexer::new("FILTER .cliente.idade >= 18");
    assert_eq!(lexer.next_token(), Ok(Token::Filter));
    assert_eq!(lexer.next_token(), Ok(Token::Path(".cliente.idade".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Operator(Operator::GreaterEqual)));
    assert_eq!(lexer.next_token(), Ok(Token::Number("18".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}
