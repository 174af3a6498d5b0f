use crate::ast::Operator;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    /// `LOAD` - starts a load command
    Load,

    /// `FILTER` - starts a filter command
    Filter,

    /// `SELECT` - starts a select command
    Select,

    /// `SAVE` - starts a save command, always followed by `AS`
    Save,

    /// `AS`
    As,

    // Literals
    /// String literal, kept verbatim with its surrounding quotes
    ///
    /// The collector strips the quotes; no escape sequences are recognized.
    ///
    /// # Examples
    /// ```text
    /// "clientes.json"
    /// "Maria"
    /// ```
    String(String),

    /// Numeric literal, kept as written
    ///
    /// # Examples
    /// ```text
    /// 18
    /// -3
    /// 99.90
    /// ```
    Number(String),

    /// JSON path: one or more `.segment` parts with no whitespace in between
    ///
    /// Segments start with a letter or underscore, followed by letters, digits, or underscores.
    ///
    /// # Examples
    /// ```text
    /// .nome
    /// .cliente.idade
    /// ```
    Path(String),

    /// Bare word that is not a keyword
    ///
    /// Never valid on its own; kept so syntax errors can quote it.
    Identifier(String),

    // Punctuation
    /// Separates the fields of a `SELECT`
    Comma,

    /// Comparison operator
    Operator(Operator),

    /// End of input
    Eof,
}

impl Token {
    /// Text used when the token shows up in a syntax error.
    pub fn describe(&self) -> String {
        match self {
            Token::Load => "'LOAD'".to_string(),
            Token::Filter => "'FILTER'".to_string(),
            Token::Select => "'SELECT'".to_string(),
            Token::Save => "'SAVE'".to_string(),
            Token::As => "'AS'".to_string(),
            Token::String(s) => format!("'{}'", s),
            Token::Number(n) => format!("'{}'", n),
            Token::Path(path) => format!("'{}'", path),
            Token::Identifier(name) => format!("'{}'", name),
            Token::Comma => "','".to_string(),
            Token::Operator(op) => format!("'{}'", op),
            Token::Eof => "<EOF>".to_string(),
        }
    }

    /// Whether the token opens a new command; used for error recovery.
    pub fn starts_command(&self) -> bool {
        matches!(self, Token::Load | Token::Filter | Token::Select | Token::Save)
    }
}
