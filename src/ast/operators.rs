use std::fmt;

/// Comparison operators accepted by `FILTER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Greater than (`>`)
    GreaterThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
}

impl Operator {
    /// The operator as written in MiniQuery source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessEqual => "<=",
            Operator::GreaterEqual => ">=",
        }
    }

    /// The operator as emitted in JavaScript.
    ///
    /// Loose (in)equality becomes strict; ordering comparisons pass through.
    pub fn to_js(&self) -> &'static str {
        match self {
            Operator::Equal => "===",
            Operator::NotEqual => "!==",
            other => other.as_str(),
        }
    }

    /// Only equality tests are meaningful between strings.
    pub fn applies_to_strings(&self) -> bool {
        matches!(self, Operator::Equal | Operator::NotEqual)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
