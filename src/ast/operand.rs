use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("numeric literal pattern is valid"));

static PATH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\.[A-Za-z_][A-Za-z0-9_]*)+$").expect("field path pattern is valid")
});

/// Returns true if `text` is a signed decimal literal such as `18`, `-3` or `99.90`.
pub fn is_number_literal(text: &str) -> bool {
    NUMBER_PATTERN.is_match(text)
}

/// Returns true if `text` lexes as a single field path such as `.cliente.idade`.
pub fn is_path_literal(text: &str) -> bool {
    PATH_PATTERN.is_match(text)
}

/// The right-hand side of a filter, classified from its collected text.
///
/// Classification is purely lexical: a leading `.` means a JSON path, a
/// signed decimal means a number, and anything else is string content whose
/// quotes were already stripped by the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand<'a> {
    /// Another field of the same record (`.cliente.idade`)
    Path(&'a str),

    /// Numeric literal, emitted verbatim
    Number(&'a str),

    /// String literal content
    Text(&'a str),
}

impl<'a> Operand<'a> {
    pub fn classify(text: &'a str) -> Self {
        if text.starts_with('.') {
            Operand::Path(text)
        } else if is_number_literal(text) {
            Operand::Number(text)
        } else {
            Operand::Text(text)
        }
    }
}
