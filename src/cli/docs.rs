//! Documentation content for miniquery CLI

use super::CliError;

/// Available documentation topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocTopic {
    Commands,
    Paths,
    Types,
    Output,
}

impl DocTopic {
    /// Parse topic name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "commands" | "command" | "syntax" => Some(Self::Commands),
            "paths" | "path" | "json_paths" => Some(Self::Paths),
            "types" | "type" | "schema" => Some(Self::Types),
            "output" | "javascript" | "js" => Some(Self::Output),
            _ => None,
        }
    }
}

/// Get the docs overview (topic listing)
pub fn get_docs_overview() -> &'static str {
    r#"MINIQUERY DOCUMENTATION

MiniQuery is a pipeline language for loading JSON records, filtering them,
reshaping them, and saving the result. Programs compile to a Node.js script.

DOCUMENTATION TOPICS

  commands          LOAD, FILTER, SELECT and SAVE AS
  paths             Field paths and how nested access is compiled
  types             Declared field types and the checks FILTER is subject to
  output            Shape of the generated JavaScript

QUICK REFERENCE

  LOAD "in.json"               Read a JSON array
  FILTER .idade > 18           Keep matching records
  SELECT .nome, .cliente.idade Keep only these fields
  SAVE AS "out.json"           Write the current dataset

Run 'miniquery doc <topic>' for detailed documentation.
"#
}

/// Get documentation for a specific topic
pub fn get_doc_topic(name: &str) -> Result<&'static str, CliError> {
    match DocTopic::from_name(name) {
        Some(DocTopic::Commands) => Ok(COMMANDS_DOC),
        Some(DocTopic::Paths) => Ok(PATHS_DOC),
        Some(DocTopic::Types) => Ok(TYPES_DOC),
        Some(DocTopic::Output) => Ok(OUTPUT_DOC),
        None => Err(CliError::UnknownTopic(name.to_string())),
    }
}

const COMMANDS_DOC: &str = r#"COMMANDS - The Four Pipeline Stages

LOAD
  LOAD "<path>"
    Reads the file and parses it as JSON. The path may not be empty.

FILTER
  FILTER <value> <operator> <value>
    Keeps the records for which the comparison holds. Values are field
    paths, numbers, or double-quoted strings.

    Operators: ==  !=  <  >  <=  >=

    Example:
      FILTER .cliente.idade >= 18
      FILTER .nome == "Maria"

    Consecutive filters narrow the same dataset.

SELECT
  SELECT <path>[, <path>...]
    Replaces every record with an object holding the listed fields.

    Example:
      SELECT .nome, .cliente.idade
      => { nome: ..., cliente_idade: ... }

SAVE AS
  SAVE AS "<path>"
    Writes the current dataset as JSON indented by two spaces. The path
    may not be empty.

    Strings have no escape sequences and may not span lines.
"#;

const PATHS_DOC: &str = r#"PATHS - Addressing Fields

  .field
  .parent.child
    A path starts with '.' and names one field per segment. Segments use
    letters, digits and underscores and cannot start with a digit. No
    spaces are allowed inside a path.

NESTED ACCESS
  Every segment after the first is compiled with optional chaining:

    .cliente.idade   =>  item.cliente?.idade
    .idade           =>  item.idade

  A record without 'cliente' therefore yields undefined instead of an
  exception.
"#;

const TYPES_DOC: &str = r#"TYPES - Declared Field Types

  The compiler does not look at your data. Field types come from a table
  that is installed on every LOAD. The built-in table is:

    .idade           number
    .nome            string
    .email           string
    .cliente.idade   number
    .cliente.nome    string
    .valor           number

  Replace it with --schema <file.json>:

    { ".preco": "number", ".produto.nome": "string" }

CHECKS
  Incompatible type
    FILTER .idade > "abc"     number compared with a string

  Operator invalid for strings
    FILTER .nome > "M"        only == and != apply to strings

  Paths missing from the table are unknown and never rejected.

STRICT MODE
  --strict also reports commands before LOAD, a second LOAD, and FILTER
  after SELECT.
"#;

const OUTPUT_DOC: &str = r#"OUTPUT - Generated JavaScript

  LOAD "a.json"
    const input = JSON.parse(fs.readFileSync('a.json', 'utf-8'));

  FILTER .idade > 18
    const filteredData = input.filter(item => item.idade > 18);

  FILTER .nome == "Ana"   (a second filter)
    filteredData = filteredData.filter(item => item.nome === "Ana");

  SELECT .nome, .cliente.idade
    const result = filteredData.map(item => ({ nome: item.nome, cliente_idade: item.cliente?.idade }));

  SAVE AS "b.json"
    fs.writeFileSync('b.json', JSON.stringify(result, null, 2));

  '==' and '!=' are emitted as '===' and '!=='.
"#;
