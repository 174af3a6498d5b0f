// tests/semantic_tests.rs

use miniquery::parser::parse;
use miniquery::semantic::{
    analyze, Analysis, FieldType, FieldTypeTable, SchemaError, ValidationOptions,
};

fn analyze_with(source: &str, table: &FieldTypeTable, options: ValidationOptions) -> Analysis {
    analyze(&parse(source).unwrap(), table, options)
}

fn diagnostics(source: &str) -> Vec<String> {
    analyze_with(source, &FieldTypeTable::builtin(), ValidationOptions::default())
        .diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect()
}

fn strict_diagnostics(source: &str) -> Vec<String> {
    analyze_with(
        source,
        &FieldTypeTable::builtin(),
        ValidationOptions { strict_order: true },
    )
    .diagnostics
    .iter()
    .map(|d| d.to_string())
    .collect()
}

// ============================================================================
// Field Type Table
// ============================================================================

#[test]
fn test_builtin_table() {
    let table = FieldTypeTable::builtin();
    assert_eq!(table.len(), 6);
    assert_eq!(table.get(".idade"), Some(FieldType::Number));
    assert_eq!(table.get(".nome"), Some(FieldType::String));
    assert_eq!(table.get(".email"), Some(FieldType::String));
    assert_eq!(table.get(".cliente.idade"), Some(FieldType::Number));
    assert_eq!(table.get(".cliente.nome"), Some(FieldType::String));
    assert_eq!(table.get(".valor"), Some(FieldType::Number));
    assert_eq!(table.get(".desconhecido"), None);
}

#[test]
fn test_default_is_builtin() {
    assert_eq!(FieldTypeTable::default(), FieldTypeTable::builtin());
}

#[test]
fn test_schema_from_json() {
    let table = FieldTypeTable::from_json_str(r#"{".preco": "number", ".produto.nome": "string"}"#)
        .unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(".preco"), Some(FieldType::Number));
    assert_eq!(table.get(".produto.nome"), Some(FieldType::String));
    assert_eq!(table.get(".idade"), None);
}

#[test]
fn test_schema_rejects_unknown_type() {
    let err = FieldTypeTable::from_json_str(r#"{".ativo": "boolean"}"#).unwrap_err();
    assert!(matches!(err, SchemaError::Json(_)));
}

#[test]
fn test_schema_rejects_non_path_key() {
    let err = FieldTypeTable::from_json_str(r#"{"preco": "number"}"#).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidPath(ref p) if p == "preco"));
    assert!(err.to_string().contains("'preco'"));
}

// ============================================================================
// Empty Paths
// ============================================================================

#[test]
fn test_empty_load_path() {
    assert_eq!(
        diagnostics(r#"LOAD """#),
        vec!["ERROR (Line 1): file path cannot be empty"]
    );
}

#[test]
fn test_blank_load_path() {
    assert_eq!(
        diagnostics(r#"LOAD "   ""#),
        vec!["ERROR (Line 1): file path cannot be empty"]
    );
}

#[test]
fn test_empty_save_path() {
    assert_eq!(
        diagnostics("LOAD \"a.json\"\nSAVE AS \"\""),
        vec!["ERROR (Line 2): output file name cannot be empty"]
    );
}

// ============================================================================
// Type Checks
// ============================================================================

#[test]
fn test_number_field_against_string() {
    assert_eq!(
        diagnostics("LOAD \"a.json\"\nFILTER .idade > \"abc\""),
        vec![
            "ERROR (Line 2): incompatible type: field '.idade' is of type number, but value 'abc' is of type string"
        ]
    );
}

#[test]
fn test_number_field_against_number() {
    assert!(diagnostics("LOAD \"a.json\"\nFILTER .idade > 18").is_empty());
    assert!(diagnostics("LOAD \"a.json\"\nFILTER .valor <= -10.25").is_empty());
}

#[test]
fn test_quoted_digits_count_as_number() {
    // Classification looks at the unquoted text only
    assert!(diagnostics("LOAD \"a.json\"\nFILTER .idade == \"18\"").is_empty());
}

#[test]
fn test_string_field_against_number() {
    assert_eq!(
        diagnostics("LOAD \"a.json\"\nFILTER .nome == 42"),
        vec![
            "ERROR (Line 2): incompatible type: field '.nome' is of type string, but value '42' is of type number"
        ]
    );
}

#[test]
fn test_path_against_path() {
    assert!(diagnostics("LOAD \"a.json\"\nFILTER .idade < .cliente.idade").is_empty());
    assert_eq!(
        diagnostics("LOAD \"a.json\"\nFILTER .idade == .nome"),
        vec![
            "ERROR (Line 2): incompatible type: field '.idade' is of type number, but value '.nome' is of type string"
        ]
    );
}

#[test]
fn test_unknown_paths_are_compatible() {
    assert!(diagnostics("LOAD \"a.json\"\nFILTER .cidade == 10").is_empty());
    assert!(diagnostics("LOAD \"a.json\"\nFILTER .idade == .cidade").is_empty());
    assert!(diagnostics("LOAD \"a.json\"\nFILTER .cidade > \"x\"").is_empty());
}

#[test]
fn test_types_are_unknown_before_load() {
    assert!(diagnostics("FILTER .idade > \"abc\"").is_empty());
}

// ============================================================================
// Operator Restriction
// ============================================================================

#[test]
fn test_ordering_operator_on_string_field() {
    assert_eq!(
        diagnostics("LOAD \"a.json\"\nFILTER .nome > \"x\""),
        vec!["ERROR (Line 2): operator '>' is invalid for strings. Use '==' or '!='."]
    );
}

#[test]
fn test_equality_operators_on_string_field() {
    assert!(diagnostics("LOAD \"a.json\"\nFILTER .nome == \"x\"").is_empty());
    assert!(diagnostics("LOAD \"a.json\"\nFILTER .nome != \"x\"").is_empty());
}

#[test]
fn test_both_rules_fire_together() {
    assert_eq!(
        diagnostics("LOAD \"a.json\"\nFILTER .email >= 3"),
        vec![
            "ERROR (Line 2): incompatible type: field '.email' is of type string, but value '3' is of type number",
            "ERROR (Line 2): operator '>=' is invalid for strings. Use '==' or '!='.",
        ]
    );
}

// ============================================================================
// Accumulation
// ============================================================================

#[test]
fn test_diagnostics_accumulate_in_order() {
    let source = r#"LOAD ""
FILTER .idade > "abc"
FILTER .nome < "m"
SELECT .nome
SAVE AS "  ""#;
    assert_eq!(
        diagnostics(source),
        vec![
            "ERROR (Line 1): file path cannot be empty",
            "ERROR (Line 2): incompatible type: field '.idade' is of type number, but value 'abc' is of type string",
            "ERROR (Line 3): operator '<' is invalid for strings. Use '==' or '!='.",
            "ERROR (Line 5): output file name cannot be empty",
        ]
    );
}

#[test]
fn test_commands_are_returned_with_diagnostics() {
    let analysis = analyze_with(
        "LOAD \"\"\nSELECT .nome",
        &FieldTypeTable::builtin(),
        ValidationOptions::default(),
    );
    assert!(!analysis.is_valid());
    assert_eq!(analysis.commands.len(), 2);
    assert_eq!(analysis.current_file.as_deref(), Some(""));
}

// ============================================================================
// Injected Tables
// ============================================================================

#[test]
fn test_custom_table_replaces_builtin() {
    let table = FieldTypeTable::from_json_str(r#"{".preco": "number"}"#).unwrap();
    let analysis = analyze_with(
        "LOAD \"p.json\"\nFILTER .preco == \"caro\"\nFILTER .idade == \"x\"",
        &table,
        ValidationOptions::default(),
    );
    let messages: Vec<String> = analysis.diagnostics.iter().map(|d| d.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "ERROR (Line 2): incompatible type: field '.preco' is of type number, but value 'caro' is of type string"
        ]
    );
}

#[test]
fn test_empty_table_accepts_everything() {
    let analysis = analyze_with(
        "LOAD \"a.json\"\nFILTER .nome > 1",
        &FieldTypeTable::empty(),
        ValidationOptions::default(),
    );
    assert!(analysis.is_valid());
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_permissive_by_default() {
    assert!(diagnostics("FILTER .idade > 1\nLOAD \"a.json\"\nLOAD \"b.json\"\nSELECT .nome\nFILTER .idade > 2").is_empty());
}

#[test]
fn test_strict_accepts_well_ordered_pipeline() {
    assert!(
        strict_diagnostics("LOAD \"a.json\"\nFILTER .idade > 1\nFILTER .idade < 9\nSELECT .nome\nSAVE AS \"b.json\"\nSAVE AS \"c.json\"")
            .is_empty()
    );
}

#[test]
fn test_strict_requires_load_first() {
    assert_eq!(
        strict_diagnostics("FILTER .idade > 1\nSELECT .nome\nSAVE AS \"b.json\""),
        vec![
            "ERROR (Line 1): FILTER requires a preceding LOAD",
            "ERROR (Line 2): SELECT requires a preceding LOAD",
            "ERROR (Line 3): SAVE requires a preceding LOAD",
        ]
    );
}

#[test]
fn test_strict_single_load() {
    assert_eq!(
        strict_diagnostics("LOAD \"a.json\"\nLOAD \"b.json\""),
        vec!["ERROR (Line 2): only one LOAD is allowed per program"]
    );
}

#[test]
fn test_strict_filter_after_select() {
    assert_eq!(
        strict_diagnostics("LOAD \"a.json\"\nSELECT .idade\nFILTER .idade > 1"),
        vec!["ERROR (Line 3): FILTER cannot follow SELECT"]
    );
}
