// tests/codegen_tests.rs

use miniquery::ast::{Command, Operator};
use miniquery::codegen::{generate, property_name, safe_path, JavaScriptGenerator};

const PROLOGUE: &str = "// Generated automatically\nconst fs = require('fs');\n\n";

fn load(path: &str) -> Command {
    Command::Load {
        file_path: path.into(),
        line: 1,
    }
}

fn filter(left: &str, operator: Operator, right: &str) -> Command {
    Command::Filter {
        left_path: left.into(),
        operator,
        right_operand: right.into(),
        line: 1,
    }
}

fn select(fields: &[&str]) -> Command {
    Command::Select {
        fields: fields.iter().map(|f| f.to_string()).collect(),
        line: 1,
    }
}

fn save(path: &str) -> Command {
    Command::Save {
        output_file: path.into(),
        line: 1,
    }
}

/// Generated statements with the prologue removed.
fn body(commands: &[Command]) -> Vec<String> {
    let code = generate(commands);
    assert!(code.starts_with(PROLOGUE), "missing prologue in:\n{}", code);
    code[PROLOGUE.len()..].lines().map(str::to_string).collect()
}

// ============================================================================
// Path Helpers
// ============================================================================

#[test]
fn test_safe_path() {
    let test_cases = vec![
        (".idade", ".idade"),
        (".cliente.idade", ".cliente?.idade"),
        (".a.b.c", ".a?.b?.c"),
        ("nome", "nome"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(safe_path(input), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_property_name() {
    assert_eq!(property_name(".nome"), "nome");
    assert_eq!(property_name(".cliente.idade"), "cliente_idade");
    assert_eq!(property_name(".a.b.c"), "a_b_c");
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_empty_program_is_prologue_only() {
    assert_eq!(generate(&[]), PROLOGUE);
    assert_eq!(JavaScriptGenerator::default().finish(), PROLOGUE);
}

#[test]
fn test_load() {
    assert_eq!(
        body(&[load("clientes.json")]),
        vec!["const input = JSON.parse(fs.readFileSync('clientes.json', 'utf-8'));"]
    );
}

#[test]
fn test_filter_operators_are_normalized() {
    let test_cases = vec![
        (Operator::Equal, "==="),
        (Operator::NotEqual, "!=="),
        (Operator::LessThan, "<"),
        (Operator::GreaterThan, ">"),
        (Operator::LessEqual, "<="),
        (Operator::GreaterEqual, ">="),
    ];

    for (operator, js) in test_cases {
        let lines = body(&[load("a.json"), filter(".idade", operator, "18")]);
        assert_eq!(
            lines[1],
            format!("const filteredData = input.filter(item => item.idade {} 18);", js)
        );
    }
}

#[test]
fn test_filter_operand_kinds() {
    let lines = body(&[
        load("a.json"),
        filter(".nome", Operator::Equal, "Ana"),
        filter(".valor", Operator::GreaterThan, "-2.5"),
        filter(".cliente.idade", Operator::LessThan, ".cliente.limite.idade"),
    ]);
    assert_eq!(
        lines[1..],
        [
            "const filteredData = input.filter(item => item.nome === \"Ana\");",
            "filteredData = filteredData.filter(item => item.valor > -2.5);",
            "filteredData = filteredData.filter(item => item.cliente?.idade < item.cliente?.limite?.idade);",
        ]
    );
}

#[test]
fn test_filter_chain_declares_once() {
    let code = generate(&[
        load("a.json"),
        filter(".idade", Operator::GreaterThan, "18"),
        filter(".idade", Operator::LessThan, "65"),
        filter(".nome", Operator::NotEqual, "x"),
    ]);
    assert_eq!(code.matches("const filteredData").count(), 1);
    assert_eq!(code.matches("filteredData = filteredData.filter(").count(), 2);
}

#[test]
fn test_select() {
    let lines = body(&[load("a.json"), select(&[".nome", ".cliente.idade"])]);
    assert_eq!(
        lines[1],
        "const result = input.map(item => ({ nome: item.nome, cliente_idade: item.cliente?.idade }));"
    );
}

#[test]
fn test_select_reads_filtered_data() {
    let lines = body(&[
        load("a.json"),
        filter(".idade", Operator::GreaterEqual, "18"),
        select(&[".email"]),
    ]);
    assert_eq!(
        lines[2],
        "const result = filteredData.map(item => ({ email: item.email }));"
    );
}

#[test]
fn test_select_without_fields() {
    let lines = body(&[load("a.json"), select(&[])]);
    assert_eq!(lines[1], "const result = input.map(item => ({}));");
}

#[test]
fn test_save_writes_current_dataset() {
    let test_cases = vec![
        (vec![load("a.json"), save("b.json")], "input"),
        (
            vec![
                load("a.json"),
                filter(".idade", Operator::GreaterThan, "1"),
                save("b.json"),
            ],
            "filteredData",
        ),
        (
            vec![
                load("a.json"),
                filter(".idade", Operator::GreaterThan, "1"),
                select(&[".nome"]),
                save("b.json"),
            ],
            "result",
        ),
    ];

    for (commands, binding) in test_cases {
        let lines = body(&commands);
        assert_eq!(
            lines.last().map(String::as_str),
            Some(format!("fs.writeFileSync('b.json', JSON.stringify({}, null, 2));", binding).as_str())
        );
    }
}

#[test]
fn test_missing_load_reads_null() {
    assert_eq!(
        body(&[filter(".idade", Operator::GreaterThan, "1"), save("b.json")]),
        vec![
            "const filteredData = null.filter(item => item.idade > 1);",
            "fs.writeFileSync('b.json', JSON.stringify(filteredData, null, 2));",
        ]
    );
    assert_eq!(
        body(&[save("b.json")]),
        vec!["fs.writeFileSync('b.json', JSON.stringify(null, null, 2));"]
    );
}

#[test]
fn test_filter_after_select_keeps_narrowing_filtered_data() {
    let lines = body(&[
        load("a.json"),
        filter(".idade", Operator::GreaterThan, "1"),
        select(&[".idade"]),
        filter(".idade", Operator::LessThan, "9"),
        save("b.json"),
    ]);
    assert_eq!(
        lines[3],
        "filteredData = filteredData.filter(item => item.idade < 9);"
    );
    assert_eq!(
        lines[4],
        "fs.writeFileSync('b.json', JSON.stringify(filteredData, null, 2));"
    );
}

#[test]
fn test_incremental_emission_matches_generate() {
    let commands = vec![
        load("a.json"),
        filter(".idade", Operator::GreaterThan, "18"),
        select(&[".nome"]),
        save("b.json"),
    ];

    let mut generator = JavaScriptGenerator::new();
    for command in &commands {
        generator.emit(command);
    }
    assert_eq!(generator.finish(), generate(&commands));
}

#[test]
fn test_generation_is_deterministic() {
    let commands = vec![
        load("a.json"),
        filter(".cliente.nome", Operator::Equal, "Ana"),
        select(&[".cliente.nome", ".valor"]),
        save("b.json"),
    ];
    assert_eq!(generate(&commands), generate(&commands));
}
