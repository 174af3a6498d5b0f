//! Golden-file runner for a directory of MiniQuery programs

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use super::CliError;
use crate::compiler::{self, CompileOptions};

const PROGRAM_EXTENSION: &str = "mq";
const EXPECTED_SUFFIX: &str = ".expected.txt";
const RESULT_SUFFIX: &str = ".result.txt";
const REPORT_FILE: &str = "REPORT.txt";

/// Options for the batch command
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory holding `*.mq` programs
    pub programs_dir: PathBuf,
    /// Directory holding `<name>.expected.txt` reports
    pub expected_dir: PathBuf,
    /// Directory receiving per-case results and the summary report
    pub results_dir: PathBuf,
    pub compile: CompileOptions,
}

/// Outcome of one program.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseResult {
    pub name: String,
    pub input: String,
    pub output: String,
    pub passed: bool,
}

/// Outcome of a whole batch.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub cases: Vec<CaseResult>,
    pub report_path: PathBuf,
}

impl BatchSummary {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.passed).count()
    }

    pub fn total(&self) -> usize {
        self.cases.len()
    }
}

/// Golden comparison ignores surrounding whitespace and line-ending style.
fn normalize(text: &str) -> String {
    text.trim().replace("\r\n", "\n")
}

/// Per-case section used in result files and the summary report.
pub fn format_case(case: &CaseResult) -> String {
    format!(
        "-> Test: {}\nStatus: {}\n--- Input ---\n{}\n--- Result ---\n{}",
        case.name,
        if case.passed { "✔ PASSED" } else { "✘ FAILED" },
        case.input,
        case.output
    )
}

/// `*.mq` files directly under `dir`, sorted by path.
fn program_files(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        PROGRAM_EXTENSION
    );
    let mut files: Vec<PathBuf> = glob::glob(&pattern)?.filter_map(Result::ok).collect();
    files.sort();
    Ok(files)
}

fn run_case(path: &Path, options: &BatchOptions) -> CaseResult {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let input = match fs::read_to_string(path) {
        Ok(input) => input,
        Err(e) => {
            return CaseResult {
                name,
                input: String::new(),
                output: format!("ERROR WHILE RUNNING TEST:\n{}", e),
                passed: false,
            };
        }
    };

    let output = compiler::compile_to_report(&input, &options.compile);

    let expected_path = options.expected_dir.join(format!("{}{}", name, EXPECTED_SUFFIX));
    let passed = match fs::read_to_string(&expected_path) {
        Ok(expected) => normalize(&output) == normalize(&expected),
        Err(_) => {
            debug!("no expected output at {}", expected_path.display());
            false
        }
    };

    CaseResult {
        name,
        input,
        output,
        passed,
    }
}

/// Compiles every program, compares it with its golden report, and writes
/// per-case results plus a summary report.
pub fn run_batch(options: &BatchOptions) -> Result<BatchSummary, CliError> {
    fs::create_dir_all(&options.results_dir)
        .map_err(|e| CliError::file(&options.results_dir, e))?;

    let mut cases = Vec::new();
    for path in program_files(&options.programs_dir)? {
        let case = run_case(&path, options);
        info!(
            "{}: {}",
            case.name,
            if case.passed { "passed" } else { "failed" }
        );

        let result_path = options
            .results_dir
            .join(format!("{}{}", case.name, RESULT_SUFFIX));
        fs::write(&result_path, format_case(&case)).map_err(|e| CliError::file(&result_path, e))?;
        cases.push(case);
    }

    let passed = cases.iter().filter(|c| c.passed).count();
    let mut report = String::from("=== TEST REPORT ===\n");
    report.push_str(&format!(
        "Date: {}\n\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    report.push_str(&format!(
        "->  SUMMARY: {}/{} tests passed\n\n",
        passed,
        cases.len()
    ));
    for case in &cases {
        report.push_str(&format_case(case));
        report.push_str("\n\n");
    }

    let report_path = options.results_dir.join(REPORT_FILE);
    fs::write(&report_path, report).map_err(|e| CliError::file(&report_path, e))?;

    Ok(BatchSummary { cases, report_path })
}
