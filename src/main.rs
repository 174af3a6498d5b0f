use clap::{Parser as ClapParser, Subcommand};
use miniquery::cli::{self, BatchOptions, CliError, CompileRequest, CompileResult};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    time::Instant,
};

#[derive(ClapParser)]
#[command(name = "miniquery")]
#[command(about = "MiniQuery - compile JSON pipelines (LOAD/FILTER/SELECT/SAVE) to JavaScript")]
#[command(version)]
struct Cli {
    /// Log compiler stages (overrides RUST_LOG's default level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a MiniQuery program and print the report
    Compile {
        /// Program file (reads from stdin if not provided)
        file: Option<PathBuf>,

        /// Write the generated JavaScript to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file mapping field paths to "number" or "string"
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Also check command ordering
        #[arg(long)]
        strict: bool,

        /// Only validate syntax, don't analyze or generate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Compile every *.mq program in a directory against golden reports
    Batch {
        /// Directory holding the programs
        #[arg(long, default_value = "tests/programs")]
        programs: PathBuf,

        /// Directory holding <name>.expected.txt files
        #[arg(long, default_value = "tests/expected")]
        expected: PathBuf,

        /// Directory receiving results and REPORT.txt
        #[arg(long, default_value = "target/test-results")]
        results: PathBuf,

        /// JSON file mapping field paths to "number" or "string"
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Also check command ordering
        #[arg(long)]
        strict: bool,
    },

    /// Print the field type table in effect
    Schema {
        /// JSON file mapping field paths to "number" or "string"
        #[arg(short, long)]
        schema: Option<PathBuf>,
    },

    /// List documentation topics
    Docs,

    /// Show documentation for a specific topic
    Doc {
        /// Topic name (use 'miniquery docs' to list topics)
        topic: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Compile {
            file,
            output,
            schema,
            strict,
            syntax_only,
        } => run_compile(file, output, schema, strict, syntax_only),
        Commands::Batch {
            programs,
            expected,
            results,
            schema,
            strict,
        } => run_batch(programs, expected, results, schema, strict),
        Commands::Schema { schema } => cli::describe_schema(schema.as_ref()).map(|json| {
            println!("{}", json);
            true
        }),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(true)
        }
        Commands::Doc { topic } => cli::get_doc_topic(&topic).map(|content| {
            print!("{}", content);
            true
        }),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn read_source(file: Option<PathBuf>) -> Result<Option<String>, CliError> {
    match file {
        Some(path) => fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| CliError::File { path, source: e }),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run_compile(
    file: Option<PathBuf>,
    output: Option<PathBuf>,
    schema: Option<PathBuf>,
    strict: bool,
    syntax_only: bool,
) -> Result<bool, CliError> {
    let request = CompileRequest {
        source: read_source(file)?,
        output,
        schema,
        strict,
        syntax_only,
    };

    let result = cli::execute_compile(&request)?;
    match &result {
        CompileResult::SyntaxValid => println!("Syntax is valid"),
        CompileResult::Compiled { report, .. } | CompileResult::Failed { report } => {
            println!("{}", report)
        }
    }
    Ok(result.is_success())
}

fn run_batch(
    programs: PathBuf,
    expected: PathBuf,
    results: PathBuf,
    schema: Option<PathBuf>,
    strict: bool,
) -> Result<bool, CliError> {
    println!("Running MiniQuery programs...");
    let started = Instant::now();

    let options = BatchOptions {
        programs_dir: programs,
        expected_dir: expected,
        results_dir: results,
        compile: cli::load_options(schema.as_ref(), strict)?,
    };
    let summary = cli::run_batch(&options)?;

    println!(
        "{}/{} tests passed in {}ms. Report: {}",
        summary.passed(),
        summary.total(),
        started.elapsed().as_millis(),
        summary.report_path.display()
    );
    Ok(summary.passed() == summary.total())
}
