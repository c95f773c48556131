use clap::{Args, Parser, Subcommand};
use promptgraph::prelude::*;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Inspect and run prompt canvases from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the code the snippet table generates for a prompt
    Generate {
        /// The natural-language prompt
        prompt: Vec<String>,
    },
    /// Run code (or the code generated for a prompt) against a JSON input
    Run(RunArgs),
    /// Load an exported canvas, propagate outputs and report test results
    Propagate {
        /// Path to an exported canvas JSON file
        canvas_path: String,

        /// Evaluate in dependency order instead of a single hop
        #[arg(short, long)]
        ordered: bool,

        /// Number of single-hop passes to run (ignored with --ordered)
        #[arg(short, long, default_value_t = 1)]
        passes: usize,

        /// Write the recomputed canvas to this path
        #[arg(short, long)]
        write: Option<String>,
    },
    /// Parse a CSV file the way a data source block does
    Csv {
        /// Path to the CSV file
        csv_path: String,

        /// Number of rows to print
        #[arg(short = 'n', long, default_value_t = 5)]
        rows: usize,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct CodeSource {
    /// Code text to run
    #[arg(long)]
    code: Option<String>,
    /// Prompt whose generated code is run
    #[arg(long)]
    prompt: Option<String>,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    source: CodeSource,

    /// JSON input, e.g. '[1,2,3]'
    #[arg(short, long)]
    input: String,

    /// Expected output; reports pass/fail when given
    #[arg(short, long)]
    expect: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate { prompt } => run_generate(&prompt.join(" ")),
        Command::Run(args) => run_code(args),
        Command::Propagate {
            canvas_path,
            ordered,
            passes,
            write,
        } => run_propagate(&canvas_path, ordered, passes, write.as_deref()),
        Command::Csv { csv_path, rows } => run_csv(&csv_path, rows),
    }
}

fn run_generate(prompt: &str) {
    let generated = SnippetTable::new().generate(prompt);
    println!("Function:    {}", generated.function_name);
    println!("Description: {}", generated.description);
    println!("\n{}", generated.code);
}

fn run_code(args: RunArgs) {
    let code = match (args.source.code, args.source.prompt) {
        (Some(code), _) => code,
        (None, Some(prompt)) => SnippetTable::new().generate(&prompt).code,
        (None, None) => exit_with_error("Either --code or --prompt is required."),
    };

    let case = TestCase::new("cli", args.input, args.expect.clone().unwrap_or_default());
    let evaluated = Evaluator::default().eval(&code, &[case], None);
    let Some(result) = evaluated.first() else {
        exit_with_error("Evaluation produced no result.");
    };

    println!("{}", result.actual_output.as_deref().unwrap_or_default());
    if args.expect.is_some() {
        let verdict = if result.passed == Some(true) { "PASS" } else { "FAIL" };
        println!("-> {}", verdict);
    }
}

fn run_propagate(canvas_path: &str, ordered: bool, passes: usize, write: Option<&str>) {
    let text = fs::read_to_string(canvas_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read canvas file '{}': {}",
            canvas_path, e
        ))
    });
    let mut state = import_text(&text)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to import canvas: {}", e)));

    let evaluator = Evaluator::default();
    let (mode, passes) = if ordered {
        (PropagationMode::Ordered, 1)
    } else {
        (PropagationMode::SingleHop, passes.max(1))
    };

    let start = Instant::now();
    for _ in 0..passes {
        propagate(&mut state, &evaluator, mode)
            .unwrap_or_else(|e| exit_with_error(&format!("Propagation failed: {}", e)));
    }
    let duration = start.elapsed();

    println!(
        "\nPropagated {} blocks over {} connections ({:?}, {} pass(es)) in {:?}",
        state.blocks.len(),
        state.connections.len(),
        mode,
        passes,
        duration
    );
    for block in &state.blocks {
        let summary = block.summary();
        let marker = match summary.status {
            TestStatus::Passing => "pass",
            TestStatus::Failing => "FAIL",
            TestStatus::Untested => "----",
        };
        println!(
            "  [{}] {} ({}) {}/{}{}",
            marker,
            block.id,
            block.function_name,
            summary.passed,
            summary.total,
            if block.is_connected { "  <- connected" } else { "" }
        );
        for case in block.test_cases.iter().filter(|tc| tc.passed != Some(true)) {
            println!(
                "      case {}: expected {} got {}",
                case.id,
                case.expected_output,
                case.actual_output.as_deref().unwrap_or("(not run)")
            );
        }
    }

    if let Some(out) = write {
        fs::write(Path::new(out), export_text(&state))
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", out, e)));
        println!("\nWrote recomputed canvas to {}", out);
    }
}

fn run_csv(csv_path: &str, rows: usize) {
    let text = fs::read_to_string(csv_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read CSV file '{}': {}", csv_path, e))
    });
    let file_name = Path::new(csv_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut block = CsvBlock::new("cli", Position::default());
    block
        .ingest(&file_name, &text)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse CSV: {}", e)));

    println!("{}", block.preview);
    for row in block.head(rows) {
        let line = serde_json::to_string(row)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode row: {}", e)));
        println!("  {}", line);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
