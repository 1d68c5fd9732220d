use clap::Parser as ClapParser;
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::logger;
use crate::output::{self, GradeRow};
use answergrade::config::{self, GraderConfig};
use answergrade::dataset;
use answergrade::extract::ExtractContext;
use answergrade::grader::{self, ShiftedGrade};
use answergrade::task::{Strategy, Task};
use answergrade::{GradingResult, Reference};

#[derive(ClapParser)]
#[command(
    name = "answergrade",
    version,
    about = "Grade model answers against reasoning and unpuzzle datasets"
)]
struct Cli {
    /// Path to config YAML file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Do not append graded results to the grade log
    #[arg(long, global = true)]
    no_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a JSONL file of responses against a simple-reasoning dataset
    Grade {
        /// simple_reasoning.json
        #[arg(short, long, value_name = "FILE")]
        dataset: PathBuf,

        /// JSONL with {"custom_id", "response"} per line (stdin if omitted)
        responses: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "jsonl")]
        format: Format,

        /// Show only: correct, incorrect
        #[arg(short, long)]
        filter: Option<VerdictFilter>,

        /// Grade only tasks whose tag matches this glob (e.g. "logic_*")
        #[arg(short, long, value_name = "GLOB")]
        task: Option<String>,
    },
    /// Grade a single response read from a file or stdin
    Check {
        /// Task tag selecting the grading rules
        #[arg(short, long)]
        task: Task,

        /// Reference answer (parsed as JSON when possible)
        #[arg(short, long)]
        reference: String,

        /// Number of counted items, for count tasks
        #[arg(short = 'k', long)]
        count_items: Option<usize>,

        /// File holding the response (stdin if omitted)
        file: Option<PathBuf>,
    },
    /// Grade original/shifted response pairs against shifted_unpuzzles.json
    Shifted {
        /// shifted_unpuzzles.json
        #[arg(short, long, value_name = "FILE")]
        dataset: PathBuf,

        /// JSONL with {"index", "original_response", "shifted_response"} per line
        responses: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "jsonl")]
        format: Format,
    },
    /// Load a dataset file and report its records
    Validate {
        /// Dataset file
        file: PathBuf,

        /// Which dataset the file holds
        #[arg(short, long, default_value = "simple")]
        kind: DatasetKind,
    },
    /// List supported task tags
    Tasks,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Format {
    Jsonl,
    Table,
}

#[derive(Clone, clap::ValueEnum)]
enum VerdictFilter {
    Correct,
    Incorrect,
}

#[derive(Clone, clap::ValueEnum)]
enum DatasetKind {
    Simple,
    Unpuzzles,
    Shifted,
}

#[derive(Deserialize)]
struct ResponseLine {
    custom_id: String,
    response: String,
}

#[derive(Deserialize)]
struct ShiftedResponseLine {
    index: usize,
    original_response: String,
    shifted_response: String,
}

#[derive(Serialize)]
struct GradeLine<'a> {
    custom_id: &'a str,
    #[serde(flatten)]
    result: &'a GradingResult,
}

#[derive(Serialize)]
struct ShiftedLine<'a> {
    index: usize,
    #[serde(flatten)]
    grade: &'a ShiftedGrade,
}

/// Where grading calls are logged, if anywhere.
struct GradeLog<'a> {
    config: &'a GraderConfig,
    enabled: bool,
}

impl GradeLog<'_> {
    fn record(&self, custom_id: Option<&str>, result: &GradingResult, response: &str) {
        if !self.enabled {
            return;
        }
        let response = self.config.log_responses.then_some(response);
        let entry = logger::make_entry(
            custom_id,
            result,
            response,
            self.config.max_logged_response_bytes,
        );
        logger::log_grade_to(&entry, &self.config.log_file);
    }
}

/// Main entry point. Returns the process exit code.
pub fn run() -> i32 {
    yansi::whenever(yansi::Condition::TTY_AND_COLOR);

    let cli = Cli::parse();

    if let Commands::Tasks = cli.command {
        println!("{}", output::tasks_table());
        return 0;
    }

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("answergrade: {e}");
            return 2;
        }
    };
    let log = GradeLog {
        config: &config,
        enabled: !cli.no_log,
    };

    match cli.command {
        Commands::Grade {
            dataset,
            responses,
            format,
            filter,
            task,
        } => run_grade(&config, &log, &dataset, responses, format, filter, task.as_deref()),
        Commands::Check {
            task,
            reference,
            count_items,
            file,
        } => run_check(&config, &log, task, &reference, count_items, file),
        Commands::Shifted {
            dataset,
            responses,
            format,
        } => run_shifted(&config, &log, &dataset, responses, format),
        Commands::Validate { file, kind } => run_validate(&file, kind),
        Commands::Tasks => unreachable!(), // handled above
    }
}

fn run_grade(
    config: &GraderConfig,
    log: &GradeLog,
    dataset_path: &Path,
    responses: Option<PathBuf>,
    format: Format,
    filter: Option<VerdictFilter>,
    task_glob: Option<&str>,
) -> i32 {
    let questions = match dataset::load_simple_reasoning(dataset_path) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("answergrade: {e}");
            return 2;
        }
    };

    let lines: Vec<ResponseLine> = match read_input(responses).and_then(|s| parse_jsonl(&s)) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("answergrade: {e}");
            return 1;
        }
    };

    let ctx = config.extract_context();
    let mut rows = Vec::new();
    for line in &lines {
        let Some(question) = questions.get(&line.custom_id) else {
            eprintln!(
                "answergrade: custom_id '{}' not in {}, skipping",
                line.custom_id,
                dataset_path.display()
            );
            continue;
        };
        if let Some(glob) = task_glob {
            if !glob_match::glob_match(glob, question.task.as_str()) {
                continue;
            }
        }

        let result = grader::grade_question(question, &line.response, &ctx);
        log.record(Some(&line.custom_id), &result, &line.response);

        let show = match &filter {
            Some(VerdictFilter::Correct) => result.is_correct,
            Some(VerdictFilter::Incorrect) => !result.is_correct,
            None => true,
        };
        if show {
            rows.push(GradeRow {
                custom_id: line.custom_id.clone(),
                result,
            });
        }
    }

    match format {
        Format::Jsonl => {
            for row in &rows {
                print_json(&GradeLine {
                    custom_id: &row.custom_id,
                    result: &row.result,
                });
            }
        }
        Format::Table => println!("{}", output::grades_table(&rows)),
    }

    0
}

fn run_check(
    config: &GraderConfig,
    log: &GradeLog,
    task: Task,
    reference_arg: &str,
    count_items: Option<usize>,
    file: Option<PathBuf>,
) -> i32 {
    let raw = reference_value(task, reference_arg);
    let reference = match Reference::for_task(task, &raw) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("answergrade: invalid reference for {task}: {e}");
            return 1;
        }
    };

    let response = match read_input(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("answergrade: {e}");
            return 1;
        }
    };

    let mut ctx: ExtractContext = config.extract_context();
    ctx.count_items = count_items;
    let result = grader::grade_with(&response, &reference, task, &ctx);
    log.record(None, &result, &response);
    print_json(&result);

    0
}

fn run_shifted(
    config: &GraderConfig,
    log: &GradeLog,
    dataset_path: &Path,
    responses: Option<PathBuf>,
    format: Format,
) -> i32 {
    let sets = match dataset::load_shifted_unpuzzles(dataset_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("answergrade: {e}");
            return 2;
        }
    };

    let lines: Vec<ShiftedResponseLine> =
        match read_input(responses).and_then(|s| parse_jsonl(&s)) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("answergrade: {e}");
                return 1;
            }
        };

    let ctx = config.extract_context();
    let mut rows = Vec::new();
    for line in &lines {
        let Some(set) = sets.get(line.index) else {
            eprintln!(
                "answergrade: index {} out of range ({} sets), skipping",
                line.index,
                sets.len()
            );
            continue;
        };
        let Some(reference) = &set.reference else {
            eprintln!(
                "answergrade: set {} has no answer to grade against, skipping",
                line.index
            );
            continue;
        };

        let grade = grader::grade_shifted(
            &line.original_response,
            &line.shifted_response,
            reference,
            &ctx,
        );
        let id = format!("shifted:{}", line.index);
        log.record(Some(&id), &grade.original, &line.original_response);
        log.record(Some(&id), &grade.shifted, &line.shifted_response);
        rows.push((line.index, grade));
    }

    match format {
        Format::Jsonl => {
            for (index, grade) in &rows {
                print_json(&ShiftedLine {
                    index: *index,
                    grade,
                });
            }
        }
        Format::Table => println!("{}", output::shifted_table(&rows)),
    }

    0
}

fn run_validate(path: &Path, kind: DatasetKind) -> i32 {
    match kind {
        DatasetKind::Simple => match dataset::load_simple_reasoning(path) {
            Ok(set) => {
                let counts: Vec<(String, usize)> = set
                    .task_counts()
                    .into_iter()
                    .map(|(t, n)| (t.to_string(), n))
                    .collect();
                println!("{}", output::task_counts_table(&counts));
                println!("Total: {} questions", set.len());
                0
            }
            Err(e) => {
                eprintln!("answergrade: {e}");
                2
            }
        },
        DatasetKind::Unpuzzles => match dataset::load_unpuzzles(path) {
            Ok(pairs) => {
                println!("Total: {} unpuzzle pairs", pairs.len());
                0
            }
            Err(e) => {
                eprintln!("answergrade: {e}");
                2
            }
        },
        DatasetKind::Shifted => match dataset::load_shifted_unpuzzles(path) {
            Ok(sets) => {
                let gradable = sets.iter().filter(|s| s.reference.is_some()).count();
                println!(
                    "Total: {} shifted unpuzzle sets ({} with answers)",
                    sets.len(),
                    gradable
                );
                0
            }
            Err(e) => {
                eprintln!("answergrade: {e}");
                2
            }
        },
    }
}

/// Interpret a `--reference` argument: JSON when it parses to a shape the
/// task can use, otherwise the literal string.
fn reference_value(task: Task, arg: &str) -> serde_json::Value {
    use serde_json::Value;
    match serde_json::from_str::<Value>(arg) {
        Ok(v @ (Value::String(_) | Value::Number(_) | Value::Array(_))) => v,
        Ok(v) if task.strategy() != Strategy::Unpuzzle => v,
        _ => Value::String(arg.to_string()),
    }
}

fn read_input(file: Option<PathBuf>) -> Result<String, String> {
    match file {
        Some(path) if path.to_str() != Some("-") => std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display())),
        _ => {
            if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
                return Err("No input provided. Pass a file or pipe input to stdin.".to_string());
            }
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {e}"))?;
            Ok(buf)
        }
    }
}

/// Parse JSON Lines, skipping blank lines. Errors name the 1-based line.
fn parse_jsonl<T: serde::de::DeserializeOwned>(input: &str) -> Result<Vec<T>, String> {
    input
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| {
            serde_json::from_str(l).map_err(|e| format!("Invalid response on line {}: {e}", i + 1))
        })
        .collect()
}

/// Print a JSON value to stdout.
fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("answergrade: failed to serialize output: {e}");
            println!("{{}}");
        }
    }
}
