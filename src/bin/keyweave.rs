//! Keyweave CLI: analyze prose and place suggested keywords into it.
//!
//! Usage:
//!   keyweave analyze [FILE] [--json] [--config path]
//!   keyweave insert [FILE] -k <keyword>... [--plain] [--json] [--config path]

use clap::{Parser, Subcommand};
use keyweave::{Config, HeuristicAnalyzer, InsertOutcome, Optimizer, Session, SessionView};
use std::io::Read;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "keyweave",
    version,
    about = "Place suggested keywords into prose"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to a YAML config file (default: <config dir>/keyweave/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log placement decisions
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print readability metrics, suggested keywords and tips
    Analyze {
        /// Text file to analyze (reads stdin if omitted)
        file: Option<PathBuf>,
        /// Print the session view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Insert keywords into the text and print the result
    Insert {
        /// Text file to edit (reads stdin if omitted)
        file: Option<PathBuf>,
        /// Keyword to insert; repeat for several, applied in order
        #[arg(short = 'k', long = "keyword", required = true)]
        keywords: Vec<String>,
        /// Strip emphasis markers from the output
        #[arg(long)]
        plain: bool,
        /// Print the session view as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config, String> {
    match path {
        Some(p) => Config::load(p),
        None => Config::discover(),
    }
    .map_err(|e| format!("Failed to load configuration: {}", e))
}

fn read_input(file: Option<&Path>) -> Result<String, String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e)),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| format!("cannot read stdin: {}", e))?;
            Ok(input)
        }
    }
}

fn print_json(view: &SessionView) -> i32 {
    match serde_json::to_string_pretty(view) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn print_report(view: &SessionView) {
    if let Some(metrics) = &view.metrics {
        println!(
            "{:<12}  {:>8.1}  (Flesch reading ease)",
            "Readability", metrics.readability_score
        );
        println!(
            "{:<12}  {:>7.2}%  (optimal: 1-3%)",
            "Density", metrics.keyword_density
        );
        println!("{:<12}  {:>8}  words", "Length", metrics.content_length);
    }

    if !view.keywords.is_empty() {
        println!();
        println!("{:<32}  {:>9}  {:>6}", "KEYWORD", "RELEVANCE", "ADDED");
        println!("{}", "-".repeat(51));
        for keyword in &view.keywords {
            println!(
                "{:<32}  {:>8}%  {:>6}",
                keyword.text,
                keyword.relevance_percent,
                if keyword.inserted { "yes" } else { "" }
            );
        }
    }

    if !view.tips.is_empty() {
        println!();
        println!("Tips:");
        for tip in &view.tips {
            println!("  - {}", tip);
        }
    }

    if !view.expert_tips.is_empty() {
        println!();
        println!("Expert usage:");
        for tip in &view.expert_tips {
            println!("  - {}", tip);
        }
    }
}

fn cmd_analyze(
    rt: &Runtime,
    optimizer: &mut Optimizer<HeuristicAnalyzer>,
    text: &str,
    json: bool,
) -> i32 {
    if let Err(e) = rt.block_on(optimizer.submit(text)) {
        eprintln!("Error: {}", e);
        return 1;
    }
    let view = optimizer.view();
    if json {
        return print_json(&view);
    }
    print_report(&view);
    0
}

fn cmd_insert(
    rt: &Runtime,
    optimizer: &mut Optimizer<HeuristicAnalyzer>,
    text: &str,
    keywords: &[String],
    plain: bool,
    json: bool,
) -> i32 {
    if let Err(e) = rt.block_on(optimizer.submit(text)) {
        eprintln!("Error: {}", e);
        return 1;
    }

    for keyword in keywords {
        match optimizer.insert(keyword) {
            Ok(InsertOutcome::Replaced(span)) => {
                tracing::info!("'{}' replaced '{}'", keyword, span.original)
            }
            Ok(InsertOutcome::AlreadyPresent) => {
                tracing::info!("'{}' already present", keyword)
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: cannot insert '{}': {}", keyword, e);
                return 1;
            }
        }
    }

    let view = optimizer.view();
    if json {
        return print_json(&view);
    }
    if plain {
        println!("{}", view.plain_text);
    } else {
        println!("{}", view.working_text);
    }
    0
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    let analyzer = HeuristicAnalyzer::new(config.analysis.clone());
    let mut optimizer = Optimizer::with_session(analyzer, Session::with_weights(config.placement));

    let code = match cli.command {
        Commands::Analyze { file, json } => match read_input(file.as_deref()) {
            Ok(text) => cmd_analyze(&rt, &mut optimizer, &text, json),
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        Commands::Insert {
            file,
            keywords,
            plain,
            json,
        } => match read_input(file.as_deref()) {
            Ok(text) => cmd_insert(&rt, &mut optimizer, &text, &keywords, plain, json),
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
    };
    std::process::exit(code);
}
