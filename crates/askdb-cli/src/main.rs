use anyhow::{Context, Result};
use askdb_backend_duckdb::DuckDbBackend;
use askdb_cli::{demo, server, Config};
use askdb_eval::{load_dataset, run_evaluation};
use askdb_llm::SqlGenerator;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "askdb")]
#[command(about = "Text-to-SQL platform for the e-commerce dataset", long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "askdb.yml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive question loop against the live database
    Demo,
    /// Launch the HTTP API server
    Serve(ServeArgs),
    /// Run batch evaluation over the labeled dataset
    Eval(EvalArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Bind address override
    #[arg(long)]
    host: Option<String>,

    /// Port override
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct EvalArgs {
    /// Evaluation dataset override
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Database file override
    #[arg(long)]
    database: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Demo => run_demo(config).await,
        Commands::Serve(args) => serve(config, args).await,
        Commands::Eval(args) => evaluate(config, args).await,
    }
}

async fn run_demo(config: Config) -> Result<()> {
    let backend = DuckDbBackend::open(&config.database)
        .await
        .with_context(|| format!("Failed to open database {:?}", config.database))?;
    let generator = SqlGenerator::new(config.llm.clone());

    demo::run_demo(&backend, &generator).await
}

async fn serve(config: Config, args: ServeArgs) -> Result<()> {
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);

    let backend = DuckDbBackend::open(&config.database)
        .await
        .with_context(|| format!("Failed to open database {:?}", config.database))?;
    let generator = SqlGenerator::new(config.llm.clone());

    println!("{}", "=".repeat(60));
    println!("TEXT-TO-SQL API");
    println!("{}", "=".repeat(60));
    println!("URL: http://{}:{}", host, port);
    println!("{}", "=".repeat(60));

    server::run_server(server::AppState { backend, generator }, &host, port)
        .await
        .context("HTTP server failed")
}

async fn evaluate(config: Config, args: EvalArgs) -> Result<()> {
    let dataset_path = args.dataset.unwrap_or_else(|| config.dataset.clone());
    let database_path = args.database.unwrap_or_else(|| config.database.clone());

    let cases = load_dataset(&dataset_path)?;
    let backend = DuckDbBackend::open(&database_path)
        .await
        .with_context(|| format!("Failed to open database {:?}", database_path))?;
    let generator = SqlGenerator::new(config.llm.clone());

    println!("{}", "=".repeat(60));
    println!("EVALUATION");
    println!("{}", "=".repeat(60));
    println!("Questions: {}", cases.len());

    let outcome = run_evaluation(&backend, &generator, &cases).await;

    for (i, case) in outcome.cases.iter().enumerate() {
        let status = if case.passed { "[OK]  " } else { "[FAIL]" };
        println!(
            "[{:2}] {} [{:7}] {}",
            i + 1,
            status,
            case.difficulty.label(),
            truncate(&case.question, 40)
        );
    }

    println!("\n{}", "=".repeat(60));
    println!("RESULTS");
    println!("{}", "=".repeat(60));
    let overall = outcome.report.overall;
    println!(
        "Execution Accuracy: {}/{} ({:.0}%)",
        overall.correct,
        overall.total,
        overall.percent()
    );
    println!("\nBy difficulty:");
    for (difficulty, tally) in outcome.report.by_difficulty() {
        if tally.total == 0 {
            println!("  {:8}: no data", difficulty.label());
        } else {
            println!(
                "  {:8}: {}/{} ({:.0}%)",
                difficulty.label(),
                tally.correct,
                tally.total,
                tally.percent()
            );
        }
    }

    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
