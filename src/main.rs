//! cron-explain - explain a cron expression and list its next executions

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cron_explain::{CronParser, Explanation, Seconds, DEFAULT_EXECUTION_COUNT};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Explain a cron expression field by field and list its next executions
#[derive(Parser)]
#[command(name = "cron-explain")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The cron expression, quoted, e.g. "*/15 9-17 * * MON-FRI"
    expression: String,

    /// How many upcoming executions to list
    #[arg(short = 'n', long, default_value_t = DEFAULT_EXECUTION_COUNT)]
    count: usize,

    /// Whether the leading seconds field is optional, required or disallowed
    #[arg(long, default_value = "optional")]
    seconds: Seconds,

    /// Require both restricted day fields to match instead of either one
    #[arg(long)]
    dom_and_dow: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    expression: String,
    explanation: Explanation,
    day_rule: String,
    next_executions: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "cron_explain=trace" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        if cli.verbose {
            eprintln!("{:?}", e);
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let parser = CronParser::builder()
        .seconds(cli.seconds)
        .dom_and_dow(cli.dom_and_dow)
        .build();
    debug!(?parser, expression = %cli.expression, "parsing");

    let cron = parser
        .parse(&cli.expression)
        .with_context(|| format!("invalid cron expression '{}'", cli.expression))?;
    let explanation = cron.explain();
    let executions = cron
        .iter_after(Local::now())
        .take(cli.count)
        .collect::<Result<Vec<_>, _>>()
        .context("could not list the next executions")?;

    if cli.json {
        let report = Report {
            expression: cron.to_string(),
            explanation,
            day_rule: cron.day_rule().to_string(),
            next_executions: executions
                .iter()
                .map(|time| time.format(DATE_FORMAT).to_string())
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{explanation}");
    println!("Days: {}", cron.day_rule());
    if !executions.is_empty() {
        println!();
        println!("Next executions:");
    }
    for (i, time) in executions.iter().enumerate() {
        println!("#{}: {}", i + 1, time.format(DATE_FORMAT));
    }
    Ok(())
}
