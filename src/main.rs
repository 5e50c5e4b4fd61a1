use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use webpilot::{AutoPilot, PilotConfig, SessionBackendConfig};

/// Autonomous web task agent: executes natural-language browser tasks.
#[derive(Parser)]
#[command(name = "webpilot", version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show the browser window instead of running headless.
    #[arg(long, global = true)]
    no_headless: bool,

    /// Per-action timeout in seconds, forwarded to the automation backend.
    #[arg(short, long, global = true, default_value_t = 60)]
    timeout: u64,

    /// Retry attempts for failed actions.
    #[arg(short, long, global = true, default_value_t = 3)]
    retries: u32,

    /// Force the mock backend even when an automation endpoint is configured.
    #[arg(long, global = true)]
    mock: bool,

    /// Verbose log output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a web automation task.
    Run {
        /// Natural-language task description.
        task: String,

        /// Starting URL.
        #[arg(short, long)]
        url: Option<String>,

        /// Skip screenshot capture.
        #[arg(long)]
        no_screenshots: bool,
    },

    /// Extract structured data from a webpage.
    Extract {
        /// What to extract.
        task: String,

        /// URL to extract from.
        #[arg(short, long)]
        url: String,

        /// Write the extracted data to a JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Execute multiple tasks in sequence.
    Chain {
        /// Tasks to execute in order.
        #[arg(required = true)]
        tasks: Vec<String>,

        /// Starting URL for every task.
        #[arg(short, long)]
        url: Option<String>,

        /// Continue past failing tasks instead of stopping at the first.
        #[arg(long)]
        keep_going: bool,
    },

    /// Drive one session manually from the terminal.
    Interactive {
        /// Starting URL.
        #[arg(short, long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = PilotConfig::from_env();
    config.headless = !cli.no_headless;
    config.timeout_secs = cli.timeout;
    config.max_retries = cli.retries;
    if cli.mock {
        config.session = SessionBackendConfig::Mock;
    }

    let pilot = AutoPilot::new(config);

    match cli.command {
        Commands::Run {
            task,
            url,
            no_screenshots,
        } => run_task(&pilot, &task, url.as_deref(), !no_screenshots).await,
        Commands::Extract { task, url, output } => {
            run_extract(&pilot, &task, &url, output).await
        }
        Commands::Chain {
            tasks,
            url,
            keep_going,
        } => run_chain(&pilot, &tasks, url.as_deref(), !keep_going).await,
        Commands::Interactive { url } => {
            if let Err(e) = pilot.interactive(url.as_deref()).await {
                eprintln!("interactive session failed: {e}");
                process::exit(1);
            }
        }
    }
}

async fn run_task(pilot: &AutoPilot, task: &str, url: Option<&str>, screenshots: bool) {
    let result = pilot.execute(task, url, screenshots).await;

    if !result.success {
        eprintln!("task failed");
        if let Some(error) = &result.error {
            eprintln!("error: {error}");
        }
        process::exit(1);
    }

    if let Some(data) = &result.data {
        println!("{}", pretty(data));
    }
    println!(
        "completed in {:.2}s ({} steps, {} screenshots)",
        result.execution_time,
        result.steps_taken.len(),
        result.screenshots.len()
    );
}

async fn run_extract(pilot: &AutoPilot, task: &str, url: &str, output: Option<PathBuf>) {
    let result = pilot.extract(task, Some(url), None).await;

    if !result.success {
        eprintln!(
            "extraction failed: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
        process::exit(1);
    }

    println!("{}", pretty(&result.data));

    if let Some(path) = output {
        match std::fs::write(&path, pretty(&result.data)) {
            Ok(()) => println!("saved to {}", path.display()),
            Err(e) => {
                eprintln!("failed to write {}: {e}", path.display());
                process::exit(1);
            }
        }
    }
}

async fn run_chain(pilot: &AutoPilot, tasks: &[String], url: Option<&str>, stop_on_failure: bool) {
    let result = pilot.chain(tasks, url, stop_on_failure).await;

    if result.success {
        println!("all {} tasks completed", result.tasks_completed);
    } else {
        eprintln!(
            "{} completed, {} failed",
            result.tasks_completed, result.tasks_failed
        );
        process::exit(1);
    }
}

fn pretty(data: &serde_json::Value) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
}
