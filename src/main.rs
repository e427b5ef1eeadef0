use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use petstore_tester::menu::{self, MenuChoice};
use petstore_tester::utils::config::{Config, DEFAULT_REPORT_PATH};
use petstore_tester::{client, fixture, report, runner};

#[derive(Parser)]
#[command(name = "petstore-tester")]
#[command(version)]
#[command(about = "Functional tests for the pet-store user API", long_about = None)]
struct Cli {
    /// Base URL of the pet-store API
    #[arg(long, global = true, env = "PETSTORE_BASE_URL", default_value = client::DEFAULT_BASE_URL)]
    base_url: String,

    /// JSON report path (overwritten on every run)
    #[arg(short, long, global = true, env = "PETSTORE_REPORT", default_value = DEFAULT_REPORT_PATH)]
    output: PathBuf,

    /// Also write a JUnit XML report
    #[arg(long, global = true)]
    junit: Option<PathBuf>,

    /// Stop the full user flow at its first failed step
    #[arg(long, global = true, default_value = "false")]
    stop_flow_on_failure: bool,

    // No subcommand shows the interactive menu
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every user API test
    Run,

    /// Run the create → login → get → logout → delete flow
    Flow,

    /// Print generated user fixtures as JSON
    Fixture {
        /// Number of fixtures
        #[arg(short, long, default_value = "1")]
        count: usize,
    },

    /// Print the console summary of a saved JSON report
    Report {
        /// Path to the JSON report
        results: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config {
        base_url: cli.base_url,
        report_path: cli.output,
        junit_path: cli.junit,
        flow_continue_on_failure: !cli.stop_flow_on_failure,
    };

    let command = match cli.command {
        Some(command) => command,
        None => {
            let stdin = std::io::stdin();
            match menu::prompt(&mut stdin.lock(), &mut std::io::stdout())? {
                MenuChoice::FullSuite => Commands::Run,
                MenuChoice::SingleFlow => Commands::Flow,
                MenuChoice::Fixture => Commands::Fixture { count: 1 },
            }
        }
    };

    match command {
        Commands::Run => {
            runner::run_full_suite(&config).await?;
            println!("\n{} Testing finished", "■".blue().bold());
        }

        Commands::Flow => {
            runner::run_single_flow(&config).await?;
        }

        Commands::Fixture { count } => {
            println!("{} Sample user fixture:", "🧪".to_string().blue());
            for _ in 0..count {
                println!("{}", serde_json::to_string_pretty(&fixture::generate())?);
            }
        }

        Commands::Report { results } => {
            println!(
                "{} Loading report from: {}",
                "📊".to_string().blue(),
                results.display()
            );
            let saved = report::load(&results)?;
            report::console::print(&saved);
        }
    }

    Ok(())
}
