use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

use profile_etl::config::Config;
use profile_etl::constants::is_truthy_flag;
use profile_etl::{logging, runner, RunOptions};

#[derive(Parser)]
#[command(name = "profile-etl")]
#[command(about = "Process JSON row profiles into an OK and a reject file")]
#[command(version = "0.1.0")]
struct Cli {
    /// JSON Lines file to read
    file_name: PathBuf,

    /// Print accepted rows to the console: 'yes'/'true' to enable, anything else disables
    print_lines: String,

    /// Config file (defaults to $PROFILE_ETL_CONFIG or ./profile-etl.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match logging::init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    let options = RunOptions {
        input: cli.file_name,
        print_lines: is_truthy_flag(&cli.print_lines),
    };

    match runner::run(&options, &config)
        .with_context(|| format!("Run failed for {}", options.input.display()))
    {
        Ok(summary) => {
            println!("{}", summary.counters.summary_report());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}
