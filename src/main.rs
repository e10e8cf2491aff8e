use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use shareholder_sync::{Config, ShareholderRecord, logging, workflow};

#[derive(Parser)]
#[command(name = "shareholder-sync")]
#[command(about = "Scrape the top shareholders from the registry and mirror them into Webflow")]
#[command(version)]
struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true, default_value = "shareholder-sync.log")]
    log_file: PathBuf,

    /// Log to the console only
    #[arg(long, global = true)]
    no_log_file: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Unattended scrape and sync (default)
    Run {
        /// Publish the Webflow site after a successful sync
        #[arg(long)]
        publish: bool,
    },
    /// Interactive run: prompt for the second-factor code and before pushing
    Manual {
        /// Publish the Webflow site after a successful sync
        #[arg(long)]
        publish: bool,
    },
    /// Validate configuration without touching the network
    Check,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = logging::init((!cli.no_log_file).then_some(cli.log_file.as_path()));

    let command = cli.command.unwrap_or(Commands::Run { publish: false });
    let label = match command {
        Commands::Run { .. } => "shareholder scraper run",
        Commands::Manual { .. } => "manual 2FA scraper run",
        Commands::Check => "configuration check",
    };

    banner(&format!("Starting {label} at {}", chrono::Local::now()));
    let ok = match command {
        Commands::Run { publish } => unattended(publish).await,
        Commands::Manual { publish } => match manual(publish).await {
            Ok(ok) => ok,
            Err(e) => {
                error!("Unexpected error: {e:#}");
                false
            }
        },
        Commands::Check => check(),
    };
    banner(&format!("{label} ended at {}", chrono::Local::now()));

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn banner(line: &str) {
    info!("{}", "=".repeat(50));
    info!("{line}");
    info!("{}", "=".repeat(50));
}

fn load_config() -> Option<Config> {
    match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration validated successfully");
            Some(cfg)
        }
        Err(e) => {
            error!("Configuration error: {e}");
            error!("Check your .env file and ensure all required variables are set");
            None
        }
    }
}

async fn unattended(publish: bool) -> bool {
    let Some(config) = load_config() else {
        return false;
    };
    match workflow::run(&config, publish).await {
        Ok(_) => {
            info!("Scraper run completed successfully!");
            true
        }
        Err(e) => {
            error!("{e}");
            false
        }
    }
}

async fn manual(publish: bool) -> anyhow::Result<bool> {
    let Some(config) = load_config() else {
        return Ok(false);
    };

    banner("IMPORTANT: 2FA AUTHENTICATION REQUIRED");
    info!("Check your email for the 2FA code, then either:");
    info!("  A: enter the code when prompted below, or");
    info!(
        "  B: complete the login in your browser within {}s",
        config.challenge_wait().as_secs()
    );

    let config = if confirm("Do you want to enter the 2FA code here?")? {
        let code = prompt("Enter the 2FA code from your email: ")?;
        config.with_twofa_code(Some(code))
    } else {
        info!("Please complete the 2FA login manually in your browser.");
        config
    };

    let records = match workflow::scrape_shareholders(&config).await {
        Ok(r) => r,
        Err(e) => {
            error!("{e}");
            return Ok(false);
        }
    };
    info!("Successfully scraped {} shareholders", records.len());

    if !confirm("\nUpdate Webflow with scraped data?")? {
        info!("Skipping Webflow update; data scraped but not uploaded");
        print_records(&records);
        return Ok(true);
    }

    match workflow::push_shareholders(&config, &records, publish).await {
        Ok(_) => {
            info!("Webflow update completed successfully");
            Ok(true)
        }
        Err(e) => {
            error!("{e}");
            Ok(false)
        }
    }
}

fn check() -> bool {
    let Some(config) = load_config() else {
        return false;
    };
    info!("Target URL: {}", config.target_url());
    info!("Max shareholders: {}", config.max_shareholders());
    info!(
        "2FA code configured: {}, site publish configured: {}",
        config.has_twofa_code(),
        config.site_id().is_some()
    );
    true
}

fn print_records(records: &[ShareholderRecord]) {
    banner("SCRAPED DATA:");
    for r in records {
        info!("{}. {}", r.rank, r.display_name());
        info!("   Holdings: {} ({}%)", r.holdings, r.percent);
    }
}

fn prompt(question: &str) -> anyhow::Result<String> {
    let mut out = io::stdout().lock();
    write!(out, "{question}")?;
    out.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim().to_string())
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    Ok(prompt(&format!("{question} (y/n): "))?.eq_ignore_ascii_case("y"))
}
