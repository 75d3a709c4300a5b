use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use fitdash::{
    ContactForm, ContactSubmitter, Dashboard, FitDashConfig, FitnessApiClient, JoinPolicy,
    Notifier, ProgramDirectory, RefreshOutcome, logging,
};

#[derive(Parser)]
#[command(name = "fitdash", version)]
#[command(about = "Fitness site client: contact form, programs and training dashboard")]
struct CommandLine {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides the configuration
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a message through the contact form
    #[command(alias = "c")]
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    /// List the training programs
    #[command(alias = "p")]
    Programs,
    /// Weather and recipes for a training day
    #[command(alias = "d")]
    Dashboard {
        /// City for the weather panel; blank uses the configured default
        #[arg(long, default_value = "")]
        city: String,
        /// Meal category; blank uses the configured default
        #[arg(long, default_value = "")]
        category: String,
        /// Render each panel independently when one fetch fails
        #[arg(long)]
        independent: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let commands = CommandLine::parse();

    let mut config = FitDashConfig::load_from_path(commands.config.clone())
        .with_context(|| "Failed to load configuration")?;
    if let Some(base_url) = commands.base_url {
        config.api.base_url = base_url;
        config.apply_defaults();
        config.validate()?;
    }

    logging::init(&config.logging, commands.verbose)?;

    let Some(command) = commands.command else {
        print_summary(&config, commands.config.as_ref(), commands.verbose);
        return Ok(ExitCode::SUCCESS);
    };

    let api = Arc::new(FitnessApiClient::new(&config.api)?);
    let notifier = Notifier::new(&config.notifications);

    let succeeded = match command {
        Commands::Contact {
            name,
            email,
            message,
        } => {
            let submitter = ContactSubmitter::new(api, notifier.clone());
            let mut form = ContactForm::new(name, email, message);
            submitter.submit(&mut form).await.is_ok()
        }
        Commands::Programs => {
            let mut directory = ProgramDirectory::new(api);
            match directory.load().await {
                Some(cards) => {
                    for card in cards {
                        print!("{card}");
                    }
                    true
                }
                None => {
                    eprintln!("No programs available");
                    false
                }
            }
        }
        Commands::Dashboard {
            city,
            category,
            independent,
        } => {
            if independent {
                config.dashboard.join_policy = JoinPolicy::Independent;
            }
            let mut dashboard = Dashboard::new(api, notifier.clone(), config.dashboard.clone());
            let outcome = dashboard.refresh(&city, &category).await;
            print!("{}", dashboard.view());
            outcome == RefreshOutcome::Loaded
        }
    };

    if let Some(notification) = notifier.current() {
        if succeeded {
            println!("{notification}");
        } else {
            eprintln!("{notification}");
        }
    }

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_summary(config: &FitDashConfig, config_path: Option<&PathBuf>, verbose: bool) {
    println!("FitDash {}", fitdash::VERSION);
    println!("API: {}", config.api.base_url);
    println!("Run `fitdash --help` to see the available commands.");

    if verbose {
        let path = config_path
            .cloned()
            .or_else(FitDashConfig::get_config_path)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string());
        println!("Using config from: {path}");
        println!("Default city: {}", config.dashboard.default_city);
        println!("Default category: {}", config.dashboard.default_category);
        println!("Join policy: {:?}", config.dashboard.join_policy);
        println!("Log level: {}", config.logging.level);
    }
}
