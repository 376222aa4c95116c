mod output;
mod prompt;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use igpick_core::{
    SelectionMode, SelectionRequest, ValidationError, DEFAULT_COUNT, DEFAULT_TIME_WINDOW_HOURS,
};
use igpick_picker::{PickError, PickResponse, PickService};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "igpick")]
#[command(about = "Pick a random Instagram follower for a giveaway")]
struct Cli {
    /// Print the result as JSON (same shape as the HTTP API)
    #[arg(long, global = true)]
    json: bool,

    /// Without a subcommand, prompts for the account and mode interactively
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Draw from the first N followers returned for the account
    General {
        /// Instagram handle, with or without a leading @
        #[arg(long)]
        account: String,
        /// How many followers to draw from (10-500)
        #[arg(long, default_value_t = i64::from(DEFAULT_COUNT))]
        count: i64,
    },
    /// Draw from followers who followed within the last H hours
    Orientation {
        /// Instagram handle, with or without a leading @
        #[arg(long)]
        account: String,
        /// Time window in hours (0.5-24)
        #[arg(long, default_value_t = DEFAULT_TIME_WINDOW_HOURS)]
        hours: f64,
    },
}

impl Commands {
    fn into_request(self) -> Result<SelectionRequest, ValidationError> {
        match self {
            Commands::General { account, count } => {
                SelectionRequest::new(&account, SelectionMode::general(count)?)
            }
            Commands::Orientation { account, hours } => {
                SelectionRequest::new(&account, SelectionMode::orientation(hours)?)
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = igpick_core::load_app_config()?;
    // stderr keeps stdout clean for --json
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?,
        )
        .with_writer(std::io::stderr)
        .init();

    let service = PickService::from_config(&config).map_err(|e| {
        anyhow::anyhow!("{e}; add RAPIDAPI_KEY to the environment or a .env file")
    })?;

    let request = match cli.command {
        Some(command) => command.into_request(),
        None => Ok(prompt::interactive_request(
            &mut std::io::stdin().lock(),
            &mut std::io::stdout(),
        )?),
    };

    let result = match request {
        Ok(request) => {
            if !cli.json {
                println!("Fetching followers of @{}...", request.target_account());
            }
            tracing::debug!(account = request.target_account(), mode = %request.mode(), "picking");
            service.pick(&request).await
        }
        Err(e) => Err(PickError::from(e)),
    };

    let response = PickResponse::from_result(&result);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", output::render(&response));
    }

    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
