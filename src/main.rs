// Command-line client for the prediction-bingo backend.
//
// Startup sequence:
// 1. Initialize tracing (stderr, filtered by RUST_LOG)
// 2. Parse CLI arguments
// 3. Load config (copying defaults/ into config/ on first run)
// 4. Build the API client with headers captured once for the session
// 5. Run the requested call and print the result

use bingo_client::api::BingoApi;
use bingo_client::config;
use bingo_client::devserver::{self, DevServerProfile};
use bingo_client::models::{BingoCard, Category, NewTeam, PredictionUpdate, TargetPeriod, Team};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "bingo", about = "Client for the prediction-bingo backend API")]
struct Cli {
    /// Override the backend base URL from client.toml.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Team membership operations.
    Teams {
        #[command(subcommand)]
        command: TeamsCommand,
    },
    /// Bingo card operations.
    Cards {
        #[command(subcommand)]
        command: CardsCommand,
    },
    /// Print a dev-server proxy/build profile as JSON.
    DevConfig {
        /// Which bundler setup to emit.
        #[arg(long, value_enum, default_value_t = ProfileKind::Spa)]
        profile: ProfileKind,
        /// Backend address the dev server proxies to.
        #[arg(long, default_value = devserver::DEFAULT_BACKEND)]
        backend: String,
    },
}

#[derive(Subcommand)]
enum TeamsCommand {
    /// List the teams you belong to.
    List,
    /// Create a new team.
    Create {
        /// Team name (must be unique).
        name: String,
    },
    /// Join an existing team as a member.
    Join {
        /// Numeric id of the team to join.
        team_id: u64,
    },
}

#[derive(Subcommand)]
enum CardsCommand {
    /// Create a bingo card for the configured year.
    Create,
    /// List your bingo cards.
    List,
    /// Fill in one square of a card.
    Predict {
        /// Numeric id of the card.
        card_id: u64,
        /// Grid position, 0 through 24.
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=24))]
        position: u8,
        /// politics, economics, society, or wildcard.
        #[arg(long)]
        category: Category,
        /// The prediction itself.
        #[arg(long)]
        text: String,
        /// Target quarter: Q2, Q3, or Q4.
        #[arg(long)]
        period: TargetPeriod,
    },
    /// Lock a card in for the year. Fails once the card is finalized.
    Finalize {
        /// Numeric id of the card.
        card_id: u64,
    },
    /// Mark one of a card's predictions as correct or incorrect.
    Verify {
        /// Numeric id of the card.
        card_id: u64,
        /// Numeric id of the prediction on that card.
        #[arg(long)]
        prediction_id: u64,
        /// Mark the prediction correct; omit to mark it incorrect.
        #[arg(long)]
        correct: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ProfileKind {
    /// Generic static-output build; proxies /api, /media, and /static.
    Static,
    /// Framework build writing into the backend's static dir; proxies /api.
    Spa,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        Command::DevConfig { profile, backend } => {
            let profile = match profile {
                ProfileKind::Static => DevServerProfile::static_build(&backend),
                ProfileKind::Spa => DevServerProfile::spa(&backend),
            };
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Command::Teams { command } => {
            let api = build_api(cli.base_url)?;
            run_teams(&api, command).await?;
        }
        Command::Cards { command } => {
            let api = build_api(cli.base_url)?;
            run_cards(&api, command).await?;
        }
    }

    Ok(())
}

fn build_api(base_url_override: Option<String>) -> anyhow::Result<BingoApi> {
    let mut config = config::load_config().context("failed to load configuration")?;
    if let Some(base_url) = base_url_override {
        config.backend.base_url = base_url;
    }
    info!("Using backend at {}", config.backend.base_url);

    BingoApi::new(&config).context("failed to build API client")
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn run_teams(api: &BingoApi, command: TeamsCommand) -> anyhow::Result<()> {
    match command {
        TeamsCommand::List => {
            let value = api.fetch_teams().await?;
            print_teams(&value)?;
        }
        TeamsCommand::Create { name } => {
            let body = serde_json::to_value(NewTeam { name })?;
            let created = api.create_team(&body).await?;
            print_json(&created)?;
        }
        TeamsCommand::Join { team_id } => {
            let joined = api.join_team(team_id).await?;
            print_json(&joined)?;
        }
    }
    Ok(())
}

async fn run_cards(api: &BingoApi, command: CardsCommand) -> anyhow::Result<()> {
    match command {
        CardsCommand::Create => {
            let created = api.create_card().await?;
            print_json(&created)?;
        }
        CardsCommand::List => {
            let value = api.fetch_my_cards().await?;
            print_cards(&value)?;
        }
        CardsCommand::Predict {
            card_id,
            position,
            category,
            text,
            period,
        } => {
            let update = PredictionUpdate {
                position,
                category,
                prediction_text: text,
                target_period: period,
            };
            let body = serde_json::to_value(&update)?;
            let updated = api.update_prediction(card_id, &body).await?;
            print_json(&updated)?;
        }
        CardsCommand::Finalize { card_id } => {
            let finalized = api.finalize_card(card_id).await?;
            print_json(&finalized)?;
        }
        CardsCommand::Verify {
            card_id,
            prediction_id,
            correct,
        } => {
            let verified = api.verify_prediction(card_id, prediction_id, correct).await?;
            print_json(&verified)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Output rendering
// ---------------------------------------------------------------------------

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a team list as one line per team, falling back to raw JSON when the
/// body doesn't match the expected shape (e.g. a paginated envelope).
fn print_teams(value: &Value) -> anyhow::Result<()> {
    match serde_json::from_value::<Vec<Team>>(value.clone()) {
        Ok(teams) => {
            for team in &teams {
                let suffix = if team.is_active { "" } else { " (inactive)" };
                println!("{:>5}  {}{suffix}", team.id, team.name);
            }
        }
        Err(_) => print_json(value)?,
    }
    Ok(())
}

fn print_cards(value: &Value) -> anyhow::Result<()> {
    match serde_json::from_value::<Vec<BingoCard>>(value.clone()) {
        Ok(cards) => {
            for card in &cards {
                let suffix = if card.is_active { "" } else { " (inactive)" };
                println!(
                    "{:>5}  {}  team {}  {} prediction(s){suffix}",
                    card.id,
                    card.year,
                    card.team,
                    card.predictions.len()
                );
            }
        }
        Err(_) => print_json(value)?,
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Initialize tracing to stderr so stdout stays clean for command output.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bingo_client=warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
