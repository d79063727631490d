use std::{
    error::Error,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use engine::{Engine, ScenarioMutation};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "forecaster_cli")]
#[command(about = "Run balance forecasts against a forecaster database")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./forecaster.db?mode=rwc"
    )]
    database_url: String,

    /// Forecast from this date instead of today (YYYY-MM-DD).
    #[arg(long)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the baseline forecast of a file.
    Baseline(ForecastArgs),
    /// Print baseline, scenario and delta for a list of mutations.
    Scenario(ScenarioArgs),
}

#[derive(Args, Debug)]
struct ForecastArgs {
    #[arg(long)]
    file_id: String,
    #[arg(long, default_value_t = 180, value_parser = clap::value_parser!(u32).range(1..=730))]
    horizon: u32,
    /// Starting balance in cents.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    starting_balance: i64,
}

#[derive(Args, Debug)]
struct ScenarioArgs {
    #[command(flatten)]
    forecast: ForecastArgs,
    /// JSON file holding the array of mutations to apply.
    #[arg(long)]
    mutations: PathBuf,
}

fn read_mutations(path: &Path) -> Result<Vec<ScenarioMutation>, Box<dyn Error + Send + Sync>> {
    let raw = std::fs::read_to_string(path)?;
    let mutations: Vec<ScenarioMutation> = serde_json::from_str(&raw)?;
    if mutations.is_empty() {
        return Err(format!("{} holds no mutations", path.display()).into());
    }
    Ok(mutations)
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter("engine=warn")
        .init();

    let db = connect_db(&cli.database_url).await?;
    let mut builder = Engine::builder().database(db);
    if let Some(today) = cli.today {
        builder = builder.today(today);
    }
    let engine = builder.build().await?;

    let output = match cli.command {
        Command::Baseline(args) => {
            let result = engine
                .baseline(&args.file_id, args.horizon, args.starting_balance)
                .await?;
            serde_json::to_string_pretty(&result)?
        }
        Command::Scenario(args) => {
            let mutations = read_mutations(&args.mutations)?;
            let outcome = engine
                .scenario(
                    &args.forecast.file_id,
                    args.forecast.horizon,
                    args.forecast.starting_balance,
                    &mutations,
                )
                .await?;
            serde_json::to_string_pretty(&outcome)?
        }
    };
    println!("{output}");

    Ok(())
}
