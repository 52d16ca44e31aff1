use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use culture_insights::adapters::{PostgresAggregateRepository, PostgresSurveyResponseReader};
use culture_insights::application::{
    ComputeAggregatesCommand, ComputeAggregatesHandler, GetAggregatesHandler, GetAggregatesQuery,
    GetLeadershipComparisonHandler, GetLeadershipComparisonQuery,
};
use culture_insights::config::{AppConfig, DatabaseConfig, LogFormat, LoggingConfig};
use culture_insights::domain::aggregation::{AggregationEngine, LaborUnitLeadershipMatcher};
use culture_insights::domain::foundation::SurveyId;

#[derive(Parser)]
#[command(name = "culture-insights")]
#[command(about = "Privacy-preserving OCAI survey aggregation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recompute and store all aggregates of a survey
    Recompute { survey_id: SurveyId },
    /// Print the displayable aggregates of a survey as JSON
    Show { survey_id: SurveyId },
    /// Print the leadership vs. whole-organization comparison as JSON
    Leadership { survey_id: SurveyId },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    init_tracing(&config.logging)?;

    let pool = connect(&config.database).await?;

    if matches!(cli.command, Commands::Migrate) || config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to apply migrations")?;
        info!("Migrations applied");
    }

    let threshold = config.aggregation.threshold()?;
    let reader = Arc::new(PostgresSurveyResponseReader::new(pool.clone()));
    let repository = Arc::new(PostgresAggregateRepository::new(pool));
    let aggregates = GetAggregatesHandler::new(reader.clone(), repository.clone(), threshold);

    match cli.command {
        Commands::Migrate => {}
        Commands::Recompute { survey_id } => {
            let handler = ComputeAggregatesHandler::new(
                reader,
                repository,
                AggregationEngine::new(threshold),
            );
            let result = handler
                .handle(ComputeAggregatesCommand { survey_id })
                .await
                .context("recompute failed")?;
            print_json(&json!({
                "surveyId": result.survey_id,
                "wholeOrgN": result.whole_org_n,
                "sliceCount": result.slice_count,
                "skipped": result.skipped,
                "computedAt": result.computed_at,
            }))?;
        }
        Commands::Show { survey_id } => {
            let data = aggregates
                .handle(GetAggregatesQuery { survey_id })
                .await
                .context("failed to read aggregates")?;
            print_json(&data)?;
        }
        Commands::Leadership { survey_id } => {
            let handler =
                GetLeadershipComparisonHandler::new(aggregates, Arc::new(LaborUnitLeadershipMatcher));
            let comparison = handler
                .handle(GetLeadershipComparisonQuery { survey_id })
                .await
                .context("failed to read leadership comparison")?;
            print_json(&comparison)?;
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = logging.env_filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
    Ok(())
}

async fn connect(database: &DatabaseConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .max_lifetime(database.max_lifetime())
        .connect(&database.url)
        .await
        .with_context(|| format!("failed to connect to {}", database.redacted_url()))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
