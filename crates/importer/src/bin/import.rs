use clap::{Parser, Subcommand};
use importer::{ImportContext, MatchStrategy, MeetImporter, MeetSummary, MsoImporter};
use sqlx::postgres::PgPoolOptions;
use storage::repository::GymnastRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "gym-import")]
#[command(about = "Gymnastics meet score importer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Owner account the imported competitions belong to
    #[arg(long, env = "IMPORT_USER_ID")]
    user: Uuid,

    /// Gymnast profile to scope the import to; defaults to the user's
    /// first profile
    #[arg(long)]
    gymnast: Option<Uuid>,

    /// Also require matching start dates when flagging meets as already
    /// imported (default is exact name match only)
    #[arg(long)]
    match_dates: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List an athlete's meets and flag the already-imported ones
    Meets {
        /// The athlete's MeetScoresOnline id
        #[arg(short, long)]
        athlete: String,

        #[arg(long)]
        json: bool,
    },
    /// Import one selected meet, or every meet not yet imported
    Import {
        /// The athlete's MeetScoresOnline id
        #[arg(short, long)]
        athlete: String,

        #[command(flatten)]
        selection: MeetSelection,
    },
}

#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct MeetSelection {
    /// Listing link path of the meet to import (e.g. /results/12345)
    #[arg(short, long)]
    meet: Option<String>,

    /// Import every meet not already flagged as imported
    #[arg(long)]
    all_new: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("import={},importer={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&cli.database_url)
        .await?;

    storage::run_migrations(&pool).await?;

    let gymnast = GymnastRepository::new(&pool)
        .resolve_active(cli.user, cli.gymnast)
        .await?;
    tracing::info!(
        "Importing for gymnast profile '{}' ({})",
        gymnast.name,
        gymnast.gymnast_id
    );

    let strategy = if cli.match_dates {
        MatchStrategy::NameAndDate
    } else {
        MatchStrategy::NameOnly
    };
    let mso = MsoImporter::with_strategy(strategy);
    let context = ImportContext { pool };

    match cli.command {
        Commands::Meets { athlete, json } => {
            handle_meets(&mso, &athlete, gymnast.gymnast_id, &context, json).await?;
        }
        Commands::Import { athlete, selection } => {
            handle_import(
                &mso,
                &athlete,
                cli.user,
                gymnast.gymnast_id,
                &context,
                selection,
            )
            .await?;
        }
    }

    Ok(())
}

async fn handle_meets(
    mso: &MsoImporter,
    athlete: &str,
    gymnast_id: Uuid,
    context: &ImportContext,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let summaries = mso.fetch_meet_list(athlete, gymnast_id, context).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for summary in &summaries {
        let marker = if summary.already_imported { "x" } else { " " };
        println!(
            "[{}] {}  {} ({}) — {}",
            marker, summary.external_id, summary.name, summary.level, summary.raw_date_text
        );
    }
    Ok(())
}

async fn handle_import(
    mso: &MsoImporter,
    athlete: &str,
    user_id: Uuid,
    gymnast_id: Uuid,
    context: &ImportContext,
    selection: MeetSelection,
) -> Result<(), Box<dyn std::error::Error>> {
    // Re-fetch so the already-imported flags reflect the store right now;
    // nothing is cached between invocations.
    let summaries = mso.fetch_meet_list(athlete, gymnast_id, context).await?;

    if let Some(meet) = selection.meet {
        let summary = summaries
            .iter()
            .find(|s| s.external_id == meet || s.details_url == meet)
            .ok_or_else(|| format!("Meet '{}' not found in this athlete's listing", meet))?;

        if summary.already_imported {
            tracing::warn!(
                "'{}' is already imported; importing again will create a duplicate",
                summary.name
            );
        }

        import_one(mso, summary, user_id, gymnast_id, context).await?;
        return Ok(());
    }

    let new_meets: Vec<&MeetSummary> = summaries.iter().filter(|s| !s.already_imported).collect();
    if new_meets.is_empty() {
        tracing::info!("Nothing to do: every listed meet is already imported");
        return Ok(());
    }

    let mut success_count = 0;
    let mut error_count = 0;

    for (idx, summary) in new_meets.iter().enumerate() {
        tracing::info!("[{}/{}] Importing: {}", idx + 1, new_meets.len(), summary.name);

        match import_one(mso, summary, user_id, gymnast_id, context).await {
            Ok(_) => success_count += 1,
            Err(e) => {
                error_count += 1;
                tracing::error!("  ✗ {}", e);
            }
        }
    }

    tracing::info!("Summary: {} imported, {} failed", success_count, error_count);

    if error_count > 0 {
        return Err(format!("{} meet(s) failed to import", error_count).into());
    }

    Ok(())
}

async fn import_one(
    mso: &MsoImporter,
    summary: &MeetSummary,
    user_id: Uuid,
    gymnast_id: Uuid,
    context: &ImportContext,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = mso
        .import_meet(summary, user_id, gymnast_id, context)
        .await?;

    tracing::info!("  ✓ {} ({})", summary.name, outcome.competition_id);
    for warning in &outcome.warnings {
        tracing::warn!("  {}", warning);
    }
    Ok(())
}
