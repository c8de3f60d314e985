mod config;
mod graphql;
mod http;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use platform_db::{DbPool, connect};
use platform_obs::{ObsConfig, init_tracing};
use products_quoting::{LifecycleService, NewDraft};
use tracing::info;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

const SEED_WORK_NAME: &str = "Demo Work";

#[derive(Parser, Debug)]
#[command(name = "quote-server", version, about = "Construction quote lifecycle service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP + GraphQL server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Register a demo work with one pending entry.
    Seed,
    /// Print the GraphQL schema snapshot.
    #[command(name = "schema:print")]
    SchemaPrint {
        #[arg(long, value_name = "FILE", help = "Destination file path")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
    #[arg(long, help = "Allow starting even when migrations are pending")]
    allow_dirty: bool,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(ObsConfig::default())?;
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load()?);
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config).await,
        Command::Migrate(action) => match action {
            MigrateCommand::Up => migrate_up(&app_config).await,
            MigrateCommand::Down => migrate_down(&app_config).await,
        },
        Command::Seed => run_seed(&app_config).await,
        Command::SchemaPrint { output } => schema_print(output),
    }
}

async fn run_seed(config: &AppConfig) -> Result<()> {
    let pool = Arc::new(setup_pool(config).await?);
    let service = LifecycleService::new(pool);
    let existing = service
        .works()
        .await?
        .into_iter()
        .find(|work| work.name == SEED_WORK_NAME);
    let work = match existing {
        Some(work) => work,
        None => service.register_work(SEED_WORK_NAME, Uuid::new_v4()).await?,
    };
    let entry = service.create_draft(NewDraft::for_work(work.id)).await?;
    info!(work_id = %work.id, entry_id = %entry.id, "seed data ready");
    Ok(())
}

fn schema_print(path: Option<PathBuf>) -> Result<()> {
    let target = path.unwrap_or_else(|| PathBuf::from("schema.graphql"));
    std::fs::write(&target, graphql::schema_sdl())
        .with_context(|| format!("failed to write {}", target.display()))?;
    info!(path = %target.display(), "schema snapshot written");
    Ok(())
}

async fn setup_pool(config: &AppConfig) -> Result<DbPool> {
    connect(&config.database).await.map_err(Into::into)
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let pool = Arc::new(setup_pool(&config).await?);
    ensure_migrations(&pool, cmd.allow_dirty).await?;
    let service = LifecycleService::new(pool.clone());
    let state = AppState {
        pool,
        schema: graphql::build_schema(service),
        config,
    };
    http::serve(cmd.into(), state).await
}

async fn ensure_migrations(pool: &DbPool, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool).await?;
    if !pending.is_empty() && !allow_dirty {
        anyhow::bail!(
            "pending migrations detected; run `quote-server migrate up` or pass --allow-dirty"
        );
    }
    Ok(())
}

async fn migrate_up(config: &AppConfig) -> Result<()> {
    let pool = setup_pool(config).await?;
    Migrator::up(&pool, None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down(config: &AppConfig) -> Result<()> {
    let pool = setup_pool(config).await?;
    Migrator::down(&pool, Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}
