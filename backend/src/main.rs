//! Backend entry point: configuration, migrations, and server bootstrap.

mod server;

use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::persistence::{DbPool, PoolConfig};
use server::{Cli, build_state, run};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();

    run_migrations(&cli.database_url)?;

    let pool = DbPool::connect(PoolConfig::new(&cli.database_url).with_max_size(cli.pool_size))
        .await
        .wrap_err("building database pool")?;
    let state = build_state(&pool);

    info!(addr = %cli.bind_addr, "starting server");
    run(cli.bind_addr, state)?.await?;
    Ok(())
}

fn run_migrations(database_url: &str) -> color_eyre::Result<()> {
    let mut conn =
        PgConnection::establish(database_url).wrap_err("connecting for migrations")?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| eyre!("running migrations: {err}"))?;
    info!(count = applied.len(), "migrations applied");
    Ok(())
}
