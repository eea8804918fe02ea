//! Server configuration parsed from CLI arguments and environment.

use std::net::SocketAddr;

use clap::Parser;

/// Command-line and environment configuration for the backend service.
#[derive(Debug, Parser)]
#[command(name = "skillswap-backend", about = "SkillSwap backend service")]
pub struct Cli {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8080")]
    pub bind_addr: SocketAddr,

    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum size of the database connection pool.
    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 10)]
    pub pool_size: u32,
}
