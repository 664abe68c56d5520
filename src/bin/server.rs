//! BucketView Server Binary
//!
//! Starts the HTTP admin server for a store file.

use std::sync::Arc;

use bucketview::network::Server;
use bucketview::{Config, ConnectionMode, Store};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

/// BucketView Server
#[derive(Parser, Debug)]
#[command(name = "bucketview-server")]
#[command(about = "Browser-based admin for a bucketed key-value store")]
#[command(version)]
struct Args {
    /// Store file (created if absent)
    #[arg(default_value = Config::DEFAULT_DB_FILENAME)]
    db_path: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    listen: String,

    /// Directory with the UI assets [default: html/ next to the executable]
    #[arg(short, long)]
    static_dir: Option<String>,

    /// How the store file is held between requests
    #[arg(short, long, value_enum, default_value_t = Mode::PerOperation)]
    mode: Mode,

    /// Milliseconds to wait for the store file before failing a request
    #[arg(short = 't', long, default_value = "5000")]
    acquire_timeout_ms: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    PerOperation,
    Shared,
}

impl From<Mode> for ConnectionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::PerOperation => ConnectionMode::PerOperation,
            Mode::Shared => ConnectionMode::Shared,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bucketview=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("BucketView Server v{}", bucketview::VERSION);
    tracing::info!("Store file: {}", args.db_path);
    tracing::info!("Connection mode: {:?}", args.mode);

    // Build config from args
    let mut builder = Config::builder()
        .db_path(&args.db_path)
        .listen_addr(&args.listen)
        .connection_mode(args.mode.into())
        .acquire_timeout_ms(args.acquire_timeout_ms);
    if let Some(dir) = &args.static_dir {
        builder = builder.static_dir(dir);
    }
    let config = builder.build();

    let store = match Store::open(&config) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    let server = Server::new(config, store);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
