//! BucketView CLI
//!
//! Runs administrative operations directly against a store file.

use std::process::ExitCode;

use bucketview::protocol::{Operation, Outcome};
use bucketview::{Config, Store};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// BucketView CLI
#[derive(Parser, Debug)]
#[command(name = "bucketview-cli")]
#[command(about = "CLI for a bucketed key-value store file")]
#[command(version)]
struct Args {
    /// Store file
    #[arg(short, long, default_value = Config::DEFAULT_DB_FILENAME)]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List bucket names
    Buckets,

    /// List the entries of a bucket
    Entries {
        /// The bucket to scan
        bucket: String,
    },

    /// Create an empty bucket
    CreateBucket {
        /// The bucket to create
        bucket: String,
    },

    /// Delete a bucket and all of its entries
    DeleteBucket {
        /// The bucket to delete
        bucket: String,
    },

    /// Set a key-value pair
    Set {
        /// The bucket to write into
        bucket: String,

        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Del {
        /// The bucket holding the key
        bucket: String,

        /// The key to delete
        key: String,
    },
}

impl From<Commands> for Operation {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Buckets => Operation::ListBuckets,
            Commands::Entries { bucket } => Operation::ListEntries { bucket },
            Commands::CreateBucket { bucket } => Operation::CreateBucket { bucket },
            Commands::DeleteBucket { bucket } => Operation::DeleteBucket { bucket },
            Commands::Set { bucket, key, value } => Operation::SetEntry {
                bucket,
                key: key.into_bytes(),
                value: value.into_bytes(),
            },
            Commands::Del { bucket, key } => Operation::DeleteEntry {
                bucket,
                key: key.into_bytes(),
            },
        }
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();

    let result = Store::open_path(&args.db).and_then(|store| store.execute(args.command.into()));

    match result {
        Ok(Outcome::Buckets(names)) => {
            for name in names {
                println!("{}", name);
            }
            ExitCode::SUCCESS
        }
        Ok(Outcome::Entries(entries)) => {
            for entry in entries {
                println!(
                    "{}\t{}",
                    String::from_utf8_lossy(&entry.key),
                    String::from_utf8_lossy(&entry.value)
                );
            }
            ExitCode::SUCCESS
        }
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
