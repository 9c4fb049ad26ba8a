//! Form intake CLI - Database migrations and record inspection.
//!
//! # Usage
//!
//! ```bash
//! # Run intake database migrations
//! intake-cli migrate
//!
//! # Print stored enquiries as JSON, newest first
//! intake-cli list enquiries
//!
//! # Print stored appointment requests as JSON, newest first
//! intake-cli list appointments
//! ```
//!
//! # Environment Variables
//!
//! - `INTAKE_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};
use form_intake_core::RecordKind;

mod commands;

#[derive(Parser)]
#[command(name = "intake-cli")]
#[command(author, version, about = "Form intake CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Print stored records as JSON
    List {
        /// Which collection to print
        #[arg(value_enum)]
        collection: Collection,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Collection {
    Enquiries,
    Appointments,
}

impl From<Collection> for RecordKind {
    fn from(collection: Collection) -> Self {
        match collection {
            Collection::Enquiries => Self::Enquiry,
            Collection::Appointments => Self::Appointment,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::List { collection } => commands::list::run(collection.into()).await?,
    }
    Ok(())
}
