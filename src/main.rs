use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rocket_grpc::api::{self, Handler};
use rocket_grpc::client::{RocketClient, DEFAULT_URL};
use rocket_grpc::config::Config;
use rocket_grpc::db::Database;
use rocket_grpc::models::Rocket;
use rocket_grpc::rocket::Service;

#[derive(Parser)]
#[command(name = "rocket-grpc")]
#[command(about = "gRPC service for managing rocket records")]
struct Cli {
    /// Server URL used by the client commands
    #[arg(long, global = true, env = "ROCKET_GRPC_URL", default_value = DEFAULT_URL)]
    server: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gRPC server
    Serve {
        /// Address to listen on
        #[arg(short, long)]
        addr: Option<SocketAddr>,

        /// Path to the SQLite database
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
    /// Fetch a rocket by id
    Get {
        #[arg(long)]
        id: String,
    },
    /// Add a rocket
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        rocket_type: String,
    },
    /// Delete a rocket by id
    Delete {
        #[arg(long)]
        id: String,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "rocket_grpc=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run_server(config: &Config) -> anyhow::Result<()> {
    let db = match &config.database_path {
        Some(path) => Database::open(path.clone())?,
        None => Database::open_default()?,
    };
    db.migrate().context("Failed to run migrations")?;

    let handler = Handler::new(Service::new(db));

    let listener = api::bind(config.listen_addr).await?;

    api::serve(listener, handler, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            // Without a signal handler, keep serving.
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown signal received");
    })
    .await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve { addr, database }) => {
            let config = Config::from_env()?.with_overrides(addr, database);
            tracing::info!("Starting rocket server on {}", config.listen_addr);
            run_server(&config).await?;
        }
        Some(Commands::Get { id }) => {
            let client = RocketClient::connect(cli.server).await?;
            let rocket = client.get_rocket(&id).await?;
            println!("{}", serde_json::to_string_pretty(&rocket)?);
        }
        Some(Commands::Add {
            id,
            name,
            rocket_type,
        }) => {
            let client = RocketClient::connect(cli.server).await?;
            let rocket = client
                .add_rocket(Rocket {
                    id,
                    rocket_type,
                    name,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&rocket)?);
        }
        Some(Commands::Delete { id }) => {
            let client = RocketClient::connect(cli.server).await?;
            let status = client.delete_rocket(&id).await?;
            println!("{}", serde_json::json!({ "status": status }));
        }
        None => {
            let config = Config::from_env()?;
            tracing::info!("Starting rocket server on {}", config.listen_addr);
            run_server(&config).await?;
        }
    }

    Ok(())
}
