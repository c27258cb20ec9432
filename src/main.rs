use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use planthub::{api, catalog::CatalogClient, store::Store};

#[derive(Parser)]
#[command(name = "planthub")]
#[command(about = "Personal plant-care companion")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the PlantHub server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "4000")]
        port: u16,
    },
    /// Write a snapshot of all collections to a file, or stdout
    Export {
        /// Destination file
        file: Option<PathBuf>,
    },
    /// Restore a snapshot, overwriting collections wholesale
    Import {
        /// Snapshot file
        file: PathBuf,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "planthub=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(port: u16) -> anyhow::Result<()> {
    let store = Store::open_default()?;
    store.migrate()?;

    let app = api::create_router(store, CatalogClient::from_env());

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("PlantHub server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve { port }) => serve(port).await?,
        Some(Commands::Export { file }) => {
            let store = Store::open_default()?;
            store.migrate()?;

            let snapshot = serde_json::to_string_pretty(&store.export_data()?)?;
            match file {
                Some(path) => {
                    std::fs::write(&path, snapshot)?;
                    println!("Exported snapshot to {}", path.display());
                }
                None => println!("{}", snapshot),
            }
        }
        Some(Commands::Import { file }) => {
            let store = Store::open_default()?;
            store.migrate()?;

            let snapshot = std::fs::read_to_string(&file)?;
            match store.import_data(&snapshot) {
                Ok(()) => println!("Imported snapshot from {}", file.display()),
                Err(e) => {
                    eprintln!("Import failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => serve(4000).await?,
    }

    Ok(())
}
