//! Room reservation server CLI.
use anyhow::Result;
use clap::{Parser, Subcommand};
use reservation_app::{ReservationApp, ReservationConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Subcommand)]
enum Command {
    /// Runs the reservation server
    Run,
    /// Applies pending store migrations and exits
    Migrate,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// The level of logging to use for the server
    #[clap(long, global = true, default_value = tracing::Level::INFO.as_str())]
    log_level: tracing::Level,
}

impl Cli {
    fn default_filter(&self) -> String {
        // axum logs rejections from built-in extractors with the `axum::rejection`
        // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
        format!(
            "reservation_cli={level},reservation_app={level},reservation_server={level},\
             reservation_services={level},reservation_store={level},tower_http={level},\
             axum::rejection=trace",
            level = self.log_level
        )
    }

    pub async fn execute(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| self.default_filter().into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();

        info!("started with {:?}", self);

        let app = ReservationApp::new(ReservationConfig::new()?);

        match &self.command {
            Command::Run => Ok(app.run().await?),
            Command::Migrate => {
                if app.migrate()? {
                    info!("reservation store migrated");
                } else {
                    info!("reservation store already up to date");
                }
                Ok(())
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup human panic
    human_panic::setup_panic!();

    Cli::parse().execute().await
}
