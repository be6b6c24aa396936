use std::sync::Arc;

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use reservation_server::{Server, ServerState};
use reservation_services::ReservationService;
use reservation_store::{ReservationStore, Update};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] reservation_store::Error),

    #[error(transparent)]
    Server(#[from] reservation_server::Error),

    #[error("Failed to acquire a listening socket: {0}")]
    Listener(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

#[derive(serde::Deserialize, Debug)]
pub struct ReservationConfig {
    server: reservation_server::Config,
    store: reservation_store::Config,
}

impl ReservationConfig {
    /// Loads `config/default`, then the optional `config/local`, then
    /// `RESERVATION__*` environment variables, later sources winning.
    pub fn new() -> Result<Self, Error> {
        Self::load(
            config::Config::builder()
                .add_source(File::with_name("config/default"))
                .add_source(File::with_name("config/local").required(false))
                .add_source(
                    Environment::with_prefix("reservation")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self, Error> {
        Ok(builder.build()?.try_deserialize()?)
    }
}

/// Facade class encompassing all components that make up the reservation application.
pub struct ReservationApp {
    config: ReservationConfig,
}

impl ReservationApp {
    pub fn new(config: ReservationConfig) -> Self {
        Self { config }
    }

    /// Applies pending store migrations, returns whether any were applied.
    pub fn migrate(&self) -> Result<bool, Error> {
        let store = ReservationStore::open(&self.config.store.url)?;
        Ok(Self::migrate_store(&store)?)
    }

    fn migrate_store(store: &ReservationStore) -> Result<bool, reservation_store::Error> {
        if store.has_updates()? {
            info!("apply updates to reservation store");
            store.update()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub async fn run(&self) -> Result<(), Error> {
        let store = ReservationStore::open(&self.config.store.url)?;
        Self::migrate_store(&store)?;

        // listenfd is used to enable auto-reloading in development
        // otherwise fallback to standard tcp listener
        let listener = match listenfd::ListenFd::from_env().take_tcp_listener(0)? {
            Some(listener) => listener,
            None => std::net::TcpListener::bind(format!(
                "{}:{}",
                self.config.server.url, self.config.server.port
            ))?,
        };

        info!("listening on {:?}", listener.local_addr()?);

        let reservations = ReservationService::new(Arc::new(store.reservations()));

        Ok(Server::serve(listener, ServerState::new(reservations)).await?)
    }
}
