pub mod error;
pub mod memory;
pub mod reservations;
#[rustfmt::skip]
pub mod schema;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
pub use error::Error;
pub use memory::InMemoryReservationRepository;
pub use reservations::{ReservationEntity, ReservationRepository, SqliteReservationRepository};
use tracing::info;

#[derive(serde::Deserialize, Debug)]
pub struct Config {
    pub url: String,
}

pub trait Update {
    fn has_updates(&self) -> Result<bool, Error>;
    fn update(&self) -> Result<(), Error>;
}

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();
type ConnectionType = SqliteConnection;
type ConnectionPool = Pool<ConnectionManager<ConnectionType>>;

#[derive(Clone)]
pub struct ReservationStore {
    pool: ConnectionPool,
}

impl ReservationStore {
    pub fn open<S: Into<String>>(store_url: S) -> Result<Self, Error> {
        let manager = ConnectionManager::<ConnectionType>::new(store_url);

        Ok(Self {
            pool: Pool::builder().build(manager)?,
        })
    }

    /// Every sqlite connection to `:memory:` is its own database, so the pool
    /// is limited to a single connection.
    pub fn open_in_memory() -> Result<Self, Error> {
        let manager = ConnectionManager::<ConnectionType>::new(":memory:");

        Ok(Self {
            pool: Pool::builder().max_size(1).build(manager)?,
        })
    }

    pub fn reservations(&self) -> SqliteReservationRepository {
        SqliteReservationRepository::new(self.pool.clone())
    }
}

impl Update for ReservationStore {
    fn has_updates(&self) -> Result<bool, Error> {
        let mut conn = self.pool.get()?;
        conn.has_pending_migration(MIGRATIONS)
            .map_err(|_| Error::Migration("failed to check pending migrations".to_string()))
    }

    fn update(&self) -> Result<(), Error> {
        let mut conn = self.pool.get()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|_| Error::Migration("failed to run pending migrations".to_string()))?;
        info!("applied {} store migrations", applied.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_store_needs_update() {
        let store = ReservationStore::open_in_memory().unwrap();

        assert!(store.has_updates().unwrap());
        store.update().unwrap();
        assert!(!store.has_updates().unwrap());
    }
}
