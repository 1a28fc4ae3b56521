//! Rocket service layer.
//!
//! [`RocketService`] is the capability set the gRPC transport is written
//! against. [`Service`] implements it on top of any [`RocketStore`], which is
//! the seam where tests substitute an in-memory double for the database.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::Rocket;

/// Persistence contract for rocket records.
///
/// Implementations may block; the service runs them off the async runtime.
pub trait RocketStore: Send + Sync + 'static {
    /// Returns the stored rocket. A missing row is an error.
    fn fetch(&self, id: &str) -> anyhow::Result<Rocket>;

    /// Stores a new rocket. Fails if the id already exists.
    fn insert(&self, rocket: &Rocket) -> anyhow::Result<()>;

    /// Removes the rocket if present. Removing nothing is not an error.
    fn delete(&self, id: Uuid) -> anyhow::Result<()>;
}

/// Operations the transport layer depends on.
#[tonic::async_trait]
pub trait RocketService: Send + Sync + 'static {
    async fn get_rocket_by_id(&self, id: &str) -> Result<Rocket>;
    async fn insert_rocket(&self, rocket: Rocket) -> Result<Rocket>;
    async fn delete_rocket(&self, id: &str) -> Result<()>;
}

/// Default [`RocketService`] backed by a [`RocketStore`].
pub struct Service<S> {
    store: Arc<S>,
}

impl<S> Clone for Service<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RocketStore> Service<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Runs one store call on the blocking pool.
    async fn with_store<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|e| Error::Storage(anyhow::Error::new(e).context("store task failed")))?
    }
}

#[tonic::async_trait]
impl<S: RocketStore> RocketService for Service<S> {
    async fn get_rocket_by_id(&self, id: &str) -> Result<Rocket> {
        let id = id.to_owned();
        self.with_store(move |store| Ok(store.fetch(&id)?)).await
    }

    async fn insert_rocket(&self, rocket: Rocket) -> Result<Rocket> {
        self.with_store(move |store| {
            if let Err(e) = store.insert(&rocket) {
                tracing::error!("failed to insert rocket {}: {:#}", rocket.id, e);
                return Err(Error::InsertFailed);
            }
            Ok(Rocket {
                id: rocket.id,
                rocket_type: rocket.rocket_type,
                name: rocket.name,
            })
        })
        .await
    }

    async fn delete_rocket(&self, id: &str) -> Result<()> {
        let id = Uuid::parse_str(id)?;
        self.with_store(move |store| Ok(store.delete(id)?)).await
    }
}
