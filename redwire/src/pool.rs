//! Connection pooling for the request/reply client
//!
//! Connections are created lazily up to the configured capacity; once every
//! slot is checked out, further acquires suspend until a connection is
//! released. Checkout is exclusive: a connection never serves two callers
//! at once, so writes and their reads stay strictly paired.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tracing::debug;

use redwire_core::{ClientConfig, Error, Result};

use crate::connection::Connection;

/// A semaphore-bounded pool of connections to one server.
pub struct ConnectionPool {
    config: ClientConfig,
    idle: Mutex<Vec<Connection>>,
    capacity: Arc<Semaphore>,
    created: AtomicUsize,
}

impl ConnectionPool {
    /// Creates an empty pool; no connection is made until the first acquire.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let permits = config.max_connections.max(1);
        Self {
            config,
            idle: Mutex::new(Vec::new()),
            capacity: Arc::new(Semaphore::new(permits)),
            created: AtomicUsize::new(0),
        }
    }

    /// Checks out a connection together with its capacity permit.
    ///
    /// Suspends while the pool is exhausted. After [`ConnectionPool::stop`]
    /// it fails immediately with [`Error::ClientStopped`]. Reused idle
    /// connections that went stale are reconnected (and re-authenticated)
    /// before being handed out.
    pub async fn acquire(&self) -> Result<(Connection, OwnedSemaphorePermit)> {
        let permit = Arc::clone(&self.capacity)
            .acquire_owned()
            .await
            .map_err(|_| Error::ClientStopped)?;

        let existing = self.idle.lock().await.pop();
        let connection = match existing {
            Some(connection) if connection.connected() => connection,
            Some(connection) => {
                self.connect(&connection).await?;
                connection
            }
            None => {
                let connection = Connection::new(self.config.host.clone(), self.config.port);
                self.connect(&connection).await?;
                self.created.fetch_add(1, Ordering::Relaxed);
                debug!("pool grew to {} connections", self.size());
                connection
            }
        };
        Ok((connection, permit))
    }

    /// Returns a connection to the idle set. The caller drops the permit
    /// afterwards, waking one waiting acquire.
    pub async fn release(&self, connection: Connection) {
        self.idle.lock().await.push(connection);
    }

    /// Number of connections the pool has ever created.
    #[must_use]
    pub fn size(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    /// Stops the pool: waiting and future acquires fail with
    /// [`Error::ClientStopped`] and idle connections are torn down.
    pub async fn stop(&self) {
        self.capacity.close();
        let mut idle = self.idle.lock().await;
        for connection in idle.drain(..) {
            connection.disconnect().await;
        }
    }

    async fn connect(&self, connection: &Connection) -> Result<()> {
        connection.connect_with_backoff().await?;
        if self.config.requires_auth() {
            // A failed AUTH fails this acquire only; the pool retries on the
            // next one.
            connection.authenticate(&self.config).await?;
        }
        Ok(())
    }
}
