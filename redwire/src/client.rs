//! The pooled request/reply client
//!
//! [`Client`] hides connection acquisition, authentication, and reconnection
//! behind `send` and `send_all`. Failures come back as error-carrying
//! replies, never as panics or thrown errors.

use std::io::Cursor;
use std::sync::Arc;

use bytes::BytesMut;
use tracing::trace;

use redwire_core::ClientConfig;

use crate::command::Command;
use crate::connection::Connection;
use crate::pool::ConnectionPool;
use crate::reply::{Replies, Reply};

const READ_BUFFER_SIZE: usize = 4096;

/// A Redis client backed by a pool of authenticated connections.
///
/// Cloning is cheap and clones share the same pool.
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    pool: Arc<ConnectionPool>,
}

impl Client {
    /// Creates a client from a configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let pool = Arc::new(ConnectionPool::new(config.clone()));
        Self { config, pool }
    }

    /// Creates a client for the given address with default settings.
    #[must_use]
    pub fn with_address(host: impl Into<String>, port: u16) -> Self {
        Self::new(ClientConfig::new().with_host(host).with_port(port))
    }

    /// The configuration the client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends a PING to test connectivity.
    pub async fn ping(&self) -> Reply {
        self.send(Command::new("PING")).await
    }

    /// Fetches a connection and sends the command to the server.
    ///
    /// The reply can hold the requested value or an error; check
    /// [`Reply::error`] before trusting the value. The connection is
    /// released back to the pool even when the round trip fails.
    pub async fn send(&self, command: Command) -> Reply {
        trace!("getting connection - connections {}", self.pool.size());
        let (connection, _permit) = match self.pool.acquire().await {
            Ok(checkout) => checkout,
            Err(err) => return Reply::from_error(err),
        };

        let reply = Self::send_on(&connection, &command).await;
        self.pool.release(connection).await;
        reply
    }

    /// Sends a batch of commands as one pipeline and decodes one reply per
    /// command, in order.
    ///
    /// Known limitation: the whole pipelined response is assumed to arrive
    /// in a single read. If fewer complete replies are available than
    /// commands, the remaining slots are filled with read-error replies
    /// rather than waiting for more data.
    pub async fn send_all(&self, commands: &[Command]) -> Replies {
        if commands.is_empty() {
            return Replies::new();
        }

        trace!("getting connection - connections {}", self.pool.size());
        let (connection, _permit) = match self.pool.acquire().await {
            Ok(checkout) => checkout,
            Err(err) => return vec![Reply::from_error(err); commands.len()],
        };

        let replies = Self::send_all_on(&connection, commands).await;
        self.pool.release(connection).await;
        replies
    }

    /// Whether the pool has ever created a connection. A coarse liveness
    /// signal, not "connected right now".
    #[must_use]
    pub fn running(&self) -> bool {
        self.pool.size() != 0
    }

    /// Stops the client; in-flight acquires and all later sends observe
    /// [`redwire_core::Error::ClientStopped`].
    pub async fn stop(&self) {
        self.pool.stop().await;
    }

    async fn send_on(connection: &Connection, command: &Command) -> Reply {
        if let Err(err) = connection.write_all(&command.serialize()).await {
            return Reply::from_error(err);
        }

        let mut buffer = vec![0u8; READ_BUFFER_SIZE];
        match connection.read_some(&mut buffer).await {
            Ok(read) => Reply::parse(&buffer[..read]),
            Err(err) => Reply::from_error(err),
        }
    }

    async fn send_all_on(connection: &Connection, commands: &[Command]) -> Replies {
        let mut request = BytesMut::new();
        for command in commands {
            request.extend_from_slice(&command.serialize());
        }

        if let Err(err) = connection.write_all(&request).await {
            return vec![Reply::from_error(err); commands.len()];
        }

        let mut buffer = vec![0u8; READ_BUFFER_SIZE];
        let read = match connection.read_some(&mut buffer).await {
            Ok(read) => read,
            Err(err) => return vec![Reply::from_error(err); commands.len()],
        };

        let mut cursor = Cursor::new(&buffer[..read]);
        let mut replies = Replies::with_capacity(commands.len());
        for _ in commands {
            if cursor.position() as usize >= read {
                replies.push(Reply::from_error(redwire_core::Error::Read));
            } else {
                replies.push(Reply::load(&mut cursor));
            }
        }
        replies
    }
}
