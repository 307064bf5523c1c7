//! TCP transport for the client and subscriber
//!
//! [`Connection`] wraps a tokio `TcpStream` behind `&self` operations so the
//! subscriber's read loop and its command writers can share one socket. Reads
//! and writes go through readiness polling plus `try_read`/`try_write`, with
//! a cancellation token selected at every suspension point.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::io::Interest;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

use redwire_core::{ClientConfig, Error, Result};

use crate::command::Command;
use crate::reply::Reply;

/// Connection lifecycle states published on the state-change feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No live socket
    #[default]
    Disconnected,
    /// Resolving the host name
    Resolving,
    /// TCP connect in flight
    Connecting,
    /// Ready for traffic
    Connected,
    /// Teardown in progress
    Disconnecting,
}

const BACKOFF_INITIAL: Duration = Duration::from_millis(100);
const BACKOFF_MAX: Duration = Duration::from_secs(30);

/// Attempt-indexed reconnect delay: 100ms doubling up to a 30s ceiling.
fn backoff_delay(attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    BACKOFF_INITIAL
        .saturating_mul(2u32.saturating_pow(exponent))
        .min(BACKOFF_MAX)
}

/// A single TCP connection to the server.
pub struct Connection {
    host: String,
    port: u16,
    stream: Mutex<Option<Arc<TcpStream>>>,
    state: watch::Sender<ConnectionState>,
    cancel: CancellationToken,
}

impl Connection {
    /// Creates a disconnected connection for the given address.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            host: host.into(),
            port,
            stream: Mutex::new(None),
            state,
            cancel: CancellationToken::new(),
        }
    }

    /// The configured host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The configured port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// True while a live socket is held.
    #[must_use]
    pub fn connected(&self) -> bool {
        self.stream_slot().is_some()
    }

    /// A receiver observing every connection state change.
    #[must_use]
    pub fn state_changes(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Suspends until the connection reaches `target`, or until cancellation.
    pub async fn wait_for_state(&self, target: ConnectionState) -> Result<()> {
        let mut receiver = self.state.subscribe();
        tokio::select! {
            () = self.cancel.cancelled() => Err(Error::Cancelled),
            result = receiver.wait_for(|state| *state == target) => {
                result.map(|_| ()).map_err(|_| Error::Disconnected)
            }
        }
    }

    /// One connect attempt.
    pub async fn connect(&self) -> Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        self.set_state(ConnectionState::Resolving);
        trace!("resolving {}", self.host);
        self.set_state(ConnectionState::Connecting);
        debug!("connecting to {}", addr);

        let attempt = tokio::select! {
            () = self.cancel.cancelled() => {
                self.set_state(ConnectionState::Disconnected);
                return Err(Error::Cancelled);
            }
            attempt = TcpStream::connect(&addr) => attempt,
        };

        match attempt {
            Ok(stream) => {
                *self.stream_slot() = Some(Arc::new(stream));
                self.set_state(ConnectionState::Connected);
                info!("connected to {}:{}", self.host, self.port);
                Ok(())
            }
            Err(err) => {
                self.set_state(ConnectionState::Disconnected);
                debug!("connection attempt failed: {}", err);
                Err(Error::Disconnected)
            }
        }
    }

    /// Connects, retrying with an attempt-indexed delay until a connection is
    /// established or the connection is cancelled. Cancellation during the
    /// backoff wait returns immediately.
    pub async fn connect_with_backoff(&self) -> Result<()> {
        let mut attempts: u32 = 0;
        loop {
            match self.connect().await {
                Ok(()) => return Ok(()),
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                Err(err) => error!("connection attempt failed: {}", err),
            }

            attempts += 1;
            let delay = backoff_delay(attempts);
            info!("connection failed; waiting {}ms", delay.as_millis());
            tokio::select! {
                () = self.cancel.cancelled() => return Err(Error::Cancelled),
                () = sleep(delay) => {}
            }
            info!("attempting connection to {}:{}", self.host, self.port);
        }
    }

    /// Reads some bytes, suspending until the socket is readable.
    ///
    /// A zero-length read means the server closed the connection, reported as
    /// [`Error::Disconnected`] with the socket torn down.
    pub async fn read_some(&self, buffer: &mut [u8]) -> Result<usize> {
        let stream = self.current_stream()?;
        loop {
            let ready = tokio::select! {
                () = self.cancel.cancelled() => return Err(Error::Cancelled),
                ready = stream.ready(Interest::READABLE) => ready,
            };
            let ready = match ready {
                Ok(ready) => ready,
                Err(err) => {
                    debug!("read readiness failed: {}", err);
                    self.drop_stream();
                    return Err(Error::Read);
                }
            };
            if !ready.is_readable() {
                continue;
            }

            match stream.try_read(buffer) {
                Ok(0) => {
                    self.drop_stream();
                    return Err(Error::Disconnected);
                }
                Ok(read) => return Ok(read),
                Err(ref err) if err.kind() == io::ErrorKind::WouldBlock => {}
                Err(err) => {
                    debug!("read failed: {}", err);
                    self.drop_stream();
                    return Err(Error::Read);
                }
            }
        }
    }

    /// Writes the whole buffer, suspending on socket backpressure.
    pub async fn write_all(&self, buffer: &[u8]) -> Result<()> {
        let stream = self.current_stream()?;
        let mut remaining = buffer;
        while !remaining.is_empty() {
            let ready = tokio::select! {
                () = self.cancel.cancelled() => return Err(Error::Cancelled),
                ready = stream.ready(Interest::WRITABLE) => ready,
            };
            let ready = match ready {
                Ok(ready) => ready,
                Err(err) => {
                    debug!("write readiness failed: {}", err);
                    self.drop_stream();
                    return Err(Error::Write);
                }
            };
            if !ready.is_writable() {
                continue;
            }

            match stream.try_write(remaining) {
                Ok(0) => {
                    self.drop_stream();
                    return Err(Error::Write);
                }
                Ok(written) => remaining = &remaining[written..],
                Err(ref err) if err.kind() == io::ErrorKind::WouldBlock => {}
                Err(err) => {
                    debug!("write failed: {}", err);
                    self.drop_stream();
                    return Err(Error::Write);
                }
            }
        }
        Ok(())
    }

    /// Cancels every pending and future operation on this connection.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Tears the socket down.
    pub async fn disconnect(&self) {
        if self.connected() {
            self.set_state(ConnectionState::Disconnecting);
            debug!("disconnecting from {}:{}", self.host, self.port);
        }
        self.drop_stream();
    }

    /// Performs the AUTH handshake using the configured credentials.
    ///
    /// A rejected AUTH logs the failure and returns the connection to the
    /// disconnected state instead of leaving it usable.
    pub(crate) async fn authenticate(&self, config: &ClientConfig) -> Result<()> {
        let username = config.effective_username();
        let command = Command::from_args(["AUTH", username, config.password.as_str()]);
        trace!("AUTH {}", username);
        self.write_all(&command.serialize()).await?;

        let mut buffer = vec![0u8; 512];
        let read = self.read_some(&mut buffer).await?;
        let reply = Reply::parse(&buffer[..read]);
        match reply.error() {
            None => Ok(()),
            Some(err) => {
                error!("authentication failed: {}", err);
                self.disconnect().await;
                match err {
                    Error::Server(message) => Err(Error::Auth(message.clone())),
                    other => Err(other.clone()),
                }
            }
        }
    }

    fn set_state(&self, next: ConnectionState) {
        self.state.send_replace(next);
    }

    fn stream_slot(&self) -> MutexGuard<'_, Option<Arc<TcpStream>>> {
        self.stream.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_stream(&self) -> Result<Arc<TcpStream>> {
        self.stream_slot().clone().ok_or(Error::Disconnected)
    }

    fn drop_stream(&self) {
        *self.stream_slot() = None;
        self.set_state(ConnectionState::Disconnected);
    }
}
