//! Pub/sub subscriber with a background read loop
//!
//! The subscriber owns one dedicated connection. A background task waits for
//! the socket to become readable, decodes whatever replies arrived, and
//! pushes them onto a small bounded channel, so a slow consumer suspends the
//! read loop rather than dropping or buffering without bound. Subscription
//! commands only report write success; their acknowledgements (and every
//! published message) arrive asynchronously through [`Subscriber::read`],
//! so callers pair each send with a matching read.

use std::io::Cursor;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

use redwire_core::{ClientConfig, Error, Result};

use crate::command::Command;
use crate::connection::{Connection, ConnectionState};
use crate::reply::Reply;

/// Depth of the delivery channel between the read loop and `read()`
const MESSAGE_QUEUE_DEPTH: usize = 8;
const READ_BUFFER_SIZE: usize = 4096;

/// A long-lived subscribe connection delivering published messages and
/// command acknowledgements through a pull-based channel.
pub struct Subscriber {
    connection: Arc<SubscriberConnection>,
    sender: mpsc::Sender<Reply>,
    receiver: mpsc::Receiver<Reply>,
    task: Option<JoinHandle<()>>,
    tasks: Arc<AtomicUsize>,
}

impl Subscriber {
    /// Creates a subscriber from a configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let (sender, receiver) = mpsc::channel(MESSAGE_QUEUE_DEPTH);
        Self {
            connection: Arc::new(SubscriberConnection::new(config)),
            sender,
            receiver,
            task: None,
            tasks: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a subscriber for the given address with default settings.
    #[must_use]
    pub fn with_address(host: impl Into<String>, port: u16) -> Self {
        Self::new(ClientConfig::new().with_host(host).with_port(port))
    }

    /// Sends a PING on the dedicated connection; the PONG arrives through
    /// [`Subscriber::read`].
    pub async fn ping(&self) -> Result<()> {
        if !self.running() {
            return Err(Error::Disconnected);
        }
        self.send(Command::new("PING")).await
    }

    /// Subscribes to a channel.
    pub async fn subscribe(&self, channel: &str) -> Result<()> {
        debug!("subscribing to {}", channel);
        self.send(Command::from_args(["SUBSCRIBE", channel])).await
    }

    /// Unsubscribes from a channel.
    pub async fn unsubscribe(&self, channel: &str) -> Result<()> {
        debug!("unsubscribing from {}", channel);
        self.send(Command::from_args(["UNSUBSCRIBE", channel])).await
    }

    /// Subscribes to a glob-style pattern.
    pub async fn psubscribe(&self, pattern: &str) -> Result<()> {
        debug!("psubscribing to {}", pattern);
        self.send(Command::from_args(["PSUBSCRIBE", pattern])).await
    }

    /// Unsubscribes from a pattern.
    pub async fn punsubscribe(&self, pattern: &str) -> Result<()> {
        debug!("punsubscribing from {}", pattern);
        self.send(Command::from_args(["PUNSUBSCRIBE", pattern])).await
    }

    /// Drops every subscription on this connection.
    pub async fn reset(&self) -> Result<()> {
        debug!("resetting subscriptions");
        self.send(Command::new("RESET")).await
    }

    /// Starts the background read loop. Idempotent: a second call while the
    /// loop is running does nothing.
    pub fn start(&mut self) {
        if self.running() {
            return;
        }

        self.tasks.fetch_add(1, Ordering::SeqCst);
        let connection = Arc::clone(&self.connection);
        let sender = self.sender.clone();
        let tasks = Arc::clone(&self.tasks);
        self.task = Some(tokio::spawn(read_messages(connection, sender, tasks)));
        debug!("monitoring for messages");
    }

    /// Stops all activity: closes the delivery channel, cancels any blocked
    /// socket operation, waits for the read loop to finish, and disconnects.
    ///
    /// The ordering matters: the read loop must observe the cancellation
    /// before the socket is torn down, so a cancelled read never races a
    /// fresh reconnect.
    pub async fn stop(&mut self) {
        self.receiver.close();
        self.connection.cancel();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!("read loop ended abnormally: {}", err);
            }
        }
        self.connection.disconnect().await;
    }

    /// Pulls the next reply off the delivery channel.
    ///
    /// Once the channel has been closed and drained, returns a reply
    /// carrying [`Error::Disconnected`] instead of suspending forever.
    pub async fn read(&mut self) -> Reply {
        match self.receiver.recv().await {
            Some(reply) => reply,
            None => Reply::from_error(Error::Disconnected),
        }
    }

    /// True while the read loop task is alive.
    #[must_use]
    pub fn running(&self) -> bool {
        self.tasks.load(Ordering::SeqCst) != 0
    }

    async fn send(&self, command: Command) -> Result<()> {
        let connection = self.connection.get().await?;
        connection.write_all(&command.serialize()).await
    }
}

impl Stream for Subscriber {
    type Item = Reply;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

/// The body of the background read loop.
///
/// Cancellation and a closed delivery channel end the loop; a read failure
/// is logged and retried so the subscriber survives transient errors, while
/// connect and AUTH failures abort.
async fn read_messages(
    connection: Arc<SubscriberConnection>,
    sender: mpsc::Sender<Reply>,
    tasks: Arc<AtomicUsize>,
) {
    trace!("starting to read messages");
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];

    'outer: loop {
        let conn = match connection.get().await {
            Ok(conn) => conn,
            Err(Error::Cancelled) => break,
            Err(err) => {
                error!("subscriber connection failed: {}", err);
                break;
            }
        };

        let read = match conn.read_some(&mut buffer).await {
            Ok(read) => read,
            Err(Error::Cancelled) => {
                trace!("cancelled, wrapping up");
                break;
            }
            Err(err) => {
                error!("{}", err);
                continue;
            }
        };

        let mut cursor = Cursor::new(&buffer[..read]);
        while (cursor.position() as usize) < read {
            let reply = Reply::load(&mut cursor);
            if reply.error() == Some(&Error::Eof) {
                // partial unit at the end of the chunk
                break;
            }
            if sender.send(reply).await.is_err() {
                trace!("channel closed, wrapping up");
                break 'outer;
            }
        }
    }

    tasks.fetch_sub(1, Ordering::SeqCst);
}

/// The subscriber's dedicated connection: connects on demand, with a guard
/// so two tasks racing to connect result in one attempt and one waiter.
struct SubscriberConnection {
    inner: Connection,
    config: ClientConfig,
    connecting: AtomicBool,
}

impl SubscriberConnection {
    fn new(config: ClientConfig) -> Self {
        Self {
            inner: Connection::new(config.host.clone(), config.port),
            config,
            connecting: AtomicBool::new(false),
        }
    }

    async fn get(&self) -> Result<&Connection> {
        if self.inner.connected() {
            return Ok(&self.inner);
        }
        self.connect().await?;
        Ok(&self.inner)
    }

    async fn connect(&self) -> Result<()> {
        // wait for the winner when another task is already connecting
        if self
            .connecting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            self.inner.wait_for_state(ConnectionState::Connected).await?;
            return Ok(());
        }

        trace!("attempting first connect");
        let result = self.connect_and_auth().await;
        self.connecting.store(false, Ordering::SeqCst);
        result
    }

    async fn connect_and_auth(&self) -> Result<()> {
        self.inner.connect_with_backoff().await?;
        if self.config.requires_auth() {
            self.inner.authenticate(&self.config).await?;
        }
        Ok(())
    }

    fn cancel(&self) {
        self.inner.cancel();
    }

    async fn disconnect(&self) {
        self.inner.disconnect().await;
    }
}
