//! Async Redis client speaking RESP over TCP
//!
//! `redwire` encodes commands, decodes replies, manages a pool of
//! authenticated connections with reconnect and backoff, and drives a
//! publish/subscribe message stream with backpressure.
//!
//! # Request/reply
//!
//! ```no_run
//! use redwire::{Client, ClientConfig, Command};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::new(ClientConfig::new().with_host("127.0.0.1"));
//!
//!     let reply = client.send(Command::new("SET greeting hello")).await;
//!     assert!(reply.error().is_none());
//!
//!     let reply = client.send(redwire::commands::get("greeting")).await;
//!     assert_eq!(reply.value().as_string().as_deref(), Some("hello"));
//! }
//! ```
//!
//! # Pub/sub
//!
//! ```no_run
//! use redwire::{ClientConfig, Subscriber};
//!
//! #[tokio::main]
//! async fn main() -> redwire::Result<()> {
//!     let mut subscriber = Subscriber::new(ClientConfig::new());
//!     subscriber.start();
//!     subscriber.subscribe("news").await?;
//!
//!     // the subscribe acknowledgement, then published messages
//!     let ack = subscriber.read().await;
//!     assert!(ack.error().is_none());
//!     if let Some(message) = subscriber.read().await.message() {
//!         println!("{}: {}", message.channel, message.contents);
//!     }
//!
//!     subscriber.stop().await;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod command;
pub mod commands;
pub mod connection;
pub mod pool;
pub mod reply;
pub mod subscriber;

pub use client::Client;
pub use command::{Command, Commands};
pub use connection::{Connection, ConnectionState};
pub use pool::ConnectionPool;
pub use reply::{Replies, Reply};
pub use subscriber::Subscriber;

pub use redwire_core::{Array, ClientConfig, Error, Hash, Message, Result, Value};
