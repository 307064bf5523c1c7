//! Core types for the redwire Redis client
//!
//! This crate provides the value model, error taxonomy, and configuration
//! types used throughout the redwire client library.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod message;
pub mod value;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use message::Message;
pub use value::{Array, Hash, Value};
