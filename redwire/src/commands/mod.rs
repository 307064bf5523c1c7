//! Command builders
//!
//! Thin translations from typed arguments to [`Command`] argument lists.
//! Builders never talk to the server; pass their result to
//! [`Client::send`](crate::client::Client::send) or a pipeline.

pub mod hash;
pub mod json;
pub mod list;
pub mod set;
pub mod ttl;

use crate::command::Command;

/// Additional raw parameters appended onto some commands (e.g. `EX 10` or
/// `NX` on SET)
pub type Parameters = Vec<String>;

/// FLUSHALL
#[must_use]
pub fn flush_all() -> Command {
    Command::new("FLUSHALL")
}

/// GET key
#[must_use]
pub fn get(key: impl Into<String>) -> Command {
    Command::from_args(["GET".to_string(), key.into()])
}

/// SET key value
#[must_use]
pub fn set(key: impl Into<String>, value: impl Into<String>) -> Command {
    Command::from_args(["SET".to_string(), key.into(), value.into()])
}

/// SET key value with trailing parameters such as `EX`, `NX`, `KEEPTTL`
#[must_use]
pub fn set_with(key: impl Into<String>, value: impl Into<String>, params: Parameters) -> Command {
    let mut args = vec!["SET".to_string(), key.into(), value.into()];
    args.extend(params);
    Command::from_args(args)
}

/// DEL key
#[must_use]
pub fn del(key: impl Into<String>) -> Command {
    Command::from_args(["DEL".to_string(), key.into()])
}

/// EXISTS key
#[must_use]
pub fn exists(key: impl Into<String>) -> Command {
    Command::from_args(["EXISTS".to_string(), key.into()])
}

/// INCR key
#[must_use]
pub fn incr(key: impl Into<String>) -> Command {
    Command::from_args(["INCR".to_string(), key.into()])
}

/// INCRBY key increment
#[must_use]
pub fn incrby(key: impl Into<String>, increment: i64) -> Command {
    Command::from_args(["INCRBY".to_string(), key.into(), increment.to_string()])
}

/// INCRBYFLOAT key increment
#[must_use]
pub fn incrbyfloat(key: impl Into<String>, increment: f64) -> Command {
    Command::from_args([
        "INCRBYFLOAT".to_string(),
        key.into(),
        increment.to_string(),
    ])
}

/// DECR key
#[must_use]
pub fn decr(key: impl Into<String>) -> Command {
    Command::from_args(["DECR".to_string(), key.into()])
}

/// DECRBY key decrement
#[must_use]
pub fn decrby(key: impl Into<String>, decrement: i64) -> Command {
    Command::from_args(["DECRBY".to_string(), key.into(), decrement.to_string()])
}

/// PUBLISH channel message
#[must_use]
pub fn publish(channel: impl Into<String>, message: impl Into<String>) -> Command {
    Command::from_args(["PUBLISH".to_string(), channel.into(), message.into()])
}
