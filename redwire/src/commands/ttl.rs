//! Key-expiry command builders

use std::time::Duration;

use crate::command::Command;

/// Conditional flag accepted by the expiry commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TtlParam {
    /// No condition
    #[default]
    None,
    /// Only when the key has no expiry
    Nx,
    /// Only when the key already has an expiry
    Xx,
    /// Only when the new expiry is greater than the current one
    Gt,
    /// Only when the new expiry is less than the current one
    Lt,
}

impl TtlParam {
    const fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Nx => "NX",
            Self::Xx => "XX",
            Self::Gt => "GT",
            Self::Lt => "LT",
        }
    }
}

fn expiry(name: &str, key: String, amount: String, param: TtlParam) -> Command {
    let mut args = vec![name.to_string(), key, amount];
    if param != TtlParam::None {
        args.push(param.as_str().to_string());
    }
    Command::from_args(args)
}

/// EXPIRE key seconds [NX | XX | GT | LT]
#[must_use]
pub fn expire(key: impl Into<String>, time: Duration, param: TtlParam) -> Command {
    expiry("EXPIRE", key.into(), time.as_secs().to_string(), param)
}

/// EXPIREAT key unix-time-seconds [NX | XX | GT | LT]
#[must_use]
pub fn expireat(key: impl Into<String>, unix_time: i64, param: TtlParam) -> Command {
    expiry("EXPIREAT", key.into(), unix_time.to_string(), param)
}

/// PEXPIRE key milliseconds [NX | XX | GT | LT]
#[must_use]
pub fn pexpire(key: impl Into<String>, time: Duration, param: TtlParam) -> Command {
    expiry("PEXPIRE", key.into(), time.as_millis().to_string(), param)
}

/// PEXPIREAT key unix-time-milliseconds [NX | XX | GT | LT]
#[must_use]
pub fn pexpireat(key: impl Into<String>, unix_time: i64, param: TtlParam) -> Command {
    expiry("PEXPIREAT", key.into(), unix_time.to_string(), param)
}

/// PERSIST key
#[must_use]
pub fn persist(key: impl Into<String>) -> Command {
    Command::from_args(["PERSIST".to_string(), key.into()])
}

/// TTL key
#[must_use]
pub fn ttl(key: impl Into<String>) -> Command {
    Command::from_args(["TTL".to_string(), key.into()])
}

/// PTTL key
#[must_use]
pub fn pttl(key: impl Into<String>) -> Command {
    Command::from_args(["PTTL".to_string(), key.into()])
}
