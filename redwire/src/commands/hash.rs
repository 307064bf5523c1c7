//! Hash command builders

use crate::command::Command;

use super::Parameters;

/// HEXISTS key field
#[must_use]
pub fn hexists(key: impl Into<String>, field: impl Into<String>) -> Command {
    Command::from_args(["HEXISTS".to_string(), key.into(), field.into()])
}

/// HSET key field value
#[must_use]
pub fn hset(
    key: impl Into<String>,
    field: impl Into<String>,
    value: impl Into<String>,
) -> Command {
    Command::from_args(["HSET".to_string(), key.into(), field.into(), value.into()])
}

/// HSET key with several field/value pairs
#[must_use]
pub fn hset_multiple(
    key: impl Into<String>,
    fields: impl IntoIterator<Item = (String, String)>,
) -> Command {
    let mut args = vec!["HSET".to_string(), key.into()];
    for (field, value) in fields {
        args.push(field);
        args.push(value);
    }
    Command::from_args(args)
}

/// HSET key field value with trailing parameters
#[must_use]
pub fn hset_with(
    key: impl Into<String>,
    field: impl Into<String>,
    value: impl Into<String>,
    params: Parameters,
) -> Command {
    let mut args = vec!["HSET".to_string(), key.into(), field.into(), value.into()];
    args.extend(params);
    Command::from_args(args)
}

/// HSETNX key field value
#[must_use]
pub fn hsetnx(
    key: impl Into<String>,
    field: impl Into<String>,
    value: impl Into<String>,
) -> Command {
    Command::from_args(["HSETNX".to_string(), key.into(), field.into(), value.into()])
}

/// HGET key field
#[must_use]
pub fn hget(key: impl Into<String>, field: impl Into<String>) -> Command {
    Command::from_args(["HGET".to_string(), key.into(), field.into()])
}

/// HMGET key field [field ...]
#[must_use]
pub fn hmget(key: impl Into<String>, fields: impl IntoIterator<Item = String>) -> Command {
    let mut args = vec!["HMGET".to_string(), key.into()];
    args.extend(fields);
    Command::from_args(args)
}

/// HGETALL key; the array reply reconstructs into a hash via
/// [`Value::as_hash`](redwire_core::Value::as_hash)
#[must_use]
pub fn hgetall(key: impl Into<String>) -> Command {
    Command::from_args(["HGETALL".to_string(), key.into()])
}

/// HKEYS key
#[must_use]
pub fn hkeys(key: impl Into<String>) -> Command {
    Command::from_args(["HKEYS".to_string(), key.into()])
}

/// HVALS key
#[must_use]
pub fn hvals(key: impl Into<String>) -> Command {
    Command::from_args(["HVALS".to_string(), key.into()])
}

/// HDEL key field
#[must_use]
pub fn hdel(key: impl Into<String>, field: impl Into<String>) -> Command {
    Command::from_args(["HDEL".to_string(), key.into(), field.into()])
}

/// HLEN key
#[must_use]
pub fn hlen(key: impl Into<String>) -> Command {
    Command::from_args(["HLEN".to_string(), key.into()])
}

/// HINCRBY key field increment
#[must_use]
pub fn hincrby(key: impl Into<String>, field: impl Into<String>, increment: i64) -> Command {
    Command::from_args([
        "HINCRBY".to_string(),
        key.into(),
        field.into(),
        increment.to_string(),
    ])
}

/// HINCRBYFLOAT key field increment
#[must_use]
pub fn hincrbyfloat(key: impl Into<String>, field: impl Into<String>, increment: f64) -> Command {
    Command::from_args([
        "HINCRBYFLOAT".to_string(),
        key.into(),
        field.into(),
        increment.to_string(),
    ])
}
