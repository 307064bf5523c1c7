//! List command builders

use crate::command::Command;

fn push(name: &str, key: String, values: impl IntoIterator<Item = String>) -> Command {
    let mut args = vec![name.to_string(), key];
    args.extend(values);
    Command::from_args(args)
}

/// RPUSH key value
#[must_use]
pub fn rpush(key: impl Into<String>, value: impl Into<String>) -> Command {
    push("RPUSH", key.into(), [value.into()])
}

/// RPUSH key value [value ...]
#[must_use]
pub fn rpush_multiple(
    key: impl Into<String>,
    values: impl IntoIterator<Item = String>,
) -> Command {
    push("RPUSH", key.into(), values)
}

/// RPUSHX key value
#[must_use]
pub fn rpushx(key: impl Into<String>, value: impl Into<String>) -> Command {
    push("RPUSHX", key.into(), [value.into()])
}

/// LPUSH key value
#[must_use]
pub fn lpush(key: impl Into<String>, value: impl Into<String>) -> Command {
    push("LPUSH", key.into(), [value.into()])
}

/// LPUSH key value [value ...]
#[must_use]
pub fn lpush_multiple(
    key: impl Into<String>,
    values: impl IntoIterator<Item = String>,
) -> Command {
    push("LPUSH", key.into(), values)
}

/// LPUSHX key value
#[must_use]
pub fn lpushx(key: impl Into<String>, value: impl Into<String>) -> Command {
    push("LPUSHX", key.into(), [value.into()])
}

/// RPOP key
#[must_use]
pub fn rpop(key: impl Into<String>) -> Command {
    Command::from_args(["RPOP".to_string(), key.into()])
}

/// RPOP key count
#[must_use]
pub fn rpop_count(key: impl Into<String>, count: i64) -> Command {
    Command::from_args(["RPOP".to_string(), key.into(), count.to_string()])
}

/// LPOP key
#[must_use]
pub fn lpop(key: impl Into<String>) -> Command {
    Command::from_args(["LPOP".to_string(), key.into()])
}

/// LPOP key count
#[must_use]
pub fn lpop_count(key: impl Into<String>, count: i64) -> Command {
    Command::from_args(["LPOP".to_string(), key.into(), count.to_string()])
}

/// BRPOP key timeout
#[must_use]
pub fn brpop(key: impl Into<String>, timeout_secs: i64) -> Command {
    Command::from_args(["BRPOP".to_string(), key.into(), timeout_secs.to_string()])
}

/// BRPOP key [key ...] timeout
#[must_use]
pub fn brpop_multiple(keys: impl IntoIterator<Item = String>, timeout_secs: i64) -> Command {
    let mut args = vec!["BRPOP".to_string()];
    args.extend(keys);
    args.push(timeout_secs.to_string());
    Command::from_args(args)
}

/// BLPOP key timeout
#[must_use]
pub fn blpop(key: impl Into<String>, timeout_secs: i64) -> Command {
    Command::from_args(["BLPOP".to_string(), key.into(), timeout_secs.to_string()])
}

/// BLPOP key [key ...] timeout
#[must_use]
pub fn blpop_multiple(keys: impl IntoIterator<Item = String>, timeout_secs: i64) -> Command {
    let mut args = vec!["BLPOP".to_string()];
    args.extend(keys);
    args.push(timeout_secs.to_string());
    Command::from_args(args)
}

/// LSET key index value
#[must_use]
pub fn lset(key: impl Into<String>, index: i64, value: impl Into<String>) -> Command {
    Command::from_args([
        "LSET".to_string(),
        key.into(),
        index.to_string(),
        value.into(),
    ])
}

/// LLEN key
#[must_use]
pub fn llen(key: impl Into<String>) -> Command {
    Command::from_args(["LLEN".to_string(), key.into()])
}

/// LINDEX key index
#[must_use]
pub fn lindex(key: impl Into<String>, index: i64) -> Command {
    Command::from_args(["LINDEX".to_string(), key.into(), index.to_string()])
}

/// LRANGE key start stop
#[must_use]
pub fn lrange(key: impl Into<String>, start: i64, stop: i64) -> Command {
    Command::from_args([
        "LRANGE".to_string(),
        key.into(),
        start.to_string(),
        stop.to_string(),
    ])
}

/// LREM key count element
#[must_use]
pub fn lrem(key: impl Into<String>, count: i64, element: impl Into<String>) -> Command {
    Command::from_args([
        "LREM".to_string(),
        key.into(),
        count.to_string(),
        element.into(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_builders() {
        assert_eq!(rpush("l", "a").args(), ["RPUSH", "l", "a"]);
        assert_eq!(
            lpush_multiple("l", vec!["a".to_string(), "b".to_string()]).args(),
            ["LPUSH", "l", "a", "b"]
        );
        assert_eq!(rpushx("l", "a").args(), ["RPUSHX", "l", "a"]);
    }

    #[test]
    fn pop_builders() {
        assert_eq!(rpop("l").args(), ["RPOP", "l"]);
        assert_eq!(lpop_count("l", 2).args(), ["LPOP", "l", "2"]);
        assert_eq!(
            brpop_multiple(vec!["a".to_string(), "b".to_string()], 5).args(),
            ["BRPOP", "a", "b", "5"]
        );
    }

    #[test]
    fn range_builders() {
        assert_eq!(lrange("l", 0, -1).args(), ["LRANGE", "l", "0", "-1"]);
        assert_eq!(lrem("l", 1, "x").args(), ["LREM", "l", "1", "x"]);
        assert_eq!(lset("l", 3, "x").args(), ["LSET", "l", "3", "x"]);
    }
}
