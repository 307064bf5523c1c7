//! Set command builders

use crate::command::Command;

fn keyed(name: &str, key: String, members: impl IntoIterator<Item = String>) -> Command {
    let mut args = vec![name.to_string(), key];
    args.extend(members);
    Command::from_args(args)
}

fn keys_only(name: &str, keys: impl IntoIterator<Item = String>) -> Command {
    let mut args = vec![name.to_string()];
    args.extend(keys);
    Command::from_args(args)
}

/// SADD key member [member ...]
#[must_use]
pub fn sadd(key: impl Into<String>, members: impl IntoIterator<Item = String>) -> Command {
    keyed("SADD", key.into(), members)
}

/// SDIFF key [key ...]
#[must_use]
pub fn sdiff(keys: impl IntoIterator<Item = String>) -> Command {
    keys_only("SDIFF", keys)
}

/// SINTER key [key ...]
#[must_use]
pub fn sinter(keys: impl IntoIterator<Item = String>) -> Command {
    keys_only("SINTER", keys)
}

/// SUNION key [key ...]
#[must_use]
pub fn sunion(keys: impl IntoIterator<Item = String>) -> Command {
    keys_only("SUNION", keys)
}

/// SISMEMBER key member
#[must_use]
pub fn sismember(key: impl Into<String>, member: impl Into<String>) -> Command {
    Command::from_args(["SISMEMBER".to_string(), key.into(), member.into()])
}

/// SMEMBERS key
#[must_use]
pub fn smembers(key: impl Into<String>) -> Command {
    Command::from_args(["SMEMBERS".to_string(), key.into()])
}

/// SPOP key
#[must_use]
pub fn spop(key: impl Into<String>) -> Command {
    Command::from_args(["SPOP".to_string(), key.into()])
}

/// SPOP key count
#[must_use]
pub fn spop_count(key: impl Into<String>, count: i64) -> Command {
    Command::from_args(["SPOP".to_string(), key.into(), count.to_string()])
}

/// SREM key member [member ...]
#[must_use]
pub fn srem(key: impl Into<String>, members: impl IntoIterator<Item = String>) -> Command {
    keyed("SREM", key.into(), members)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_builders() {
        assert_eq!(
            sadd("s", vec!["a".to_string(), "b".to_string()]).args(),
            ["SADD", "s", "a", "b"]
        );
        assert_eq!(sismember("s", "a").args(), ["SISMEMBER", "s", "a"]);
        assert_eq!(
            srem("s", vec!["a".to_string()]).args(),
            ["SREM", "s", "a"]
        );
    }

    #[test]
    fn multi_key_builders() {
        assert_eq!(
            sdiff(vec!["a".to_string(), "b".to_string()]).args(),
            ["SDIFF", "a", "b"]
        );
        assert_eq!(sunion(vec!["a".to_string()]).args(), ["SUNION", "a"]);
    }

    #[test]
    fn pop_builders() {
        assert_eq!(spop("s").args(), ["SPOP", "s"]);
        assert_eq!(spop_count("s", 3).args(), ["SPOP", "s", "3"]);
    }
}
