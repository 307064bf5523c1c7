//! RedisJSON command builders (the `JSON.*` module commands)

use crate::command::Command;

fn keyed_path(name: &str, key: String, path: String) -> Command {
    Command::from_args([name.to_string(), key, path])
}

/// JSON.GET key path
#[must_use]
pub fn json_get(key: impl Into<String>, path: impl Into<String>) -> Command {
    keyed_path("JSON.GET", key.into(), path.into())
}

/// JSON.SET key path value
#[must_use]
pub fn json_set(
    key: impl Into<String>,
    path: impl Into<String>,
    value: impl Into<String>,
) -> Command {
    Command::from_args(["JSON.SET".to_string(), key.into(), path.into(), value.into()])
}

/// JSON.DEL key path
#[must_use]
pub fn json_del(key: impl Into<String>, path: impl Into<String>) -> Command {
    keyed_path("JSON.DEL", key.into(), path.into())
}

/// JSON.TYPE key path
#[must_use]
pub fn json_type(key: impl Into<String>, path: impl Into<String>) -> Command {
    keyed_path("JSON.TYPE", key.into(), path.into())
}

/// JSON.STRLEN key path
#[must_use]
pub fn json_strlen(key: impl Into<String>, path: impl Into<String>) -> Command {
    keyed_path("JSON.STRLEN", key.into(), path.into())
}

/// JSON.STRAPPEND key path value
#[must_use]
pub fn json_strappend(
    key: impl Into<String>,
    path: impl Into<String>,
    value: impl Into<String>,
) -> Command {
    Command::from_args([
        "JSON.STRAPPEND".to_string(),
        key.into(),
        path.into(),
        value.into(),
    ])
}

/// JSON.NUMINCRBY key path value
#[must_use]
pub fn json_numincrby(
    key: impl Into<String>,
    path: impl Into<String>,
    value: impl Into<String>,
) -> Command {
    Command::from_args([
        "JSON.NUMINCRBY".to_string(),
        key.into(),
        path.into(),
        value.into(),
    ])
}

/// JSON.NUMMULTBY key path value
#[must_use]
pub fn json_nummultby(
    key: impl Into<String>,
    path: impl Into<String>,
    value: impl Into<String>,
) -> Command {
    Command::from_args([
        "JSON.NUMMULTBY".to_string(),
        key.into(),
        path.into(),
        value.into(),
    ])
}

/// JSON.ARRAPPEND key path value
#[must_use]
pub fn json_arrappend(
    key: impl Into<String>,
    path: impl Into<String>,
    value: impl Into<String>,
) -> Command {
    Command::from_args([
        "JSON.ARRAPPEND".to_string(),
        key.into(),
        path.into(),
        value.into(),
    ])
}

/// JSON.ARRINSERT key path value [value ...]
#[must_use]
pub fn json_arrinsert(
    key: impl Into<String>,
    path: impl Into<String>,
    values: impl IntoIterator<Item = String>,
) -> Command {
    let mut args = vec!["JSON.ARRINSERT".to_string(), key.into(), path.into()];
    args.extend(values);
    Command::from_args(args)
}

/// JSON.ARRTRIM key path start length
#[must_use]
pub fn json_arrtrim(
    key: impl Into<String>,
    path: impl Into<String>,
    start: i64,
    length: i64,
) -> Command {
    Command::from_args([
        "JSON.ARRTRIM".to_string(),
        key.into(),
        path.into(),
        start.to_string(),
        length.to_string(),
    ])
}

/// JSON.ARRPOP key path
#[must_use]
pub fn json_arrpop(key: impl Into<String>, path: impl Into<String>) -> Command {
    keyed_path("JSON.ARRPOP", key.into(), path.into())
}

/// JSON.OBJLEN key path
#[must_use]
pub fn json_objlen(key: impl Into<String>, path: impl Into<String>) -> Command {
    keyed_path("JSON.OBJLEN", key.into(), path.into())
}

/// JSON.OBJKEYS key path
#[must_use]
pub fn json_objkeys(key: impl Into<String>, path: impl Into<String>) -> Command {
    keyed_path("JSON.OBJKEYS", key.into(), path.into())
}
