//! The RESP value model and its typed coercion rules

use std::cmp::Ordering;
use std::collections::BTreeMap;

use bytes::Bytes;

use crate::error::Error;
use crate::message::Message;

/// An ordered sequence of values, as returned by array replies
pub type Array = Vec<Value>;

/// A field/value mapping reconstructed from an even-length array reply
pub type Hash = BTreeMap<String, Value>;

/// One decoded RESP result.
///
/// Exactly one variant is ever populated. A hash is not a wire primitive:
/// it is flattened into an [`Array`] of alternating field and value when
/// constructed, and reconstructed from an even-length array by
/// [`Value::as_hash`].
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The null value, `$-1\r\n` on the wire
    #[default]
    Nil,
    /// A simple string, `+OK\r\n`
    SimpleString(String),
    /// An error the server replied with, `-ERR ...\r\n`
    ServerError(String),
    /// A signed 64-bit integer, `:1000\r\n`
    Integer(i64),
    /// A length-prefixed binary-safe string, `$6\r\nfoobar\r\n`
    BulkString(Bytes),
    /// An array of other values, `*2\r\n...`
    Array(Vec<Value>),
}

impl Value {
    /// The value as text.
    ///
    /// Simple strings are returned as-is, bulk strings are decoded as UTF-8,
    /// and server errors yield their message text. Everything else is absent.
    #[must_use]
    pub fn as_string(&self) -> Option<String> {
        match self {
            Self::SimpleString(text) => Some(text.clone()),
            Self::BulkString(bytes) => String::from_utf8(bytes.to_vec()).ok(),
            Self::ServerError(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// The value as a signed 64-bit integer.
    ///
    /// Integers convert natively; a bulk string converts when its bytes parse
    /// as a decimal number.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(number) => Some(*number),
            Self::BulkString(bytes) => std::str::from_utf8(bytes).ok()?.parse().ok(),
            _ => None,
        }
    }

    /// The value as a double-precision float.
    ///
    /// Integers widen; a bulk string converts when its bytes parse as a
    /// number.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Integer(number) => Some(*number as f64),
            Self::BulkString(bytes) => std::str::from_utf8(bytes).ok()?.parse().ok(),
            _ => None,
        }
    }

    /// The raw bytes of a simple or bulk string, verbatim.
    #[must_use]
    pub fn as_bulk(&self) -> Option<Bytes> {
        match self {
            Self::SimpleString(text) => Some(Bytes::copy_from_slice(text.as_bytes())),
            Self::BulkString(bytes) => Some(bytes.clone()),
            _ => None,
        }
    }

    /// The value interpreted as a boolean.
    ///
    /// A non-zero integer and the simple string `OK` are true; a server
    /// error is present and false. Everything else is absent.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Integer(number) => Some(*number != 0),
            Self::SimpleString(text) => Some(text == "OK"),
            Self::ServerError(_) => Some(false),
            _ => None,
        }
    }

    /// The elements of an array value.
    #[must_use]
    pub fn as_array(&self) -> Option<Array> {
        match self {
            Self::Array(items) => Some(items.clone()),
            _ => None,
        }
    }

    /// Reconstructs a field/value mapping from an even-length array.
    ///
    /// Absent for any other variant, for odd-length arrays, and when a field
    /// position does not convert to text.
    #[must_use]
    pub fn as_hash(&self) -> Option<Hash> {
        let Self::Array(items) = self else {
            return None;
        };
        if items.len() % 2 != 0 {
            return None;
        }

        let mut hash = Hash::new();
        for pair in items.chunks_exact(2) {
            hash.insert(pair[0].as_string()?, pair[1].clone());
        }
        Some(hash)
    }

    /// Interprets the value as a published pub/sub message.
    ///
    /// Present only for a three-element array whose first element is exactly
    /// `message`, or a four-element array starting with `pmessage`.
    #[must_use]
    pub fn as_message(&self) -> Option<Message> {
        let Self::Array(items) = self else {
            return None;
        };

        match items.len() {
            3 => {
                if items[0].as_string().as_deref() != Some("message") {
                    return None;
                }
                Some(Message {
                    channel: items[1].as_string().unwrap_or_default(),
                    pattern: String::new(),
                    contents: items[2].as_string().unwrap_or_default(),
                })
            }
            4 => {
                if items[0].as_string().as_deref() != Some("pmessage") {
                    return None;
                }
                Some(Message {
                    pattern: items[1].as_string().unwrap_or_default(),
                    channel: items[2].as_string().unwrap_or_default(),
                    contents: items[3].as_string().unwrap_or_default(),
                })
            }
            _ => None,
        }
    }

    /// Check if this is the null value
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Check if this is a server error
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::ServerError(_))
    }

    /// A total ordering over values: variant tag first, then payload.
    ///
    /// This is an inherent helper for test code that sorts arrays; it is not
    /// an `Ord` impl because simple and bulk strings with equal text compare
    /// equal under `==` while ranking differently here.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::SimpleString(a), Self::SimpleString(b))
            | (Self::ServerError(a), Self::ServerError(b)) => a.cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::BulkString(a), Self::BulkString(b)) => a.cmp(b),
            (Self::Array(a), Self::Array(b)) => {
                for (left, right) in a.iter().zip(b.iter()) {
                    let ordering = left.compare(right);
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => self.tag_rank().cmp(&other.tag_rank()),
        }
    }

    const fn tag_rank(&self) -> u8 {
        match self {
            Self::Nil => 0,
            Self::SimpleString(_) => 1,
            Self::ServerError(_) => 2,
            Self::Integer(_) => 3,
            Self::BulkString(_) => 4,
            Self::Array(_) => 5,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::SimpleString(a), Self::SimpleString(b)) => a == b,
            (Self::ServerError(a), Self::ServerError(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::BulkString(a), Self::BulkString(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            // Redis returns logically identical text in either wire form.
            (Self::SimpleString(text), Self::BulkString(bytes))
            | (Self::BulkString(bytes), Self::SimpleString(text)) => {
                text.as_bytes() == bytes.as_ref()
            }
            _ => false,
        }
    }
}

impl Eq for Value {}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::SimpleString(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::SimpleString(text.to_string())
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Self::Integer(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Integer(i64::from(number))
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::BulkString(Bytes::from(bytes))
    }
}

impl From<Bytes> for Value {
    fn from(bytes: Bytes) -> Self {
        Self::BulkString(bytes)
    }
}

impl From<Array> for Value {
    fn from(items: Array) -> Self {
        Self::Array(items)
    }
}

impl From<Hash> for Value {
    fn from(hash: Hash) -> Self {
        let mut items = Vec::with_capacity(hash.len() * 2);
        for (field, value) in hash {
            items.push(Self::SimpleString(field));
            items.push(value);
        }
        Self::Array(items)
    }
}

macro_rules! demand_conversion {
    ($target:ty, $accessor:ident) => {
        impl TryFrom<&Value> for $target {
            type Error = Error;

            fn try_from(value: &Value) -> Result<Self, Error> {
                value.$accessor().ok_or(Error::WrongType)
            }
        }

        impl TryFrom<Value> for $target {
            type Error = Error;

            fn try_from(value: Value) -> Result<Self, Error> {
                Self::try_from(&value)
            }
        }
    };
}

demand_conversion!(String, as_string);
demand_conversion!(i64, as_int);
demand_conversion!(f64, as_float);
demand_conversion!(bool, as_bool);
demand_conversion!(Bytes, as_bulk);
demand_conversion!(Array, as_array);
demand_conversion!(Hash, as_hash);
demand_conversion!(Message, as_message);

#[cfg(test)]
mod tests {
    use super::*;

    fn bulk(text: &str) -> Value {
        Value::BulkString(Bytes::copy_from_slice(text.as_bytes()))
    }

    #[test]
    fn string_coercions() {
        assert_eq!(
            Value::SimpleString("World".into()).as_string().as_deref(),
            Some("World")
        );
        assert_eq!(bulk("World").as_string().as_deref(), Some("World"));
        assert_eq!(
            Value::ServerError("ERR wrong type".into())
                .as_string()
                .as_deref(),
            Some("ERR wrong type")
        );
        assert_eq!(Value::Nil.as_string(), None);
        assert_eq!(Value::Integer(42).as_string(), None);
        assert_eq!(Value::Array(vec![]).as_string(), None);
    }

    #[test]
    fn integer_coercions() {
        assert_eq!(Value::Integer(1042).as_int(), Some(1042));
        assert_eq!(bulk("1042").as_int(), Some(1042));
        assert_eq!(bulk("-7").as_int(), Some(-7));
        assert_eq!(bulk("four").as_int(), None);
        assert_eq!(Value::SimpleString("1042".into()).as_int(), None);
        assert_eq!(Value::ServerError("ERR".into()).as_int(), None);
    }

    #[test]
    fn float_coercions() {
        assert_eq!(Value::Integer(3).as_float(), Some(3.0));
        assert_eq!(bulk("3.5").as_float(), Some(3.5));
        assert_eq!(bulk("not a number").as_float(), None);
        assert_eq!(Value::SimpleString("3.5".into()).as_float(), None);
    }

    #[test]
    fn bulk_coercions() {
        assert_eq!(
            bulk("payload").as_bulk(),
            Some(Bytes::from_static(b"payload"))
        );
        assert_eq!(
            Value::SimpleString("OK".into()).as_bulk(),
            Some(Bytes::from_static(b"OK"))
        );
        assert_eq!(Value::Integer(1).as_bulk(), None);
        assert_eq!(Value::Nil.as_bulk(), None);
    }

    #[test]
    fn bool_coercion_matrix() {
        assert_eq!(Value::Integer(1042).as_bool(), Some(true));
        assert_eq!(Value::Integer(0).as_bool(), Some(false));
        assert_eq!(Value::SimpleString("OK".into()).as_bool(), Some(true));
        assert_eq!(Value::SimpleString("NO".into()).as_bool(), Some(false));
        assert_eq!(Value::ServerError("ERR".into()).as_bool(), Some(false));
        assert_eq!(Value::Nil.as_bool(), None);
        assert_eq!(bulk("1").as_bool(), None);
    }

    #[test]
    fn array_coercions() {
        let items = vec![Value::Integer(1), bulk("two")];
        assert_eq!(Value::Array(items.clone()).as_array(), Some(items));
        assert_eq!(Value::Nil.as_array(), None);
    }

    #[test]
    fn hash_round_trip() {
        let mut hash = Hash::new();
        hash.insert("alpha".into(), bulk("1"));
        hash.insert("beta".into(), Value::Integer(2));

        let flattened = Value::from(hash.clone());
        let Value::Array(ref items) = flattened else {
            panic!("hash must flatten to an array");
        };
        assert_eq!(items.len(), 4);
        assert_eq!(flattened.as_hash(), Some(hash));
    }

    #[test]
    fn hash_requires_even_length() {
        let odd = Value::Array(vec![bulk("key"), bulk("value"), bulk("dangling")]);
        assert_eq!(odd.as_hash(), None);
    }

    #[test]
    fn hash_requires_text_fields() {
        let bad_field = Value::Array(vec![Value::Nil, bulk("value")]);
        assert_eq!(bad_field.as_hash(), None);
    }

    #[test]
    fn message_from_array() {
        let value = Value::Array(vec![bulk("message"), bulk("chan"), bulk("body")]);
        let message = value.as_message().expect("well-formed message");
        assert_eq!(message.channel, "chan");
        assert_eq!(message.contents, "body");
        assert!(message.pattern.is_empty());
        assert!(message.valid());
    }

    #[test]
    fn pmessage_from_array() {
        let value = Value::Array(vec![bulk("pmessage"), bulk("pat"), bulk("chan"), bulk("body")]);
        let message = value.as_message().expect("well-formed pmessage");
        assert_eq!(message.pattern, "pat");
        assert_eq!(message.channel, "chan");
        assert_eq!(message.contents, "body");
    }

    #[test]
    fn message_rejects_other_shapes() {
        let wrong_tag = Value::Array(vec![bulk("not-a-message"), bulk("x"), bulk("y")]);
        assert_eq!(wrong_tag.as_message(), None);

        let wrong_size = Value::Array(vec![bulk("message"), bulk("chan")]);
        assert_eq!(wrong_size.as_message(), None);

        // A four-element array must be a pmessage, not a message.
        let mismatched = Value::Array(vec![bulk("message"), bulk("a"), bulk("b"), bulk("c")]);
        assert_eq!(mismatched.as_message(), None);

        assert_eq!(Value::Integer(3).as_message(), None);
    }

    #[test]
    fn cross_representation_equality() {
        assert_eq!(Value::SimpleString("World".into()), bulk("World"));
        assert_eq!(bulk("World"), Value::SimpleString("World".into()));
        assert_ne!(Value::SimpleString("World".into()), bulk("world"));
        assert_ne!(Value::SimpleString("1".into()), Value::Integer(1));
    }

    #[test]
    fn demand_conversions() {
        assert_eq!(i64::try_from(Value::Integer(7)), Ok(7));
        assert_eq!(String::try_from(bulk("hi")), Ok("hi".to_string()));
        assert_eq!(bool::try_from(Value::Integer(0)), Ok(false));
        assert_eq!(i64::try_from(Value::Nil), Err(Error::WrongType));
        assert_eq!(
            Message::try_from(Value::Integer(1)),
            Err(Error::WrongType)
        );
    }

    #[test]
    fn ordering_ranks_tag_then_payload() {
        let mut values = vec![
            Value::Integer(2),
            Value::Nil,
            bulk("b"),
            Value::SimpleString("a".into()),
            Value::Integer(1),
        ];
        values.sort_by(Value::compare);

        assert_eq!(
            values,
            vec![
                Value::Nil,
                Value::SimpleString("a".into()),
                Value::Integer(1),
                Value::Integer(2),
                bulk("b"),
            ]
        );
    }
}
