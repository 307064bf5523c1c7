//! RESP reply decoding
//!
//! Decode failures never panic and are never thrown: they populate the
//! reply's error field so callers can check it before trusting the value.
//! The decoder is resumable: every decode advances the cursor to the start
//! of the next unit, which is what makes pipelined replies and batched
//! pub/sub deliveries decodable from a single read.

use std::io::Cursor;

use bytes::Bytes;
use redwire_core::{Error, Message, Value};

/// The replies to a pipelined batch, in command order
pub type Replies = Vec<Reply>;

/// One decoded response from the server: a value plus an error code.
///
/// A RESP error reply (`-ERR ...`) carries both a [`Value::ServerError`] and
/// [`Error::Server`]; the round trip succeeded, distinct from a transport
/// failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    value: Value,
    error: Option<Error>,
}

impl Reply {
    /// Creates a reply holding a decoded value.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self { value, error: None }
    }

    /// Creates a reply with an empty value and the given error.
    #[must_use]
    pub fn from_error(error: Error) -> Self {
        Self {
            value: Value::Nil,
            error: Some(error),
        }
    }

    /// Decodes one reply from a complete buffer.
    #[must_use]
    pub fn parse(buffer: &[u8]) -> Self {
        let mut cursor = Cursor::new(buffer);
        Self::load(&mut cursor)
    }

    /// Decodes one reply starting at the cursor position.
    ///
    /// On return the cursor sits just past the decoded unit, so the caller
    /// can resume on the remainder of the buffer.
    #[must_use]
    pub fn load(cursor: &mut Cursor<&[u8]>) -> Self {
        let (value, error) = parse_reply(cursor);
        Self { value, error }
    }

    /// The decoded value, if any.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consumes the reply, returning the decoded value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// The error carried by the reply, if any.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// True when the reply carries an error of any kind.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Interprets the reply as a published pub/sub message.
    #[must_use]
    pub fn message(&self) -> Option<Message> {
        self.value.as_message()
    }
}

type Decoded = (Value, Option<Error>);

fn parse_reply(cursor: &mut Cursor<&[u8]>) -> Decoded {
    let buffer: &[u8] = *cursor.get_ref();
    let position = cursor.position() as usize;
    let Some(type_byte) = buffer.get(position).copied() else {
        return (Value::Nil, Some(Error::Eof));
    };
    cursor.set_position((position + 1) as u64);

    match type_byte {
        b'+' => parse_simple_string(cursor),
        b'-' => parse_error(cursor),
        b':' => parse_integer(cursor),
        b'$' => parse_bulk_string(cursor),
        b'*' => parse_array(cursor),
        _ => (Value::Nil, Some(Error::Malformed)),
    }
}

fn parse_simple_string(cursor: &mut Cursor<&[u8]>) -> Decoded {
    match read_line(cursor) {
        Some(line) => (
            Value::SimpleString(String::from_utf8_lossy(line).into_owned()),
            None,
        ),
        None => (Value::Nil, Some(Error::Eof)),
    }
}

fn parse_error(cursor: &mut Cursor<&[u8]>) -> Decoded {
    match read_line(cursor) {
        Some(line) => {
            let message = String::from_utf8_lossy(line).into_owned();
            (
                Value::ServerError(message.clone()),
                Some(Error::Server(message)),
            )
        }
        None => (Value::Nil, Some(Error::Eof)),
    }
}

fn parse_integer(cursor: &mut Cursor<&[u8]>) -> Decoded {
    let Some(line) = read_line(cursor) else {
        return (Value::Nil, Some(Error::Eof));
    };
    match parse_i64(line) {
        Some(number) => (Value::Integer(number), None),
        None => (Value::Nil, Some(Error::OutOfRange)),
    }
}

fn parse_bulk_string(cursor: &mut Cursor<&[u8]>) -> Decoded {
    let Some(header) = read_line(cursor) else {
        return (Value::Nil, Some(Error::Eof));
    };
    let Some(length) = parse_i64(header) else {
        return (Value::Nil, Some(Error::Malformed));
    };

    if length == -1 {
        return (Value::Nil, None);
    }
    let Ok(length) = usize::try_from(length) else {
        return (Value::Nil, Some(Error::Malformed));
    };

    let buffer: &[u8] = *cursor.get_ref();
    let start = cursor.position() as usize;
    let Some(end) = start.checked_add(length).and_then(|e| e.checked_add(2)) else {
        return (Value::Nil, Some(Error::Eof));
    };
    if buffer.len() < end {
        return (Value::Nil, Some(Error::Eof));
    }

    let bytes = Bytes::copy_from_slice(&buffer[start..start + length]);
    // step over the body and its trailing CRLF
    cursor.set_position(end as u64);
    (Value::BulkString(bytes), None)
}

fn parse_array(cursor: &mut Cursor<&[u8]>) -> Decoded {
    let Some(header) = read_line(cursor) else {
        return (Value::Nil, Some(Error::Eof));
    };
    let Some(count) = parse_i64(header) else {
        return (Value::Nil, Some(Error::Malformed));
    };

    let mut items = Vec::new();
    for _ in 0..count.max(0) {
        let (value, error) = parse_reply(cursor);
        if error.is_some() {
            return (Value::Nil, error);
        }
        items.push(value);
    }
    (Value::Array(items), None)
}

/// Reads up to the next CRLF, leaving the cursor just past it. Returns
/// `None` without moving the cursor when no complete line is available.
fn read_line<'a>(cursor: &mut Cursor<&'a [u8]>) -> Option<&'a [u8]> {
    let buffer: &'a [u8] = *cursor.get_ref();
    let start = cursor.position() as usize;

    let mut index = start;
    while index + 1 < buffer.len() {
        if buffer[index] == b'\r' && buffer[index + 1] == b'\n' {
            cursor.set_position((index + 2) as u64);
            return Some(&buffer[start..index]);
        }
        index += 1;
    }
    None
}

fn parse_i64(line: &[u8]) -> Option<i64> {
    std::str::from_utf8(line).ok()?.parse().ok()
}
