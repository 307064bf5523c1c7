//! Command construction and RESP serialization

use bytes::{BufMut, Bytes, BytesMut};

const CRLF: &[u8] = b"\r\n";

/// A batch of commands sent as one pipeline
pub type Commands = Vec<Command>;

/// An ordered list of command arguments.
///
/// Built either from a human-typed command line (`GET "my key"`) or from an
/// explicit argument list, and serialized into the exact bytes Redis expects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    args: Vec<String>,
}

impl Command {
    /// Tokenizes a space-delimited command line.
    ///
    /// Double-quoted spans keep their spaces; an unterminated quote captures
    /// everything up to the end of the input. Empty tokens are dropped, so
    /// an all-whitespace line yields an empty command.
    #[must_use]
    pub fn new(line: &str) -> Self {
        let mut args = Vec::new();
        let mut member = String::new();
        let mut chars = line.chars();

        while let Some(ch) = chars.next() {
            match ch {
                ' ' => {
                    if !member.is_empty() {
                        args.push(std::mem::take(&mut member));
                    }
                }
                '"' => {
                    for inner in chars.by_ref() {
                        if inner == '"' {
                            break;
                        }
                        member.push(inner);
                    }
                }
                _ => member.push(ch),
            }
        }
        if !member.is_empty() {
            args.push(member);
        }

        Self { args }
    }

    /// Creates a command from an explicit argument list.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// True when the command holds no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// The arguments in order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Serializes the command for the wire.
    ///
    /// A one-argument command uses the inline form (`PING\r\n`); anything
    /// longer becomes a RESP array of bulk strings. An empty command
    /// serializes to no bytes at all.
    #[must_use]
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::new();
        if self.args.is_empty() {
            return buf.freeze();
        }

        if self.args.len() == 1 {
            buf.put_slice(self.args[0].as_bytes());
            buf.put_slice(CRLF);
            return buf.freeze();
        }

        buf.put_u8(b'*');
        buf.put_slice(self.args.len().to_string().as_bytes());
        buf.put_slice(CRLF);
        for arg in &self.args {
            buf.put_u8(b'$');
            buf.put_slice(arg.len().to_string().as_bytes());
            buf.put_slice(CRLF);
            buf.put_slice(arg.as_bytes());
            buf.put_slice(CRLF);
        }
        buf.freeze()
    }
}

impl From<&str> for Command {
    fn from(line: &str) -> Self {
        Self::new(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_yields_an_empty_command() {
        let command = Command::new("");
        assert!(command.is_empty());
        assert_eq!(command.serialize(), Bytes::new());

        let command = Command::new("   ");
        assert!(command.is_empty());
        assert_eq!(command.args().len(), 0);
    }

    #[test]
    fn single_argument_serializes_inline() {
        let command = Command::new("PING");
        assert!(!command.is_empty());
        assert_eq!(command.serialize(), Bytes::from_static(b"PING\r\n"));

        // Leading and trailing whitespace is ignored.
        let command = Command::new("  PING  ");
        assert_eq!(command.serialize(), Bytes::from_static(b"PING\r\n"));
        assert_eq!(command, Command::new("PING"));
    }

    #[test]
    fn multiple_arguments_serialize_as_an_array() {
        let command = Command::new("GET temp");
        assert_eq!(command.args(), ["GET", "temp"]);
        assert_eq!(
            command.serialize(),
            Bytes::from_static(b"*2\r\n$3\r\nGET\r\n$4\r\ntemp\r\n")
        );

        let command = Command::new("SET key value");
        assert_eq!(
            command.serialize(),
            Bytes::from_static(b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\nvalue\r\n")
        );
    }

    #[test]
    fn extra_whitespace_is_collapsed() {
        let command = Command::new("GET  temp ");
        assert_eq!(command.args(), ["GET", "temp"]);
    }

    #[test]
    fn quoted_spans_keep_their_spaces() {
        let command = Command::new("GET  \"a b\" ");
        assert_eq!(command.args(), ["GET", "a b"]);
        assert_eq!(
            command.serialize(),
            Bytes::from_static(b"*2\r\n$3\r\nGET\r\n$3\r\na b\r\n")
        );
    }

    #[test]
    fn unterminated_quote_captures_to_end_of_input() {
        let command = Command::new("GET \"a b");
        assert_eq!(command.args(), ["GET", "a b"]);

        let command = Command::new("GET  \"temp with quotes ");
        assert_eq!(command.args(), ["GET", "temp with quotes "]);
    }

    #[test]
    fn explicit_argument_list() {
        let args = vec!["GET".to_string(), "temp".to_string()];
        let command = Command::from_args(args.clone());
        assert_eq!(command.args(), args.as_slice());
        assert_eq!(command, Command::new("GET temp"));
    }

    #[test]
    fn equality_is_by_argument_list() {
        assert_eq!(Command::new("GET a"), Command::from_args(["GET", "a"]));
        assert_ne!(Command::new("GET a"), Command::new("GET b"));
    }
}
