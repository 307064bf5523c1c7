//! Pub/sub message view over a decoded reply

/// A published message delivered on a subscribed channel.
///
/// Derived from the RESP array a subscribe connection receives: a
/// three-element `["message", channel, contents]` or a four-element
/// `["pmessage", pattern, channel, contents]`. `pattern` is empty for plain
/// channel subscriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// The channel the message was published on
    pub channel: String,
    /// The pattern that matched the channel, for pattern subscriptions
    pub pattern: String,
    /// The message payload
    pub contents: String,
}

impl Message {
    /// True once the message has been populated from a well-formed array.
    #[must_use]
    pub fn valid(&self) -> bool {
        !self.channel.is_empty()
    }

    /// True while the message carries no payload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_neither_valid_nor_populated() {
        let message = Message::default();
        assert!(!message.valid());
        assert!(message.is_empty());
    }

    #[test]
    fn populated_message() {
        let message = Message {
            channel: "news".to_string(),
            pattern: String::new(),
            contents: "hello".to_string(),
        };
        assert!(message.valid());
        assert!(!message.is_empty());
    }
}
