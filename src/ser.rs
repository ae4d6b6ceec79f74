use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::Message;

// A message serializes as its canonical SDP text. This lets a signaling
// layer embed it as is, i.e. {"type":"offer","sdp":"v=0\r\n..."}.

impl Serialize for Message {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MessageVisitor;

        impl<'de> de::Visitor<'de> for MessageVisitor {
            type Value = Message;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an SDP session description")
            }

            fn visit_str<E>(self, v: &str) -> Result<Message, E>
            where
                E: de::Error,
            {
                v.parse()
                    .map_err(|e| de::Error::custom(format!("Failed to parse SDP: {}", e)))
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Message, E>
            where
                E: de::Error,
            {
                Message::decode(v)
                    .map_err(|e| de::Error::custom(format!("Failed to parse SDP: {}", e)))
            }
        }

        d.deserialize_str(MessageVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Origin, Timing};

    fn message() -> Message {
        let mut msg = Message {
            origin: Origin::new("-", 123, 2, [127, 0, 0, 1]),
            ..Default::default()
        };
        msg.timing.push(Timing::unbounded());
        msg
    }

    #[test]
    fn serialize_deserialize() {
        let msg = message();
        let json = serde_json::to_string(&msg).unwrap();

        assert_eq!(
            json,
            "\"v=0\\r\\no=- 123 2 IN IP4 127.0.0.1\\r\\ns=-\\r\\nt=0 0\\r\\n\""
        );

        let msg2: Message = serde_json::from_str(&json).unwrap();
        // s= was empty, it comes back as "-".
        assert_eq!(msg2.name, "-");
        assert_eq!(msg2.origin, msg.origin);
        assert_eq!(msg2.timing, msg.timing);
    }

    #[test]
    fn deserialize_error() {
        let res: Result<Message, _> = serde_json::from_str("\"v=1\\r\\n\"");
        let err = res.unwrap_err().to_string();
        assert!(err.starts_with("Failed to parse SDP: SDP line 0 (v=)"), "{err}");
    }
}
