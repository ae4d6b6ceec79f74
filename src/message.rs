use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use combine::{optional, sep_by1, token, Parser};

use crate::ntp::{decode_ntp, time_to_ntp};
use crate::parser::{not_sp, number, parse_all, sp};
use crate::{Attributes, Bandwidths, ConnectionData, Decoder, FieldError, Interval, Origin};
use crate::{SdpError, Session};

/// A decoded session description.
///
/// Owns everything below it: the session level fields and one [`Media`] per
/// `m=` line, in the order they appeared.
///
/// ```
/// use str0m_sdp::Message;
///
/// let sdp = "v=0\r\n\
///     o=- 123 1 IN IP4 127.0.0.1\r\n\
///     s=-\r\n\
///     t=0 0\r\n\
///     m=audio 49170 RTP/AVP 0\r\n\
///     a=rtpmap:0 PCMU/8000\r\n";
///
/// let msg: Message = sdp.parse().unwrap();
/// assert_eq!(msg.medias.len(), 1);
/// assert_eq!(msg.medias[0].attribute("rtpmap"), Some("0 PCMU/8000"));
///
/// assert_eq!(msg.to_string(), sdp);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// `v=`, always 0.
    pub version: u32,
    /// `o=`
    pub origin: Origin,
    /// `s=`, encoded as `-` when empty.
    pub name: String,
    /// `i=` at session level.
    pub info: Option<String>,
    /// `u=`
    pub uri: Option<String>,
    /// `e=`
    pub email: Option<String>,
    /// `p=`
    pub phone: Option<String>,
    /// `c=` at session level.
    ///
    /// May be omitted if every media has its own.
    pub connection: Option<ConnectionData>,
    /// `b=` lines at session level.
    pub bandwidths: Bandwidths,
    /// One entry per `t=` line, with the `r=` lines that follow it.
    pub timing: Vec<Timing>,
    /// `z=` adjustments, in order.
    pub tz_adjustments: Vec<TimeZone>,
    /// `k=` at session level.
    pub encryption: Option<Encryption>,
    /// `a=` lines at session level.
    pub attributes: Attributes,
    /// One entry per `m=` line.
    pub medias: Vec<Media>,
}

impl Message {
    /// Tokenize and decode using a default [`Decoder`].
    pub fn decode(input: &[u8]) -> Result<Message, SdpError> {
        let session = Session::decode(input)?;
        Decoder::default().decode(&session)
    }

    /// Encode to canonical bytes, each line terminated by CRLF.
    pub fn to_bytes(&self) -> Vec<u8> {
        let session = self.append(Session::new());
        let mut buf = Vec::with_capacity(512);
        session.append_to(&mut buf);
        buf
    }

    /// Start time of the first `t=` line, `None` if missing or unbounded.
    pub fn start(&self) -> Option<SystemTime> {
        self.timing.first().and_then(|t| t.start)
    }

    /// End time of the first `t=` line, `None` if missing or unbounded.
    pub fn end(&self) -> Option<SystemTime> {
        self.timing.first().and_then(|t| t.end)
    }

    /// Whether the session has the flag attribute, i.e. `a=recvonly`.
    pub fn flag(&self, key: &str) -> bool {
        self.attributes.flag(key)
    }

    /// Value of the first session attribute with the key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.value(key)
    }

    /// Add a session level flag attribute.
    pub fn add_flag(&mut self, key: impl Into<String>) {
        self.attributes.add_flag(key);
    }

    /// Add a session level attribute, multiple values joined by space.
    pub fn add_attribute<S: AsRef<str>>(&mut self, key: impl Into<String>, values: &[S]) {
        self.attributes.add(key, values);
    }
}

impl FromStr for Message {
    type Err = SdpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Message::decode(s.as_bytes())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.append(Session::new()).lines() {
            write!(f, "{line}\r\n")?;
        }
        Ok(())
    }
}

/// A media section, from an `m=` line up to the next `m=` or the end.
///
/// Connection, bandwidth, encryption and attributes are scoped to this media
/// and independent of the session level ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    /// The `m=` line.
    pub description: MediaDescription,
    /// `i=` at media level.
    pub title: Option<String>,
    /// `c=` at media level.
    pub connection: Option<ConnectionData>,
    /// `b=` lines at media level.
    pub bandwidths: Bandwidths,
    /// `k=` at media level.
    pub encryption: Option<Encryption>,
    /// `a=` lines at media level.
    pub attributes: Attributes,
}

impl Media {
    /// Media with only the `m=` line.
    pub fn new(description: MediaDescription) -> Self {
        Media {
            description,
            title: None,
            connection: None,
            bandwidths: Bandwidths::new(),
            encryption: None,
            attributes: Attributes::new(),
        }
    }

    /// Whether the media has the flag attribute.
    pub fn flag(&self, key: &str) -> bool {
        self.attributes.flag(key)
    }

    /// Value of the first media attribute with the key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.value(key)
    }

    /// Add a media level flag attribute.
    pub fn add_flag(&mut self, key: impl Into<String>) {
        self.attributes.add_flag(key);
    }

    /// Add a media level attribute, multiple values joined by space.
    pub fn add_attribute<S: AsRef<str>>(&mut self, key: impl Into<String>, values: &[S]) {
        self.attributes.add(key, values);
    }
}

/// Type of media in `m=`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// `audio`
    Audio,
    /// `video`
    Video,
    /// `text`
    Text,
    /// `application`
    Application,
    /// `message`
    Message,
    /// Any other token, kept verbatim.
    Unknown(String),
}

impl MediaType {
    fn from_token(s: &str) -> Self {
        use MediaType::*;
        match s {
            "audio" => Audio,
            "video" => Video,
            "text" => Text,
            "application" => Application,
            "message" => Message,
            _ => Unknown(s.to_string()),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Audio => write!(f, "audio"),
            MediaType::Video => write!(f, "video"),
            MediaType::Text => write!(f, "text"),
            MediaType::Application => write!(f, "application"),
            MediaType::Message => write!(f, "message"),
            MediaType::Unknown(v) => write!(f, "{v}"),
        }
    }
}

/// The `m=` line.
///
/// `m=<media> <port>[/<number of ports>] <proto> <fmt> ...`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaDescription {
    /// Media type.
    pub media_type: MediaType,
    /// Transport port.
    pub port: u16,
    /// Number of ports, for hierarchically encoded streams.
    pub port_count: Option<u16>,
    /// Transport protocol, i.e. `RTP/AVP`.
    pub protocol: String,
    /// Media formats, i.e. RTP payload types. Never empty.
    pub formats: Vec<String>,
}

impl MediaDescription {
    /// Create a media description.
    pub fn new<S: Into<String>>(
        media_type: MediaType,
        port: u16,
        protocol: impl Into<String>,
        formats: impl IntoIterator<Item = S>,
    ) -> Self {
        MediaDescription {
            media_type,
            port,
            port_count: None,
            protocol: protocol.into(),
            formats: formats.into_iter().map(Into::into).collect(),
        }
    }

    /// Decode the value of an `m=` line.
    pub fn decode(s: &str) -> Result<MediaDescription, FieldError> {
        parse_all(
            (
                not_sp(),
                sp(),
                number::<_, u16>(),
                optional((token('/'), number::<_, u16>()).map(|(_, n)| n)),
                sp(),
                not_sp(),
                sp(),
                sep_by1::<Vec<String>, _, _, _>(not_sp(), sp()),
            ),
            s,
        )
        .map(
            |(media_type, _, port, port_count, _, protocol, _, formats)| MediaDescription {
                media_type: MediaType::from_token(&media_type),
                port,
                port_count,
                protocol,
                formats,
            },
        )
        .map_err(|_| FieldError::MalformedMediaDescription(s.to_string()))
    }
}

impl fmt::Display for MediaDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_assert!(!self.formats.is_empty(), "m= line without formats");

        write!(f, "{} {}", self.media_type, self.port)?;
        if let Some(count) = self.port_count {
            write!(f, "/{count}")?;
        }
        write!(f, " {}", self.protocol)?;
        for fmt in &self.formats {
            write!(f, " {fmt}")?;
        }
        Ok(())
    }
}

/// A `t=` line and the `r=` lines following it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Timing {
    /// Start time, `None` is unbounded (`0`).
    pub start: Option<SystemTime>,
    /// End time, `None` is unbounded (`0`).
    pub end: Option<SystemTime>,
    /// `r=` lines.
    pub repeats: Vec<Repeat>,
}

impl Timing {
    /// `t=0 0`, a permanent session.
    pub fn unbounded() -> Self {
        Timing::default()
    }

    /// Decode the value of a `t=` line.
    pub fn decode(s: &str) -> Result<Timing, FieldError> {
        let (start, end) = s
            .split_once(' ')
            .ok_or_else(|| FieldError::MalformedTimestamp(s.to_string()))?;

        Ok(Timing {
            start: decode_ntp(start)?,
            end: decode_ntp(end)?,
            repeats: vec![],
        })
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", time_to_ntp(self.start), time_to_ntp(self.end))
    }
}

/// An `r=` line.
///
/// `r=<repeat interval> <active duration> <offsets from start-time>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Repeat {
    /// How often the session repeats.
    pub interval: Interval,
    /// How long each repetition lasts.
    pub active: Interval,
    /// Offsets from the start time for each repetition.
    pub offsets: Vec<Interval>,
}

impl Repeat {
    /// Decode the value of an `r=` line.
    pub fn decode(s: &str) -> Result<Repeat, FieldError> {
        let mut parts = s.split(' ').map(Interval::decode);

        let malformed = || FieldError::MalformedInterval(s.to_string());
        let interval = parts.next().ok_or_else(malformed)??;
        let active = parts.next().ok_or_else(malformed)??;
        let offsets = parts.collect::<Result<Vec<_>, _>>()?;

        Ok(Repeat {
            interval,
            active,
            offsets,
        })
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.interval, self.active)?;
        for o in &self.offsets {
            write!(f, " {o}")?;
        }
        Ok(())
    }
}

/// One adjustment of a `z=` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeZone {
    /// When the adjustment happens.
    pub start: Option<SystemTime>,
    /// Offset from the time zone of the session's start time.
    pub offset: Interval,
}

impl TimeZone {
    /// Decode the value of a `z=` line.
    ///
    /// `z=<adjustment time> <offset> <adjustment time> <offset> ....`
    pub fn decode_all(s: &str) -> Result<Vec<TimeZone>, FieldError> {
        let tokens: Vec<&str> = s.split(' ').collect();

        if tokens.len() % 2 != 0 {
            return Err(FieldError::MalformedTimeZone(s.to_string()));
        }

        tokens
            .chunks_exact(2)
            .map(|pair| {
                Ok(TimeZone {
                    start: decode_ntp(pair[0])?,
                    offset: Interval::decode(pair[1])?,
                })
            })
            .collect()
    }

    /// Encode adjustments as the value of a single `z=` line.
    pub fn encode_all(zones: &[TimeZone]) -> String {
        zones
            .iter()
            .map(|z| z.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", time_to_ntp(self.start), self.offset)
    }
}

/// A `k=` line.
///
/// `k=<method>` or `k=<method>:<encryption key>`. RFC 8866 deprecates this,
/// but it is still seen in the wild.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Encryption {
    /// `clear`, `base64`, `uri` or `prompt`.
    pub method: String,
    /// The key, absent for `prompt`.
    pub key: Option<String>,
}

impl Encryption {
    /// `k=prompt`
    pub fn prompt() -> Self {
        Encryption {
            method: "prompt".into(),
            key: None,
        }
    }

    /// `k=clear:<key>`
    pub fn clear(key: impl Into<String>) -> Self {
        Encryption {
            method: "clear".into(),
            key: Some(key.into()),
        }
    }

    /// `k=base64:<key>`
    pub fn base64(key: impl Into<String>) -> Self {
        Encryption {
            method: "base64".into(),
            key: Some(key.into()),
        }
    }

    /// `k=uri:<uri>`
    pub fn uri(uri: impl Into<String>) -> Self {
        Encryption {
            method: "uri".into(),
            key: Some(uri.into()),
        }
    }

    /// Decode the value of a `k=` line.
    pub fn decode(s: &str) -> Result<Encryption, FieldError> {
        let (method, key) = match s.split_once(':') {
            Some((m, k)) => (m, Some(k)),
            None => (s, None),
        };

        if method.is_empty() || key.map(|k| k.is_empty()).unwrap_or(false) {
            return Err(FieldError::MalformedEncryption(s.to_string()));
        }

        Ok(Encryption {
            method: method.to_string(),
            key: key.map(|k| k.to_string()),
        })
    }
}

impl fmt::Display for Encryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(k) => write!(f, "{}:{}", self.method, k),
            None => write!(f, "{}", self.method),
        }
    }
}
