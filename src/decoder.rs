use crate::parser::{number, parse_all};
use crate::session::Line;
use crate::util::Pii;
use crate::{Attribute, Attributes, BandwidthType, Bandwidths, ConnectionData, DecoderConfig};
use crate::{Encryption, FieldError, Media, MediaDescription, Message, Origin};
use crate::{Repeat, SdpError, Session, TimeZone, Timing};

// RFC 4566 5: the order lines must appear in. `t` and `r` alternate.
const SESSION_ORDER: &[&str] = &["v", "o", "s", "i", "u", "e", "p", "c", "b", "tr", "z", "k", "a"];
const MEDIA_ORDER: &[&str] = &["m", "i", "c", "b", "k", "a"];

/// Decodes a tokenized [`Session`] into a [`Message`].
///
/// The decoder holds nothing but its config, so one instance can be used
/// for any number of sessions, also concurrently.
///
/// ```
/// use str0m_sdp::{Decoder, Session};
///
/// let input = b"v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\na=recvonly\r\n";
///
/// let session = Session::decode(input).unwrap();
/// let msg = Decoder::default().decode(&session).unwrap();
///
/// assert!(msg.flag("recvonly"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder from a config.
    pub fn new(config: DecoderConfig) -> Self {
        Decoder { config }
    }

    /// The config of this decoder.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode all lines of the session.
    ///
    /// Lines before the first `m=` belong to the session, the rest to the
    /// media opened by the closest `m=` above them. The first bad line fails
    /// the whole decode.
    pub fn decode(&self, session: &Session<'_>) -> Result<Message, SdpError> {
        let mut state = DecodeState::new(&self.config);

        for line in session.lines() {
            if let Err(source) = state.line(line) {
                debug!(
                    "SDP decode failed at line {} ({}={}): {}",
                    line.index(),
                    line.typ,
                    Pii(&line.value),
                    Pii(&source)
                );
                return Err(SdpError::MalformedLine {
                    line: line.index(),
                    typ: line.typ,
                    source,
                });
            }
        }

        state.finish()
    }
}

/// Where lines currently go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Session,
    Media,
}

/// The fields shared between session and media level.
struct Fields<'a> {
    info: &'a mut Option<String>,
    connection: &'a mut Option<ConnectionData>,
    bandwidths: &'a mut Bandwidths,
    encryption: &'a mut Option<Encryption>,
    attributes: &'a mut Attributes,
}

struct DecodeState<'a> {
    config: &'a DecoderConfig,
    msg: Message,
    /// The media being filled, pushed to `msg` on next `m=` or finish.
    media: Option<Media>,
    /// Bit per line type seen in the current scope.
    seen: u32,
    has_version: bool,
    has_origin: bool,
    /// Position in SESSION_ORDER/MEDIA_ORDER of the last line.
    order: usize,
}

impl<'a> DecodeState<'a> {
    fn new(config: &'a DecoderConfig) -> Self {
        DecodeState {
            config,
            msg: Message::default(),
            media: None,
            seen: 0,
            has_version: false,
            has_origin: false,
            order: 0,
        }
    }

    fn scope(&self) -> Scope {
        if self.media.is_some() {
            Scope::Media
        } else {
            Scope::Session
        }
    }

    fn fields(&mut self) -> Fields<'_> {
        match &mut self.media {
            Some(m) => Fields {
                info: &mut m.title,
                connection: &mut m.connection,
                bandwidths: &mut m.bandwidths,
                encryption: &mut m.encryption,
                attributes: &mut m.attributes,
            },
            None => Fields {
                info: &mut self.msg.info,
                connection: &mut self.msg.connection,
                bandwidths: &mut self.msg.bandwidths,
                encryption: &mut self.msg.encryption,
                attributes: &mut self.msg.attributes,
            },
        }
    }

    fn line(&mut self, line: &Line<'_>) -> Result<(), FieldError> {
        let typ = line.typ;
        let v: &str = &line.value;

        self.check_order(typ)?;

        match (typ, self.scope()) {
            ('m', _) => self.open_media(v)?,

            ('v', Scope::Session) => {
                self.once(typ)?;
                let version = parse_all(number::<_, u32>(), v).ok();
                if version != Some(0) {
                    return Err(FieldError::UnsupportedVersion(v.to_string()));
                }
                self.msg.version = 0;
                self.has_version = true;
            }
            ('o', Scope::Session) => {
                self.once(typ)?;
                self.msg.origin = Origin::decode(v)?;
                self.has_origin = true;
            }
            ('s', Scope::Session) => {
                self.once(typ)?;
                self.msg.name = v.to_string();
            }
            ('u', Scope::Session) => {
                self.once(typ)?;
                self.msg.uri = Some(v.to_string());
            }
            ('e', Scope::Session) => {
                self.once(typ)?;
                self.msg.email = Some(v.to_string());
            }
            ('p', Scope::Session) => {
                self.once(typ)?;
                self.msg.phone = Some(v.to_string());
            }
            ('t', Scope::Session) => {
                self.msg.timing.push(Timing::decode(v)?);
            }
            ('r', Scope::Session) => {
                let repeat = Repeat::decode(v)?;
                let timing = self
                    .msg
                    .timing
                    .last_mut()
                    .ok_or(FieldError::DanglingRepeat)?;
                timing.repeats.push(repeat);
            }
            ('z', Scope::Session) => {
                let zones = TimeZone::decode_all(v)?;
                self.msg.tz_adjustments.extend(zones);
            }

            ('i', _) => {
                self.once(typ)?;
                *self.fields().info = Some(v.to_string());
            }
            ('c', _) => {
                self.once(typ)?;
                *self.fields().connection = Some(ConnectionData::decode(v)?);
            }
            ('b', _) => {
                let (bwtype, value) = Bandwidths::decode(v)?;
                self.set_bandwidth(bwtype, value);
            }
            ('k', _) => {
                self.once(typ)?;
                *self.fields().encryption = Some(Encryption::decode(v)?);
            }
            ('a', _) => {
                let attr = Attribute::decode(v)?;
                self.fields().attributes.push(attr);
            }

            // Session only lines below a m= line.
            ('v' | 'o' | 's' | 'u' | 'e' | 'p' | 't' | 'r' | 'z', Scope::Media) => {
                return Err(FieldError::UnexpectedField(typ));
            }

            _ => {
                if !self.config.ignore_unknown {
                    return Err(FieldError::UnexpectedField(typ));
                }
                trace!("Ignore unknown SDP line: {}={}", typ, v);
            }
        }

        Ok(())
    }

    fn open_media(&mut self, v: &str) -> Result<(), FieldError> {
        let description = MediaDescription::decode(v)?;
        trace!("Open SDP media section: {}", description);

        if let Some(prev) = self.media.replace(Media::new(description)) {
            self.msg.medias.push(prev);
        }
        self.seen = 0;

        Ok(())
    }

    fn set_bandwidth(&mut self, bwtype: BandwidthType, value: u64) {
        let scope = self.scope();
        if let Some(prev) = self.fields().bandwidths.set(bwtype.clone(), value) {
            debug!(
                "SDP b={} in {:?} scope replaced: {} -> {}",
                bwtype, scope, prev, value
            );
        }
    }

    /// Fail if the line type was already seen in this scope.
    fn once(&mut self, typ: char) -> Result<(), FieldError> {
        // Only called for the lowercase line types.
        let bit = 1_u32 << (typ as u32 - 'a' as u32);
        if self.seen & bit != 0 {
            return Err(FieldError::DuplicateField(typ));
        }
        self.seen |= bit;
        Ok(())
    }

    fn check_order(&mut self, typ: char) -> Result<(), FieldError> {
        if !self.config.strict_order {
            return Ok(());
        }

        if typ == 'm' {
            self.order = 0;
            return Ok(());
        }

        let order = match self.scope() {
            Scope::Session => SESSION_ORDER,
            Scope::Media => MEDIA_ORDER,
        };

        // Lines not in the table are handled (or rejected) by the caller.
        let Some(pos) = order.iter().position(|t| t.contains(typ)) else {
            return Ok(());
        };

        if pos < self.order {
            return Err(FieldError::UnexpectedField(typ));
        }
        self.order = pos;

        Ok(())
    }

    fn finish(mut self) -> Result<Message, SdpError> {
        if let Some(media) = self.media.take() {
            self.msg.medias.push(media);
        }

        if !self.has_version {
            return Err(SdpError::MissingField('v'));
        }
        if !self.has_origin {
            return Err(SdpError::MissingField('o'));
        }

        debug!(
            "Decoded SDP from {} {} with {} media",
            Pii(&self.msg.origin.username),
            Pii(&self.msg.origin.address),
            self.msg.medias.len()
        );

        Ok(self.msg)
    }
}
