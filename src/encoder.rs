use crate::{Attributes, Bandwidths, ConnectionData, Encryption, Media, Message, Session};
use crate::TimeZone;

impl Message {
    /// Append the lines of this message to a session.
    ///
    /// Lines come in RFC 4566 order: `v o s i u e p c b t r z k a` for the
    /// session, then `m i c b k a` for each media. Every value is written in
    /// its canonical form, so the output only depends on the message, not on
    /// whatever text it might have been decoded from.
    ///
    /// ```
    /// use str0m_sdp::{Message, Origin, Session, Timing};
    ///
    /// let mut msg = Message::default();
    /// msg.origin = Origin::new("-", 1, 1, [127, 0, 0, 1]);
    /// msg.timing.push(Timing::unbounded());
    ///
    /// let session = msg.append(Session::new());
    /// let mut buf = Vec::new();
    /// session.append_to(&mut buf);
    ///
    /// assert_eq!(buf, b"v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\n");
    /// ```
    pub fn append<'a>(&self, mut s: Session<'a>) -> Session<'a> {
        s.push('v', self.version.to_string());
        s.push('o', self.origin.to_string());

        if self.name.is_empty() {
            s.push('s', "-");
        } else {
            s.push('s', self.name.clone());
        }

        push_opt(&mut s, 'i', &self.info);
        push_opt(&mut s, 'u', &self.uri);
        push_opt(&mut s, 'e', &self.email);
        push_opt(&mut s, 'p', &self.phone);
        push_connection(&mut s, &self.connection);
        push_bandwidths(&mut s, &self.bandwidths);

        for t in &self.timing {
            s.push('t', t.to_string());
            for r in &t.repeats {
                s.push('r', r.to_string());
            }
        }

        if !self.tz_adjustments.is_empty() {
            s.push('z', TimeZone::encode_all(&self.tz_adjustments));
        }

        push_encryption(&mut s, &self.encryption);
        push_attributes(&mut s, &self.attributes);

        for m in &self.medias {
            s = m.append(s);
        }

        s
    }
}

impl Media {
    /// Append the lines of this media section to a session.
    pub fn append<'a>(&self, mut s: Session<'a>) -> Session<'a> {
        s.push('m', self.description.to_string());
        push_opt(&mut s, 'i', &self.title);
        push_connection(&mut s, &self.connection);
        push_bandwidths(&mut s, &self.bandwidths);
        push_encryption(&mut s, &self.encryption);
        push_attributes(&mut s, &self.attributes);
        s
    }
}

fn push_opt(s: &mut Session<'_>, typ: char, v: &Option<String>) {
    if let Some(v) = v {
        s.push(typ, v.clone());
    }
}

fn push_connection(s: &mut Session<'_>, c: &Option<ConnectionData>) {
    if let Some(c) = c {
        s.push('c', c.to_string());
    }
}

fn push_bandwidths(s: &mut Session<'_>, bw: &Bandwidths) {
    for (typ, v) in bw.iter() {
        s.push('b', format!("{typ}:{v}"));
    }
}

fn push_encryption(s: &mut Session<'_>, k: &Option<Encryption>) {
    if let Some(k) = k {
        s.push('k', k.to_string());
    }
}

fn push_attributes(s: &mut Session<'_>, attrs: &Attributes) {
    for a in attrs {
        s.push('a', a.to_string());
    }
}
