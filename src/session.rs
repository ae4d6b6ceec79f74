use std::borrow::Cow;
use std::fmt;

use crate::SdpError;

/// A single `<type>=<value>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line type, i.e. `'m'` for `m=`.
    pub typ: char,
    /// Everything after `=`, without line terminator.
    pub value: Cow<'a, str>,
    index: usize,
}

impl<'a> Line<'a> {
    /// Create a line.
    pub fn new(typ: char, value: impl Into<Cow<'a, str>>) -> Self {
        Line {
            typ,
            value: value.into(),
            index: 0,
        }
    }

    /// 0-based index of the line in the input it was tokenized from.
    ///
    /// For lines pushed by the encoder, this is the position in the session.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Take ownership of the value.
    pub fn into_owned(self) -> Line<'static> {
        Line {
            typ: self.typ,
            value: Cow::Owned(self.value.into_owned()),
            index: self.index,
        }
    }
}

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.typ, self.value)
    }
}

/// The lexical view of an SDP: an ordered list of lines.
///
/// Tokenizing doesn't interpret any values, that is the job of the
/// [`Decoder`][crate::Decoder]. Values borrow from the input where possible.
///
/// A session can be reused between encodes with [`Session::clear()`] to
/// avoid reallocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session<'a> {
    lines: Vec<Line<'a>>,
}

impl<'a> Session<'a> {
    /// Create an empty session.
    pub fn new() -> Self {
        Session::default()
    }

    /// Create an empty session with room for `n` lines.
    pub fn with_capacity(n: usize) -> Self {
        Session {
            lines: Vec::with_capacity(n),
        }
    }

    /// Split input into lines.
    ///
    /// Lines end with CRLF or a bare LF. Trailing whitespace is dropped and
    /// blank lines are skipped. Every other line must start with a single
    /// printable ASCII tag followed by `=`. The tag itself is not checked
    /// here, unknown ones are up to the [`Decoder`][crate::Decoder].
    pub fn decode(input: &'a [u8]) -> Result<Session<'a>, SdpError> {
        let mut session = Session::new();

        for (index, raw) in input.split(|b| *b == b'\n').enumerate() {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

            let text = std::str::from_utf8(raw).map_err(|_| SdpError::Tokenize { line: index })?;
            let text = text.trim_end_matches([' ', '\t']);

            if text.is_empty() {
                continue;
            }

            let bytes = text.as_bytes();
            let tag = bytes[0];
            if bytes.len() < 2 || !tag.is_ascii_graphic() || tag == b'=' || bytes[1] != b'=' {
                return Err(SdpError::Tokenize { line: index });
            }

            session.lines.push(Line {
                typ: bytes[0] as char,
                // The first two bytes are ASCII, so 2 is a char boundary.
                value: Cow::Borrowed(&text[2..]),
                index,
            });
        }

        Ok(session)
    }

    /// Append a line.
    pub fn push(&mut self, typ: char, value: impl Into<Cow<'a, str>>) {
        let index = self.lines.len();
        self.lines.push(Line {
            typ,
            value: value.into(),
            index,
        });
    }

    /// The lines in order.
    pub fn lines(&self) -> &[Line<'a>] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether there are no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Remove all lines, keeping the allocation.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Write all lines to `buf`, each terminated by CRLF.
    pub fn append_to(&self, buf: &mut Vec<u8>) {
        let mut tmp = [0; 4];
        for line in &self.lines {
            buf.extend_from_slice(line.typ.encode_utf8(&mut tmp).as_bytes());
            buf.push(b'=');
            buf.extend_from_slice(line.value.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }
    }

    /// Take ownership of all values.
    pub fn into_owned(self) -> Session<'static> {
        Session {
            lines: self.lines.into_iter().map(Line::into_owned).collect(),
        }
    }
}

impl fmt::Display for Session<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            write!(f, "{line}\r\n")?;
        }
        Ok(())
    }
}
