use thiserror::Error;

/// Failure of a single field codec.
///
/// The standalone codecs ([`Interval::decode`][crate::Interval::decode],
/// [`ConnectionData`][crate::ConnectionData] parsing etc.) return this directly.
/// The [`Decoder`][crate::Decoder] wraps it in [`SdpError::MalformedLine`]
/// together with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum FieldError {
    #[error("unsupported version: {0}")]
    UnsupportedVersion(String),

    #[error("duplicate field: {0}=")]
    DuplicateField(char),

    #[error("r= without preceding t=")]
    DanglingRepeat,

    #[error("malformed interval: {0}")]
    MalformedInterval(String),

    #[error("malformed timestamp: {0}")]
    MalformedTimestamp(String),

    #[error("malformed address: {0}")]
    MalformedAddress(String),

    #[error("malformed origin: {0}")]
    MalformedOrigin(String),

    #[error("malformed bandwidth: {0}")]
    MalformedBandwidth(String),

    #[error("malformed time zone adjustment: {0}")]
    MalformedTimeZone(String),

    #[error("malformed encryption key: {0}")]
    MalformedEncryption(String),

    #[error("malformed attribute: {0}")]
    MalformedAttribute(String),

    #[error("malformed media description: {0}")]
    MalformedMediaDescription(String),

    #[error("unexpected field: {0}=")]
    UnexpectedField(char),
}

/// Errors from decoding SDP.
///
/// Decoding stops at the first error, there is no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdpError {
    /// A non-empty line that isn't `<type>=<value>`.
    #[error("SDP tokenize: line {line} is not <type>=<value>")]
    Tokenize {
        /// 0-based index of the offending line in the input.
        line: usize,
    },

    /// A known line whose value failed to decode.
    #[error("SDP line {line} ({typ}=): {source}")]
    MalformedLine {
        /// 0-based index of the line in the tokenized session.
        line: usize,
        /// The line type, i.e. `'o'` for `o=`.
        typ: char,
        /// What went wrong.
        source: FieldError,
    },

    /// A mandatory line never appeared.
    #[error("SDP missing mandatory field: {0}=")]
    MissingField(char),
}

impl SdpError {
    /// The field error behind this error, if it came from a line codec.
    pub fn field(&self) -> Option<&FieldError> {
        match self {
            SdpError::MalformedLine { source, .. } => Some(source),
            _ => None,
        }
    }

    /// The 0-based line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            SdpError::Tokenize { line } => Some(*line),
            SdpError::MalformedLine { line, .. } => Some(*line),
            SdpError::MissingField(_) => None,
        }
    }
}
