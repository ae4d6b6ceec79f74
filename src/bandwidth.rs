use std::fmt;

use combine::{many1, satisfy, token, Parser};

use crate::parser::{number, parse_all};
use crate::FieldError;

/// The `<bwtype>` of a `b=` line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BandwidthType {
    /// `CT`, total bandwidth of all sites in a conference.
    ConferenceTotal,
    /// `AS`, application specific maximum.
    ApplicationSpecific,
    /// `TIAS`, transport independent application specific maximum (RFC 3890).
    Tias,
    /// `RS`, RTCP bandwidth allocated to active senders (RFC 3556).
    RtcpSenders,
    /// `RR`, RTCP bandwidth allocated to other participants (RFC 3556).
    RtcpReceivers,
    /// Any other token, kept verbatim.
    Unknown(String),
}

impl BandwidthType {
    /// Map a token to a type. Tokens are case sensitive.
    pub fn from_token(s: &str) -> Self {
        use BandwidthType::*;
        match s {
            "CT" => ConferenceTotal,
            "AS" => ApplicationSpecific,
            "TIAS" => Tias,
            "RS" => RtcpSenders,
            "RR" => RtcpReceivers,
            _ => Unknown(s.to_string()),
        }
    }

    /// The token as written on the wire.
    pub fn as_str(&self) -> &str {
        use BandwidthType::*;
        match self {
            ConferenceTotal => "CT",
            ApplicationSpecific => "AS",
            Tias => "TIAS",
            RtcpSenders => "RS",
            RtcpReceivers => "RR",
            Unknown(v) => v,
        }
    }
}

impl fmt::Display for BandwidthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bandwidth values from `b=` lines, keyed by type.
///
/// Each type appears at most once. Iteration (and thus encoding) follows the
/// order types were first set in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bandwidths(Vec<(BandwidthType, u64)>);

impl Bandwidths {
    /// Create an empty set.
    pub fn new() -> Self {
        Bandwidths::default()
    }

    /// Set the value for a type. Returns the previous value, if any.
    ///
    /// Replacing a value keeps the original position.
    pub fn set(&mut self, typ: BandwidthType, value: u64) -> Option<u64> {
        if let Some((_, v)) = self.0.iter_mut().find(|(t, _)| *t == typ) {
            return Some(std::mem::replace(v, value));
        }
        self.0.push((typ, value));
        None
    }

    /// The value for a type.
    pub fn get(&self, typ: &BandwidthType) -> Option<u64> {
        self.0.iter().find(|(t, _)| t == typ).map(|(_, v)| *v)
    }

    /// The value for a token such as `"CT"` or `"X-YZ"`.
    pub fn get_token(&self, token: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(t, _)| t.as_str() == token)
            .map(|(_, v)| *v)
    }

    /// `b=CT`
    pub fn conference_total(&self) -> Option<u64> {
        self.get(&BandwidthType::ConferenceTotal)
    }

    /// `b=AS`
    pub fn application_specific(&self) -> Option<u64> {
        self.get(&BandwidthType::ApplicationSpecific)
    }

    /// `b=TIAS`
    pub fn tias(&self) -> Option<u64> {
        self.get(&BandwidthType::Tias)
    }

    /// Remove the value for a type.
    pub fn remove(&mut self, typ: &BandwidthType) -> Option<u64> {
        let idx = self.0.iter().position(|(t, _)| t == typ)?;
        Some(self.0.remove(idx).1)
    }

    /// Iterate in the order types were first set.
    pub fn iter(&self) -> impl Iterator<Item = (&BandwidthType, u64)> {
        self.0.iter().map(|(t, v)| (t, *v))
    }

    /// Number of types set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no types are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode the value of a `b=` line, i.e. `CT:154798`.
    pub fn decode(s: &str) -> Result<(BandwidthType, u64), FieldError> {
        let typ = many1::<String, _, _>(satisfy(|c| c != ':'));

        parse_all((typ, token(':'), number::<_, u64>()), s)
            .map(|(typ, _, v)| (BandwidthType::from_token(&typ), v))
            .map_err(|_| FieldError::MalformedBandwidth(s.to_string()))
    }
}

impl FromIterator<(BandwidthType, u64)> for Bandwidths {
    fn from_iter<T: IntoIterator<Item = (BandwidthType, u64)>>(iter: T) -> Self {
        let mut bw = Bandwidths::new();
        for (typ, v) in iter {
            bw.set(typ, v);
        }
        bw
    }
}
