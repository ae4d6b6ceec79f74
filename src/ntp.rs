//! NTP timestamps as used by `t=` and `z=` lines.
//!
//! SDP uses the integer part of an NTP timestamp, i.e. seconds since
//! 1900-01-01 UTC. The value `0` is reserved: a `t=0 0` session is unbounded,
//! which we represent as `None`.

use std::time::{Duration, SystemTime};

use crate::parser::{number, parse_all};
use crate::FieldError;

// SDP uses NTP time, which starts at 1900-01-01.
//
// https://tools.ietf.org/html/rfc868
//
// 365 days * 70 years + 17 leap year days
// (365 * 70 + 17) * 86400 = 2208988800
const SECS_1900: u64 = 2_208_988_800;

/// Conversion between [`SystemTime`] and NTP seconds.
pub trait NtpTimeExt: Sized {
    /// Convert NTP seconds to a point in time.
    ///
    /// `0` is the unbounded time and gives `None`. Errors if the value can't
    /// be represented on this platform.
    fn from_ntp_secs(v: u64) -> Result<Option<Self>, FieldError>;

    /// Convert to NTP seconds. Fractions of a second are dropped.
    fn as_ntp_secs(&self) -> u64;
}

impl NtpTimeExt for SystemTime {
    fn from_ntp_secs(v: u64) -> Result<Option<Self>, FieldError> {
        if v == 0 {
            return Ok(None);
        }

        let t = if v >= SECS_1900 {
            SystemTime::UNIX_EPOCH.checked_add(Duration::from_secs(v - SECS_1900))
        } else {
            SystemTime::UNIX_EPOCH.checked_sub(Duration::from_secs(SECS_1900 - v))
        };

        t.map(Some)
            .ok_or_else(|| FieldError::MalformedTimestamp(v.to_string()))
    }

    fn as_ntp_secs(&self) -> u64 {
        match self.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(since_epoch) => since_epoch.as_secs().saturating_add(SECS_1900),
            Err(e) => {
                // Before 1970, round towards 1900 so that the result is the
                // whole second at or before self.
                let before = e.duration();
                let secs = before.as_secs() + u64::from(before.subsec_nanos() > 0);
                SECS_1900.saturating_sub(secs)
            }
        }
    }
}

/// Convert NTP seconds to a point in time, `0` being unbounded (`None`).
pub fn ntp_to_time(v: u64) -> Result<Option<SystemTime>, FieldError> {
    SystemTime::from_ntp_secs(v)
}

/// Convert a point in time to NTP seconds, unbounded (`None`) being `0`.
pub fn time_to_ntp(t: Option<SystemTime>) -> u64 {
    t.map(|t| t.as_ntp_secs()).unwrap_or(0)
}

/// Decode the textual form of NTP seconds.
pub(crate) fn decode_ntp(s: &str) -> Result<Option<SystemTime>, FieldError> {
    let v = parse_all(number::<_, u64>(), s)
        .map_err(|_| FieldError::MalformedTimestamp(s.to_string()))?;
    ntp_to_time(v)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_is_unbounded() {
        assert_eq!(ntp_to_time(0), Ok(None));
        assert_eq!(time_to_ntp(None), 0);
    }

    #[test]
    fn from_to_ntp() {
        let t = ntp_to_time(2873397496).unwrap().unwrap();
        assert_eq!(time_to_ntp(Some(t)), 2873397496);
    }

    #[test]
    fn unix_epoch() {
        let t = ntp_to_time(SECS_1900).unwrap().unwrap();
        assert_eq!(t, SystemTime::UNIX_EPOCH);
    }

    #[test]
    fn before_unix_epoch() {
        let t = ntp_to_time(1_000_000).unwrap().unwrap();
        assert!(t < SystemTime::UNIX_EPOCH);
        assert_eq!(t.as_ntp_secs(), 1_000_000);
    }

    #[test]
    fn fraction_is_dropped() {
        let t = ntp_to_time(2873397496).unwrap().unwrap() + Duration::from_millis(700);
        assert_eq!(t.as_ntp_secs(), 2873397496);
    }

    #[test]
    fn decode_text() {
        assert_eq!(decode_ntp("0"), Ok(None));
        assert!(decode_ntp("2873404696").unwrap().is_some());
        assert!(matches!(
            decode_ntp("-5"),
            Err(FieldError::MalformedTimestamp(_))
        ));
        assert!(matches!(
            decode_ntp(""),
            Err(FieldError::MalformedTimestamp(_))
        ));
        assert!(matches!(
            decode_ntp("99999999999999999999999"),
            Err(FieldError::MalformedTimestamp(_))
        ));
    }
}
