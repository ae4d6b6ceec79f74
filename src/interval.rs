use std::fmt;
use std::time::Duration;

use combine::parser::char::char as chr;
use combine::{choice, optional, token, Parser};

use crate::parser::{number, parse_all};
use crate::FieldError;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// A signed number of seconds, as used by `r=` and `z=` lines.
///
/// On the wire an interval is either a bare number of seconds (`63050`) or a
/// number with a unit suffix `d`, `h`, `m` or `s` (`7d`, `25h`). Time zone
/// adjustments in `z=` may be negative (`-1h`).
///
/// Encoding is canonical: the largest unit that divides the value evenly is
/// used, and values not divisible by a minute are written as bare seconds.
/// The textual form an interval was decoded from is not preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Interval(i64);

impl Interval {
    /// No time at all.
    pub const ZERO: Interval = Interval(0);

    /// Interval of a number of seconds.
    pub const fn from_secs(secs: i64) -> Self {
        Interval(secs)
    }

    /// Interval of a number of minutes, saturating at the `i64` bounds.
    pub const fn from_mins(mins: i64) -> Self {
        Interval(mins.saturating_mul(MINUTE as i64))
    }

    /// Interval of a number of hours, saturating at the `i64` bounds.
    pub const fn from_hours(hours: i64) -> Self {
        Interval(hours.saturating_mul(HOUR as i64))
    }

    /// Interval of a number of days, saturating at the `i64` bounds.
    pub const fn from_days(days: i64) -> Self {
        Interval(days.saturating_mul(DAY as i64))
    }

    /// Number of seconds.
    pub const fn as_secs(&self) -> i64 {
        self.0
    }

    /// Whether this interval points backwards.
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// As a [`Duration`], `None` if negative.
    pub fn to_duration(&self) -> Option<Duration> {
        u64::try_from(self.0).ok().map(Duration::from_secs)
    }

    /// Decode the textual form, i.e. `7d`, `25h`, `63050` or `-1h`.
    pub fn decode(s: &str) -> Result<Interval, FieldError> {
        let unit = choice((
            chr('d').map(|_| DAY),
            chr('h').map(|_| HOUR),
            chr('m').map(|_| MINUTE),
            chr('s').map(|_| 1),
        ));

        let (neg, n, unit) = parse_all(
            (optional(token('-')), number::<_, u64>(), optional(unit)),
            s,
        )
        .map_err(|_| FieldError::MalformedInterval(s.to_string()))?;

        let secs = n
            .checked_mul(unit.unwrap_or(1))
            .and_then(|v| i64::try_from(v).ok())
            .ok_or_else(|| FieldError::MalformedInterval(s.to_string()))?;

        Ok(Interval(if neg.is_some() { -secs } else { secs }))
    }

    /// Encode to the canonical textual form.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "0");
        }
        if self.0 < 0 {
            write!(f, "-")?;
        }

        let secs = self.0.unsigned_abs();

        // Largest unit first, 86400 is "1d", not "24h" or "1440m".
        if secs % DAY == 0 {
            write!(f, "{}d", secs / DAY)
        } else if secs % HOUR == 0 {
            write!(f, "{}h", secs / HOUR)
        } else if secs % MINUTE == 0 {
            write!(f, "{}m", secs / MINUTE)
        } else {
            write!(f, "{}", secs)
        }
    }
}

/// Whole seconds of the duration, fractions are dropped. Durations longer
/// than `i64::MAX` seconds saturate.
impl From<Duration> for Interval {
    fn from(v: Duration) -> Self {
        Interval(i64::try_from(v.as_secs()).unwrap_or(i64::MAX))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_interval() {
        let cases = [
            ("0", 0),
            ("7d", 7 * 24 * 3600),
            ("25h", 25 * 3600),
            ("63050", 63050),
            ("5", 5),
            ("5s", 5),
            ("10m", 600),
            ("-1h", -3600),
        ];
        for (input, secs) in cases {
            assert_eq!(
                Interval::decode(input),
                Ok(Interval::from_secs(secs)),
                "decode {input}"
            );
        }
    }

    #[test]
    fn encode_interval() {
        let cases = [
            (0, "0"),
            (7 * 24 * 3600, "7d"),
            (25 * 3600, "25h"),
            (5, "5"),
            (90, "90"),
            (120, "2m"),
            (86400, "1d"),
            (63050, "63050"),
            (-3600, "-1h"),
        ];
        for (secs, output) in cases {
            assert_eq!(Interval::from_secs(secs).encode(), output);
        }
    }

    #[test]
    fn decode_malformed() {
        for input in ["7z", "", "d", "-", "1.5h", " 1h", "1h ", "h1", "--1"] {
            assert!(
                matches!(Interval::decode(input), Err(FieldError::MalformedInterval(_))),
                "decode {input:?}"
            );
        }
    }

    #[test]
    fn decode_overflow() {
        assert!(Interval::decode("99999999999999999999").is_err());
        assert!(Interval::decode("999999999999999999d").is_err());
        assert!(Interval::decode("9223372036854775808").is_err());
    }

    #[test]
    fn canonical_form_is_stable() {
        let i = Interval::decode("86400").unwrap();
        assert_eq!(i.encode(), "1d");
        assert_eq!(Interval::decode(&i.encode()), Ok(i));
    }

    #[test]
    fn constructors_saturate() {
        assert_eq!(Interval::from_days(i64::MAX / 1000).as_secs(), i64::MAX);
        assert_eq!(Interval::from_hours(i64::MIN / 60).as_secs(), i64::MIN);
        assert_eq!(Interval::from_mins(i64::MAX).as_secs(), i64::MAX);
        assert_eq!(Interval::from(Duration::MAX).as_secs(), i64::MAX);
        assert_eq!(Interval::from_days(2).as_secs(), 172800);
    }

    #[test]
    fn duration_conversion() {
        assert_eq!(
            Interval::from_hours(1).to_duration(),
            Some(Duration::from_secs(3600))
        );
        assert_eq!(Interval::from_hours(-1).to_duration(), None);
        assert_eq!(
            Interval::from(Duration::from_secs(604800)),
            Interval::from_days(7)
        );
    }
}
