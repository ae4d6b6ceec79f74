//! Redaction of personal data in logs.
//!
//! The `o=` line, `e=` and `p=` lines, connection addresses and `k=` keys
//! all say something about a person. Values wrapped in [`Pii`] format as
//! `{REDACTED}` when the `pii` feature is enabled, and as themselves
//! otherwise.
//!
//! Trace logs are not expected to be on in production and don't need it.

use std::fmt;

const REDACTED: &str = "{REDACTED}";

#[derive(Clone, Copy)]
pub(crate) struct Pii<T>(pub T);

impl<T: fmt::Display> fmt::Display for Pii<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if cfg!(feature = "pii") {
            f.write_str(REDACTED)
        } else {
            self.0.fmt(f)
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Pii<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if cfg!(feature = "pii") {
            f.write_str(REDACTED)
        } else {
            self.0.fmt(f)
        }
    }
}
