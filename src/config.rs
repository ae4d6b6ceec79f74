use crate::Decoder;

/// Customized config for creating a [`Decoder`].
///
/// ```
/// use str0m_sdp::DecoderConfig;
///
/// let decoder = DecoderConfig::new()
///     .set_strict_order(true)
///     .build();
/// ```
///
/// Configs implement [`Clone`] to help create multiple `Decoder` instances.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    pub(crate) strict_order: bool,
    pub(crate) ignore_unknown: bool,
}

impl DecoderConfig {
    /// Creates a new default config.
    pub fn new() -> Self {
        DecoderConfig::default()
    }

    /// Toggle strict line ordering.
    ///
    /// RFC 4566 mandates the order `v o s i u e p c b t r z k a` for the
    /// session and `m i c b k a` for each media. Many implementations in the
    /// wild are sloppy about this, so by default the order is not checked.
    /// When enabled, a line appearing before one it should follow fails the
    /// decode.
    ///
    /// Defaults to `false`.
    pub fn set_strict_order(mut self, enabled: bool) -> Self {
        self.strict_order = enabled;
        self
    }

    /// Whether strict line ordering is enforced.
    pub fn strict_order(&self) -> bool {
        self.strict_order
    }

    /// Toggle skipping of unknown line types.
    ///
    /// When disabled, a line with a type outside the RFC 4566 set fails the
    /// decode instead of being skipped.
    ///
    /// Defaults to `true`.
    pub fn set_ignore_unknown(mut self, enabled: bool) -> Self {
        self.ignore_unknown = enabled;
        self
    }

    /// Whether unknown line types are skipped.
    pub fn ignore_unknown(&self) -> bool {
        self.ignore_unknown
    }

    /// Create a [`Decoder`] from this config.
    pub fn build(self) -> Decoder {
        Decoder::new(self)
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            strict_order: false,
            ignore_unknown: true,
        }
    }
}
