use std::fmt;

use crate::FieldError;

/// A single `a=` line.
///
/// `a=recvonly` is a flag, it has no value. `a=rtpmap:99 h263-1998/90000`
/// has the key `rtpmap` and the value `99 h263-1998/90000`. Note that
/// `a=foo:` is not a flag, it has an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    /// Attribute name, the part before the first `:`.
    pub key: String,
    /// Everything after the first `:`, verbatim. `None` for flags.
    pub value: Option<String>,
}

impl Attribute {
    /// A flag attribute, i.e. `a=recvonly`.
    pub fn flag(key: impl Into<String>) -> Self {
        Attribute {
            key: key.into(),
            value: None,
        }
    }

    /// A key/value attribute, i.e. `a=rtpmap:99 h263-1998/90000`.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Whether this is a flag, i.e. has no value.
    pub fn is_flag(&self) -> bool {
        self.value.is_none()
    }

    /// Decode the value of an `a=` line.
    ///
    /// Only the first `:` separates key from value, the rest of the line is
    /// kept as is (`a=fmtp:96 a=b:c` has value `96 a=b:c`).
    pub fn decode(s: &str) -> Result<Attribute, FieldError> {
        let (key, value) = match s.split_once(':') {
            Some((k, v)) => (k, Some(v)),
            None => (s, None),
        };

        if key.is_empty() {
            return Err(FieldError::MalformedAttribute(s.to_string()));
        }

        Ok(Attribute {
            key: key.to_string(),
            value: value.map(|v| v.to_string()),
        })
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{}:{}", self.key, v),
            None => write!(f, "{}", self.key),
        }
    }
}

/// Ordered list of attributes.
///
/// Keys may repeat (`a=rtpmap` once per payload type) and insertion order is
/// kept, which is also the order they are encoded in. Lookups by key return
/// the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    /// Create an empty list.
    pub fn new() -> Self {
        Attributes::default()
    }

    /// Append an attribute.
    pub fn push(&mut self, a: Attribute) {
        self.0.push(a);
    }

    /// Append a flag attribute.
    pub fn add_flag(&mut self, key: impl Into<String>) {
        self.push(Attribute::flag(key));
    }

    /// Append a key/value attribute.
    ///
    /// Multiple values are joined by a single space, so
    /// `add("rtpmap", &["99", "h263-1998/90000"])` gives
    /// `a=rtpmap:99 h263-1998/90000`.
    pub fn add<S: AsRef<str>>(&mut self, key: impl Into<String>, values: &[S]) {
        let value = values
            .iter()
            .map(|v| v.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        self.push(Attribute::new(key, value));
    }

    /// Whether there is a flag with the key.
    ///
    /// Only flags count, `a=foo:bar` doesn't make `flag("foo")` true.
    pub fn flag(&self, key: &str) -> bool {
        self.0.iter().any(|a| a.key == key && a.is_flag())
    }

    /// The value of the first attribute with the key.
    ///
    /// A flag gives `Some("")`, a missing key gives `None`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(|a| a.value.as_deref().unwrap_or(""))
    }

    /// The first attribute with the key.
    pub fn get(&self, key: &str) -> Option<&Attribute> {
        self.0.iter().find(|a| a.key == key)
    }

    /// All values for the key, in order. Flags are skipped.
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |a| a.key == key)
            .filter_map(|a| a.value.as_deref())
    }

    /// Remove all attributes with the key. Returns how many were removed.
    pub fn remove(&mut self, key: &str) -> usize {
        let before = self.0.len();
        self.0.retain(|a| a.key != key);
        before - self.0.len()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.0.iter()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<T: IntoIterator<Item = Attribute>>(iter: T) -> Self {
        Attributes(iter.into_iter().collect())
    }
}
