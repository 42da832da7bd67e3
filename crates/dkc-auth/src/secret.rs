use std::fmt;

use zeroize::Zeroizing;

/// Long-lived master key exchanged for short-lived access tokens.
///
/// Never persisted. The backing string is zeroized on drop and `Debug`
/// output is redacted so the key can't leak through tracing fields.
#[derive(Clone)]
pub struct MasterKey(Zeroizing<String>);

impl MasterKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Zeroizing::new(key.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey(***)")
    }
}

impl From<String> for MasterKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl From<&str> for MasterKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}
