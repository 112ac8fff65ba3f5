use serde::{Deserialize, Serialize};

/// Identity of the signed-in operator, resolved by the surrounding
/// platform before any of these services run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    name: String,
    full_name: String,
}

impl SessionUser {
    /// Creates a session user from platform session data.
    #[must_use]
    pub fn new(name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
        }
    }

    /// Returns the stable user name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }
}
