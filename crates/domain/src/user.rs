use serde::{Deserialize, Serialize};
use stitchtrack_core::{AppResult, NonEmptyString};

/// An enabled platform user offered in the inspector dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledUser {
    name: NonEmptyString,
    full_name: String,
}

impl EnabledUser {
    /// Creates a dropdown entry; a blank full name falls back to the
    /// user name so every option stays readable.
    pub fn new(name: impl Into<String>, full_name: impl Into<String>) -> AppResult<Self> {
        let name = NonEmptyString::new(name)?;
        let full_name = full_name.into();
        let full_name = if full_name.trim().is_empty() {
            name.as_str().to_owned()
        } else {
            full_name
        };

        Ok(Self { name, full_name })
    }

    /// Returns the stable user name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }
}
