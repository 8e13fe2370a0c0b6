use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ClassId
///
/// Identity of a model class, as spelled in the configuration and in the
/// generated artifacts. For Rust models this is the full type path
/// (`my_app::models::Product`); it is the unit the naming function and the
/// metadata registry key on.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ClassId(String);

impl ClassId {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
