/// ID types for Mixdesk entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one uploaded audio version
///
/// Owned by the external application; the engine treats it as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioVersionId(String);

impl AudioVersionId {
    /// Create a new audio version ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AudioVersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AudioVersionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
