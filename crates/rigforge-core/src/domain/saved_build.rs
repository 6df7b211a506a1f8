//! Named, persisted build snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::BuildConfig;

/// Unique identifier for a saved build
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildId(String);

impl BuildId {
    /// Generate a new random BuildId
    pub fn new() -> Self {
        BuildId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BuildId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for BuildId {
    fn from(s: &str) -> Self {
        BuildId(s.to_string())
    }
}

impl From<String> for BuildId {
    fn from(s: String) -> Self {
        BuildId(s)
    }
}

impl std::fmt::Display for BuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A build persisted under a name.
///
/// Records are never edited in place: the repository hands out copies, so
/// changing a returned value has no effect on what is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedBuild {
    pub id: BuildId,
    pub name: String,
    pub config: BuildConfig,
    /// Sum of component prices at save time.
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
}
