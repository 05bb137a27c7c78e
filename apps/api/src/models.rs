use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// The structured form of a parsed resume.
///
/// Serialized with PascalCase keys (`Name`, `Skills`, ...). All five keys are
/// always present (possibly empty, never absent or null) so consumers read
/// them unconditionally. Missing keys on deserialization default to empty.
/// The three section lists stay loosely typed because the model-sourced
/// schema is validated for shape only, not per-entry structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResumeRecord {
    pub name: String,
    pub skills: Vec<String>,
    pub education: Vec<Value>,
    pub projects: Vec<Value>,
    pub experience: Vec<Value>,
}

impl ResumeRecord {
    /// Skills as stored in the `resumes.skills` column: a JSON array string.
    /// Comma-joining would be ambiguous for skills that contain commas.
    pub fn skills_column(&self) -> String {
        serde_json::to_string(&self.skills).unwrap_or_default()
    }
}

/// One row of the `resumes` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StoredResume {
    pub id: i64,
    pub filename: String,
    pub content: String,
    pub skills: String,
}
