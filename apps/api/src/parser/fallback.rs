//! Deterministic local structuring used when the generative service fails.
//!
//! Runs on the basic extraction tier and fills only what can be read off the
//! raw text: the first line becomes the name and skills get a fixed
//! placeholder. The three section lists stay empty on purpose. No heuristics
//! beyond that: the degraded record is meant to look degraded.

use crate::extract::{self, DocumentKind, ExtractError};
use crate::models::ResumeRecord;

/// Placeholder skills emitted by the degraded path.
pub const FALLBACK_SKILLS: [&str; 2] = ["Python", "Flask"];

/// Builds a degraded record straight from the document bytes.
/// Extraction failures here are terminal, same as on the primary path.
pub fn structure_fallback(bytes: &[u8], kind: DocumentKind) -> Result<ResumeRecord, ExtractError> {
    let text = extract::extract_basic(bytes, kind)?;

    // First line verbatim, no trimming or validation.
    let name = text.lines().next().unwrap_or_default().to_string();

    Ok(ResumeRecord {
        name,
        skills: FALLBACK_SKILLS.iter().map(|s| s.to_string()).collect(),
        education: Vec::new(),
        projects: Vec::new(),
        experience: Vec::new(),
    })
}
