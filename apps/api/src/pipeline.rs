//! Pipeline orchestrator: runs one upload from extraction through persistence.
//!
//! The degraded branch is entered only on a service failure from the model;
//! a malformed model response has already been absorbed by the structurer as
//! an empty record. Store failures after successful structuring do not fail
//! the run; the outcome carries them as warnings instead.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{error, info, warn};

use crate::extract::{self, DocumentKind, ExtractError};
use crate::models::ResumeRecord;
use crate::parser::{fallback, ResumeStructurer};
use crate::store::ledger::JsonLedger;
use crate::store::resumes;

/// What one pipeline run produced: the structured record, the resumes-table
/// row id (absent when that insert failed), and one warning per degraded
/// store.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub record: ResumeRecord,
    pub row_id: Option<i64>,
    pub warnings: Vec<String>,
}

#[derive(Clone)]
pub struct Pipeline {
    structurer: ResumeStructurer,
    ledger: Arc<JsonLedger>,
    db: SqlitePool,
}

impl Pipeline {
    pub fn new(structurer: ResumeStructurer, ledger: Arc<JsonLedger>, db: SqlitePool) -> Self {
        Self {
            structurer,
            ledger,
            db,
        }
    }

    /// Runs the full pipeline on one uploaded document. Unsupported formats
    /// and unreadable documents are the only terminal failures.
    pub async fn process(
        &self,
        bytes: &[u8],
        filename: &str,
    ) -> Result<PipelineOutcome, ExtractError> {
        info!("Processing resume: {filename}");

        let kind = DocumentKind::from_filename(filename)?;
        let text = extract::extract(bytes, kind)?;

        let record = match self.structurer.structure(&text).await {
            Ok(record) => record,
            Err(e) => {
                warn!("Model call failed, switching to fallback structuring: {e}");
                fallback::structure_fallback(bytes, kind)?
            }
        };

        let mut warnings = Vec::new();

        match self.ledger.append(&record).await {
            Ok(true) => info!("Record appended to ledger"),
            Ok(false) => info!("Record already present in ledger"),
            Err(e) => {
                error!("Ledger append failed: {e}");
                warnings.push(format!("record not added to ledger: {e}"));
            }
        }

        let row_id = match resumes::insert_resume(&self.db, filename, &text, &record.skills_column())
            .await
        {
            Ok(id) => Some(id),
            Err(e) => {
                error!("Resume row insert failed: {e}");
                warnings.push(format!("resume row not stored: {e}"));
                None
            }
        };

        info!("Resume processing completed: {filename}");

        Ok(PipelineOutcome {
            record,
            row_id,
            warnings,
        })
    }
}
