//! JSON-array ledger of structured records.
//!
//! One file holding one JSON array, pretty-printed so it stays
//! human-inspectable. Every append rewrites the whole file; O(n) per append
//! is a known ceiling at this scale. A structurally equal record is skipped,
//! so re-submitting the same document is a no-op at this layer.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::ResumeRecord;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ledger file {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Ledger encoding failed: {0}")]
    Encode(serde_json::Error),

    #[error("Ledger I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct JsonLedger {
    path: PathBuf,
    /// Serializes writers: the load-check-rewrite sequence must not interleave.
    write_lock: Mutex<()>,
}

impl JsonLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a record unless a structurally equal one is already present.
    /// Returns whether the ledger changed.
    pub async fn append(&self, record: &ResumeRecord) -> Result<bool, LedgerError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        if records.contains(record) {
            info!("Duplicate record detected, ledger unchanged");
            return Ok(false);
        }

        records.push(record.clone());
        self.rewrite(&records).await?;
        debug!("Ledger now holds {} records", records.len());
        Ok(true)
    }

    /// Loads the full ledger; a missing file reads as empty.
    /// A file that exists but does not parse is surfaced as `Corrupt` and
    /// left exactly as it was; an append must never wipe it.
    pub async fn load(&self) -> Result<Vec<ResumeRecord>, LedgerError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| LedgerError::Corrupt {
                    path: self.path.clone(),
                    source,
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    // Write to a sibling temp file then rename, so a crash mid-write cannot
    // truncate the ledger.
    async fn rewrite(&self, records: &[ResumeRecord]) -> Result<(), LedgerError> {
        let json = serde_json::to_vec_pretty(records).map_err(LedgerError::Encode)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
