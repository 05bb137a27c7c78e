//! Redis-backed session storage for parsed resumes.
//!
//! The upload handler stores the freshly structured record under a generated
//! session id; the chat handler reads it back. Entries expire on their own.

use redis::AsyncCommands;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ResumeRecord;

const SESSION_TTL_SECS: u64 = 3600;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Session payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct SessionStore {
    client: redis::Client,
}

impl SessionStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    /// Stores a record under a fresh session id, valid for one hour.
    pub async fn put(&self, record: &ResumeRecord) -> Result<Uuid, SessionError> {
        let session_id = Uuid::new_v4();
        let payload = serde_json::to_string(record)?;

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn
            .set_ex(session_key(session_id), payload, SESSION_TTL_SECS)
            .await?;

        Ok(session_id)
    }

    /// Reads a session's record back; `None` when missing or expired.
    pub async fn get(&self, session_id: Uuid) -> Result<Option<ResumeRecord>, SessionError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = conn.get(session_key(session_id)).await?;

        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

fn session_key(session_id: Uuid) -> String {
    format!("resume:session:{session_id}")
}
