use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::ResumeRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Session returned by the upload endpoint. Absent sessions degrade to
    /// the no-resume reply.
    pub session_id: Option<Uuid>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/v1/chat
/// Echoes the message and surfaces the session's parsed record. A session
/// store failure is logged and treated as a missing session, never a 5xx.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    info!("Chatbot response requested");

    let record = match request.session_id {
        Some(session_id) => state.sessions.get(session_id).await.unwrap_or_else(|e| {
            warn!("Session lookup failed: {e}");
            None
        }),
        None => None,
    };

    let response = chat_reply(&request.message, record.as_ref());
    Ok(Json(ChatResponse { response }))
}

fn chat_reply(message: &str, record: Option<&ResumeRecord>) -> String {
    let (name, skills) = match record {
        Some(record) => (record.name.clone(), record.skills.join(", ")),
        None => ("N/A".to_string(), String::new()),
    };

    format!("You said: {message}\n\nHere's some info from the resume:\nName: {name}\nSkills: {skills}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_surfaces_name_and_joined_skills() {
        let record = ResumeRecord {
            name: "Jane Doe".to_string(),
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            ..Default::default()
        };

        let reply = chat_reply("hello", Some(&record));

        assert_eq!(
            reply,
            "You said: hello\n\nHere's some info from the resume:\nName: Jane Doe\nSkills: Rust, SQL"
        );
    }

    #[test]
    fn test_reply_without_record_reads_not_available() {
        let reply = chat_reply("anyone there?", None);

        assert!(reply.starts_with("You said: anyone there?"));
        assert!(reply.contains("Name: N/A"));
        assert!(reply.ends_with("Skills: "));
    }

    #[test]
    fn test_reply_keeps_empty_name_from_degraded_record() {
        // A record exists but carries an empty name: show it as-is, not N/A
        let record = ResumeRecord::default();

        let reply = chat_reply("hi", Some(&record));

        assert!(reply.contains("Name: \nSkills: "));
    }
}
