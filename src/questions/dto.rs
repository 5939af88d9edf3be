use serde::{Deserialize, Serialize};

use crate::questions::repo_types::{Question, QuestionWithAuthor};

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub title: String,
    pub tag: String,
    pub description: String,
}

/// Absent or empty fields keep their stored values.
#[derive(Debug, Deserialize)]
pub struct UpdateQuestionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub status: &'static str,
    pub total_questions: usize,
    pub data: Vec<QuestionWithAuthor>,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub status: &'static str,
    pub data: QuestionWithAuthor,
}

#[derive(Debug, Serialize)]
pub struct CreatedQuestionResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub data: Question,
}

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub status: &'static str,
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[test]
    fn list_response_serialization() {
        let res = QuestionListResponse {
            status: "success",
            total_questions: 1,
            data: vec![QuestionWithAuthor {
                questionid: Uuid::new_v4(),
                userid: Uuid::new_v4(),
                title: "How do lifetimes work?".into(),
                tag: "rust".into(),
                description: "Confused about 'a".into(),
                username: "alice".into(),
                created_at: OffsetDateTime::now_utc(),
            }],
        };
        let json = serde_json::to_string(&res).unwrap();
        assert!(json.contains("\"total_questions\":1"));
        assert!(json.contains("\"username\":\"alice\""));
        assert!(json.contains("\"status\":\"success\""));
    }

    #[test]
    fn update_request_fields_are_optional() {
        let req: UpdateQuestionRequest = serde_json::from_str(r#"{"title":"new"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("new"));
        assert!(req.description.is_none());
    }
}
