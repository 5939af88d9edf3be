use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answers::repo_types::{Answer, AnswerWithAuthor};

#[derive(Debug, Deserialize)]
pub struct PostAnswerRequest {
    pub answer: String,
}

/// An absent or empty body keeps the stored answer text.
#[derive(Debug, Deserialize)]
pub struct UpdateAnswerRequest {
    pub answer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnswerListResponse {
    pub status: &'static str,
    pub questionid: Uuid,
    pub total_answers: usize,
    pub data: Vec<AnswerWithAuthor>,
}

#[derive(Debug, Serialize)]
pub struct CreatedAnswerResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub data: Answer,
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

    #[test]
    fn answer_list_is_valid_when_empty() {
        let res = AnswerListResponse {
            status: "success",
            questionid: Uuid::new_v4(),
            total_answers: 0,
            data: vec![],
        };
        let json = serde_json::to_string(&res).unwrap();
        assert!(json.contains("\"total_answers\":0"));
        assert!(json.contains("\"data\":[]"));
    }

    #[test]
    fn created_answer_serialization() {
        let res = CreatedAnswerResponse {
            status: "success",
            message: "Answer posted successfully",
            data: Answer {
                answerid: Uuid::new_v4(),
                questionid: Uuid::new_v4(),
                userid: Uuid::new_v4(),
                answer: "Use the borrow checker.".into(),
                created_at: OffsetDateTime::now_utc(),
            },
        };
        let json = serde_json::to_string(&res).unwrap();
        assert!(json.contains("Answer posted successfully"));
        assert!(json.contains("\"answerid\""));
    }
}
