// src/types/features.rs
//! Auxiliary artifacts generated per résumé: cover letters and interview questions

use serde::{Deserialize, Serialize};

use super::options::CoverLetterStyle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverLetter {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub position: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub style: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Technical,
    Behavioral,
    Experience,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub answer_points: Vec<String>,
}

// ===== Request bodies =====

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverLetterRequest {
    pub company: String,
    pub position: String,
    pub style: CoverLetterStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterviewQuestionRequest {
    pub position: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_letter_request_wire_shape() {
        let body = CoverLetterRequest {
            company: "토스".to_string(),
            position: "백엔드".to_string(),
            style: CoverLetterStyle::Practical,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["style"], "practical");
        assert_eq!(json["company"], "토스");
    }

    #[test]
    fn test_question_kind_fallback() {
        let q: InterviewQuestion = serde_json::from_str(
            r#"{"question":"자기소개","type":"culture","answerPoints":["간결하게"]}"#,
        )
        .unwrap();
        assert_eq!(q.kind, QuestionKind::Other);
        assert_eq!(q.answer_points.len(), 1);
    }
}
