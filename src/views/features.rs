// src/views/features.rs
//! Features page model: cover-letter generator and interview question guide

use serde::Serialize;

use crate::session::QueryState;
use crate::types::{CoverLetter, CoverLetterStyle, InterviewQuestion, QuestionKind, ResumeId};
use crate::workflow::{FeaturesSession, MutationStatus};

const LETTER_PREVIEW_CHARS: usize = 200;

pub fn question_label(kind: QuestionKind) -> &'static str {
    match kind {
        QuestionKind::Technical => "기술 질문",
        QuestionKind::Behavioral => "행동 질문",
        QuestionKind::Experience => "경험 질문",
        QuestionKind::Other => "기타",
    }
}

fn question_class(kind: QuestionKind) -> &'static str {
    match kind {
        QuestionKind::Technical => "tag-technical",
        QuestionKind::Behavioral => "tag-behavioral",
        QuestionKind::Experience => "tag-experience",
        QuestionKind::Other => "tag-other",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterCard {
    /// 1-based position, used in download links
    pub index: usize,
    pub heading: String,
    pub style_label: String,
    pub preview: String,
}

impl LetterCard {
    fn new(index: usize, letter: &CoverLetter) -> Self {
        Self {
            index,
            heading: format!("{} - {}", letter.company, letter.position),
            style_label: CoverLetterStyle::label_for(&letter.style),
            // Always suffixed, even when the letter is shorter than the preview
            preview: format!(
                "{}...",
                letter.content.chars().take(LETTER_PREVIEW_CHARS).collect::<String>()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionCard {
    pub question: String,
    pub label: &'static str,
    pub css_class: &'static str,
    pub answer_points: Vec<String>,
}

impl From<&InterviewQuestion> for QuestionCard {
    fn from(question: &InterviewQuestion) -> Self {
        Self {
            question: question.question.clone(),
            label: question_label(question.kind),
            css_class: question_class(question.kind),
            answer_points: question.answer_points.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// State of a list read; failures render like an empty list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "items", rename_all = "snake_case")]
pub enum ListState<T> {
    Loading,
    Empty,
    Items(Vec<T>),
}

impl<T> ListState<T> {
    fn from_query<S>(state: QueryState<Vec<S>>, map: impl Fn(usize, &S) -> T) -> Self {
        match state {
            QueryState::Loading => ListState::Loading,
            QueryState::Failed(_) => ListState::Empty,
            QueryState::Ready(items) if items.is_empty() => ListState::Empty,
            QueryState::Ready(items) => ListState::Items(
                items.iter().enumerate().map(|(i, item)| map(i + 1, item)).collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverLetterPanel {
    pub company: String,
    pub position: String,
    pub styles: Vec<StyleOption>,
    pub pending: bool,
    /// Stored inputs are incomplete or a request is pending
    pub submit_disabled: bool,
    pub submit_label: &'static str,
    pub error: Option<String>,
    pub letters: ListState<LetterCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewPanel {
    pub position: String,
    pub pending: bool,
    pub submit_disabled: bool,
    pub submit_label: &'static str,
    pub error: Option<String>,
    pub questions: ListState<QuestionCard>,
}

fn submit_label(status: &MutationStatus, idle: &'static str) -> &'static str {
    if status.is_pending() {
        "생성 중..."
    } else {
        idle
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeaturesModel {
    pub resume_id: ResumeId,
    pub cover_letter: CoverLetterPanel,
    pub interview: InterviewPanel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "panels", rename_all = "snake_case")]
pub enum FeaturesView {
    /// No résumé selected; the page asks for an upload first
    MissingResume,
    Ready(FeaturesModel),
}

impl FeaturesView {
    pub fn build(
        session: &FeaturesSession,
        letters: QueryState<Vec<CoverLetter>>,
        questions: QueryState<Vec<InterviewQuestion>>,
    ) -> Self {
        let Some(resume_id) = session.resume_id() else {
            return FeaturesView::MissingResume;
        };

        let flow = session.cover_letter();
        let cover_letter = CoverLetterPanel {
            company: flow.company().to_string(),
            position: flow.position().to_string(),
            styles: CoverLetterStyle::ALL
                .iter()
                .map(|style| StyleOption {
                    value: style.value(),
                    label: style.label(),
                    selected: flow.style() == Some(*style),
                })
                .collect(),
            pending: flow.status().is_pending(),
            submit_disabled: !flow.can_submit(),
            submit_label: submit_label(flow.status(), "자기소개서 생성"),
            error: flow.status().error().map(str::to_string),
            letters: ListState::from_query(letters, LetterCard::new),
        };

        let flow = session.interview();
        let interview = InterviewPanel {
            position: flow.position().to_string(),
            pending: flow.status().is_pending(),
            submit_disabled: !flow.can_submit(),
            submit_label: submit_label(flow.status(), "질문 생성"),
            error: flow.status().error().map(str::to_string),
            questions: ListState::from_query(questions, |_, q| QuestionCard::from(q)),
        };

        FeaturesView::Ready(FeaturesModel {
            resume_id,
            cover_letter,
            interview,
        })
    }
}

/// Plain-text body offered when a generated letter is downloaded
pub fn letter_download_body(letter: &CoverLetter) -> String {
    format!(
        "{} - {}\n{}\n\n{}\n",
        letter.company,
        letter.position,
        CoverLetterStyle::label_for(&letter.style),
        letter.content
    )
}
