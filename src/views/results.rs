// src/views/results.rs
//! Results dashboard model derived from a backend analysis

use serde::Serialize;

use crate::navigation::Route;
use crate::session::QueryState;
use crate::types::{
    AnalysisResult, CompetitiveAnalysis, Priority, ResumeId, SuggestionKind,
};

/// Placeholder for competitive metrics the backend has not filled in
const PENDING_METRIC: &str = "분석 중";

/// Standing expressed by a free-text competitive metric such as "상위 10%"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitiveStanding {
    AboveAverage,
    BelowAverage,
    Neutral,
}

impl CompetitiveStanding {
    pub fn classify(text: &str) -> Self {
        if text.contains("상위") {
            CompetitiveStanding::AboveAverage
        } else if text.contains("하위") {
            CompetitiveStanding::BelowAverage
        } else {
            CompetitiveStanding::Neutral
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            CompetitiveStanding::AboveAverage => "standing-up",
            CompetitiveStanding::BelowAverage => "standing-down",
            CompetitiveStanding::Neutral => "standing-flat",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            CompetitiveStanding::AboveAverage => "▲",
            CompetitiveStanding::BelowAverage => "▼",
            CompetitiveStanding::Neutral => "―",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    High,
    Medium,
    Low,
}

impl MatchTier {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            MatchTier::High
        } else if percentage >= 80.0 {
            MatchTier::Medium
        } else {
            MatchTier::Low
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            MatchTier::High => "match-high",
            MatchTier::Medium => "match-medium",
            MatchTier::Low => "match-low",
        }
    }
}

pub fn suggestion_label(kind: SuggestionKind) -> &'static str {
    match kind {
        SuggestionKind::Strength => "강점",
        SuggestionKind::Improvement => "개선",
        SuggestionKind::Suggestion => "제안",
    }
}

pub fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "우선순위 높음",
        Priority::Medium => "추천",
        Priority::Low | Priority::Other => "장기 계획",
    }
}

/// Numbers as the backend sent them: "85" rather than "85.0"
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
    pub standing: CompetitiveStanding,
    pub css_class: &'static str,
    pub icon: &'static str,
}

impl Metric {
    fn new(label: &'static str, raw: &str) -> Self {
        let value = if raw.trim().is_empty() {
            PENDING_METRIC.to_string()
        } else {
            raw.to_string()
        };
        let standing = CompetitiveStanding::classify(raw);
        Self {
            label,
            value,
            standing,
            css_class: standing.css_class(),
            icon: standing.icon(),
        }
    }
}

fn competitive_metrics(analysis: &CompetitiveAnalysis) -> Vec<Metric> {
    vec![
        Metric::new("기술 역량", &analysis.tech_skills),
        Metric::new("경력 경쟁력", &analysis.career_competitiveness),
        Metric::new("프로젝트 품질", &analysis.project_quality),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechBar {
    pub skill: String,
    pub label: String,
    /// Clamped to 0..=100 for the bar width
    pub width: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionCard {
    pub title: String,
    pub match_label: String,
    pub tier: MatchTier,
    pub css_class: &'static str,
    pub description: String,
    pub salary_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionItem {
    pub title: String,
    pub description: String,
    pub label: &'static str,
    pub css_class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillItem {
    pub skill: String,
    pub description: String,
    pub label: &'static str,
    pub css_class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsModel {
    pub resume_id: ResumeId,
    pub overall_score: String,
    pub tech_match: String,
    pub experience: String,
    pub position_count: usize,
    pub tech_stack: Vec<TechBar>,
    pub metrics: Vec<Metric>,
    pub positions: Vec<PositionCard>,
    pub suggestions: Vec<SuggestionItem>,
    pub skills: Vec<SkillItem>,
    pub features_path: String,
}

impl ResultsModel {
    pub fn new(resume_id: ResumeId, analysis: &AnalysisResult) -> Self {
        let tech_stack = analysis
            .tech_stack_analysis
            .iter()
            .map(|item| TechBar {
                skill: item.skill.clone(),
                label: format!("{}%", format_number(item.percentage)),
                width: item.percentage.clamp(0.0, 100.0).round() as u8,
            })
            .collect();

        let positions = analysis
            .recommended_positions
            .iter()
            .map(|position| {
                let tier = MatchTier::from_percentage(position.match_percentage);
                PositionCard {
                    title: position.title.clone(),
                    match_label: format!("{}% 매치", format_number(position.match_percentage)),
                    tier,
                    css_class: tier.css_class(),
                    description: position.description.clone(),
                    salary_range: position.salary_range.clone(),
                }
            })
            .collect::<Vec<_>>();

        let suggestions = analysis
            .improvement_suggestions
            .iter()
            .map(|s| SuggestionItem {
                title: s.title.clone(),
                description: s.description.clone(),
                label: suggestion_label(s.kind),
                css_class: match s.kind {
                    SuggestionKind::Strength => "tag-strength",
                    SuggestionKind::Improvement => "tag-improvement",
                    SuggestionKind::Suggestion => "tag-suggestion",
                },
            })
            .collect();

        let skills = analysis
            .skill_recommendations
            .iter()
            .map(|s| SkillItem {
                skill: s.skill.clone(),
                description: s.description.clone(),
                label: priority_label(s.priority),
                css_class: match s.priority {
                    Priority::High => "priority-high",
                    Priority::Medium => "priority-medium",
                    Priority::Low => "priority-low",
                    Priority::Other => "priority-other",
                },
            })
            .collect();

        Self {
            resume_id,
            overall_score: format_number(analysis.overall_score),
            tech_match: format!("{}%", format_number(analysis.tech_match)),
            experience: analysis.experience.clone(),
            position_count: positions.len(),
            tech_stack,
            metrics: competitive_metrics(&analysis.competitive_analysis),
            positions,
            suggestions,
            skills,
            features_path: Route::Features(Some(resume_id)).path(),
        }
    }

    pub fn has_tech_stack(&self) -> bool {
        !self.tech_stack.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResultsView {
    Loading,
    NotFound,
    Ready(ResultsModel),
}

impl ResultsView {
    /// Collapse an analysis read into what the page shows. A failed read is
    /// shown the same way as a missing analysis.
    pub fn from_query(
        resume_id: Option<ResumeId>,
        state: QueryState<Option<AnalysisResult>>,
    ) -> Self {
        let Some(resume_id) = resume_id else {
            return ResultsView::NotFound;
        };
        match state {
            QueryState::Loading => ResultsView::Loading,
            QueryState::Failed(_) | QueryState::Ready(None) => ResultsView::NotFound,
            QueryState::Ready(Some(analysis)) => {
                ResultsView::Ready(ResultsModel::new(resume_id, &analysis))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ImprovementSuggestion, RecommendedPosition, SkillRecommendation, TechStackItem,
    };

    fn id() -> ResumeId {
        ResumeId::new(42).unwrap()
    }

    fn analysis() -> AnalysisResult {
        AnalysisResult {
            overall_score: 85.0,
            tech_match: 78.5,
            experience: "3년".into(),
            recommended_positions: vec![
                RecommendedPosition {
                    title: "백엔드 개발자".into(),
                    match_percentage: 92.0,
                    description: String::new(),
                    salary_range: "4000-5000".into(),
                },
                RecommendedPosition {
                    title: "풀스택 개발자".into(),
                    match_percentage: 80.0,
                    description: String::new(),
                    salary_range: String::new(),
                },
                RecommendedPosition {
                    title: "데이터 엔지니어".into(),
                    match_percentage: 79.9,
                    description: String::new(),
                    salary_range: String::new(),
                },
            ],
            improvement_suggestions: vec![ImprovementSuggestion {
                kind: SuggestionKind::Strength,
                title: "탄탄한 백엔드 경험".into(),
                description: String::new(),
            }],
            skill_recommendations: vec![SkillRecommendation {
                skill: "Kubernetes".into(),
                priority: Priority::Medium,
                description: String::new(),
            }],
            competitive_analysis: CompetitiveAnalysis {
                tech_skills: "상위 10%".into(),
                career_competitiveness: "평균".into(),
                project_quality: String::new(),
            },
            tech_stack_analysis: vec![
                TechStackItem {
                    skill: "Java".into(),
                    percentage: 120.0,
                },
                TechStackItem {
                    skill: "Go".into(),
                    percentage: -5.0,
                },
            ],
        }
    }

    #[test]
    fn test_competitive_standing_classification() {
        assert_eq!(
            CompetitiveStanding::classify("상위 10%"),
            CompetitiveStanding::AboveAverage
        );
        assert_eq!(
            CompetitiveStanding::classify("하위 30%"),
            CompetitiveStanding::BelowAverage
        );
        assert_eq!(CompetitiveStanding::classify("평균"), CompetitiveStanding::Neutral);
        assert_eq!(CompetitiveStanding::classify(""), CompetitiveStanding::Neutral);
    }

    #[test]
    fn test_match_tier_boundaries() {
        assert_eq!(MatchTier::from_percentage(90.0), MatchTier::High);
        assert_eq!(MatchTier::from_percentage(89.9), MatchTier::Medium);
        assert_eq!(MatchTier::from_percentage(80.0), MatchTier::Medium);
        assert_eq!(MatchTier::from_percentage(79.9), MatchTier::Low);
    }

    #[test]
    fn test_model_from_analysis() {
        let model = ResultsModel::new(id(), &analysis());
        assert_eq!(model.overall_score, "85");
        assert_eq!(model.tech_match, "78.5%");
        assert_eq!(model.position_count, 3);
        assert_eq!(
            model.positions.iter().map(|p| p.tier).collect::<Vec<_>>(),
            vec![MatchTier::High, MatchTier::Medium, MatchTier::Low]
        );
        assert_eq!(model.positions[0].match_label, "92% 매치");
        assert_eq!(model.suggestions[0].label, "강점");
        assert_eq!(model.skills[0].label, "추천");
        assert_eq!(model.features_path, "/features/42");

        assert_eq!(model.metrics[0].standing, CompetitiveStanding::AboveAverage);
        assert_eq!(model.metrics[1].standing, CompetitiveStanding::Neutral);
        assert_eq!(model.metrics[2].value, "분석 중");
    }

    #[test]
    fn test_tech_bars_are_clamped() {
        let model = ResultsModel::new(id(), &analysis());
        assert!(model.has_tech_stack());
        assert_eq!(model.tech_stack[0].width, 100);
        assert_eq!(model.tech_stack[0].label, "120%");
        assert_eq!(model.tech_stack[1].width, 0);
    }

    #[test]
    fn test_empty_tech_stack_has_no_bars() {
        let mut sparse = analysis();
        sparse.tech_stack_analysis.clear();
        let model = ResultsModel::new(id(), &sparse);
        assert!(!model.has_tech_stack());
    }

    #[test]
    fn test_unknown_priority_renders_neutral() {
        let mut unusual = analysis();
        unusual.skill_recommendations[0].priority = Priority::Other;
        let model = ResultsModel::new(id(), &unusual);
        assert_eq!(model.skills[0].label, "장기 계획");
        assert_eq!(model.skills[0].css_class, "priority-other");
    }

    #[test]
    fn test_view_states() {
        assert_eq!(
            ResultsView::from_query(None, QueryState::Ready(Some(analysis()))),
            ResultsView::NotFound
        );
        assert_eq!(
            ResultsView::from_query(Some(id()), QueryState::Ready(None)),
            ResultsView::NotFound
        );
        assert_eq!(
            ResultsView::from_query(Some(id()), QueryState::Failed("502: down".into())),
            ResultsView::NotFound
        );
        assert_eq!(
            ResultsView::from_query(Some(id()), QueryState::Loading),
            ResultsView::Loading
        );
        assert!(matches!(
            ResultsView::from_query(Some(id()), QueryState::Ready(Some(analysis()))),
            ResultsView::Ready(_)
        ));
    }
}
