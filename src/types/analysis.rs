// src/types/analysis.rs
//! Analysis results as computed by the backend. Read-only on this side.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub overall_score: f64,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub tech_match: f64,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub experience: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub recommended_positions: Vec<RecommendedPosition>,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub improvement_suggestions: Vec<ImprovementSuggestion>,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub skill_recommendations: Vec<SkillRecommendation>,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub competitive_analysis: CompetitiveAnalysis,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub tech_stack_analysis: Vec<TechStackItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedPosition {
    pub title: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub match_percentage: f64,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub salary_range: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Strength,
    Improvement,
    #[serde(other)]
    Suggestion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementSuggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub title: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecommendation {
    pub skill: String,
    pub priority: Priority,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitiveAnalysis {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub tech_skills: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub career_competitiveness: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub project_quality: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechStackItem {
    pub skill: String,
    pub percentage: f64,
}
