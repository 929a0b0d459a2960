use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Parsed body of a content optimization response. Wire format is the
/// camelCase shape declared in [`crate::schema::optimization_schema`];
/// every field is required, so a response missing one fails at parse time
/// rather than at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub overall_score: f64,
    pub title_score: f64,
    pub thumbnail_score: f64,
    pub title_feedback: TitleFeedback,
    pub thumbnail_feedback: ThumbnailFeedback,
    pub suggestions: SuggestionSet,
    pub competitor_analysis: CompetitorAnalysis,
    pub viral_prediction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleFeedback {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub emotional_hooks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailFeedback {
    pub composition: String,
    pub text_overlay: String,
    pub color_usage: String,
    pub face_expressions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionSet {
    pub better_titles: Vec<TitleSuggestion>,
    pub seo_keywords: Vec<String>,
    pub thumbnail_improvement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleSuggestion {
    pub title: String,
    pub viral_score: f64,
    pub strategy: String,
    pub competitor_ref: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorAnalysis {
    pub style_match_score: f64,
    pub viral_pattern_used: String,
    pub missing_viral_elements: Vec<String>,
}

/// Parsed body of a channel deep dive response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAnalysisResult {
    pub channel_name: String,
    pub niche: String,
    pub winning_formula: String,
    pub most_rewatched_patterns: Vec<String>,
    pub content_gaps: Vec<ContentGap>,
    pub audience_craving: String,
}

/// A suggested video idea representing unmet audience demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentGap {
    pub title: String,
    pub reason: String,
    pub thumbnail_idea: String,
}

pub fn parse_optimization_result(text: &str) -> Result<OptimizationResult> {
    serde_json::from_str(text).context("model returned malformed optimization JSON")
}

pub fn parse_channel_result(text: &str) -> Result<ChannelAnalysisResult> {
    serde_json::from_str(text).context("model returned malformed channel analysis JSON")
}
