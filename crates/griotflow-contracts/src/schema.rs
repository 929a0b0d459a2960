use serde_json::{json, Value};

/// Strict output schema for a content optimization call.
///
/// Every field the report renderer reads is declared here and marked
/// required, so a conforming response always parses into a complete
/// `OptimizationResult`. A response that drops a required field anyway is a
/// contract violation by the model and surfaces as a parse error.
pub fn optimization_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "overallScore": { "type": "NUMBER", "description": "Overall rating from 0 to 100" },
            "titleScore": { "type": "NUMBER", "description": "Title specific rating 0-100" },
            "thumbnailScore": { "type": "NUMBER", "description": "Thumbnail specific rating 0-100" },
            "titleFeedback": {
                "type": "OBJECT",
                "properties": {
                    "strengths": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "weaknesses": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "emotionalHooks": { "type": "ARRAY", "items": { "type": "STRING" } },
                },
                "required": ["strengths", "weaknesses", "emotionalHooks"],
            },
            "thumbnailFeedback": {
                "type": "OBJECT",
                "properties": {
                    "composition": { "type": "STRING" },
                    "textOverlay": { "type": "STRING" },
                    "colorUsage": { "type": "STRING" },
                    "faceExpressions": { "type": "STRING" },
                },
                "required": ["composition", "textOverlay", "colorUsage", "faceExpressions"],
            },
            "suggestions": {
                "type": "OBJECT",
                "properties": {
                    "betterTitles": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "title": { "type": "STRING" },
                                "viralScore": { "type": "NUMBER" },
                                "strategy": { "type": "STRING", "description": "The psychological trigger used, e.g. 'Negative Urgency'" },
                                "competitorRef": { "type": "STRING", "description": "Which viral pattern this mimics" },
                            },
                            "required": ["title", "viralScore", "strategy", "competitorRef"],
                        },
                    },
                    "seoKeywords": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "thumbnailImprovement": { "type": "STRING" },
                },
                "required": ["betterTitles", "seoKeywords", "thumbnailImprovement"],
            },
            "competitorAnalysis": {
                "type": "OBJECT",
                "properties": {
                    "styleMatchScore": { "type": "NUMBER" },
                    "viralPatternUsed": { "type": "STRING" },
                    "missingViralElements": { "type": "ARRAY", "items": { "type": "STRING" } },
                },
                "required": ["styleMatchScore", "viralPatternUsed", "missingViralElements"],
            },
            "viralPrediction": { "type": "STRING" },
        },
        "required": [
            "overallScore",
            "titleScore",
            "thumbnailScore",
            "titleFeedback",
            "thumbnailFeedback",
            "suggestions",
            "competitorAnalysis",
            "viralPrediction",
        ],
    })
}

/// Strict output schema for a channel deep dive.
pub fn channel_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "channelName": { "type": "STRING" },
            "niche": { "type": "STRING" },
            "winningFormula": { "type": "STRING", "description": "The secret sauce of this channel's success" },
            "mostRewatchedPatterns": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Moments viewers rewatch the most",
            },
            "audienceCraving": { "type": "STRING", "description": "What the audience is asking for in comments" },
            "contentGaps": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING", "description": "Viral style title" },
                        "reason": { "type": "STRING", "description": "Why this will work now" },
                        "thumbnailIdea": { "type": "STRING", "description": "Visual concept" },
                    },
                    "required": ["title", "reason", "thumbnailIdea"],
                },
            },
        },
        "required": [
            "channelName",
            "niche",
            "winningFormula",
            "mostRewatchedPatterns",
            "audienceCraving",
            "contentGaps",
        ],
    })
}
