use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use griotflow_contracts::events::SessionLog;
use griotflow_contracts::prompts::{channel_prompt, content_prompt, GEMINI_MODEL};
use griotflow_contracts::report::{
    parse_channel_result, parse_optimization_result, ChannelAnalysisResult, OptimizationResult,
};
use griotflow_contracts::schema::{channel_schema, optimization_schema};
use griotflow_contracts::session::{AnalysisSession, ChannelAnalysisRequest, ContentAnalysisRequest};
use reqwest::blocking::{Client as HttpClient, Response as HttpResponse};
use serde_json::{json, Map, Value};

const ERROR_TEXT_MAX_CHARS: usize = 400;

/// Provider-agnostic request: one bound contract (system instruction plus
/// strict output schema) and the user-turn parts.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub model: String,
    pub system_instruction: String,
    pub response_schema: Value,
    pub parts: Vec<Value>,
}

/// Seam between request shaping and transport. Implementations return the
/// raw text body; parsing into a typed report happens in the engine.
pub trait TextModelProvider {
    fn name(&self) -> &str;
    fn generate(&self, request: &ModelRequest) -> Result<String>;
}

/// Gemini `generateContent` over REST with a declared response schema.
pub struct GeminiProvider {
    api_base: String,
    http: HttpClient,
}

impl GeminiProvider {
    pub fn new() -> Self {
        Self {
            api_base: env::var("GEMINI_API_BASE")
                .ok()
                .map(|value| value.trim().trim_end_matches('/').to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            http: HttpClient::new(),
        }
    }

    fn api_key() -> Option<String> {
        non_empty_env("GEMINI_API_KEY").or_else(|| non_empty_env("GOOGLE_API_KEY"))
    }

    fn endpoint_for_model(&self, model: &str) -> String {
        let trimmed = model.trim();
        let model_path = if trimmed.starts_with("models/") {
            trimmed.to_string()
        } else {
            format!("models/{trimmed}")
        };
        format!("{}/{}:generateContent", self.api_base, model_path)
    }

    fn build_payload(request: &ModelRequest) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": request.parts,
            }],
            "systemInstruction": {
                "parts": [{ "text": request.system_instruction }],
            },
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema,
            },
        })
    }

    fn extract_text(response_payload: &Value) -> String {
        let candidates = response_payload
            .get("candidates")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let mut out = String::new();
        for candidate in candidates {
            let parts = candidate
                .get("content")
                .and_then(Value::as_object)
                .and_then(|content| content.get("parts"))
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            for part in parts {
                if let Some(text) = part.get("text").and_then(Value::as_str) {
                    out.push_str(text);
                }
            }
        }
        out
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TextModelProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate(&self, request: &ModelRequest) -> Result<String> {
        // Credential check happens before any network activity.
        let Some(api_key) = Self::api_key() else {
            bail!("GEMINI_API_KEY or GOOGLE_API_KEY not set");
        };
        let endpoint = self.endpoint_for_model(&request.model);
        let response = self
            .http
            .post(&endpoint)
            .query(&[("key", api_key)])
            .json(&Self::build_payload(request))
            .send()
            .with_context(|| format!("Gemini request failed ({endpoint})"))?;
        let response_payload = response_json_or_error("Gemini", response)?;
        let text = Self::extract_text(&response_payload);
        if text.trim().is_empty() {
            bail!("Gemini returned no text body");
        }
        Ok(text)
    }
}

/// Offline provider: echoes a canned body without touching the network.
pub struct DryrunProvider {
    body: String,
}

impl DryrunProvider {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl TextModelProvider for DryrunProvider {
    fn name(&self) -> &str {
        "dryrun"
    }

    fn generate(&self, _request: &ModelRequest) -> Result<String> {
        Ok(self.body.clone())
    }
}

/// The analysis client. Stateless between calls: each invocation builds
/// its own request, invokes the bound provider once, and parses the body.
/// It logs a diagnostic event per outcome and re-raises every failure;
/// recovery belongs to the session drivers below.
pub struct AnalysisEngine {
    model: String,
    provider: Box<dyn TextModelProvider>,
    log: SessionLog,
}

impl AnalysisEngine {
    pub fn new(events_path: impl Into<PathBuf>, model: Option<String>) -> Self {
        Self::with_provider(events_path, model, Box::new(GeminiProvider::new()))
    }

    pub fn with_provider(
        events_path: impl Into<PathBuf>,
        model: Option<String>,
        provider: Box<dyn TextModelProvider>,
    ) -> Self {
        Self {
            model: model.unwrap_or_else(|| GEMINI_MODEL.to_string()),
            provider,
            log: SessionLog::for_new_session(events_path),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn session_log(&self) -> SessionLog {
        self.log.clone()
    }

    /// Scores a title/thumbnail pair against the content-optimization
    /// contract. The caller guarantees at least one input is present; an
    /// empty pair is not rejected here, the model just sees low signal.
    pub fn analyze_content(&self, request: &ContentAnalysisRequest) -> Result<OptimizationResult> {
        let mut parts = Vec::new();
        if let Some(thumbnail) = request.thumbnail.as_ref() {
            // The reference wire shape always declares PNG for the inline
            // attachment regardless of the source file.
            parts.push(json!({
                "inlineData": {
                    "mimeType": "image/png",
                    "data": thumbnail.inline_payload(),
                }
            }));
        }
        parts.push(json!({
            "text": content_prompt(&request.title, request.thumbnail.is_some()),
        }));

        self.record(
            "content_analysis_started",
            json!({
                "provider": self.provider.name(),
                "model": self.model,
                "title_chars": request.title.chars().count(),
                "has_thumbnail": request.thumbnail.is_some(),
            }),
        );

        let model_request = ModelRequest {
            model: self.model.clone(),
            system_instruction: griotflow_contracts::prompts::SYSTEM_INSTRUCTION.to_string(),
            response_schema: optimization_schema(),
            parts,
        };
        let outcome = self
            .provider
            .generate(&model_request)
            .and_then(|text| parse_optimization_result(&text));
        match outcome {
            Ok(result) => {
                self.record(
                    "content_analysis_completed",
                    json!({ "overall_score": result.overall_score }),
                );
                Ok(result)
            }
            Err(err) => {
                self.record(
                    "content_analysis_failed",
                    json!({ "error": error_chain_text(&err, ERROR_TEXT_MAX_CHARS) }),
                );
                Err(err)
            }
        }
    }

    /// Runs a channel deep dive against the channel-analysis contract.
    pub fn analyze_channel(
        &self,
        request: &ChannelAnalysisRequest,
    ) -> Result<ChannelAnalysisResult> {
        self.record(
            "channel_analysis_started",
            json!({
                "provider": self.provider.name(),
                "model": self.model,
                "channel_name": request.channel_name,
            }),
        );

        let model_request = ModelRequest {
            model: self.model.clone(),
            system_instruction: griotflow_contracts::prompts::CHANNEL_SYSTEM_INSTRUCTION
                .to_string(),
            response_schema: channel_schema(),
            parts: vec![json!({ "text": channel_prompt(&request.channel_name) })],
        };
        let outcome = self
            .provider
            .generate(&model_request)
            .and_then(|text| parse_channel_result(&text));
        match outcome {
            Ok(result) => {
                self.record(
                    "channel_analysis_completed",
                    json!({ "niche": result.niche }),
                );
                Ok(result)
            }
            Err(err) => {
                self.record(
                    "channel_analysis_failed",
                    json!({ "error": error_chain_text(&err, ERROR_TEXT_MAX_CHARS) }),
                );
                Err(err)
            }
        }
    }

    /// Recovery boundary for content analysis: begin, call, finish. Every
    /// failure ends up as a message in session state; nothing propagates.
    pub fn drive_content_analysis(&self, session: &mut AnalysisSession) {
        let Some(request) = session.begin_content_analysis() else {
            return;
        };
        let outcome = self
            .analyze_content(&request)
            .map_err(|err| error_chain_text(&err, ERROR_TEXT_MAX_CHARS));
        session.finish_content_analysis(outcome);
    }

    /// Recovery boundary for channel analysis; `override_name` is the
    /// preset shortcut path and also updates the session's held input.
    pub fn drive_channel_analysis(
        &self,
        session: &mut AnalysisSession,
        override_name: Option<&str>,
    ) {
        let Some(request) = session.begin_channel_analysis(override_name) else {
            return;
        };
        let outcome = self
            .analyze_channel(&request)
            .map_err(|err| error_chain_text(&err, ERROR_TEXT_MAX_CHARS));
        session.finish_channel_analysis(outcome);
    }

    fn record(&self, event_type: &str, payload: Value) {
        // Diagnostics must never mask the analysis outcome.
        let _ = self.log.record(event_type, map_object(payload));
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn response_json_or_error(provider: &str, response: HttpResponse) -> Result<Value> {
    let status = response.status();
    let code = status.as_u16();
    let body = response
        .text()
        .with_context(|| format!("{provider} response body read failed"))?;
    if !status.is_success() {
        bail!(
            "{provider} request failed ({code}): {}",
            truncate_text(&body, 512)
        );
    }
    let parsed: Value = serde_json::from_str(&body)
        .with_context(|| format!("{provider} returned invalid JSON payload"))?;
    Ok(parsed)
}

/// Flattens an error chain to one bounded line for session state and the
/// event log.
pub fn error_chain_text(err: &anyhow::Error, max_chars: usize) -> String {
    let mut parts = Vec::new();
    for cause in err.chain() {
        let text = cause.to_string();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        if parts
            .last()
            .map(|existing| existing == trimmed)
            .unwrap_or(false)
        {
            continue;
        }
        parts.push(trimmed.to_string());
    }
    if parts.is_empty() {
        return truncate_text(&err.to_string(), max_chars);
    }
    truncate_text(&parts.join(" | caused by: "), max_chars)
}

fn truncate_text(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    value.chars().take(max_chars).collect::<String>() + "…"
}

fn map_object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}
