use crate::report::{ChannelAnalysisResult, OptimizationResult};
use crate::thumbnail::UploadedThumbnail;

/// Validation message shown when a content analysis is triggered with
/// neither a title nor a thumbnail.
pub const EMPTY_INPUT_MESSAGE: &str = "Please provide at least a title or a thumbnail.";

/// Generic failure text used when an error chain renders to nothing.
pub const FALLBACK_ERROR_MESSAGE: &str = "Analysis failed.";

/// Lifecycle of one asynchronous operation. The sum type keeps invalid
/// combinations (a loading state carrying a stale result) unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationState<R> {
    Idle,
    Loading,
    Success(R),
    Failure(String),
}

impl<R> OperationState<R> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn result(&self) -> Option<&R> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTab {
    Optimizer,
    ChannelSpy,
}

/// Inputs for one content optimization call. At least one of the two
/// fields is present; `AnalysisSession::begin_content_analysis` refuses to
/// construct a request otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentAnalysisRequest {
    pub title: String,
    pub thumbnail: Option<UploadedThumbnail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelAnalysisRequest {
    pub channel_name: String,
}

/// One user-facing analysis session: the transient inputs plus the two
/// independent operation state machines. Constructed explicitly so tests
/// and parallel sessions get fresh instances instead of ambient globals.
#[derive(Debug)]
pub struct AnalysisSession {
    title: String,
    thumbnail: Option<UploadedThumbnail>,
    channel_name: String,
    active_tab: ActiveTab,
    content: OperationState<OptimizationResult>,
    channel: OperationState<ChannelAnalysisResult>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            thumbnail: None,
            channel_name: String::new(),
            active_tab: ActiveTab::Optimizer,
            content: OperationState::Idle,
            channel: OperationState::Idle,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn thumbnail(&self) -> Option<&UploadedThumbnail> {
        self.thumbnail.as_ref()
    }

    pub fn set_thumbnail(&mut self, thumbnail: UploadedThumbnail) {
        self.thumbnail = Some(thumbnail);
    }

    pub fn clear_thumbnail(&mut self) {
        self.thumbnail = None;
    }

    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    pub fn set_channel_name(&mut self, name: impl Into<String>) {
        self.channel_name = name.into();
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: ActiveTab) {
        self.active_tab = tab;
    }

    /// The "optimize this idea" shortcut: adopt a suggested title and jump
    /// back to the optimizer tab.
    pub fn adopt_idea(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.active_tab = ActiveTab::Optimizer;
    }

    pub fn content_state(&self) -> &OperationState<OptimizationResult> {
        &self.content
    }

    pub fn channel_state(&self) -> &OperationState<ChannelAnalysisResult> {
        &self.channel
    }

    /// Starts a content analysis. With neither a title nor a thumbnail the
    /// state goes straight to failure with the fixed validation message and
    /// no request is constructed. Otherwise any previous result or error is
    /// discarded immediately and the state enters loading.
    pub fn begin_content_analysis(&mut self) -> Option<ContentAnalysisRequest> {
        if self.title.is_empty() && self.thumbnail.is_none() {
            self.content = OperationState::Failure(EMPTY_INPUT_MESSAGE.to_string());
            return None;
        }
        self.content = OperationState::Loading;
        Some(ContentAnalysisRequest {
            title: self.title.clone(),
            thumbnail: self.thumbnail.clone(),
        })
    }

    /// Applies the resolution of an in-flight content analysis. Resolutions
    /// arriving when the operation is no longer loading are discarded, so a
    /// reset session never sees a stale completion.
    pub fn finish_content_analysis(&mut self, outcome: Result<OptimizationResult, String>) {
        if !self.content.is_loading() {
            return;
        }
        self.content = match outcome {
            Ok(result) => OperationState::Success(result),
            Err(message) => OperationState::Failure(failure_message(message)),
        };
    }

    /// Starts a channel analysis. An explicit override (a preset shortcut)
    /// replaces the held input as an observable side effect before
    /// validation. An empty channel name makes the trigger a no-op.
    pub fn begin_channel_analysis(
        &mut self,
        override_name: Option<&str>,
    ) -> Option<ChannelAnalysisRequest> {
        if let Some(name) = override_name {
            self.channel_name = name.to_string();
        }
        if self.channel_name.trim().is_empty() {
            return None;
        }
        self.channel = OperationState::Loading;
        Some(ChannelAnalysisRequest {
            channel_name: self.channel_name.clone(),
        })
    }

    pub fn finish_channel_analysis(&mut self, outcome: Result<ChannelAnalysisResult, String>) {
        if !self.channel.is_loading() {
            return;
        }
        self.channel = match outcome {
            Ok(result) => OperationState::Success(result),
            Err(message) => OperationState::Failure(failure_message(message)),
        };
    }
}

fn failure_message(message: String) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::report::{parse_channel_result, parse_optimization_result, OptimizationResult};
    use crate::thumbnail::UploadedThumbnail;

    use super::{
        ActiveTab, AnalysisSession, OperationState, EMPTY_INPUT_MESSAGE, FALLBACK_ERROR_MESSAGE,
    };

    fn sample_result() -> OptimizationResult {
        parse_optimization_result(
            &json!({
                "overallScore": 92,
                "titleScore": 95,
                "thumbnailScore": 88,
                "titleFeedback": {
                    "strengths": ["Warning hook"],
                    "weaknesses": [],
                    "emotionalHooks": ["fear"]
                },
                "thumbnailFeedback": {
                    "composition": "Split frame",
                    "textOverlay": "BIG MISTAKE!",
                    "colorUsage": "High contrast",
                    "faceExpressions": "Shock"
                },
                "suggestions": {
                    "betterTitles": [],
                    "seoKeywords": ["folktale"],
                    "thumbnailImprovement": "None needed"
                },
                "competitorAnalysis": {
                    "styleMatchScore": 90,
                    "viralPatternUsed": "Warning hook",
                    "missingViralElements": []
                },
                "viralPrediction": "Strong"
            })
            .to_string(),
        )
        .expect("fixture parses")
    }

    fn sample_thumbnail() -> UploadedThumbnail {
        UploadedThumbnail {
            file_name: "thumb.png".to_string(),
            mime_type: "image/png".to_string(),
            data_url: "data:image/png;base64,Zm9v".to_string(),
        }
    }

    #[test]
    fn empty_inputs_fail_without_building_a_request() {
        let mut session = AnalysisSession::new();
        assert!(session.begin_content_analysis().is_none());
        assert_eq!(
            session.content_state().error(),
            Some(EMPTY_INPUT_MESSAGE)
        );
    }

    #[test]
    fn title_only_is_enough_to_start_loading() {
        let mut session = AnalysisSession::new();
        session.set_title("Why the Tortoise has a cracked shell");
        let request = session.begin_content_analysis().expect("request built");
        assert_eq!(request.title, "Why the Tortoise has a cracked shell");
        assert!(request.thumbnail.is_none());
        assert!(session.content_state().is_loading());
    }

    #[test]
    fn thumbnail_only_is_enough_to_start_loading() {
        let mut session = AnalysisSession::new();
        session.set_thumbnail(sample_thumbnail());
        let request = session.begin_content_analysis().expect("request built");
        assert_eq!(request.title, "");
        assert!(request.thumbnail.is_some());
    }

    #[test]
    fn success_then_retrigger_clears_the_previous_result() {
        let mut session = AnalysisSession::new();
        session.set_title("A title");
        session.begin_content_analysis();
        session.finish_content_analysis(Ok(sample_result()));
        assert!(session.content_state().result().is_some());

        session.begin_content_analysis();
        assert!(session.content_state().is_loading());
        assert!(session.content_state().result().is_none());
        assert!(session.content_state().error().is_none());
    }

    #[test]
    fn failure_stores_the_message_and_no_result() {
        let mut session = AnalysisSession::new();
        session.set_title("A title");
        session.begin_content_analysis();
        session.finish_content_analysis(Err("quota exhausted".to_string()));
        assert_eq!(session.content_state().error(), Some("quota exhausted"));
        assert!(session.content_state().result().is_none());
    }

    #[test]
    fn blank_failure_message_falls_back_to_generic_text() {
        let mut session = AnalysisSession::new();
        session.set_title("A title");
        session.begin_content_analysis();
        session.finish_content_analysis(Err("   ".to_string()));
        assert_eq!(
            session.content_state().error(),
            Some(FALLBACK_ERROR_MESSAGE)
        );
    }

    #[test]
    fn late_resolution_after_reset_is_discarded() {
        let mut session = AnalysisSession::new();
        session.set_title("A title");
        session.begin_content_analysis();
        session.finish_content_analysis(Err("first failure".to_string()));
        // A second resolution races in after the state left loading.
        session.finish_content_analysis(Ok(sample_result()));
        assert_eq!(session.content_state().error(), Some("first failure"));
    }

    #[test]
    fn empty_channel_name_trigger_is_a_noop() {
        let mut session = AnalysisSession::new();
        assert!(session.begin_channel_analysis(None).is_none());
        assert!(session.channel_state().is_idle());

        session.set_channel_name("   ");
        assert!(session.begin_channel_analysis(None).is_none());
        assert!(session.channel_state().is_idle());
    }

    #[test]
    fn preset_override_updates_the_held_input() {
        let mut session = AnalysisSession::new();
        session.set_channel_name("typed-by-hand");
        let request = session
            .begin_channel_analysis(Some("Nne's Folktales"))
            .expect("request built");
        assert_eq!(request.channel_name, "Nne's Folktales");
        assert_eq!(session.channel_name(), "Nne's Folktales");
        assert!(session.channel_state().is_loading());
    }

    #[test]
    fn channel_success_transition() -> anyhow::Result<()> {
        let result = parse_channel_result(
            &json!({
                "channelName": "Nne's Folktales",
                "niche": "Folktales",
                "winningFormula": "Karma arcs",
                "mostRewatchedPatterns": ["The Reveal"],
                "audienceCraving": "More twists",
                "contentGaps": []
            })
            .to_string(),
        )?;
        let mut session = AnalysisSession::new();
        session.begin_channel_analysis(Some("Nne's Folktales"));
        session.finish_channel_analysis(Ok(result.clone()));
        assert_eq!(session.channel_state().result(), Some(&result));
        Ok(())
    }

    #[test]
    fn adopt_idea_sets_title_and_switches_tab() {
        let mut session = AnalysisSession::new();
        session.set_active_tab(ActiveTab::ChannelSpy);
        session.adopt_idea("WATCH THIS BEFORE You Lend Money to Family!");
        assert_eq!(session.active_tab(), ActiveTab::Optimizer);
        assert_eq!(
            session.title(),
            "WATCH THIS BEFORE You Lend Money to Family!"
        );
    }

    #[test]
    fn operations_are_independent() {
        let mut session = AnalysisSession::new();
        session.set_title("A title");
        session.begin_content_analysis();
        session.begin_channel_analysis(Some("Nne's Folktales"));
        session.finish_content_analysis(Err("content failed".to_string()));
        assert!(session.channel_state().is_loading());
        assert!(matches!(
            session.content_state(),
            OperationState::Failure(_)
        ));
    }
}
