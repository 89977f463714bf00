use super::{PageState, RequestSeq, RequestToken};
use crate::api_service::ApiClient;
use crate::intent::{classify, Intent, Route};

/// The home search box. Answers (general info and free text) render in
/// place; tool and navigational intents hand a Route back to the caller
/// and leave this page Idle.
pub struct HomePage {
    pub query: String,
    pub state: PageState<String>,
    seq: RequestSeq,
}

impl Default for HomePage {
    fn default() -> Self {
        Self::new()
    }
}

impl HomePage {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            state: PageState::Idle,
            seq: RequestSeq::default(),
        }
    }

    pub fn begin_query(&mut self, query: &str) -> Option<RequestToken> {
        if query.trim().is_empty() {
            self.state = PageState::Error("Please enter a question.".to_string());
            return None;
        }
        self.query = query.trim().to_string();
        self.state = PageState::Loading;
        Some(self.seq.begin())
    }

    /// Applies a classified assistant response. Returns the navigation
    /// target for tool/navigational intents; None means the result was
    /// rendered in place (or discarded as superseded).
    pub fn resolve(&mut self, token: RequestToken, outcome: Result<Intent, String>) -> Option<Route> {
        if !self.seq.is_current(token) {
            return None;
        }

        match outcome {
            Ok(intent) => match intent {
                Intent::GeneralInfo { answer } => {
                    self.state = PageState::Success(answer);
                    None
                }
                Intent::FreeText(text) => {
                    self.state = PageState::Success(text);
                    None
                }
                tool => {
                    // navigation clears the in-place answer area
                    self.state = PageState::Idle;
                    tool.route()
                }
            },
            Err(message) => {
                self.state = PageState::Error(message);
                None
            }
        }
    }

    pub async fn submit(&mut self, api: &ApiClient, query: &str) -> Option<Route> {
        let token = self.begin_query(query)?;
        let question = self.query.clone();
        let outcome = api
            .ask_assistant(&question)
            .await
            .map(|answer| classify(&answer))
            .map_err(|e| e.to_string());
        self.resolve(token, outcome)
    }

    pub fn render(&self) -> String {
        match &self.state {
            PageState::Idle => String::new(),
            PageState::Loading => "Thinking...".to_string(),
            PageState::Error(message) => format!("⚠️ {}", message),
            PageState::Success(answer) => answer.clone(),
        }
    }
}
