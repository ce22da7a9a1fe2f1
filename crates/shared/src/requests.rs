//! Request bodies and query strings.

use serde::{Deserialize, Serialize};
use talekeeper_domain::{Language, DEFAULT_PAGE_SIZE};

/// `POST /sessions/{id}/action`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    #[serde(default = "default_language")]
    pub language: String,
}

impl ActionRequest {
    pub fn new(action: impl Into<String>, language: Language) -> Self {
        Self {
            action: action.into(),
            language: language.code().to_string(),
        }
    }
}

fn default_language() -> String {
    Language::default().code().to_string()
}

/// Query of `GET /sessions/{id}/history`.
///
/// `offset` counts backwards from the newest turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub limit: usize,
    pub offset: usize,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

/// Query of `GET /sessions/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionListQuery {
    pub skip: usize,
    pub limit: usize,
}

impl Default for SessionListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
        }
    }
}

/// `POST /sessions/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
    pub start_prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_request_carries_language_code() {
        let body = serde_json::to_value(ActionRequest::new("open door", Language::Ru)).unwrap();
        assert_eq!(body["action"], "open door");
        assert_eq!(body["language"], "ru");
    }

    #[test]
    fn action_request_language_defaults_to_english() {
        let req: ActionRequest = serde_json::from_str(r#"{"action":"wait"}"#).unwrap();
        assert_eq!(req.language, "en");
    }
}
