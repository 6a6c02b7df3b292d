//! Skill event and response envelopes exchanged with the voice platform.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const RESPONSE_VERSION: &str = "1.0";

/// Top-level event delivered for every skill invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillEvent {
    pub session: Session,
    pub request: SkillRequest,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub new: bool,
    pub application: Application,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

/// Request payload, discriminated by its `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum SkillRequest {
    LaunchRequest(RequestInfo),
    IntentRequest(IntentRequest),
    SessionEndedRequest(RequestInfo),
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    #[serde(default)]
    pub request_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    #[serde(default)]
    pub request_id: String,
    pub intent: Intent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl Intent {
    /// Trimmed value of `slot`, or `None` when absent or blank.
    pub fn slot_value(&self, slot: &str) -> Option<&str> {
        self.slots
            .get(slot)
            .and_then(|slot| slot.value.as_deref())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub value: Option<String>,
}

/// Response envelope returned to the voice platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    pub version: String,
    pub session_attributes: HashMap<String, serde_json::Value>,
    pub response: Speechlet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Speechlet {
    pub output_speech: OutputSpeech,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub ssml: String,
}

impl SkillResponse {
    /// Session-ending response that speaks the given SSML document.
    pub fn speak(ssml: String) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            session_attributes: HashMap::new(),
            response: Speechlet {
                output_speech: OutputSpeech {
                    kind: "SSML".to_string(),
                    ssml,
                },
                should_end_session: true,
            },
        }
    }
}
