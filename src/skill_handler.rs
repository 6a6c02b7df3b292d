//! Skill event dispatch.
//!
//! Routes launch, intent, and session-ended requests to device calls and
//! turns the outcome into a spoken response. Device failures during an
//! intent become a spoken apology rather than an error.

use log::{debug, info, warn};

use crate::backends::{DeviceBackend, DeviceCommand};
use crate::catalog::load_catalog;
use crate::config::Config;
use crate::error::SkillError;
use crate::protocol::{Intent, SkillEvent, SkillRequest, SkillResponse};
use crate::resolver::resolve_album;
use crate::speech::speak;

pub const ALBUM_SLOT: &str = "albumName";
const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Applies `delta` to `current`, returning the new volume only when it stays
/// inside `[0, max_volume)`.
pub fn adjusted_volume(current: i32, delta: i32, max_volume: i32) -> Option<i32> {
    let next = current.checked_add(delta)?;
    (0..max_volume).contains(&next).then_some(next)
}

/// Handles skill events against one playback device.
pub struct SkillHandler<B: DeviceBackend> {
    backend: B,
    config: Config,
}

impl<B: DeviceBackend> SkillHandler<B> {
    pub fn new(backend: B, config: Config) -> Self {
        Self { backend, config }
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    fn device_name(&self) -> &str {
        &self.config.device.display_name
    }

    /// Handles one event. Session-ended requests produce no response.
    pub fn handle_event(&self, event: &SkillEvent) -> Result<Option<SkillResponse>, SkillError> {
        let application_id = &event.session.application.application_id;
        debug!("event.session.application.applicationId={}", application_id);
        if let Some(expected) = &self.config.skill.application_id {
            if application_id != expected {
                return Err(SkillError::InvalidApplicationId(application_id.clone()));
            }
        }

        match &event.request {
            SkillRequest::LaunchRequest(request) => {
                self.log_session_start(event, &request.request_id);
                info!(
                    "on_launch requestId={}, sessionId={}",
                    request.request_id, event.session.session_id
                );
                Ok(Some(self.welcome_response()))
            }
            SkillRequest::IntentRequest(request) => {
                self.log_session_start(event, &request.request_id);
                info!(
                    "on_intent requestId={}, sessionId={}, intent={}",
                    request.request_id, event.session.session_id, request.intent.name
                );
                self.handle_intent(&request.intent).map(Some)
            }
            SkillRequest::SessionEndedRequest(request) => {
                info!(
                    "on_session_ended requestId={}, sessionId={}",
                    request.request_id, event.session.session_id
                );
                Ok(None)
            }
            SkillRequest::Unsupported => Err(SkillError::UnsupportedRequest),
        }
    }

    fn log_session_start(&self, event: &SkillEvent, request_id: &str) {
        if event.session.new {
            info!(
                "on_session_started requestId={}, sessionId={}",
                request_id, event.session.session_id
            );
        }
    }

    fn welcome_response(&self) -> SkillResponse {
        SkillResponse::speak(speak(&format!(
            "Welcome to the {} Skill",
            self.device_name()
        )))
    }

    /// Runs one intent. Unknown intents are an error; device failures are
    /// reported to the user.
    pub fn handle_intent(&self, intent: &Intent) -> Result<SkillResponse, SkillError> {
        let text = match self.run_intent(intent) {
            Ok(text) => text,
            Err(SkillError::Device(err)) => {
                warn!("Intent {} failed: {}", intent.name, err);
                format!("I couldn't reach {}.", self.device_name())
            }
            Err(err) => return Err(err),
        };
        Ok(SkillResponse::speak(speak(&text)))
    }

    fn run_intent(&self, intent: &Intent) -> Result<String, SkillError> {
        let volume = &self.config.volume;
        match intent.name.as_str() {
            "Play" => self.transport(DeviceCommand::Play, "playing"),
            "Pause" => self.transport(DeviceCommand::Play, "pausing"),
            "Stop" => self.transport(DeviceCommand::Play, "stopping"),
            "PlayAlbum" => self.play_album(intent.slot_value(ALBUM_SLOT)),
            "Next" => self.transport(DeviceCommand::Next, "Next track"),
            "Back" => self.transport(DeviceCommand::Back, "Previous track"),
            "VolumeUp" => self.change_volume(volume.step, "Volume Up"),
            "VolumeReallyUp" => self.change_volume(volume.large_step, "Volume Really Up"),
            "VolumeDown" => self.change_volume(-volume.step, "Volume Down"),
            "VolumeReallyDown" => self.change_volume(-volume.large_step, "Volume Really Down"),
            other => Err(SkillError::InvalidIntent(other.to_string())),
        }
    }

    fn transport(&self, command: DeviceCommand, phrase: &str) -> Result<String, SkillError> {
        self.backend.send_command(&command)?;
        Ok(format!("{} {}", self.device_name(), phrase))
    }

    fn play_album(&self, query: Option<&str>) -> Result<String, SkillError> {
        let Some(query) = query else {
            return Ok("I dont know which album you want me to play.".to_string());
        };

        let (catalog, _) = load_catalog(&self.backend, &self.config.catalog)?;
        let result = resolve_album(&catalog, query);
        debug!(
            "Best match for '{}': '{}' score={:.3}",
            query, result.matched_key, result.score
        );

        let Some(id) = result.id else {
            return Ok(format!("I dont know the album {query}"));
        };
        self.backend.send_command(&DeviceCommand::PlayId(id.clone()))?;
        let artist = catalog.artist(&id).unwrap_or(UNKNOWN_ARTIST);
        Ok(format!(
            "{} playing album {} by {}",
            self.device_name(),
            result.matched_key,
            artist
        ))
    }

    fn change_volume(&self, delta: i32, phrase: &str) -> Result<String, SkillError> {
        let status = self.backend.fetch_status()?;
        match adjusted_volume(status.volume, delta, self.config.volume.max_volume) {
            Some(next) => self.backend.send_command(&DeviceCommand::SetVolume(next))?,
            None => info!(
                "Volume {} {:+} leaves the device range. Leaving volume unchanged.",
                status.volume, delta
            ),
        }
        Ok(format!("{} {}", self.device_name(), phrase))
    }
}
