//! Device backend abstractions and the concrete Brennan implementation.

pub mod brennan;
#[cfg(test)]
pub(crate) mod fake;

use crate::error::DeviceError;

/// Raw inventory record as returned by a device, before album filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    pub id: i64,
    pub album: String,
    pub artist: String,
}

/// One inventory page. `raw_len` counts every record the device returned,
/// including malformed ones, so paging can tell a full page from a short one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogPage {
    pub records: Vec<CatalogRecord>,
    pub raw_len: usize,
    pub malformed: usize,
}

/// Playback status reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceStatus {
    pub volume: i32,
}

/// Commands understood by the device's CGI interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCommand {
    /// Toggles playback; the device has no separate pause or stop verb.
    Play,
    Next,
    Back,
    PlayId(String),
    SetVolume(i32),
}

impl DeviceCommand {
    /// Query string appended to the device CGI URL.
    pub fn query(&self) -> String {
        match self {
            Self::Play => "play".to_string(),
            Self::Next => "next".to_string(),
            Self::Back => "back".to_string(),
            Self::PlayId(id) => format!("playID&{}", urlencoding::encode(id)),
            Self::SetVolume(volume) => format!("vol{volume}"),
        }
    }
}

/// Interface implemented by playback device adapters.
pub trait DeviceBackend: Send + Sync {
    fn fetch_catalog_page(&self, offset: usize, count: usize) -> Result<CatalogPage, DeviceError>;
    fn fetch_status(&self) -> Result<DeviceStatus, DeviceError>;
    fn send_command(&self, command: &DeviceCommand) -> Result<(), DeviceError>;
}

#[cfg(test)]
mod tests {
    use super::DeviceCommand;

    #[test]
    fn test_command_queries_match_device_cgi_verbs() {
        assert_eq!(DeviceCommand::Play.query(), "play");
        assert_eq!(DeviceCommand::Next.query(), "next");
        assert_eq!(DeviceCommand::Back.query(), "back");
        assert_eq!(
            DeviceCommand::PlayId("1000001".to_string()).query(),
            "playID&1000001"
        );
        assert_eq!(DeviceCommand::SetVolume(35).query(), "vol35");
    }

    #[test]
    fn test_play_id_query_escapes_separators() {
        assert_eq!(
            DeviceCommand::PlayId("12&vol63".to_string()).query(),
            "playID&12%26vol63"
        );
    }
}
