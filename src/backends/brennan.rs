//! Brennan B2 backend adapter implementation.

use std::time::Duration;

use log::debug;
use serde_json::Value;

use crate::backends::{CatalogPage, CatalogRecord, DeviceBackend, DeviceCommand, DeviceStatus};
use crate::config::DeviceConfig;
use crate::error::DeviceError;

const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Brennan adapter backed by `ureq`.
pub struct BrennanAdapter {
    http_client: ureq::Agent,
    base_url: String,
}

impl BrennanAdapter {
    /// Creates an adapter for the device described by `config`.
    pub fn new(config: &DeviceConfig) -> Self {
        let http_client = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_millis(config.connect_timeout_ms))
            .timeout_read(Duration::from_millis(config.read_timeout_ms))
            .timeout_write(Duration::from_millis(config.write_timeout_ms))
            .build();
        Self {
            http_client,
            base_url: Self::base_url(config),
        }
    }

    fn base_url(config: &DeviceConfig) -> String {
        format!(
            "{}/{}",
            config.endpoint.trim().trim_end_matches('/'),
            config.cgi_path.trim().trim_matches('/')
        )
    }

    fn command_url(&self, query: &str) -> String {
        format!("{}?{}", self.base_url, query)
    }

    fn search_query(offset: usize, count: usize) -> String {
        format!("search&artists=N&tracks=N&radio=N&count={count}&offset={offset}")
    }

    fn request(&self, query: &str) -> Result<ureq::Response, DeviceError> {
        let url = self.command_url(query);
        debug!("Brennan request - {}", query);
        self.http_client.get(&url).call().map_err(|err| match err {
            ureq::Error::Status(status, _) => DeviceError::Status {
                command: query.to_string(),
                status,
            },
            other => DeviceError::Transport {
                command: query.to_string(),
                message: other.to_string(),
            },
        })
    }

    fn request_json(&self, query: &str) -> Result<Value, DeviceError> {
        self.request(query)?
            .into_json::<Value>()
            .map_err(|err| DeviceError::MalformedResponse {
                command: query.to_string(),
                message: err.to_string(),
            })
    }

    fn parse_record(item: &Value) -> Option<CatalogRecord> {
        let id = item.get("id")?.as_i64()?;
        let album = item.get("album")?.as_str()?.to_string();
        let artist = item
            .get("artist")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_ARTIST)
            .to_string();
        Some(CatalogRecord { id, album, artist })
    }

    fn parse_catalog_page(query: &str, payload: &Value) -> Result<CatalogPage, DeviceError> {
        let Some(items) = payload.as_array() else {
            return Err(DeviceError::MalformedResponse {
                command: query.to_string(),
                message: "inventory page is not a JSON array".to_string(),
            });
        };
        let mut page = CatalogPage {
            records: Vec::with_capacity(items.len()),
            raw_len: items.len(),
            malformed: 0,
        };
        for item in items {
            match Self::parse_record(item) {
                Some(record) => page.records.push(record),
                None => page.malformed += 1,
            }
        }
        Ok(page)
    }

    fn parse_status(payload: &Value) -> Result<DeviceStatus, DeviceError> {
        let volume = payload
            .get("volume")
            .and_then(|value| {
                value
                    .as_i64()
                    .or_else(|| value.as_str().and_then(|text| text.trim().parse().ok()))
            })
            .and_then(|volume| i32::try_from(volume).ok())
            .ok_or_else(|| DeviceError::MalformedResponse {
                command: "status".to_string(),
                message: "missing numeric volume".to_string(),
            })?;
        Ok(DeviceStatus { volume })
    }
}

impl DeviceBackend for BrennanAdapter {
    fn fetch_catalog_page(&self, offset: usize, count: usize) -> Result<CatalogPage, DeviceError> {
        let query = Self::search_query(offset, count);
        let payload = self.request_json(&query)?;
        Self::parse_catalog_page(&query, &payload)
    }

    fn fetch_status(&self) -> Result<DeviceStatus, DeviceError> {
        let payload = self.request_json("status")?;
        Self::parse_status(&payload)
    }

    fn send_command(&self, command: &DeviceCommand) -> Result<(), DeviceError> {
        let _ = self.request(&command.query())?;
        Ok(())
    }
}
