//! In-memory device used by unit tests.

use std::sync::Mutex;

use crate::backends::{CatalogPage, CatalogRecord, DeviceBackend, DeviceCommand, DeviceStatus};
use crate::error::DeviceError;

/// Serves an inventory from memory and records every call it receives.
pub(crate) struct FakeDevice {
    pub(crate) inventory: Vec<CatalogRecord>,
    pub(crate) volume: i32,
    pub(crate) unreachable: bool,
    pub(crate) page_requests: Mutex<Vec<(usize, usize)>>,
    pub(crate) commands: Mutex<Vec<DeviceCommand>>,
}

impl FakeDevice {
    pub(crate) fn new(inventory: Vec<CatalogRecord>) -> Self {
        Self {
            inventory,
            volume: 30,
            unreachable: false,
            page_requests: Mutex::new(Vec::new()),
            commands: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::new(Vec::new())
        }
    }

    pub(crate) fn with_volume(mut self, volume: i32) -> Self {
        self.volume = volume;
        self
    }

    pub(crate) fn sent_commands(&self) -> Vec<DeviceCommand> {
        self.commands.lock().expect("commands lock poisoned").clone()
    }

    pub(crate) fn requested_pages(&self) -> Vec<(usize, usize)> {
        self.page_requests
            .lock()
            .expect("page requests lock poisoned")
            .clone()
    }

    fn check_reachable(&self, command: &str) -> Result<(), DeviceError> {
        if self.unreachable {
            return Err(DeviceError::Transport {
                command: command.to_string(),
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}

/// `count` album records with ids starting at 1_000_000.
pub(crate) fn album_records(count: usize) -> Vec<CatalogRecord> {
    (0..count)
        .map(|index| CatalogRecord {
            id: 1_000_000 + index as i64,
            album: format!("Album {index}"),
            artist: format!("Artist {index}"),
        })
        .collect()
}

impl DeviceBackend for FakeDevice {
    fn fetch_catalog_page(&self, offset: usize, count: usize) -> Result<CatalogPage, DeviceError> {
        self.check_reachable("search")?;
        self.page_requests
            .lock()
            .expect("page requests lock poisoned")
            .push((offset, count));
        let records: Vec<CatalogRecord> = self
            .inventory
            .iter()
            .skip(offset)
            .take(count)
            .cloned()
            .collect();
        Ok(CatalogPage {
            raw_len: records.len(),
            records,
            malformed: 0,
        })
    }

    fn fetch_status(&self) -> Result<DeviceStatus, DeviceError> {
        self.check_reachable("status")?;
        Ok(DeviceStatus {
            volume: self.volume,
        })
    }

    fn send_command(&self, command: &DeviceCommand) -> Result<(), DeviceError> {
        self.check_reachable(&command.query())?;
        self.commands
            .lock()
            .expect("commands lock poisoned")
            .push(command.clone());
        Ok(())
    }
}
