//! Persistent skill configuration model and defaults.

/// Root configuration persisted to `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Config {
    /// Playback device connection settings.
    #[serde(default)]
    pub device: DeviceConfig,
    /// Album catalog paging and filtering.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Volume intent step sizes.
    #[serde(default)]
    pub volume: VolumeConfig,
    /// Skill identity checks.
    #[serde(default)]
    pub skill: SkillConfig,
}

/// Device endpoint and HTTP timeouts.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DeviceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_cgi_path")]
    pub cgi_path: String,
    /// Name spoken back in responses.
    #[serde(default = "default_display_name")]
    pub display_name: String,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    #[serde(default = "default_write_timeout_ms")]
    pub write_timeout_ms: u64,
}

/// Catalog paging and album-range filter.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CatalogConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Inclusive lower bound of album record ids.
    #[serde(default = "default_album_id_min")]
    pub album_id_min: i64,
    /// Exclusive upper bound of album record ids.
    #[serde(default = "default_album_id_max")]
    pub album_id_max: i64,
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

/// Volume intent deltas and the device volume ceiling.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct VolumeConfig {
    #[serde(default = "default_volume_step")]
    pub step: i32,
    #[serde(default = "default_volume_large_step")]
    pub large_step: i32,
    /// Exclusive upper bound accepted by the device.
    #[serde(default = "default_max_volume")]
    pub max_volume: i32,
}

/// Skill identity settings.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SkillConfig {
    /// When set, events from any other application id are rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            cgi_path: default_cgi_path(),
            display_name: default_display_name(),
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
            write_timeout_ms: default_write_timeout_ms(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            album_id_min: default_album_id_min(),
            album_id_max: default_album_id_max(),
            max_pages: default_max_pages(),
        }
    }
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            step: default_volume_step(),
            large_step: default_volume_large_step(),
            max_volume: default_max_volume(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:8000".to_string()
}

fn default_cgi_path() -> String {
    "b2cgi.fcgi".to_string()
}

fn default_display_name() -> String {
    "Brennan".to_string()
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_read_timeout_ms() -> u64 {
    15_000
}

fn default_write_timeout_ms() -> u64 {
    15_000
}

fn default_page_size() -> usize {
    500
}

fn default_album_id_min() -> i64 {
    1_000_000
}

fn default_album_id_max() -> i64 {
    2_000_000
}

fn default_max_pages() -> usize {
    200
}

fn default_volume_step() -> i32 {
    5
}

fn default_volume_large_step() -> i32 {
    10
}

fn default_max_volume() -> i32 {
    64
}

/// Clamps config values into ranges the device and loader can work with.
pub fn sanitize_config(config: Config) -> Config {
    let page_size = config.catalog.page_size.clamp(1, 5_000);
    let album_id_min = config.catalog.album_id_min.max(0);
    let album_id_max = config
        .catalog
        .album_id_max
        .max(album_id_min.saturating_add(1));
    let max_volume = config.volume.max_volume.max(1);
    let endpoint = config.device.endpoint.trim().trim_end_matches('/').to_string();
    let cgi_path = config.device.cgi_path.trim().trim_matches('/').to_string();
    let application_id = config
        .skill
        .application_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());

    Config {
        device: DeviceConfig {
            endpoint,
            cgi_path,
            connect_timeout_ms: config.device.connect_timeout_ms.clamp(100, 60_000),
            read_timeout_ms: config.device.read_timeout_ms.clamp(100, 120_000),
            write_timeout_ms: config.device.write_timeout_ms.clamp(100, 120_000),
            ..config.device
        },
        catalog: CatalogConfig {
            page_size,
            album_id_min,
            album_id_max,
            max_pages: config.catalog.max_pages.max(1),
        },
        volume: VolumeConfig {
            step: config.volume.step.saturating_abs().clamp(1, max_volume),
            large_step: config.volume.large_step.saturating_abs().clamp(1, max_volume),
            max_volume,
        },
        skill: SkillConfig { application_id },
    }
}
