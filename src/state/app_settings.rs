use courtside_api::client::DEFAULT_BASE_URL;
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_POLL_SECS: u64 = 15;
pub const DEFAULT_CELL_PX: u32 = 8;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub base_url: String,
    pub bracket_path: Option<PathBuf>,
    pub poll_interval: Duration,
    /// Assumed pixel width of one terminal column, for the mobile breakpoint.
    pub cell_px: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            bracket_path: None,
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            cell_px: DEFAULT_CELL_PX,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build settings from a variable lookup. Unparseable values fall back
    /// to their defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            full_screen: false,
            log_level: var("COURTSIDE_LOG").and_then(|v| v.parse().ok()),
            base_url: var("COURTSIDE_BASE_URL").unwrap_or(defaults.base_url),
            bracket_path: var("COURTSIDE_BRACKET_JSON").map(PathBuf::from),
            poll_interval: var("COURTSIDE_POLL_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| Duration::from_secs(secs.max(1)))
                .unwrap_or(defaults.poll_interval),
            cell_px: var("COURTSIDE_CELL_PX")
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|px| *px > 0)
                .unwrap_or(defaults.cell_px),
        }
    }

    /// Terminal width in columns to viewport width in pixels.
    pub fn viewport_px(&self, columns: u16) -> u32 {
        u32::from(columns).saturating_mul(self.cell_px)
    }
}
