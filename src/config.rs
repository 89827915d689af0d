use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::day::DEFAULT_ROLLOVER_HOUR;
use crate::showtime::DEFAULT_WARNING_WINDOW;
use crate::toast::{DEFAULT_RETRIGGER_DELAY, DEFAULT_TIMEOUT};
use crate::ConfigError;


// Page-level settings. The page passes them as JSON to `init`; every field is optional and
// durations are human-readable ("60s", "250ms").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    // Prefix for itinerary endpoints, e.g. "" (relative to the page) or "/api/".
    pub api_base: String,
    #[serde(with = "humantime_serde")]
    pub itinerary_refresh_interval: Duration,
    #[serde(with = "humantime_serde")]
    pub showtime_refresh_interval: Duration,
    #[serde(with = "humantime_serde")]
    pub mirror_animation_interval: Duration,
    #[serde(with = "humantime_serde")]
    pub warning_window: Duration,
    #[serde(with = "humantime_serde")]
    pub toast_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub toast_retrigger_delay: Duration,
    pub day_rollover_hour: u8,
    pub log_level: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            api_base: String::new(),
            itinerary_refresh_interval: Duration::from_secs(60),
            showtime_refresh_interval: Duration::from_secs(1),
            mirror_animation_interval: Duration::from_millis(500),
            warning_window: DEFAULT_WARNING_WINDOW,
            toast_timeout: DEFAULT_TIMEOUT,
            toast_retrigger_delay: DEFAULT_RETRIGGER_DELAY,
            day_rollover_hour: DEFAULT_ROLLOVER_HOUR,
            log_level: "info".to_owned(),
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = if json.trim().is_empty() {
            BoardConfig::default()
        } else {
            serde_json::from_str(json)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn log_level(&self) -> Result<log::LevelFilter, ConfigError> {
        log::LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::UnknownLogLevel(self.log_level.clone()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.log_level()?;
        for (field, interval) in [
            ("itinerary_refresh_interval", self.itinerary_refresh_interval),
            ("showtime_refresh_interval", self.showtime_refresh_interval),
            ("mirror_animation_interval", self.mirror_animation_interval),
        ] {
            if interval.is_zero() {
                let reason = "must be positive".to_owned();
                return Err(ConfigError::InvalidValue { field, reason });
            }
        }
        if self.day_rollover_hour > 23 {
            return Err(ConfigError::InvalidValue {
                field: "day_rollover_hour",
                reason: format!("{} is not an hour of the day", self.day_rollover_hour),
            });
        }
        Ok(())
    }
}
