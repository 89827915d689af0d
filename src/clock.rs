use time::{OffsetDateTime, UtcOffset};


// Seconds since Unix epoch. This is the unit of `start`/`end` attributes on showtime items.
pub type EpochSeconds = i64;

// Source of "now" for showtime annotations. The override pins the clock so that a specific moment
// of the festival can be previewed (or tested) without waiting for it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct WallClock {
    utc_override: Option<EpochSeconds>,
}

impl WallClock {
    pub fn new() -> Self { WallClock { utc_override: None } }
    pub fn with_override(now: EpochSeconds) -> Self { WallClock { utc_override: Some(now) } }

    pub fn set_override(&mut self, now: EpochSeconds) { self.utc_override = Some(now); }
    pub fn reset_override(&mut self) { self.utc_override = None; }
    pub fn utc_override(&self) -> Option<EpochSeconds> { self.utc_override }

    pub fn now(&self) -> EpochSeconds {
        self.utc_override.unwrap_or_else(|| OffsetDateTime::now_utc().unix_timestamp())
    }
}

// Local time is needed to decide which festival day is "today". If the local offset cannot be
// determined we fall back to UTC, which is off by at most a couple of hours in Europe.
pub fn now_local() -> OffsetDateTime {
    match UtcOffset::current_local_offset() {
        Ok(offset) => OffsetDateTime::now_utc().to_offset(offset),
        Err(err) => {
            log::warn!("Cannot determine local UTC offset, using UTC: {err}");
            OffsetDateTime::now_utc()
        }
    }
}
