#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod clock;
pub mod config;
pub mod day;
pub mod error;
pub mod itinerary;
pub mod mirror;
pub mod reminder;
pub mod showtime;
pub mod tick;
pub mod toast;

pub use clock::WallClock;
pub use config::BoardConfig;
pub use day::{DayRouter, FestivalDay};
pub use error::{ConfigError, SyncError, SyncOperation};
pub use itinerary::{ActKey, DressingRoom, Itinerary, ItineraryEntry, SyncScope};
pub use mirror::MirrorAnimation;
pub use reminder::{Reference, ReminderEntry, Sign};
pub use showtime::{Showtime, ShowtimeAnnotator, ShowtimeStatus, TimeLeft};
pub use tick::{RepeatingTask, TickKind, TickSchedule};
pub use toast::{ToastBoard, ToastEffect};
