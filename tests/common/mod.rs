// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::time::Duration;

use festival_board::itinerary::{ActReconciliation, plan_reconciliation};
use festival_board::{ActKey, ItineraryEntry, Showtime};


#[allow(dead_code)]
pub const WARNING_WINDOW: i64 = 300;

// A one-hour show starting at a round moment.
#[allow(dead_code)]
pub fn hour_long_show() -> Showtime { Showtime { start: 1_720_000_000, end: 1_720_003_600 } }

#[allow(dead_code)]
pub fn ms(v: u64) -> Duration { Duration::from_millis(v) }

#[allow(dead_code)]
pub fn key(s: &str) -> ActKey { ActKey::new(s) }

#[allow(dead_code)]
pub fn entry(json: &str) -> ItineraryEntry { serde_json::from_str(json).unwrap() }

// Plans reconciliation against a page that contains exactly `existing` element ids.
#[allow(dead_code)]
pub fn plan_in_page(
    act: &ActKey, entry: &ItineraryEntry, existing: &[&str], fields: &[&str],
) -> ActReconciliation {
    plan_reconciliation(act, entry, |id| existing.contains(&id), fields.iter().copied())
}
