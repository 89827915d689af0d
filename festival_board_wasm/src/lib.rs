// Browser side of the festival board: everything the server-rendered pages call.
//
// All exported functions except `init` and `last_panic` require a prior `init` call.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod console_logger;
mod day_ui;
mod fetch;
mod itinerary_ui;
mod mirror_ui;
mod page_state;
mod reminder_ui;
mod showtime_ui;
mod ticker;
mod toast_ui;
mod web_document;
mod web_element_ext;
mod web_error_handling;
mod web_iterators;

use std::time::Duration;

use festival_board::{ActKey, BoardConfig, SyncScope, TickKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub use web_error_handling::{RustError, last_panic, set_panic_hook};
use web_error_handling::JsResult;


// `config_json` is a `BoardConfig` in JSON, possibly empty.
#[wasm_bindgen]
pub fn init(config_json: &str) -> JsResult<()> {
    set_panic_hook();
    let config = BoardConfig::from_json(config_json)
        .map_err(|err| rust_error!("Invalid festival board config: {err}"))?;
    let level = config.log_level().map_err(|err| rust_error!("{err}"))?;
    console_logger::init(level);
    page_state::install(config)
}

// Brings the page to life: picks the pane, starts the periodic updates the page needs and fills
// the reminder form.
#[wasm_bindgen]
pub fn on_load() -> JsResult<()> {
    day_ui::select_initial_pane()?;
    day_ui::install_hash_listener()?;
    if itinerary_ui::page_has_itinerary()? {
        ticker::start(TickKind::Itinerary)?;
    }
    if web_document::web_document()?.has_any(showtime_ui::SHOWTIME_SELECTOR)? {
        ticker::start(TickKind::Showtime)?;
    }
    if reminder_ui::page_has_reminder_form()? {
        reminder_ui::populate_defaults()?;
    }
    Ok(())
}

#[wasm_bindgen]
pub fn set_dressing_room(act: &str, room: &str) -> JsResult<()> {
    page_state::ensure_initialized()?;
    spawn_local(itinerary_ui::set_dressing_room(ActKey::new(act), room.to_owned()));
    Ok(())
}

#[wasm_bindgen]
pub fn set_custom_room(act: &str) -> JsResult<()> {
    page_state::ensure_initialized()?;
    spawn_local(itinerary_ui::set_custom_room(ActKey::new(act)));
    Ok(())
}

#[wasm_bindgen]
pub fn set_itinerary_field(act: &str, field: &str, value: &str) -> JsResult<()> {
    page_state::ensure_initialized()?;
    spawn_local(itinerary_ui::set_field(ActKey::new(act), field.to_owned(), value.to_owned()));
    Ok(())
}

// Refreshes a single act, or everything if `act` is not given. Resolves once the page reflects
// the response (or the failure has been reported).
#[wasm_bindgen]
pub async fn refresh_itinerary(act: Option<String>) -> JsResult<()> {
    page_state::ensure_initialized()?;
    let scope = match act {
        Some(act) => SyncScope::Act(ActKey::new(act)),
        None => SyncScope::All,
    };
    itinerary_ui::refresh(scope).await;
    Ok(())
}

#[wasm_bindgen]
pub fn select_pane(name: &str) -> JsResult<()> { day_ui::select_pane(name) }

#[wasm_bindgen]
pub fn show_day(day: &str) -> JsResult<()> { day_ui::show_day(day) }

#[wasm_bindgen]
pub fn hide_day(day: &str) -> JsResult<()> { day_ui::hide_day(day) }

#[wasm_bindgen]
pub fn on_hash_change() -> JsResult<()> { day_ui::on_hash_change() }

// Pretends that it's `utc_seconds` now. Showtimes are re-annotated immediately.
#[wasm_bindgen]
pub fn set_utc_override(utc_seconds: f64) -> JsResult<()> {
    if !utc_seconds.is_finite() {
        return Err(rust_error!("Invalid UTC override: {utc_seconds}"));
    }
    page_state::with_page(|page| page.clock.set_override(utc_seconds.round() as i64))?;
    showtime_ui::update()
}

#[wasm_bindgen]
pub fn reset_utc_override() -> JsResult<()> {
    page_state::with_page(|page| page.clock.reset_override())?;
    showtime_ui::update()
}

#[wasm_bindgen]
pub fn add_reminder_entry() -> JsResult<()> { reminder_ui::add_entry() }

#[wasm_bindgen]
pub fn remove_reminder_entry(button: web_sys::Element) -> JsResult<()> {
    reminder_ui::remove_entry(&button)
}

#[wasm_bindgen]
pub fn update_calendar_url() -> JsResult<()> { reminder_ui::update_url() }

#[wasm_bindgen]
pub async fn copy_calendar_url() -> JsResult<()> { reminder_ui::copy_url().await }

// Without `timeout_ms` the configured default applies; zero keeps the toast until hidden.
#[wasm_bindgen]
pub fn show_toast(name: &str, timeout_ms: Option<u32>) -> JsResult<()> {
    toast_ui::show(name, timeout_ms.map(|ms| Duration::from_millis(ms.into())))
}

#[wasm_bindgen]
pub fn hide_toast(name: &str) -> JsResult<()> { toast_ui::hide(name) }

// Returns whether the animation is now running.
#[wasm_bindgen]
pub fn toggle_mirror_animation() -> JsResult<bool> { mirror_ui::toggle() }
