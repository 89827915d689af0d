use festival_board::clock::now_local;
use festival_board::day::{pane_for_datetime, pane_from_fragment};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::page_state::with_page;
use crate::web_document::{location_hash, web_document, web_window};
use crate::web_element_ext::WebElementExt;
use crate::web_error_handling::{JsResult, log_js_error};


fn pane_id(name: &str) -> String { format!("pane-{name}") }
fn nav_id(name: &str) -> String { format!("nav-{name}") }

pub fn select_pane(name: &str) -> JsResult<()> {
    let document = web_document()?;
    let Some(pane) = document.get_element_by_id(&pane_id(name)) else {
        log::warn!("There is no pane \"{name}\"");
        return Ok(());
    };
    if !with_page(|page| page.day_router.select(name))? {
        return Ok(());
    }
    for other in document.query_selector_all(".pane")? {
        other.set_displayed(false)?;
    }
    for nav in document.query_selector_all(".pane-nav")? {
        nav.set_class("selected", false)?;
    }
    pane.set_displayed(true)?;
    if let Some(nav) = document.get_element_by_id(&nav_id(name)) {
        nav.set_class("selected", true)?;
    }
    Ok(())
}

// Legacy single-table layout: each day is a collapsed header row plus the rows with its shows.
pub fn show_day(day: &str) -> JsResult<()> { set_day_expanded(day, true) }
pub fn hide_day(day: &str) -> JsResult<()> { set_day_expanded(day, false) }

fn set_day_expanded(day: &str, expanded: bool) -> JsResult<()> {
    let document = web_document()?;
    let mut found = false;
    for row in document.query_selector_all(&format!("tr.day-collapsed.{day}"))? {
        row.set_displayed(!expanded)?;
        found = true;
    }
    for row in document.query_selector_all(&format!("tr.day-contents.{day}"))? {
        row.set_displayed(expanded)?;
        found = true;
    }
    if !found {
        log::warn!("There are no rows for day \"{day}\"");
    }
    Ok(())
}

pub fn on_hash_change() -> JsResult<()> {
    if let Some(name) = pane_from_fragment(&location_hash()?) {
        select_pane(name)?;
    }
    Ok(())
}

// The listener lives as long as the page: the closure is never freed.
pub fn install_hash_listener() -> JsResult<()> {
    let closure = Closure::<dyn FnMut()>::new(|| {
        if let Err(err) = on_hash_change() {
            log_js_error("Cannot follow URL fragment", &err);
        }
    });
    web_window()?
        .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// An explicit fragment wins; otherwise open the pane of the current festival day.
pub fn select_initial_pane() -> JsResult<()> {
    let hash = location_hash()?;
    if let Some(name) = pane_from_fragment(&hash) {
        return select_pane(name);
    }
    let rollover_hour = with_page(|page| page.config.day_rollover_hour)?;
    let day = pane_for_datetime(now_local(), rollover_hour).pane_name();
    if web_document()?.has_element(&pane_id(day)) {
        select_pane(day)
    } else if web_document()?.has_any("tr.day-contents")? {
        show_day(day)
    } else {
        Ok(())
    }
}
