use std::time::Duration;

use festival_board::ToastEffect;
use gloo_timers::future::TimeoutFuture;
use instant::Instant;
use wasm_bindgen_futures::spawn_local;

use crate::page_state::with_page;
use crate::web_document::web_document;
use crate::web_element_ext::WebElementExt;
use crate::web_error_handling::{JsResult, log_js_error};


pub fn toast_element_id(name: &str) -> String { format!("toast-{name}") }

pub fn has_toast(name: &str) -> JsResult<bool> {
    Ok(web_document()?.has_element(&toast_element_id(name)))
}

// `None` timeout means the configured default.
pub fn show(name: &str, timeout: Option<Duration>) -> JsResult<()> {
    let effects = with_page(|page| {
        let timeout = timeout.unwrap_or(page.config.toast_timeout);
        page.toasts.show(name, timeout, Instant::now())
    })?;
    apply_effects(&effects)?;
    reschedule_timer()
}

pub fn hide(name: &str) -> JsResult<()> {
    let effects = with_page(|page| page.toasts.hide(name))?;
    apply_effects(&effects)?;
    reschedule_timer()
}

fn apply_effects(effects: &[ToastEffect]) -> JsResult<()> {
    let document = web_document()?;
    for effect in effects {
        let (name, active) = match effect {
            ToastEffect::Show(name) => (name, true),
            ToastEffect::Hide(name) => (name, false),
        };
        match document.get_element_by_id(&toast_element_id(name)) {
            Some(element) => element.set_class("active", active)?,
            None => log::warn!("Toast \"{name}\" is not in the page"),
        }
    }
    Ok(())
}

// A single timer serves all toasts: it sleeps until the board's earliest deadline. Each reschedule
// invalidates the previously spawned timer.
fn reschedule_timer() -> JsResult<()> {
    let (generation, deadline) = with_page(|page| {
        page.toast_generation += 1;
        (page.toast_generation, page.toasts.next_deadline())
    })?;
    let Some(deadline) = deadline else {
        return Ok(());
    };
    spawn_local(async move {
        let now = Instant::now();
        let wait = if deadline > now { deadline - now } else { Duration::ZERO };
        TimeoutFuture::new(wait.as_millis().try_into().unwrap_or(u32::MAX)).await;
        if let Err(err) = fire_timer(generation) {
            log_js_error("Toast timer failed", &err);
        }
    });
    Ok(())
}

fn fire_timer(generation: u64) -> JsResult<()> {
    let effects = with_page(|page| {
        if page.toast_generation != generation {
            return None;
        }
        Some(page.toasts.advance(Instant::now()))
    })?;
    let Some(effects) = effects else {
        return Ok(());
    };
    apply_effects(&effects)?;
    reschedule_timer()
}
