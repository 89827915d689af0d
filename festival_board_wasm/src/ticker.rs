// Drives `RepeatingTask`s with browser timers. There is at most one driver future per tick kind;
// it exits once its task is stopped.

use std::time::Duration;

use festival_board::{SyncScope, TickKind};
use gloo_timers::future::TimeoutFuture;
use instant::Instant;
use wasm_bindgen_futures::spawn_local;

use crate::page_state::with_page;
use crate::web_error_handling::{JsResult, log_js_error};
use crate::{itinerary_ui, mirror_ui, showtime_ui};


// Poll interval while a run of the same kind is still in flight.
const BUSY_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn start(kind: TickKind) -> JsResult<()> {
    let spawn_driver = with_page(|page| {
        let started = page.ticks.task_mut(kind).start(Instant::now());
        let driver_running = page.tick_drivers[kind];
        if started && !driver_running {
            page.tick_drivers[kind] = true;
            true
        } else {
            false
        }
    })?;
    if spawn_driver {
        let name: &'static str = kind.into();
        log::debug!("Starting {name} tick");
        spawn_local(drive(kind));
    }
    Ok(())
}

pub fn stop(kind: TickKind) -> JsResult<()> {
    with_page(|page| page.ticks.task_mut(kind).stop())
}

async fn drive(kind: TickKind) {
    loop {
        let wait = match with_page(|page| page.ticks.task(kind).time_until_due(Instant::now())) {
            Ok(Some(wait)) => wait,
            Ok(None) => break,
            Err(err) => {
                log_js_error("Tick driver lost page state", &err);
                return;
            }
        };
        if !wait.is_zero() {
            sleep(wait).await;
            continue;
        }
        match with_page(|page| page.ticks.task_mut(kind).begin(Instant::now())) {
            Ok(true) => {}
            Ok(false) => {
                sleep(BUSY_POLL_INTERVAL).await;
                continue;
            }
            Err(err) => {
                log_js_error("Tick driver lost page state", &err);
                return;
            }
        }
        if let Err(err) = run(kind).await {
            let name: &'static str = kind.into();
            log_js_error(&format!("{name} tick failed"), &err);
        }
        // Ignore the error: state cannot disappear once installed.
        let _ = with_page(|page| page.ticks.task_mut(kind).complete(Instant::now()));
    }
    let _ = with_page(|page| page.tick_drivers[kind] = false);
}

async fn run(kind: TickKind) -> JsResult<()> {
    match kind {
        TickKind::Itinerary => {
            itinerary_ui::refresh(SyncScope::All).await;
            Ok(())
        }
        TickKind::Showtime => showtime_ui::update(),
        TickKind::MirrorAnimation => mirror_ui::tick(),
    }
}

async fn sleep(duration: Duration) {
    TimeoutFuture::new(duration.as_millis().try_into().unwrap_or(u32::MAX)).await;
}
