use std::cell::RefCell;

use enum_map::EnumMap;
use festival_board::itinerary::{InFlight, StaleGuard};
use festival_board::{
    BoardConfig, DayRouter, MirrorAnimation, ShowtimeAnnotator, TickKind, TickSchedule,
    ToastBoard, WallClock,
};

use crate::rust_error;
use crate::web_error_handling::JsResult;


// Everything the page remembers between events.
pub struct PageState {
    pub config: BoardConfig,
    pub clock: WallClock,
    pub annotator: ShowtimeAnnotator,
    pub day_router: DayRouter,
    pub toasts: ToastBoard,
    // Bumped whenever the toast timer is rescheduled. A sleeping timer future that sees a
    // different value on wake-up knows it has been superseded.
    pub toast_generation: u64,
    pub ticks: TickSchedule,
    pub tick_drivers: EnumMap<TickKind, bool>,
    pub stale_guard: StaleGuard,
    pub in_flight: InFlight,
    pub mirror: MirrorAnimation,
}

impl PageState {
    fn new(config: BoardConfig) -> Self {
        PageState {
            annotator: ShowtimeAnnotator::new(config.warning_window),
            toasts: ToastBoard::new(config.toast_retrigger_delay),
            ticks: TickSchedule::new(&config),
            config,
            clock: WallClock::new(),
            day_router: DayRouter::new(),
            toast_generation: 0,
            tick_drivers: EnumMap::default(),
            stale_guard: StaleGuard::new(),
            in_flight: InFlight::new(),
            mirror: MirrorAnimation::new(),
        }
    }
}

thread_local! {
    static PAGE: RefCell<Option<PageState>> = const { RefCell::new(None) };
}

pub fn install(config: BoardConfig) -> JsResult<()> {
    PAGE.with(|page| {
        let mut page = page.borrow_mut();
        if page.is_some() {
            return Err(rust_error!("Festival board is already initialized"));
        }
        *page = Some(PageState::new(config));
        Ok(())
    })
}

// Never call `with_page` from inside `f`, and never keep anything borrowed from the state across
// an `await`.
pub fn with_page<T>(f: impl FnOnce(&mut PageState) -> T) -> JsResult<T> {
    PAGE.with(|page| match page.borrow_mut().as_mut() {
        Some(state) => Ok(f(state)),
        None => Err(rust_error!("Festival board is not initialized, call init() first")),
    })
}

pub fn ensure_initialized() -> JsResult<()> { with_page(|_| ()) }
