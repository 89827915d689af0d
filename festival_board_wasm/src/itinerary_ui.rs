// Dressing rooms and other per-act itinerary fields, kept in sync with the backend.
//
// DOM contract, for an act with key `<act>`:
//   - `button.dressing-room#<act>-<room>`: one button per preset room, `<act>-None` for "no room";
//   - `input#<act>-custom-room` and `button#<act>-custom-room-button`: rooms without a button;
//   - `.itinerary-field#<act>-<field>`: free-text fields (inputs or plain text elements);
//   - `.itinerary-loader#<act>-...`: overlays shown while a request is in flight.

use festival_board::itinerary::{
    ActReconciliation, DRESSING_ROOM_FIELD, RoomSelection, SelectionReset, custom_room_input_id,
    field_url, parse_response, plan_reconciliation,
};
use festival_board::{ActKey, Itinerary, SyncError, SyncOperation, SyncScope};

use crate::fetch::{get_text, put_text};
use crate::page_state::with_page;
use crate::web_document::{WebDocument, web_document, web_window};
use crate::web_element_ext::WebElementExt;
use crate::toast_ui;
use crate::web_error_handling::{JsResult, log_js_error};


const FIELD_CLASS: &str = "itinerary-field";
const LOADER_CLASS: &str = "itinerary-loader";
const ROOM_BUTTON_SELECTOR: &str = "button.dressing-room";

fn in_act(selector: &str, act: &ActKey) -> String { format!("{selector}[id^=\"{act}-\"]") }

fn scoped(selector: &str, scope: &SyncScope) -> String {
    match scope {
        SyncScope::All => selector.to_owned(),
        SyncScope::Act(act) => in_act(selector, act),
    }
}

pub fn page_has_itinerary() -> JsResult<bool> {
    let document = web_document()?;
    Ok(document.has_any(ROOM_BUTTON_SELECTOR)?
        || document.has_any(&format!(".{FIELD_CLASS}"))?)
}

// Fetches the itinerary for the scope and reflects it in the page. Never fails: problems are
// reported to the user and the next refresh is the retry.
pub async fn refresh(scope: SyncScope) {
    if let Err(err) = begin_request(&scope) {
        log_js_error("Cannot start itinerary refresh", &err);
        return;
    }
    let result = fetch_and_apply(&scope).await;
    if let Err(err) = result {
        report_failure(SyncOperation::Fetch, &err);
    }
    finish_request(&scope);
}

async fn fetch_and_apply(scope: &SyncScope) -> Result<(), SyncError> {
    let (url, ticket) =
        with_page(|page| (scope.url(&page.config.api_base), page.stale_guard.issue()))
            .map_err(js_failure)?;
    let body = get_text(&url).await?;
    let itinerary = parse_response(scope, &body)?;
    let (reset, fresh) = with_page(|page| {
        let fresh = page.stale_guard.filter_fresh(ticket, scope, itinerary);
        (page.stale_guard.selection_reset(ticket, scope), fresh)
    })
    .map_err(js_failure)?;
    apply(&reset, &fresh).map_err(js_failure)
}

pub async fn set_field(act: ActKey, field: String, value: String) {
    let scope = SyncScope::Act(act.clone());
    if let Err(err) = begin_request(&scope) {
        log_js_error("Cannot start itinerary update", &err);
        return;
    }
    match put_field(&act, &field, &value).await {
        Ok(()) => refresh(scope.clone()).await,
        Err(err) => report_failure(SyncOperation::Update, &err),
    }
    finish_request(&scope);
}

async fn put_field(act: &ActKey, field: &str, value: &str) -> Result<(), SyncError> {
    let api_base = with_page(|page| page.config.api_base.clone()).map_err(js_failure)?;
    put_text(&field_url(&api_base, act, field), value).await?;
    Ok(())
}

pub async fn set_dressing_room(act: ActKey, room: String) {
    set_field(act, DRESSING_ROOM_FIELD.to_owned(), room).await
}

pub async fn set_custom_room(act: ActKey) {
    let input_id = custom_room_input_id(&act);
    let room = web_document()
        .ok()
        .and_then(|document| document.get_element_by_id(&input_id))
        .and_then(|input| input.input_value())
        .map(|room| room.trim().to_owned())
        .unwrap_or_default();
    if room.is_empty() {
        log::warn!("Custom room for act {act} is empty");
        return;
    }
    set_dressing_room(act, room).await
}

// Once this returns `Ok` the request is counted and `finish_request` must follow.
fn begin_request(scope: &SyncScope) -> JsResult<()> {
    if with_page(|page| page.in_flight.begin(scope))? {
        set_busy(scope, true);
    }
    Ok(())
}

fn finish_request(scope: &SyncScope) {
    match with_page(|page| page.in_flight.finish(scope)) {
        Ok(true) => set_busy(scope, false),
        Ok(false) => {}
        Err(err) => log_js_error("Cannot finish itinerary request", &err),
    }
}

// Loaders that cannot be styled are skipped: a broken overlay must not block the others.
fn set_busy(scope: &SyncScope, busy: bool) {
    let selector = scoped(&format!(".{LOADER_CLASS}"), scope);
    let loaders = web_document().and_then(|document| document.query_selector_all(&selector));
    let loaders = match loaders {
        Ok(loaders) => loaders,
        Err(err) => {
            log_js_error("Cannot find itinerary loaders", &err);
            return;
        }
    };
    for loader in loaders {
        if let Err(err) = loader.set_display_style(if busy { "block" } else { "none" }) {
            log_js_error(&format!("Cannot toggle loader #{}", loader.id()), &err);
        }
    }
}

fn apply(reset: &SelectionReset, itinerary: &Itinerary) -> JsResult<()> {
    let document = web_document()?;
    reset_selection(&document, reset)?;
    for (act, entry) in itinerary {
        let field_names = field_names(&document, act)?;
        let plan = plan_reconciliation(
            act,
            entry,
            |id| document.has_element(id),
            field_names.iter().map(String::as_str),
        );
        apply_plan(&document, &plan)?;
    }
    Ok(())
}

fn field_names(document: &WebDocument, act: &ActKey) -> JsResult<Vec<String>> {
    let prefix = format!("{act}-");
    Ok(document
        .query_selector_all(&in_act(&format!(".{FIELD_CLASS}"), act))?
        .filter_map(|element| element.id().strip_prefix(&prefix).map(str::to_owned))
        .collect())
}

fn reset_selection(document: &WebDocument, reset: &SelectionReset) -> JsResult<()> {
    let buttons: Vec<_> = match reset {
        SelectionReset::Nothing => return Ok(()),
        SelectionReset::Act(act) => {
            document.query_selector_all(&in_act(ROOM_BUTTON_SELECTOR, act))?.collect()
        }
        SelectionReset::Everything { keep } => {
            let keep_prefixes: Vec<String> = keep.iter().map(|act| format!("{act}-")).collect();
            document
                .query_selector_all(ROOM_BUTTON_SELECTOR)?
                .filter(|button| {
                    let id = button.id();
                    !keep_prefixes.iter().any(|prefix| id.starts_with(prefix.as_str()))
                })
                .collect()
        }
    };
    for button in buttons {
        button.set_class("selected", false)?;
        button.set_disabled(false)?;
    }
    Ok(())
}

fn apply_plan(document: &WebDocument, plan: &ActReconciliation) -> JsResult<()> {
    let custom_input = document.get_element_by_id(&custom_room_input_id(&plan.act));
    match &plan.selection {
        RoomSelection::Preset { button_id } => {
            mark_selected(document, button_id)?;
            if let Some(input) = &custom_input {
                input.set_input_value("");
            }
        }
        RoomSelection::Custom { input_id, button_id, room } => {
            match &custom_input {
                Some(input) => {
                    input.set_input_value(room);
                }
                None => {
                    log::warn!("Act {} has custom room \"{room}\" but no #{input_id}", plan.act)
                }
            }
            mark_selected(document, button_id)?;
        }
        RoomSelection::Nothing => {
            if let Some(input) = &custom_input {
                input.set_input_value("");
            }
        }
    }
    for update in &plan.fields {
        let id = format!("{}-{}", plan.act, update.field);
        let Some(element) = document.get_element_by_id(&id) else {
            log::warn!("Cannot find itinerary field #{id}");
            continue;
        };
        let value = update.value.as_deref().unwrap_or("");
        if !element.set_input_value(value) {
            element.set_text_content(Some(value));
        }
    }
    Ok(())
}

fn mark_selected(document: &WebDocument, button_id: &str) -> JsResult<()> {
    match document.get_element_by_id(button_id) {
        Some(button) => {
            button.set_class("selected", true)?;
            button.set_disabled(true)?;
        }
        None => log::warn!("Cannot find dressing room button #{button_id}"),
    }
    Ok(())
}

fn report_failure(operation: SyncOperation, err: &SyncError) {
    log::error!("{}: {err}", operation.user_message());
    let toast_name = operation.toast_name();
    let result = match toast_ui::has_toast(toast_name) {
        Ok(true) => toast_ui::show(toast_name, None),
        Ok(false) => web_window()
            .and_then(|window| window.alert_with_message(operation.user_message())),
        Err(js_err) => Err(js_err),
    };
    if let Err(js_err) = result {
        log_js_error("Cannot report itinerary failure", &js_err);
    }
}

// Page-side failures in the middle of a request are reported the same way as network ones.
fn js_failure(err: wasm_bindgen::JsValue) -> SyncError {
    let description = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    SyncError::Transport(description)
}
