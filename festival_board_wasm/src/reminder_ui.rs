// Calendar subscription form: a list of reminder rows plus day checkboxes, turned into a webcal
// URL on every change.

use festival_board::ReminderEntry;
use festival_board::reminder::{calendar_query, default_reminders, google_calendar_url, webcal_url};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Element;

use crate::web_document::{location_host, web_document, web_window};
use crate::web_element_ext::WebElementExt;
use crate::web_error_handling::JsResult;


const TEMPLATE_ID: &str = "template-entry";
const ADD_BUTTON_ID: &str = "add-button-entry";
const ENTRY_CLASS: &str = "reminder-entry";

pub fn page_has_reminder_form() -> JsResult<bool> {
    Ok(web_document()?.has_element(TEMPLATE_ID))
}

// Adds the rows a fresh form starts with.
pub fn populate_defaults() -> JsResult<()> {
    for entry in default_reminders() {
        let row = insert_row()?;
        write_row(&row, &entry)?;
    }
    update_url()
}

pub fn add_entry() -> JsResult<()> {
    insert_row()?;
    update_url()
}

// `button` is the remove button inside the row.
pub fn remove_entry(button: &Element) -> JsResult<()> {
    match button.parent_element() {
        Some(row) => row.remove(),
        None => log::warn!("Reminder remove button is not inside a row"),
    }
    update_url()
}

fn insert_row() -> JsResult<Element> {
    let document = web_document()?;
    let template = document.get_existing_element_by_id(TEMPLATE_ID)?;
    let row: Element = template.clone_node_with_deep(true)?.dyn_into()?;
    row.remove_attribute("id")?;
    row.set_class(ENTRY_CLASS, true)?;
    row.set_display_style("block")?;
    let add_button = document.get_existing_element_by_id(ADD_BUTTON_ID)?;
    add_button.insert_adjacent_element("beforebegin", &row)?;
    Ok(row)
}

fn write_row(row: &Element, entry: &ReminderEntry) -> JsResult<()> {
    let reference: &str = entry.reference.into();
    let sign: &str = entry.sign.into();
    row.query_existing("select.reference")?.set_input_value(reference);
    row.query_existing("select.before-after")?.set_input_value(sign);
    row.query_existing("select.minute-value")?.set_input_value(&entry.minutes.to_string());
    Ok(())
}

fn read_row(row: &Element) -> JsResult<Option<ReminderEntry>> {
    let value = |selector: &str| -> JsResult<String> {
        Ok(row.query_existing(selector)?.input_value().unwrap_or_default())
    };
    let reference = value("select.reference")?;
    let sign = value("select.before-after")?;
    let minutes = value("select.minute-value")?;
    match ReminderEntry::from_form(&reference, &sign, &minutes) {
        Ok(entry) => Ok(Some(entry)),
        Err(err) => {
            log::warn!("Skipping reminder row: {err}");
            Ok(None)
        }
    }
}

pub fn update_url() -> JsResult<()> {
    let document = web_document()?;
    let mut reminders = vec![];
    let entries = document.get_existing_element_by_id("reminder-entries")?;
    for row in entries.query_all(&format!("li.{ENTRY_CLASS}"))? {
        if let Some(entry) = read_row(&row)? {
            reminders.push(entry);
        }
    }
    let days: Vec<String> = document
        .get_existing_element_by_id("days")?
        .query_all("input")?
        .filter(|input| input.is_checked())
        .filter_map(|input| input.get_attribute("value"))
        .collect();
    let relative_url = calendar_query(&reminders, days.iter().map(String::as_str));
    let webcal = webcal_url(&location_host()?, &relative_url);
    document.get_existing_element_by_id("url")?.set_text_content(Some(&webcal));
    document.get_existing_element_by_id("apple-url")?.set_attribute("href", &webcal)?;
    document
        .get_existing_element_by_id("google-url")?
        .set_attribute("href", &google_calendar_url(&webcal))?;
    Ok(())
}

pub async fn copy_url() -> JsResult<()> {
    let url = web_document()?
        .get_existing_element_by_id("url")?
        .text_content()
        .unwrap_or_default();
    let clipboard = web_window()?.navigator().clipboard();
    JsFuture::from(clipboard.write_text(&url)).await?;
    Ok(())
}
