use crate::rust_error;
use crate::web_error_handling::JsResult;
use crate::web_iterators::{ElementIterator, IntoElementIterator};


pub struct WebDocument(web_sys::Document);

impl WebDocument {
    pub fn get_element_by_id(&self, element_id: &str) -> Option<web_sys::Element> {
        self.0.get_element_by_id(element_id)
    }
    pub fn get_existing_element_by_id(&self, element_id: &str) -> JsResult<web_sys::Element> {
        self.0
            .get_element_by_id(element_id)
            .ok_or_else(|| rust_error!("Cannot find element \"{}\"", element_id))
    }
    pub fn has_element(&self, element_id: &str) -> bool {
        self.0.get_element_by_id(element_id).is_some()
    }

    pub fn query_selector(&self, selectors: &str) -> JsResult<Option<web_sys::Element>> {
        self.0.query_selector(selectors)
    }
    pub fn query_selector_all(&self, selectors: &str) -> JsResult<ElementIterator> {
        self.0.query_selector_all(selectors).map(|list| list.into_element_iterator())
    }
    pub fn has_any(&self, selectors: &str) -> JsResult<bool> {
        Ok(self.query_selector(selectors)?.is_some())
    }
}

pub fn web_window() -> JsResult<web_sys::Window> {
    web_sys::window().ok_or_else(|| rust_error!("Cannot find window"))
}

pub fn web_document() -> JsResult<WebDocument> {
    let document = web_window()?.document().ok_or_else(|| rust_error!("Cannot find document"))?;
    Ok(WebDocument(document))
}

// Fragment including the leading '#', or an empty string.
pub fn location_hash() -> JsResult<String> { web_window()?.location().hash() }

pub fn location_host() -> JsResult<String> { web_window()?.location().host() }
