use std::str::FromStr;

use wasm_bindgen::JsCast;

use crate::rust_error;
use crate::web_error_handling::JsResult;
use crate::web_iterators::{ElementIterator, IntoElementIterator};


pub trait WebElementExt {
    fn query_existing(&self, selectors: &str) -> JsResult<web_sys::Element>;
    fn query_all(&self, selectors: &str) -> JsResult<ElementIterator>;

    fn parse_attribute<T: FromStr>(&self, name: &str) -> Option<T>;

    fn set_class(&self, class: &str, present: bool) -> JsResult<()>;
    fn set_disabled(&self, disabled: bool) -> JsResult<()>;

    // Uses inline `display` style: the server-rendered stylesheet knows nothing about us.
    fn set_display_style(&self, value: &str) -> JsResult<()>;
    fn set_displayed(&self, displayed: bool) -> JsResult<()>;

    // Value of an <input>, <select> or <textarea>. `None` for other elements.
    fn input_value(&self) -> Option<String>;
    fn set_input_value(&self, value: &str) -> bool;
    fn is_checked(&self) -> bool;
}

impl WebElementExt for web_sys::Element {
    fn query_existing(&self, selectors: &str) -> JsResult<web_sys::Element> {
        self.query_selector(selectors)?
            .ok_or_else(|| rust_error!("Cannot find \"{}\" inside \"{}\"", selectors, self.id()))
    }

    fn query_all(&self, selectors: &str) -> JsResult<ElementIterator> {
        Ok(self.query_selector_all(selectors)?.into_element_iterator())
    }

    fn parse_attribute<T: FromStr>(&self, name: &str) -> Option<T> {
        self.get_attribute(name)?.trim().parse().ok()
    }

    fn set_class(&self, class: &str, present: bool) -> JsResult<()> {
        self.class_list().toggle_with_force(class, present)?;
        Ok(())
    }

    fn set_disabled(&self, disabled: bool) -> JsResult<()> {
        self.toggle_attribute_with_force("disabled", disabled)?;
        Ok(())
    }

    fn set_display_style(&self, value: &str) -> JsResult<()> {
        let element = self
            .dyn_ref::<web_sys::HtmlElement>()
            .ok_or_else(|| rust_error!("Element \"{}\" is not an HTML element", self.id()))?;
        element.style().set_property("display", value)
    }

    fn set_displayed(&self, displayed: bool) -> JsResult<()> {
        if displayed {
            // Fall back to whatever the stylesheet says.
            self.dyn_ref::<web_sys::HtmlElement>()
                .map_or(Ok(()), |e| e.style().remove_property("display").map(|_| ()))
        } else {
            self.set_display_style("none")
        }
    }

    fn input_value(&self) -> Option<String> {
        if let Some(input) = self.dyn_ref::<web_sys::HtmlInputElement>() {
            Some(input.value())
        } else if let Some(select) = self.dyn_ref::<web_sys::HtmlSelectElement>() {
            Some(select.value())
        } else {
            self.dyn_ref::<web_sys::HtmlTextAreaElement>().map(|text_area| text_area.value())
        }
    }

    fn set_input_value(&self, value: &str) -> bool {
        if let Some(input) = self.dyn_ref::<web_sys::HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = self.dyn_ref::<web_sys::HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(text_area) = self.dyn_ref::<web_sys::HtmlTextAreaElement>() {
            text_area.set_value(value);
        } else {
            return false;
        }
        true
    }

    fn is_checked(&self) -> bool {
        self.dyn_ref::<web_sys::HtmlInputElement>().is_some_and(|input| input.checked())
    }
}
