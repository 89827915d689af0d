use wasm_bindgen::JsCast;


// Iterates over the elements of a `NodeList` (as returned by `querySelectorAll`), skipping any
// non-element nodes.
pub struct ElementIterator {
    list: web_sys::NodeList,
    index: u32,
}

// Cannot implement `IntoIterator` for `NodeList` because both the trait and the struct are
// foreign.
pub trait IntoElementIterator {
    fn into_element_iterator(self) -> ElementIterator;
}

impl From<web_sys::NodeList> for ElementIterator {
    fn from(list: web_sys::NodeList) -> Self { Self { list, index: 0 } }
}

impl IntoElementIterator for web_sys::NodeList {
    fn into_element_iterator(self) -> ElementIterator { self.into() }
}

impl Iterator for ElementIterator {
    type Item = web_sys::Element;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.list.item(self.index)?;
            self.index += 1;
            if let Ok(element) = node.dyn_into::<web_sys::Element>() {
                return Some(element);
            }
        }
    }
}
