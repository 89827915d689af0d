// Browser tests: `wasm-pack test --headless --firefox festival_board_wasm`.
//
// Every test binary gets its own page state. Here the itinerary API does not exist, so every
// request fails.

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use festival_board_wasm::*;


wasm_bindgen_test_configure!(run_in_browser);

fn setup(body: &str) -> web_sys::Document {
    let _ = init(r#"{ "api_base": "/no-such-itinerary-api/" }"#);
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(body);
    document
}

fn element(document: &web_sys::Document, id: &str) -> web_sys::Element {
    document.get_element_by_id(id).unwrap()
}

fn display(document: &web_sys::Document, id: &str) -> String {
    element(document, id)
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap()
        .style()
        .get_property_value("display")
        .unwrap()
}

const BOARD: &str = r#"
    <div class="toast" id="toast-itinerary-fetch-error"></div>
    <div class="itinerary-loader" id="12-loader" style="display: none"></div>
    <svg class="itinerary-loader" id="12-svg-loader"></svg>
    <button class="dressing-room" id="12-2">2</button>
    <button class="dressing-room selected" id="12-3" disabled>3</button>
    <span class="itinerary-field" id="12-contact">Anna, 0612345678</span>
    "#;

#[wasm_bindgen_test]
async fn failed_fetch_keeps_displayed_values_and_releases_controls() {
    let document = setup(BOARD);

    refresh_itinerary(None).await.unwrap();

    assert_eq!(display(&document, "12-loader"), "none");
    let selected = element(&document, "12-3");
    assert!(selected.class_list().contains("selected"));
    assert!(selected.has_attribute("disabled"));
    assert!(!element(&document, "12-2").has_attribute("disabled"));
    assert_eq!(element(&document, "12-contact").text_content().unwrap(), "Anna, 0612345678");
    assert!(element(&document, "toast-itinerary-fetch-error").class_list().contains("active"));

    // A loader that cannot be styled does not keep the request counted: the next refresh
    // releases the loaders again.
    refresh_itinerary(Some("12".to_owned())).await.unwrap();
    assert_eq!(display(&document, "12-loader"), "none");
    refresh_itinerary(None).await.unwrap();
    assert_eq!(display(&document, "12-loader"), "none");
}
