use festival_board::TickKind;

use crate::page_state::with_page;
use crate::ticker;
use crate::web_document::web_document;
use crate::web_element_ext::WebElementExt;
use crate::web_error_handling::JsResult;


const MIRROR_SELECTOR: &str = ".mirror-animation";

// Returns whether the animation is now enabled.
pub fn toggle() -> JsResult<bool> {
    let (enabled, mirrored) = with_page(|page| {
        let enabled = page.mirror.toggle();
        (enabled, page.mirror.is_mirrored())
    })?;
    if enabled {
        ticker::start(TickKind::MirrorAnimation)?;
    } else {
        ticker::stop(TickKind::MirrorAnimation)?;
    }
    render(mirrored)?;
    Ok(enabled)
}

pub fn tick() -> JsResult<()> {
    let mirrored = with_page(|page| page.mirror.tick())?;
    render(mirrored)
}

fn render(mirrored: bool) -> JsResult<()> {
    for element in web_document()?.query_selector_all(MIRROR_SELECTOR)? {
        element.set_class("mirrored", mirrored)?;
    }
    Ok(())
}
