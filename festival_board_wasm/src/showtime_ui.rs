use festival_board::showtime::Annotation;
use festival_board::{Showtime, ShowtimeStatus};
use web_sys::Element;

use crate::page_state::with_page;
use crate::web_document::web_document;
use crate::web_element_ext::WebElementExt;
use crate::web_error_handling::JsResult;


pub const SHOWTIME_SELECTOR: &str = "li.showtime";

// Re-annotates every show in the page against the current (possibly overridden) time.
pub fn update() -> JsResult<()> {
    let (annotator, now) = with_page(|page| (page.annotator, page.clock.now()))?;
    for item in web_document()?.query_selector_all(SHOWTIME_SELECTOR)? {
        let Some(show) = read_showtime(&item) else {
            log::warn!("Skipping showtime item without valid start/end: {}", item.outer_html());
            continue;
        };
        render(&item, &annotator.annotate(show, now))?;
    }
    Ok(())
}

fn read_showtime(item: &Element) -> Option<Showtime> {
    Some(Showtime {
        start: item.parse_attribute("start")?,
        end: item.parse_attribute("end")?,
    })
}

fn render(item: &Element, annotation: &Annotation) -> JsResult<()> {
    let active_classes = annotation.status.css_classes();
    for class in ShowtimeStatus::all_css_classes() {
        item.set_class(class, active_classes.contains(&class))?;
    }
    let visible_annotation = annotation.status.annotation_class();
    for element in item.query_all(".showtime-annotation")? {
        let visible = visible_annotation.is_some_and(|class| element.class_list().contains(class));
        element.set_displayed(visible)?;
    }
    if let Some(time_left) = annotation.time_left {
        for element in item.query_all(".minutes-left-value")? {
            element.set_text_content(Some(&time_left.minutes().to_string()));
        }
        for element in item.query_all(".time-left-value")? {
            element.set_text_content(Some(&time_left.to_string()));
        }
    }
    Ok(())
}
