mod common;

use common::*;
use festival_board::showtime::Annotation;
use festival_board::{ShowtimeAnnotator, ShowtimeStatus, TimeLeft, WallClock};
use pretty_assertions::assert_eq;


fn annotate_at(now: i64) -> Annotation {
    ShowtimeAnnotator::default().annotate(hour_long_show(), now)
}

#[test]
fn far_before_start_is_upcoming() {
    let show = hour_long_show();
    for now in (show.start - 10_000)..(show.start - WARNING_WINDOW) {
        let annotation = annotate_at(now);
        assert_eq!(annotation.status, ShowtimeStatus::Upcoming, "now = {now}");
        assert_eq!(annotation.time_left, None);
        assert!(annotation.status.css_classes().is_empty());
    }
}

#[test]
fn countdown_to_start() {
    let show = hour_long_show();
    let mut previous = i64::MAX;
    for now in (show.start - WARNING_WINDOW)..show.start {
        let annotation = annotate_at(now);
        assert_eq!(annotation.status, ShowtimeStatus::AlmostStarting, "now = {now}");
        let remaining = match annotation.time_left.unwrap() {
            TimeLeft::Seconds(s) => s,
            TimeLeft::Minutes(m) => m * 60,
        };
        assert!(remaining <= previous);
        assert!(remaining >= 0);
        previous = remaining;
    }
    assert_eq!(annotate_at(show.start - 1).time_left, Some(TimeLeft::Seconds(1)));
}

#[test]
fn running_show() {
    let show = hour_long_show();
    for now in show.start..=(show.end - WARNING_WINDOW - 1) {
        assert_eq!(annotate_at(now).status, ShowtimeStatus::Started, "now = {now}");
    }
    for now in (show.end - WARNING_WINDOW)..=show.end {
        let annotation = annotate_at(now);
        assert_eq!(annotation.status, ShowtimeStatus::AlmostEnding, "now = {now}");
        assert_eq!(annotation.status.css_classes(), &["started", "almost-ending"]);
        assert_eq!(
            annotation.time_left,
            Some(TimeLeft::from_seconds(show.end - now)),
            "now = {now}"
        );
    }
}

#[test]
fn finished_show_is_over() {
    let show = hour_long_show();
    for now in (show.end + 1)..(show.end + 10_000) {
        let annotation = annotate_at(now);
        assert_eq!(annotation.status, ShowtimeStatus::Over);
        assert_eq!(annotation.time_left, None);
    }
}

#[test]
fn time_left_text() {
    assert_eq!(TimeLeft::from_seconds(45).to_string(), "45 sec");
    assert_eq!(TimeLeft::from_seconds(60).to_string(), "60 sec");
    assert_eq!(TimeLeft::from_seconds(61).to_string(), "1 min");
    assert_eq!(TimeLeft::from_seconds(299).to_string(), "4 min");
}

#[test]
fn clock_override_drives_annotations() {
    let show = hour_long_show();
    let mut clock = WallClock::new();
    clock.set_override(show.start + 10);
    let annotator = ShowtimeAnnotator::default();
    assert_eq!(annotator.classify(show, clock.now()), ShowtimeStatus::Started);
    clock.set_override(show.end + 1);
    assert_eq!(annotator.classify(show, clock.now()), ShowtimeStatus::Over);
    clock.reset_override();
    assert_eq!(clock.utc_override(), None);
}
