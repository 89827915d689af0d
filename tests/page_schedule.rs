mod common;

use common::*;
use festival_board::day::pane_for;
use festival_board::reminder::{calendar_query, default_reminders};
use festival_board::{
    BoardConfig, FestivalDay, RepeatingTask, TickKind, TickSchedule, ToastBoard, ToastEffect,
};
use instant::Instant;
use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;
use time::Weekday;


#[test]
fn before_six_belongs_to_previous_day() {
    let weekdays = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];
    for weekday in weekdays {
        assert_eq!(pane_for(weekday, 5, 6), pane_for(weekday.previous(), 12, 6), "{weekday}");
        assert_eq!(pane_for(weekday, 6, 6), pane_for(weekday, 12, 6), "{weekday}");
    }
    assert_eq!(pane_for(Weekday::Sunday, 6, 6), FestivalDay::Sunday);
    assert_eq!(pane_for(Weekday::Monday, 5, 6), FestivalDay::Sunday);
}

#[test]
fn reminder_urls() {
    assert_eq!(
        calendar_query(&default_reminders(), []),
        "/programme.ics?reminders=start_utc.-6;end_utc.-6"
    );
    assert_eq!(calendar_query(&[], []), "/programme.ics?enable_reminders=0");
}

#[test]
fn toast_retrigger_never_doubles_timers() {
    let t0 = Instant::now();
    let mut board = ToastBoard::new(ms(250));
    board.show("x", ms(3000), t0);
    for i in 1..10 {
        board.show("x", ms(3000), t0 + ms(i * 10));
        assert!(board.has_pending_timer("x"));
    }
    // Whatever the sequence, the toast ends up visible after the retrigger delay and then hides.
    let mut effects = board.advance(t0 + ms(1000));
    effects.extend(board.advance(t0 + ms(10_000)));
    assert_eq!(effects.last(), Some(&ToastEffect::Hide("x".to_owned())));
    assert!(!board.is_active("x"));
}

#[test]
fn ticks_never_overlap() {
    let t0 = Instant::now();
    let schedule = TickSchedule::new(&BoardConfig::default());
    for kind in TickKind::iter() {
        let mut task: RepeatingTask = *schedule.task(kind);
        let period = task.period();
        assert!(task.start(t0));
        assert!(task.begin(t0));
        assert!(!task.is_due(t0 + period * 10));
        let done = t0 + period * 3;
        task.complete(done);
        assert!(!task.is_due(done + period - ms(1)));
        assert!(task.is_due(done + period));
    }
}
