use std::fmt;
use std::time::Duration;

use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::clock::EpochSeconds;


pub const DEFAULT_WARNING_WINDOW: Duration = Duration::from_secs(300);

// Below this threshold the remaining time is shown in seconds.
const SECONDS_DISPLAY_THRESHOLD: i64 = 60;

// One scheduled performance slot, as rendered by the server: `<li class="showtime" start=...
// end=...>`. Both bounds are inclusive.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Showtime {
    pub start: EpochSeconds,
    pub end: EpochSeconds,
}

// Names double as CSS classes and as annotation classes. `Upcoming` is the default state and has
// no CSS class of its own.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ShowtimeStatus {
    Upcoming,
    AlmostStarting,
    Started,
    // A refinement of `Started`: the show carries both classes.
    AlmostEnding,
    Over,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimeLeft {
    Seconds(i64),
    Minutes(i64),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Annotation {
    pub status: ShowtimeStatus,
    pub time_left: Option<TimeLeft>,
}

#[derive(Clone, Copy, Debug)]
pub struct ShowtimeAnnotator {
    warning_window: i64,
}

impl ShowtimeStatus {
    pub fn css_class(self) -> &'static str { self.into() }

    // Classes that must be present on the showtime element. Every class not listed here, but
    // listed in `all_css_classes`, must be absent.
    pub fn css_classes(self) -> &'static [&'static str] {
        match self {
            ShowtimeStatus::Upcoming => &[],
            ShowtimeStatus::AlmostStarting => &["almost-starting"],
            ShowtimeStatus::Started => &["started"],
            ShowtimeStatus::AlmostEnding => &["started", "almost-ending"],
            ShowtimeStatus::Over => &["over"],
        }
    }

    pub fn all_css_classes() -> impl Iterator<Item = &'static str> {
        ShowtimeStatus::iter()
            .filter(|status| *status != ShowtimeStatus::Upcoming)
            .map(ShowtimeStatus::css_class)
    }

    // Status of the annotation sub-element to reveal, if any.
    pub fn annotation_class(self) -> Option<&'static str> {
        match self {
            ShowtimeStatus::Upcoming => None,
            status => Some(status.css_class()),
        }
    }
}

impl TimeLeft {
    pub fn from_seconds(remaining: i64) -> Self {
        if remaining <= SECONDS_DISPLAY_THRESHOLD {
            TimeLeft::Seconds(remaining)
        } else {
            // Truncates toward zero: "4 min" until the very last second of the fifth minute.
            TimeLeft::Minutes(remaining / 60)
        }
    }

    // Whole minutes for a minutes-only display. Less than a minute left reads as 1 until the very
    // end, so that "0 min" never shows while there is still time.
    pub fn minutes(self) -> i64 {
        match self {
            TimeLeft::Seconds(s) => i64::from(s > 0),
            TimeLeft::Minutes(m) => m,
        }
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeLeft::Seconds(s) => write!(f, "{s} sec"),
            TimeLeft::Minutes(m) => write!(f, "{m} min"),
        }
    }
}

impl Default for ShowtimeAnnotator {
    fn default() -> Self { ShowtimeAnnotator::new(DEFAULT_WARNING_WINDOW) }
}

impl ShowtimeAnnotator {
    pub fn new(warning_window: Duration) -> Self {
        ShowtimeAnnotator {
            warning_window: i64::try_from(warning_window.as_secs()).unwrap_or(i64::MAX),
        }
    }

    pub fn classify(&self, show: Showtime, now: EpochSeconds) -> ShowtimeStatus {
        if now > show.end {
            ShowtimeStatus::Over
        } else if now >= show.start {
            if show.end.saturating_sub(now) <= self.warning_window {
                ShowtimeStatus::AlmostEnding
            } else {
                ShowtimeStatus::Started
            }
        } else if show.start.saturating_sub(now) <= self.warning_window {
            ShowtimeStatus::AlmostStarting
        } else {
            ShowtimeStatus::Upcoming
        }
    }

    pub fn annotate(&self, show: Showtime, now: EpochSeconds) -> Annotation {
        let status = self.classify(show, now);
        let remaining = match status {
            ShowtimeStatus::Upcoming | ShowtimeStatus::Over => None,
            ShowtimeStatus::AlmostStarting => Some(show.start.saturating_sub(now)),
            ShowtimeStatus::Started | ShowtimeStatus::AlmostEnding => {
                Some(show.end.saturating_sub(now))
            }
        };
        Annotation {
            status,
            time_left: remaining.map(TimeLeft::from_seconds),
        }
    }
}


#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    const SHOW: Showtime = Showtime { start: 10_000, end: 13_600 };

    fn classify(now: EpochSeconds) -> ShowtimeStatus {
        ShowtimeAnnotator::default().classify(SHOW, now)
    }

    #[test]
    fn status_boundaries() {
        use ShowtimeStatus::*;
        assert_eq!(classify(0), Upcoming);
        assert_eq!(classify(SHOW.start - 301), Upcoming);
        assert_eq!(classify(SHOW.start - 300), AlmostStarting);
        assert_eq!(classify(SHOW.start - 1), AlmostStarting);
        assert_eq!(classify(SHOW.start), Started);
        assert_eq!(classify(SHOW.end - 301), Started);
        assert_eq!(classify(SHOW.end - 300), AlmostEnding);
        assert_eq!(classify(SHOW.end), AlmostEnding);
        assert_eq!(classify(SHOW.end + 1), Over);
    }

    #[test]
    fn short_show_is_almost_ending_right_away() {
        let annotator = ShowtimeAnnotator::default();
        let show = Showtime { start: 100, end: 200 };
        assert_eq!(annotator.classify(show, 100), ShowtimeStatus::AlmostEnding);
    }

    #[test]
    fn custom_warning_window() {
        let annotator = ShowtimeAnnotator::new(Duration::from_secs(60));
        assert_eq!(annotator.classify(SHOW, SHOW.start - 61), ShowtimeStatus::Upcoming);
        assert_eq!(annotator.classify(SHOW, SHOW.start - 60), ShowtimeStatus::AlmostStarting);
    }

    #[test]
    fn css_classes() {
        assert_eq!(
            ShowtimeStatus::all_css_classes().collect_vec(),
            vec!["almost-starting", "started", "almost-ending", "over"]
        );
        assert!(ShowtimeStatus::Upcoming.css_classes().is_empty());
        assert_eq!(ShowtimeStatus::AlmostEnding.css_classes(), &["started", "almost-ending"]);
        assert_eq!(ShowtimeStatus::Upcoming.annotation_class(), None);
        assert_eq!(ShowtimeStatus::Over.annotation_class(), Some("over"));
    }

    #[test]
    fn time_left_text() {
        assert_eq!(TimeLeft::from_seconds(0).to_string(), "0 sec");
        assert_eq!(TimeLeft::from_seconds(60).to_string(), "60 sec");
        assert_eq!(TimeLeft::from_seconds(61).to_string(), "1 min");
        assert_eq!(TimeLeft::from_seconds(299).to_string(), "4 min");
        assert_eq!(TimeLeft::from_seconds(300).to_string(), "5 min");
        assert_eq!(TimeLeft::from_seconds(299).minutes(), 4);
        assert_eq!(TimeLeft::from_seconds(30).minutes(), 1);
        assert_eq!(TimeLeft::from_seconds(1).minutes(), 1);
        assert_eq!(TimeLeft::from_seconds(0).minutes(), 0);
    }

    #[test]
    fn extreme_values_do_not_wrap() {
        let annotator = ShowtimeAnnotator::new(Duration::from_secs(u64::MAX));
        assert_eq!(annotator.classify(SHOW, 0), ShowtimeStatus::AlmostStarting);
        assert_eq!(annotator.classify(SHOW, SHOW.start), ShowtimeStatus::AlmostEnding);

        let annotator = ShowtimeAnnotator::default();
        let far_future = Showtime { start: i64::MAX - 10, end: i64::MAX };
        let a = annotator.annotate(far_future, i64::MIN);
        assert_eq!(a.status, ShowtimeStatus::Upcoming);
        let endless = Showtime { start: i64::MIN, end: i64::MAX };
        let a = annotator.annotate(endless, -1);
        assert_eq!(a.status, ShowtimeStatus::Started);
        assert_eq!(a.time_left, Some(TimeLeft::Minutes(i64::MAX / 60)));
        let a = annotator.annotate(endless, i64::MAX - 100);
        assert_eq!(a.status, ShowtimeStatus::AlmostEnding);
        assert_eq!(a.time_left, Some(TimeLeft::Minutes(1)));
    }

    #[test]
    fn annotation_counts_towards_relevant_bound() {
        let annotator = ShowtimeAnnotator::default();
        let a = annotator.annotate(SHOW, SHOW.start - 45);
        assert_eq!(a.status, ShowtimeStatus::AlmostStarting);
        assert_eq!(a.time_left, Some(TimeLeft::Seconds(45)));

        let a = annotator.annotate(SHOW, SHOW.end - 130);
        assert_eq!(a.status, ShowtimeStatus::AlmostEnding);
        assert_eq!(a.time_left, Some(TimeLeft::Minutes(2)));

        let a = annotator.annotate(SHOW, SHOW.end + 5);
        assert_eq!(a.status, ShowtimeStatus::Over);
        assert_eq!(a.time_left, None);

        let a = annotator.annotate(SHOW, 0);
        assert_eq!(a.status, ShowtimeStatus::Upcoming);
        assert_eq!(a.time_left, None);
    }
}
