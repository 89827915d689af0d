use strum::{EnumIter, EnumString, IntoStaticStr};
use time::{OffsetDateTime, Weekday};


// Shows run past midnight. Anything before this hour still belongs to the previous day's program.
pub const DEFAULT_ROLLOVER_HOUR: u8 = 6;

// Festival days that have a pane of their own. Names are the pane tokens used in element ids
// (`pane-<name>`) and in the legacy table classes (`day-contents <name>`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumString, IntoStaticStr)]
pub enum FestivalDay {
    #[strum(serialize = "donderdag")]
    Thursday,
    #[strum(serialize = "vrijdag")]
    Friday,
    #[strum(serialize = "zaterdag")]
    Saturday,
    #[strum(serialize = "zondag")]
    Sunday,
}

impl FestivalDay {
    pub fn pane_name(self) -> &'static str { self.into() }

    // Any day without a pane of its own shows Thursday: this is where the program starts.
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Thursday => FestivalDay::Thursday,
            Weekday::Friday => FestivalDay::Friday,
            Weekday::Saturday => FestivalDay::Saturday,
            Weekday::Sunday => FestivalDay::Sunday,
            Weekday::Monday | Weekday::Tuesday | Weekday::Wednesday => FestivalDay::Thursday,
        }
    }
}

pub fn festival_weekday(weekday: Weekday, hour: u8, rollover_hour: u8) -> Weekday {
    if hour < rollover_hour { weekday.previous() } else { weekday }
}

pub fn pane_for(weekday: Weekday, hour: u8, rollover_hour: u8) -> FestivalDay {
    FestivalDay::from_weekday(festival_weekday(weekday, hour, rollover_hour))
}

pub fn pane_for_datetime(local: OffsetDateTime, rollover_hour: u8) -> FestivalDay {
    pane_for(local.weekday(), local.hour(), rollover_hour)
}

// Hash navigation selects the pane verbatim, without applying any day logic.
pub fn pane_from_fragment(fragment: &str) -> Option<&str> {
    let name = fragment.strip_prefix('#').unwrap_or(fragment);
    if name.is_empty() { None } else { Some(name) }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct DayRouter {
    selected: Option<String>,
}

impl DayRouter {
    pub fn new() -> Self { DayRouter { selected: None } }

    pub fn selected(&self) -> Option<&str> { self.selected.as_deref() }

    // Returns true if the selection changed and the DOM needs to be updated.
    pub fn select(&mut self, pane: &str) -> bool {
        if self.selected.as_deref() == Some(pane) {
            return false;
        }
        self.selected = Some(pane.to_owned());
        true
    }
}


#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn early_hours_belong_to_previous_day() {
        assert_eq!(pane_for(Weekday::Saturday, 5, 6), FestivalDay::Friday);
        assert_eq!(pane_for(Weekday::Saturday, 6, 6), FestivalDay::Saturday);
        assert_eq!(pane_for(Weekday::Saturday, 0, 6), FestivalDay::Friday);
        assert_eq!(pane_for(Weekday::Saturday, 23, 6), FestivalDay::Saturday);
        assert_eq!(pane_for(Weekday::Monday, 5, 6), FestivalDay::Sunday);
        assert_eq!(pane_for(Weekday::Friday, 3, 6), FestivalDay::Thursday);
    }

    #[test]
    fn days_without_pane_default_to_thursday() {
        assert_eq!(pane_for(Weekday::Monday, 12, 6), FestivalDay::Thursday);
        assert_eq!(pane_for(Weekday::Tuesday, 12, 6), FestivalDay::Thursday);
        assert_eq!(pane_for(Weekday::Wednesday, 12, 6), FestivalDay::Thursday);
        assert_eq!(pane_for(Weekday::Thursday, 5, 6), FestivalDay::Thursday);
    }

    #[test]
    fn from_datetime() {
        // 2024-07-06 is a Saturday.
        assert_eq!(pane_for_datetime(datetime!(2024-07-06 1:30 +2), 6), FestivalDay::Friday);
        assert_eq!(pane_for_datetime(datetime!(2024-07-06 6:00 +2), 6), FestivalDay::Saturday);
    }

    #[test]
    fn pane_names() {
        assert_eq!(FestivalDay::Saturday.pane_name(), "zaterdag");
        assert!(FestivalDay::from_str("woensdag").is_err());
        for day in FestivalDay::iter() {
            assert_eq!(FestivalDay::from_str(day.pane_name()), Ok(day));
        }
    }

    #[test]
    fn fragment() {
        assert_eq!(pane_from_fragment("#zaterdag"), Some("zaterdag"));
        assert_eq!(pane_from_fragment("info"), Some("info"));
        assert_eq!(pane_from_fragment("#"), None);
        assert_eq!(pane_from_fragment(""), None);
    }

    #[test]
    fn router_reports_changes_only() {
        let mut router = DayRouter::new();
        assert!(router.select("vrijdag"));
        assert!(!router.select("vrijdag"));
        assert!(router.select("info"));
        assert_eq!(router.selected(), Some("info"));
    }
}
