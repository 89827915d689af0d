use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use strum::{EnumIter, EnumString, IntoStaticStr};


pub const CALENDAR_PATH: &str = "/programme.ics";
pub const GOOGLE_CALENDAR_SUBSCRIBE_URL: &str = "https://calendar.google.com/calendar/r?cid=";

// Without any URL parameters the calendar feed adds its own default reminders. This parameter is
// the only way to ask for none at all.
const DISABLE_REMINDERS_PARAM: &str = "enable_reminders=0";

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumString, IntoStaticStr)]
pub enum Reference {
    #[strum(serialize = "start_utc")]
    StartUtc,
    #[strum(serialize = "end_utc")]
    EndUtc,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumString, IntoStaticStr)]
pub enum Sign {
    #[strum(serialize = "-")]
    Before,
    #[strum(serialize = "+")]
    After,
}

// One calendar alarm relative to a show: "6 minutes before the start", "10 minutes after the end".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ReminderEntry {
    pub reference: Reference,
    pub sign: Sign,
    pub minutes: u32,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ReminderParseError {
    MissingSeparator,
    UnknownReference(String),
    UnknownSign(String),
    InvalidMinutes(String),
}

impl fmt::Display for ReminderParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderParseError::MissingSeparator => write!(f, "expected <reference>.<offset>"),
            ReminderParseError::UnknownReference(s) => write!(f, "unknown reference \"{s}\""),
            ReminderParseError::UnknownSign(s) => write!(f, "unknown sign \"{s}\""),
            ReminderParseError::InvalidMinutes(s) => write!(f, "invalid minute offset \"{s}\""),
        }
    }
}

impl ReminderEntry {
    pub fn new(reference: Reference, sign: Sign, minutes: u32) -> Self {
        ReminderEntry { reference, sign, minutes }
    }

    // Parses the values of the three `<select>` elements of a reminder row.
    pub fn from_form(
        reference: &str, sign: &str, minutes: &str,
    ) -> Result<Self, ReminderParseError> {
        Ok(ReminderEntry {
            reference: parse_reference(reference)?,
            sign: parse_sign(sign)?,
            minutes: parse_minutes(minutes)?,
        })
    }

    pub fn offset_minutes(&self) -> i64 {
        match self.sign {
            Sign::Before => -i64::from(self.minutes),
            Sign::After => i64::from(self.minutes),
        }
    }
}

// Rows pre-populated when the reminder page opens.
pub fn default_reminders() -> [ReminderEntry; 2] {
    [
        ReminderEntry::new(Reference::StartUtc, Sign::Before, 6),
        ReminderEntry::new(Reference::EndUtc, Sign::Before, 6),
    ]
}

// URL form: `<reference>.<sign><minutes>`, e.g. `start_utc.-6`.
impl fmt::Display for ReminderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reference: &str = self.reference.into();
        let sign: &str = self.sign.into();
        write!(f, "{reference}.{sign}{}", self.minutes)
    }
}

// Accepts what the calendar feed accepts: the sign is optional and defaults to "after".
impl FromStr for ReminderEntry {
    type Err = ReminderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (reference, offset) = s.split_once('.').ok_or(ReminderParseError::MissingSeparator)?;
        let (sign, minutes) = match offset.strip_prefix('-') {
            Some(minutes) => (Sign::Before, minutes),
            None => (Sign::After, offset.strip_prefix('+').unwrap_or(offset)),
        };
        Ok(ReminderEntry {
            reference: parse_reference(reference)?,
            sign,
            minutes: parse_minutes(minutes)?,
        })
    }
}

fn parse_reference(s: &str) -> Result<Reference, ReminderParseError> {
    Reference::from_str(s).map_err(|_| ReminderParseError::UnknownReference(s.to_owned()))
}

fn parse_sign(s: &str) -> Result<Sign, ReminderParseError> {
    Sign::from_str(s).map_err(|_| ReminderParseError::UnknownSign(s.to_owned()))
}

fn parse_minutes(s: &str) -> Result<u32, ReminderParseError> {
    s.trim().parse().map_err(|_| ReminderParseError::InvalidMinutes(s.to_owned()))
}

// Relative URL of the calendar feed for the given reminders and days. Days are the values of the
// checked day checkboxes, in page order.
pub fn calendar_query<'a>(
    reminders: &[ReminderEntry], days: impl IntoIterator<Item = &'a str>,
) -> String {
    let mut url = CALENDAR_PATH.to_owned();
    if reminders.is_empty() {
        url.push('?');
        url.push_str(DISABLE_REMINDERS_PARAM);
    } else {
        url.push_str("?reminders=");
        url.push_str(&reminders.iter().join(";"));
    }
    let days = days.into_iter().join(";");
    if !days.is_empty() {
        url.push_str("&days=");
        url.push_str(&days);
    }
    url
}

pub fn webcal_url(host: &str, relative_url: &str) -> String {
    format!("webcal://{host}{relative_url}")
}

pub fn google_calendar_url(webcal_url: &str) -> String {
    format!("{GOOGLE_CALENDAR_SUBSCRIBE_URL}{webcal_url}")
}
