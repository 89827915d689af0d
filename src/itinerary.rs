// Per-act itinerary as served by the backend, and the decisions needed to reflect it in the page.
//
// The backend is the source of truth. The page keeps no copy of the data: whatever it last
// received is implied by the state of the controls.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SyncError;


pub const DRESSING_ROOM_FIELD: &str = "dressing_room";

// Sentinel the backend uses for "no room assigned".
const FREE_ROOM_SENTINEL: &str = "None";

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActKey(String);

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DressingRoom {
    #[default]
    Free,
    Room(String),
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ItineraryEntry {
    #[serde(default)]
    pub dressing_room: DressingRoom,
    // Free-text fields (contacts, arrival times, ...). Values are normally strings, but we don't
    // want one odd value to break the whole update.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

pub type Itinerary = BTreeMap<ActKey, ItineraryEntry>;

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum SyncScope {
    All,
    Act(ActKey),
}

impl ActKey {
    pub fn new(key: impl Into<String>) -> Self { ActKey(key.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ActKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<String> for DressingRoom {
    fn from(s: String) -> Self {
        if s == FREE_ROOM_SENTINEL { DressingRoom::Free } else { DressingRoom::Room(s) }
    }
}

impl From<DressingRoom> for String {
    fn from(room: DressingRoom) -> Self {
        match room {
            DressingRoom::Free => FREE_ROOM_SENTINEL.to_owned(),
            DressingRoom::Room(s) => s,
        }
    }
}

impl DressingRoom {
    // Value as used in element ids and in PUT bodies.
    pub fn as_str(&self) -> &str {
        match self {
            DressingRoom::Free => FREE_ROOM_SENTINEL,
            DressingRoom::Room(s) => s,
        }
    }
}

impl ItineraryEntry {
    // `None` for missing and `null` fields. Non-string values are shown as their JSON text.
    pub fn field_text(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl SyncScope {
    pub fn act(&self) -> Option<&ActKey> {
        match self {
            SyncScope::All => None,
            SyncScope::Act(key) => Some(key),
        }
    }

    pub fn url(&self, api_base: &str) -> String {
        match self {
            SyncScope::All => format!("{api_base}itinerary"),
            SyncScope::Act(key) => format!("{api_base}itinerary/{key}"),
        }
    }
}

pub fn field_url(api_base: &str, act: &ActKey, field: &str) -> String {
    format!("{api_base}itinerary/{act}/{field}")
}

// The whole itinerary is a map keyed by act; a single act is served as a bare entry.
pub fn parse_response(scope: &SyncScope, body: &str) -> Result<Itinerary, SyncError> {
    Ok(match scope {
        SyncScope::All => serde_json::from_str(body)?,
        SyncScope::Act(key) => {
            let entry: ItineraryEntry = serde_json::from_str(body)?;
            BTreeMap::from([(key.clone(), entry)])
        }
    })
}

pub fn preset_button_id(act: &ActKey, room: &str) -> String { format!("{act}-{room}") }
pub fn custom_room_input_id(act: &ActKey) -> String { format!("{act}-custom-room") }
pub fn custom_room_button_id(act: &ActKey) -> String { format!("{act}-custom-room-button") }

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RoomSelection {
    // One of the pre-rendered room buttons.
    Preset { button_id: String },
    // A room without a button of its own: goes into the free-text room input.
    Custom { input_id: String, button_id: String, room: String },
    // The act has no room and there is no button for "no room".
    Nothing,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FieldUpdate {
    pub field: String,
    // `None` clears the field.
    pub value: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ActReconciliation {
    pub act: ActKey,
    pub selection: RoomSelection,
    pub fields: Vec<FieldUpdate>,
}

// Decides how the controls of one act should look.
//   - `element_exists` tells whether an element with the given id is present in the page;
//   - `field_names` are the free-text fields the page renders for this act.
pub fn plan_reconciliation<'a>(
    act: &ActKey, entry: &ItineraryEntry, element_exists: impl Fn(&str) -> bool,
    field_names: impl IntoIterator<Item = &'a str>,
) -> ActReconciliation {
    let preset_id = preset_button_id(act, entry.dressing_room.as_str());
    let selection = if element_exists(&preset_id) {
        RoomSelection::Preset { button_id: preset_id }
    } else {
        match &entry.dressing_room {
            DressingRoom::Free => RoomSelection::Nothing,
            DressingRoom::Room(room) => RoomSelection::Custom {
                input_id: custom_room_input_id(act),
                button_id: custom_room_button_id(act),
                room: room.clone(),
            },
        }
    };
    let fields = field_names
        .into_iter()
        .filter(|&name| name != DRESSING_ROOM_FIELD)
        .map(|name| FieldUpdate {
            field: name.to_owned(),
            value: entry.field_text(name),
        })
        .collect();
    ActReconciliation { act: act.clone(), selection, fields }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RequestTicket(u64);

// Requests may overlap: the periodic refresh can race with a refresh triggered by an edit. Without
// care a slow response would overwrite fresher data. The guard remembers, per act, the newest
// request whose data has been applied and rejects anything older.
#[derive(Clone, Debug, Default)]
pub struct StaleGuard {
    last_issued: u64,
    applied_all: u64,
    applied: HashMap<ActKey, u64>,
}

impl StaleGuard {
    pub fn new() -> Self { StaleGuard::default() }

    pub fn issue(&mut self) -> RequestTicket {
        self.last_issued += 1;
        RequestTicket(self.last_issued)
    }

    fn newest_applied(&self, act: &ActKey) -> u64 {
        self.applied.get(act).copied().unwrap_or(0).max(self.applied_all)
    }

    pub fn accepts(&self, ticket: RequestTicket, act: &ActKey) -> bool {
        ticket.0 > self.newest_applied(act)
    }

    // Whether a response newer than `ticket` has already been applied to the act.
    pub fn is_superseded(&self, ticket: RequestTicket, act: &ActKey) -> bool {
        self.newest_applied(act) > ticket.0
    }

    pub fn record(&mut self, ticket: RequestTicket, act: &ActKey) {
        let applied = self.applied.entry(act.clone()).or_insert(0);
        *applied = (*applied).max(ticket.0);
    }

    // Drops acts that are covered by a newer response. Records the rest as applied.
    pub fn filter_fresh(
        &mut self, ticket: RequestTicket, scope: &SyncScope, itinerary: Itinerary,
    ) -> Itinerary {
        let fresh: Itinerary = itinerary
            .into_iter()
            .filter(|(act, _)| {
                let accepted = self.accepts(ticket, act);
                if !accepted {
                    log::debug!("Dropping stale itinerary for act {act} (request {})", ticket.0);
                }
                accepted
            })
            .collect();
        for act in fresh.keys() {
            self.record(ticket, act);
        }
        if *scope == SyncScope::All {
            self.applied_all = self.applied_all.max(ticket.0);
        }
        fresh
    }

    // Which room selections an applied response may clear. Call after `filter_fresh`.
    //
    // A full response owns every act, including acts it does not mention: those have no room
    // anymore. Acts already covered by a newer response are left alone.
    pub fn selection_reset(&self, ticket: RequestTicket, scope: &SyncScope) -> SelectionReset {
        match scope {
            SyncScope::All if self.applied_all > ticket.0 => SelectionReset::Nothing,
            SyncScope::All => {
                let mut keep: Vec<ActKey> = self
                    .applied
                    .iter()
                    .filter(|&(_, &applied)| applied > ticket.0)
                    .map(|(act, _)| act.clone())
                    .collect();
                keep.sort();
                SelectionReset::Everything { keep }
            }
            SyncScope::Act(act) if self.is_superseded(ticket, act) => SelectionReset::Nothing,
            SyncScope::Act(act) => SelectionReset::Act(act.clone()),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SelectionReset {
    Nothing,
    Everything { keep: Vec<ActKey> },
    Act(ActKey),
}

// Counts overlapping requests for a scope so that controls are re-enabled only when the last one
// finishes.
#[derive(Clone, Debug, Default)]
pub struct InFlight {
    requests: HashMap<SyncScope, u32>,
}

impl InFlight {
    pub fn new() -> Self { InFlight::default() }

    // Returns true if this is the first request for the scope.
    pub fn begin(&mut self, scope: &SyncScope) -> bool {
        let count = self.requests.entry(scope.clone()).or_insert(0);
        *count += 1;
        *count == 1
    }

    // Returns true if no requests for the scope remain.
    pub fn finish(&mut self, scope: &SyncScope) -> bool {
        let Some(count) = self.requests.get_mut(scope) else {
            return true;
        };
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.requests.remove(scope);
            true
        } else {
            false
        }
    }

    pub fn is_idle(&self, scope: &SyncScope) -> bool { !self.requests.contains_key(scope) }
}
