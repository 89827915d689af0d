// Named message boxes that hide themselves after a while.
//
// The board only records deadlines. Whoever drives it calls `advance` once a deadline has passed.
// There is at most one pending timer per toast.

use std::collections::BTreeMap;
use std::time::Duration;

use instant::Instant;


pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);
pub const DEFAULT_RETRIGGER_DELAY: Duration = Duration::from_millis(250);

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ToastEffect {
    Show(String),
    Hide(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum TimerAction {
    Hide,
    // Show again after a retrigger. Carries the timeout of the `show` call that caused it.
    Reshow { timeout: Duration },
}

#[derive(Clone, Copy, Debug)]
struct PendingTimer {
    deadline: Instant,
    action: TimerAction,
}

#[derive(Clone, Copy, Debug, Default)]
struct ToastSlot {
    active: bool,
    pending: Option<PendingTimer>,
}

#[derive(Clone, Debug)]
pub struct ToastBoard {
    retrigger_delay: Duration,
    slots: BTreeMap<String, ToastSlot>,
}

impl Default for ToastBoard {
    fn default() -> Self { ToastBoard::new(DEFAULT_RETRIGGER_DELAY) }
}

impl ToastBoard {
    pub fn new(retrigger_delay: Duration) -> Self {
        ToastBoard { retrigger_delay, slots: BTreeMap::new() }
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.slots.get(name).is_some_and(|slot| slot.active)
    }

    pub fn has_pending_timer(&self, name: &str) -> bool {
        self.slots.get(name).is_some_and(|slot| slot.pending.is_some())
    }

    // Zero `timeout` means the toast stays until hidden explicitly.
    //
    // Showing a toast that is already visible hides it and shows it again a bit later. Otherwise
    // a repeated identical message would go unnoticed.
    pub fn show(&mut self, name: &str, timeout: Duration, now: Instant) -> Vec<ToastEffect> {
        let retrigger_delay = self.retrigger_delay;
        let slot = self.slots.entry(name.to_owned()).or_default();
        if slot.active {
            slot.active = false;
            slot.pending = Some(PendingTimer {
                deadline: now + retrigger_delay,
                action: TimerAction::Reshow { timeout },
            });
            vec![ToastEffect::Hide(name.to_owned())]
        } else {
            activate(slot, timeout, now);
            vec![ToastEffect::Show(name.to_owned())]
        }
    }

    pub fn hide(&mut self, name: &str) -> Vec<ToastEffect> {
        match self.slots.get_mut(name) {
            Some(slot) => {
                slot.active = false;
                slot.pending = None;
                vec![ToastEffect::Hide(name.to_owned())]
            }
            None => vec![],
        }
    }

    // Fires all timers with deadline at or before `now`.
    pub fn advance(&mut self, now: Instant) -> Vec<ToastEffect> {
        let mut effects = vec![];
        for (name, slot) in self.slots.iter_mut() {
            let Some(timer) = slot.pending else {
                continue;
            };
            if timer.deadline > now {
                continue;
            }
            slot.pending = None;
            match timer.action {
                TimerAction::Hide => {
                    slot.active = false;
                    effects.push(ToastEffect::Hide(name.clone()));
                }
                TimerAction::Reshow { timeout } => {
                    activate(slot, timeout, timer.deadline);
                    effects.push(ToastEffect::Show(name.clone()));
                }
            }
        }
        effects
    }

    // The earliest moment when `advance` has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slots.values().filter_map(|slot| slot.pending).map(|t| t.deadline).min()
    }
}

fn activate(slot: &mut ToastSlot, timeout: Duration, now: Instant) {
    slot.active = true;
    slot.pending = (!timeout.is_zero()).then(|| PendingTimer {
        deadline: now + timeout,
        action: TimerAction::Hide,
    });
}
