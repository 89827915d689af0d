use std::time::Duration;

use enum_map::{Enum, EnumMap, enum_map};
use instant::Instant;
use strum::{EnumIter, IntoStaticStr};

use crate::config::BoardConfig;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum TickKind {
    Itinerary,
    Showtime,
    MirrorAnimation,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum TaskState {
    Stopped,
    Waiting { next_run: Instant },
    Running,
}

// A periodic job that reschedules itself only after the current run completes. Hence two runs of
// the same task never overlap, and a slow run delays the next one instead of piling up.
//
// The driver loop is expected to look like:
//   while let Some(wait) = task.time_until_due(now) {
//       sleep(wait);
//       if task.begin(now) { run(); task.complete(now); }
//   }
#[derive(Clone, Copy, Debug)]
pub struct RepeatingTask {
    period: Duration,
    state: TaskState,
}

impl RepeatingTask {
    pub fn new(period: Duration) -> Self { RepeatingTask { period, state: TaskState::Stopped } }

    pub fn period(&self) -> Duration { self.period }
    pub fn is_stopped(&self) -> bool { self.state == TaskState::Stopped }
    pub fn is_running(&self) -> bool { self.state == TaskState::Running }

    // Returns false if the task was already started. The first run is due immediately.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.state != TaskState::Stopped {
            return false;
        }
        self.state = TaskState::Waiting { next_run: now };
        true
    }

    // A run in progress is not interrupted, but it will not be rescheduled.
    pub fn stop(&mut self) { self.state = TaskState::Stopped; }

    pub fn is_due(&self, now: Instant) -> bool {
        matches!(self.state, TaskState::Waiting { next_run } if next_run <= now)
    }

    // `None` if the task is stopped. `Duration::ZERO` while a run is in progress: the driver
    // should not sleep, but `begin` will refuse to start another run.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        match self.state {
            TaskState::Stopped => None,
            TaskState::Waiting { next_run } => {
                Some(if next_run > now { next_run - now } else { Duration::ZERO })
            }
            TaskState::Running => Some(Duration::ZERO),
        }
    }

    pub fn begin(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.state = TaskState::Running;
        true
    }

    pub fn complete(&mut self, now: Instant) {
        if self.state == TaskState::Running {
            self.state = TaskState::Waiting { next_run: now + self.period };
        }
    }
}

pub struct TickSchedule {
    tasks: EnumMap<TickKind, RepeatingTask>,
}

impl TickSchedule {
    pub fn new(config: &BoardConfig) -> Self {
        TickSchedule {
            tasks: enum_map! {
                TickKind::Itinerary => RepeatingTask::new(config.itinerary_refresh_interval),
                TickKind::Showtime => RepeatingTask::new(config.showtime_refresh_interval),
                TickKind::MirrorAnimation => RepeatingTask::new(config.mirror_animation_interval),
            },
        }
    }

    pub fn task(&self, kind: TickKind) -> &RepeatingTask { &self.tasks[kind] }
    pub fn task_mut(&mut self, kind: TickKind) -> &mut RepeatingTask { &mut self.tasks[kind] }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn secs(v: u64) -> Duration { Duration::from_secs(v) }

    #[test]
    fn self_rescheduling() {
        let t0 = Instant::now();
        let mut task = RepeatingTask::new(secs(60));
        assert!(task.is_stopped());
        assert_eq!(task.time_until_due(t0), None);
        assert!(!task.begin(t0));

        assert!(task.start(t0));
        assert!(!task.start(t0));
        assert!(task.is_due(t0));
        assert!(task.begin(t0));
        assert!(task.is_running());
        assert!(!task.is_due(t0 + secs(120)));
        assert!(!task.begin(t0 + secs(120)));

        // Rescheduled relative to completion, not to the start of the run.
        task.complete(t0 + secs(5));
        assert_eq!(task.time_until_due(t0 + secs(5)), Some(secs(60)));
        assert!(!task.is_due(t0 + secs(64)));
        assert!(task.is_due(t0 + secs(65)));
    }

    #[test]
    fn stop_during_run() {
        let t0 = Instant::now();
        let mut task = RepeatingTask::new(secs(1));
        task.start(t0);
        task.begin(t0);
        task.stop();
        task.complete(t0 + secs(1));
        assert!(task.is_stopped());
        assert_eq!(task.time_until_due(t0 + secs(10)), None);
        assert!(task.start(t0 + secs(10)));
    }

    #[test]
    fn schedule_from_config() {
        let schedule = TickSchedule::new(&BoardConfig::default());
        assert_eq!(schedule.task(TickKind::Itinerary).period(), secs(60));
        assert_eq!(schedule.task(TickKind::Showtime).period(), secs(1));
        assert_eq!(
            schedule.task(TickKind::MirrorAnimation).period(),
            Duration::from_millis(500)
        );
    }
}
