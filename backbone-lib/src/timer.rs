//! This module contains a timer, that generates local events for the session.

/// The local timers the session knows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Ends the "wrong guess" feedback that follows a guess response.
    WrongGuessFlash,
}

struct TimeEntry {
    kind: TimerKind,
    remaining_time: f32,
}

#[derive(Default)]
pub struct Timer {
    list_of_timers: Vec<TimeEntry>,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            list_of_timers: Vec::new(),
        }
    }

    /// Starts a new timer. If a timer of that kind already runs it gets overwritten.
    pub fn start_timer(&mut self, kind: TimerKind, remaining_time: f32) {
        self.list_of_timers.retain(|e| e.kind != kind);
        self.list_of_timers.push(TimeEntry {
            kind,
            remaining_time,
        });
    }

    /// Kills a timer (if still existing).
    pub fn cancel_timer(&mut self, kind: TimerKind) {
        self.list_of_timers.retain(|e| e.kind != kind);
    }

    /// Advances all timers and returns the ones that ran out.
    pub fn update_and_get_list(&mut self, delta_time: f32) -> Vec<TimerKind> {
        let mut result = Vec::new();

        for entry in self.list_of_timers.iter_mut() {
            entry.remaining_time -= delta_time;
            if entry.remaining_time <= 0.0 {
                result.push(entry.kind);
            }
        }

        self.list_of_timers.retain(|e| !result.contains(&e.kind));

        result
    }
}
