//! Shared clock, trigger and task builders for integration tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use parking_lot::Mutex;
use planme::task::domain::{Attribute, AttributeValue, SelectOption, Task, TaskId};
use planme::timer::ports::OvertimeTrigger;

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at [`t0`].
    pub fn new() -> Self {
        Self {
            now: Mutex::new(t0()),
        }
    }

    /// Moves the clock to `minutes` after [`t0`].
    pub fn set_minute(&self, minutes: i64) {
        *self.now.lock() = t0() + Duration::minutes(minutes);
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Fixed starting instant for scenarios.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 8, 30, 0)
        .single()
        .expect("valid instant")
}

/// Trigger that records every overtime report.
#[derive(Default)]
pub struct CountingTrigger {
    reports: Mutex<Vec<TaskId>>,
}

impl CountingTrigger {
    /// Returns how many reports named `task_id`.
    pub fn count_for(&self, task_id: &TaskId) -> usize {
        self.reports.lock().iter().filter(|id| *id == task_id).count()
    }

    /// Returns the total number of reports.
    pub fn total(&self) -> usize {
        self.reports.lock().len()
    }
}

impl OvertimeTrigger for CountingTrigger {
    fn notify_overtime(&self, task_id: &TaskId) {
        self.reports.lock().push(task_id.clone());
    }
}

/// Builds a task with a title and a status option.
pub fn task_with_status(id: &str, title: &str, status: Option<&str>) -> Task {
    Task::from_attributes(
        id,
        [
            Attribute::new(
                "Name",
                AttributeValue::Title {
                    title: title.to_owned(),
                },
            ),
            Attribute::new(
                "Status",
                AttributeValue::Status {
                    status: status.map(SelectOption::named),
                },
            ),
        ],
    )
}
