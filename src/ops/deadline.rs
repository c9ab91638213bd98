use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::task::{Task, TaskStatus};

/// The instant a deadline expires: the last second of that calendar day.
/// Naive (zone-free) arithmetic, compared against the caller's local time.
pub fn expires_at(deadline: NaiveDate) -> NaiveDateTime {
    deadline.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::seconds(1)
}

/// Time left until a deadline expires. Negative once past.
pub fn remaining(deadline: NaiveDate, now: NaiveDateTime) -> Duration {
    expires_at(deadline) - now
}

/// A task is overdue when its deadline has passed and it is still pending.
pub fn is_overdue(task: &Task, now: NaiveDateTime) -> bool {
    match task.deadline {
        Some(d) => task.status == TaskStatus::Pending && remaining(d, now) < Duration::zero(),
        None => false,
    }
}

/// Format a remaining duration as `3d 4h 5m 6s`, flooring at zero.
pub fn format_remaining(left: Duration) -> String {
    let total = left.num_seconds().max(0);
    let d = total / 86_400;
    let h = (total % 86_400) / 3_600;
    let m = (total % 3_600) / 60;
    let s = total % 60;
    format!("{}d {}h {}m {}s", d, h, m, s)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
