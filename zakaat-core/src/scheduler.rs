//! Reminder sweep: decide which reminders fire today and roll them forward.
//!
//! The sweep is pure. Persisting the rolled-forward records and showing the
//! notifications is the caller's job.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reminders::ReminderRecord;

/// Which reminders count as due
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SweepPolicy {
    /// Fire only when `next_date == today`; missed days are never fired or advanced.
    #[default]
    ExactDay,
    /// Fire when `next_date <= today`, then advance until `next_date > today`.
    CatchUp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Reminders that fired, as they were before being advanced
    pub due: Vec<ReminderRecord>,
    /// The same reminders with `next_date` rolled forward
    pub updated: Vec<ReminderRecord>,
}

impl SweepOutcome {
    pub fn is_empty(&self) -> bool {
        self.due.is_empty()
    }
}

/// Sweep with the default exact-day policy.
pub fn sweep_due(today: NaiveDate, reminders: &[ReminderRecord]) -> SweepOutcome {
    sweep_due_with(SweepPolicy::ExactDay, today, reminders)
}

pub fn sweep_due_with(
    policy: SweepPolicy,
    today: NaiveDate,
    reminders: &[ReminderRecord],
) -> SweepOutcome {
    let mut out = SweepOutcome::default();

    for reminder in reminders {
        let fires = match policy {
            SweepPolicy::ExactDay => reminder.next_date == today,
            SweepPolicy::CatchUp => reminder.next_date <= today,
        };
        if !fires {
            continue;
        }

        let mut rolled = reminder.clone();
        rolled.advance();
        if policy == SweepPolicy::CatchUp {
            while rolled.next_date <= today {
                rolled.advance();
            }
        }

        out.due.push(reminder.clone());
        out.updated.push(rolled);
    }

    out
}
