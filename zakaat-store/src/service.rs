//! Use-case facade over the record store.
//!
//! Presentation code calls these operations and renders whatever comes back;
//! nothing in here prints or prompts.

use chrono::{NaiveDate, NaiveDateTime};
use zakaat_core::{
    AssetDeclaration, CalculationResult, HISTORY_KEY_PREFIX, REMINDER_KEY_PREFIX, ReminderKind,
    ReminderRecord, SavedCalculation, SweepPolicy, calculate, sweep_due_with, time, unique_key,
};

use crate::error::{StoreError, StoreResult};
use crate::store::{HISTORY, REMINDERS, RecordStore};

/// A reminder that fired, with the text to show the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The reminder as stored after being rolled forward
    pub reminder: ReminderRecord,
    /// The date it fired for
    pub fired_on: NaiveDate,
    pub message: String,
}

/// Result of one reminder check
#[derive(Debug, Default)]
pub struct ReminderSweep {
    /// Reminders that fired and were rolled forward on disk
    pub notifications: Vec<Notification>,
    /// Due reminders whose new date could not be written, by key
    pub failures: Vec<(String, StoreError)>,
}

impl ReminderSweep {
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty() && self.failures.is_empty()
    }
}

pub struct ZakaatService<'a> {
    store: &'a RecordStore,
    policy: SweepPolicy,
}

impl<'a> ZakaatService<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self {
            store,
            policy: SweepPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SweepPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn calculate(
        &self,
        declaration: &AssetDeclaration,
        gold_price_per_gram: f64,
        silver_price_per_gram: f64,
    ) -> CalculationResult {
        calculate(declaration, gold_price_per_gram, silver_price_per_gram)
    }

    /// Persist a calculation under a fresh `calc_<timestamp>` key; returns the key.
    pub fn save_calculation(&self, result: &CalculationResult) -> StoreResult<String> {
        let existing = self.store.list_keys(HISTORY)?;
        let key = unique_key(HISTORY_KEY_PREFIX, result.timestamp(), &existing);
        let record = SavedCalculation::from_result(key.clone(), result);
        self.store.put(HISTORY, &key, &record)?;

        tracing::info!(key = %key, zakaat = record.zakaat_amount, "calculation saved");
        Ok(key)
    }

    /// Saved calculations in key (creation) order
    pub fn list_history(&self) -> StoreResult<Vec<SavedCalculation>> {
        Ok(self
            .store
            .entries::<SavedCalculation>(HISTORY)?
            .into_iter()
            .map(|(key, record)| record.with_key(key))
            .collect())
    }

    pub fn history_entry(&self, key: &str) -> StoreResult<Option<SavedCalculation>> {
        Ok(self
            .store
            .get::<SavedCalculation>(HISTORY, key)?
            .map(|record| record.with_key(key)))
    }

    /// Returns whether an entry was removed
    pub fn delete_history_entry(&self, key: &str) -> StoreResult<bool> {
        let removed = self.store.delete(HISTORY, key)?;
        if removed {
            tracing::info!(key, "history entry deleted");
        }
        Ok(removed)
    }

    /// Create a reminder.
    ///
    /// `start_date` is `YYYY-MM-DD`; anything else starts the reminder today (`now`'s date).
    pub fn set_reminder(
        &self,
        kind: ReminderKind,
        start_date: &str,
        note: &str,
        now: NaiveDateTime,
    ) -> StoreResult<ReminderRecord> {
        let start = time::parse_date_or(start_date, now.date());
        let existing = self.store.list_keys(REMINDERS)?;
        let key = unique_key(REMINDER_KEY_PREFIX, now, &existing);

        let reminder = ReminderRecord::new(key.clone(), kind, start, note);
        self.store.put(REMINDERS, &key, &reminder)?;

        tracing::info!(key = %key, kind = %kind, next = %reminder.next_date, "reminder set");
        Ok(reminder)
    }

    pub fn list_reminders(&self) -> StoreResult<Vec<ReminderRecord>> {
        Ok(self
            .store
            .entries::<ReminderRecord>(REMINDERS)?
            .into_iter()
            .map(|(key, record)| record.with_key(key))
            .collect())
    }

    pub fn delete_reminder(&self, key: &str) -> StoreResult<bool> {
        let removed = self.store.delete(REMINDERS, key)?;
        if removed {
            tracing::info!(key, "reminder deleted");
        }
        Ok(removed)
    }

    /// Fire the reminders due on `today` and persist their next occurrence.
    ///
    /// A reminder whose write fails is reported in `failures` and keeps its old
    /// date on disk; the others still fire. Only failing to load the
    /// collection is an `Err`.
    pub fn run_reminder_check(&self, today: NaiveDate) -> StoreResult<ReminderSweep> {
        let reminders = self.list_reminders()?;
        let outcome = sweep_due_with(self.policy, today, &reminders);

        let mut sweep = ReminderSweep::default();
        for (fired, updated) in outcome.due.iter().zip(outcome.updated) {
            if let Err(err) = self.store.put(REMINDERS, &updated.key, &updated) {
                tracing::warn!(key = %updated.key, error = %err, "reminder not rolled forward");
                sweep.failures.push((updated.key, err));
                continue;
            }
            tracing::info!(
                key = %updated.key,
                fired_for = %fired.next_date,
                next = %updated.next_date,
                "reminder fired"
            );
            sweep.notifications.push(Notification {
                message: fired.notification_message(),
                fired_on: fired.next_date,
                reminder: updated,
            });
        }

        tracing::debug!(
            checked = reminders.len(),
            fired = sweep.notifications.len(),
            failed = sweep.failures.len(),
            %today,
            "reminder sweep done"
        );
        Ok(sweep)
    }
}
