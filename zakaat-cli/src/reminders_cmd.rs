use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Subcommand;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use zakaat_core::{ReminderKind, time};
use zakaat_store::{Notification, RecordStore, ReminderSweep, ZakaatService};

use crate::config::{Config, RemindersSection};

#[derive(Subcommand, Debug)]
pub enum RemindersCommand {
    /// Create a recurring reminder
    Set {
        /// annual, monthly or custom (weekly)
        #[arg(long, default_value = "annual")]
        kind: ReminderKind,

        /// First date (YYYY-MM-DD); today when omitted or malformed
        #[arg(long, default_value = "")]
        start: String,

        #[arg(long, default_value = "")]
        note: String,
    },

    /// List reminders
    List,

    /// Delete a reminder
    Delete { key: String },

    /// Fire reminders due today and roll them forward
    Check {
        /// Pretend today is this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },

    /// Keep checking on a timer until Ctrl-C
    Watch {
        /// Seconds between checks (default: config [reminders].check_interval_secs)
        #[arg(long)]
        every_secs: Option<u64>,
    },
}

pub async fn run(store: &RecordStore, cfg: &Config, command: RemindersCommand) -> Result<()> {
    let service = ZakaatService::new(store).with_policy(cfg.reminders.policy());
    let tz = cfg.reminders.timezone.as_deref();

    match command {
        RemindersCommand::Set { kind, start, note } => {
            let now = time::local_now(tz)?;
            let reminder = service
                .set_reminder(kind, &start, &note, now)
                .context("Failed to set reminder")?;
            println!("Reminder set ({})", reminder.key);
            println!("  {}", reminder.summary_line());
        }

        RemindersCommand::List => {
            let reminders = service.list_reminders().context("Failed to load reminders")?;
            if reminders.is_empty() {
                println!("No reminders set");
                return Ok(());
            }
            for r in &reminders {
                println!("{}  {}", r.key, r.summary_line());
            }
        }

        RemindersCommand::Delete { key } => {
            let removed = service
                .delete_reminder(&key)
                .context("Failed to delete reminder")?;
            if removed {
                println!("Deleted {key}");
            } else {
                println!("No reminder with key {key}");
            }
        }

        RemindersCommand::Check { today } => {
            let today = match today {
                Some(raw) => time::parse_date(&raw)?,
                None => time::today(tz)?,
            };
            let sweep = check_once(store, &cfg.reminders, today)?;
            if sweep.is_empty() {
                println!("No reminders due on {today}");
            }
            report(&sweep);
            if !sweep.failures.is_empty() {
                bail!("{} due reminder(s) could not be updated", sweep.failures.len());
            }
        }

        RemindersCommand::Watch { every_secs } => {
            let secs = every_secs.unwrap_or(cfg.reminders.check_interval_secs).max(1);
            watch(store, &cfg.reminders, Duration::from_secs(secs)).await?;
        }
    }
    Ok(())
}

fn check_once(
    store: &RecordStore,
    section: &RemindersSection,
    today: NaiveDate,
) -> Result<ReminderSweep> {
    ZakaatService::new(store)
        .with_policy(section.policy())
        .run_reminder_check(today)
        .context("Reminder check failed")
}

/// Print what fired; failed writes go to the log.
fn report(sweep: &ReminderSweep) {
    for n in &sweep.notifications {
        print_notification(n);
    }
    for (key, err) in &sweep.failures {
        tracing::error!(key = %key, "reminder could not be rolled forward: {err}");
    }
}

fn print_notification(n: &Notification) {
    println!(
        "[{}] {} (next: {})",
        n.fired_on, n.message, n.reminder.next_date
    );
}

/// Runs a check now and then every `every`. A failed check is logged and the
/// loop keeps going.
async fn watch(store: &RecordStore, section: &RemindersSection, every: Duration) -> Result<()> {
    println!(
        "Checking reminders every {}s (Ctrl-C to stop)",
        every.as_secs()
    );

    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => tick(store, section).await,
            res = tokio::signal::ctrl_c() => {
                res.context("listen for Ctrl-C")?;
                tracing::info!("reminder watch stopped");
                break;
            }
        }
    }
    Ok(())
}

async fn tick(store: &RecordStore, section: &RemindersSection) {
    match time::today(section.timezone.as_deref()) {
        Ok(today) => tick_on(store, section, today).await,
        Err(err) => tracing::error!("{err:#}"),
    }
}

async fn tick_on(store: &RecordStore, section: &RemindersSection, today: NaiveDate) {
    let store = store.clone();
    let section = section.clone();

    let joined = tokio::task::spawn_blocking(move || check_once(&store, &section, today)).await;

    match joined {
        Ok(Ok(sweep)) => {
            tracing::debug!(
                fired = sweep.notifications.len(),
                failed = sweep.failures.len(),
                %today,
                "watch tick"
            );
            report(&sweep);
        }
        Ok(Err(err)) => tracing::error!("{err:#}"),
        Err(err) => tracing::error!(error = %err, "reminder check task failed"),
    }
}
