//! zakaat-store: JSON record store and the calculation/reminder service built on it

pub mod error;
pub mod service;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use service::{Notification, ReminderSweep, ZakaatService};
pub use store::{HISTORY, REMINDERS, RecordStore};
