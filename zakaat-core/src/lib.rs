//! zakaat-core: asset declarations, the Zakaat calculation engine and reminder scheduling

pub mod assets;
pub mod calculator;
pub mod history;
pub mod inputs;
pub mod keys;
pub mod reminders;
pub mod scheduler;
pub mod time;

pub use assets::{AssetCategory, AssetDeclaration};
pub use calculator::{
    CalculationResult, DEFAULT_GOLD_PRICE_PER_GRAM, DEFAULT_SILVER_PRICE_PER_GRAM,
    NISAB_GOLD_GRAMS, NISAB_SILVER_GRAMS, ZAKAAT_RATE, calculate, calculate_at,
};
pub use history::SavedCalculation;
pub use inputs::parse_amount;
pub use keys::{HISTORY_KEY_PREFIX, REMINDER_KEY_PREFIX, timestamp_key, unique_key};
pub use reminders::{ReminderKind, ReminderRecord};
pub use scheduler::{SweepOutcome, SweepPolicy, sweep_due, sweep_due_with};

/// Currency formatting shared by result summaries and listings
pub mod money {
    /// Render an amount with two decimals behind a currency symbol.
    ///
    /// Negative amounts keep the sign in front of the symbol (`-$12.50`).
    pub fn format_amount(amount: f64, symbol: &str) -> String {
        if amount < 0.0 {
            format!("-{}{:.2}", symbol, amount.abs())
        } else {
            format!("{}{:.2}", symbol, amount)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_two_decimals() {
            assert_eq!(format_amount(20.0, "$"), "$20.00");
            assert_eq!(format_amount(489.888, "$"), "$489.89");
        }

        #[test]
        fn test_format_negative() {
            assert_eq!(format_amount(-12.5, "$"), "-$12.50");
        }

        #[test]
        fn test_format_other_symbol() {
            assert_eq!(format_amount(1000.0, "€"), "€1000.00");
        }
    }
}

pub use money::format_amount;
