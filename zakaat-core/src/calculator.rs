//! Zakaat calculation engine.
//!
//! Net assets are the liquid total minus debts plus the market value of gold and
//! silver. Zakaat is due at 2.5% when net assets reach the Nisab threshold, which
//! is the lower of the gold and silver Nisab values at the given prices.

use chrono::{Local, NaiveDateTime};

use crate::assets::AssetDeclaration;
use crate::inputs::sanitize_amount;
use crate::money::format_amount;

/// Nisab threshold in grams of gold
pub const NISAB_GOLD_GRAMS: f64 = 87.48;
/// Nisab threshold in grams of silver
pub const NISAB_SILVER_GRAMS: f64 = 612.36;
/// 2.5%
pub const ZAKAAT_RATE: f64 = 0.025;

/// Placeholder market prices used when nothing else is configured
pub const DEFAULT_GOLD_PRICE_PER_GRAM: f64 = 60.0;
pub const DEFAULT_SILVER_PRICE_PER_GRAM: f64 = 0.8;

/// Outcome of one calculation. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    timestamp: NaiveDateTime,
    declaration: AssetDeclaration,
    net_assets: f64,
    nisab_threshold: f64,
    zakaat_due: f64,
}

impl CalculationResult {
    /// Local wall-clock time the calculation was made
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn declaration(&self) -> &AssetDeclaration {
        &self.declaration
    }

    /// May be negative when debts exceed assets
    pub fn net_assets(&self) -> f64 {
        self.net_assets
    }

    pub fn nisab_threshold(&self) -> f64 {
        self.nisab_threshold
    }

    /// Zero when net assets are below the threshold
    pub fn zakaat_due(&self) -> f64 {
        self.zakaat_due
    }

    pub fn meets_nisab(&self) -> bool {
        self.net_assets >= self.nisab_threshold
    }

    /// User-facing explanation of the result
    pub fn summary(&self, currency_symbol: &str) -> String {
        if self.meets_nisab() {
            format!(
                "Your total Zakaat is: {}\nBased on net assets of: {}",
                format_amount(self.zakaat_due, currency_symbol),
                format_amount(self.net_assets, currency_symbol)
            )
        } else {
            format!(
                "Your net assets ({}) are below the Nisab threshold ({}).\nNo Zakaat is due.",
                format_amount(self.net_assets, currency_symbol),
                format_amount(self.nisab_threshold, currency_symbol)
            )
        }
    }
}

/// Nisab threshold at the given prices: the lower of the gold and silver values
pub fn nisab_threshold(gold_price_per_gram: f64, silver_price_per_gram: f64) -> f64 {
    let gold = NISAB_GOLD_GRAMS * sanitize_amount(gold_price_per_gram);
    let silver = NISAB_SILVER_GRAMS * sanitize_amount(silver_price_per_gram);
    gold.min(silver)
}

/// Calculate Zakaat, stamping the result with the current local time.
pub fn calculate(
    declaration: &AssetDeclaration,
    gold_price_per_gram: f64,
    silver_price_per_gram: f64,
) -> CalculationResult {
    calculate_at(
        declaration,
        gold_price_per_gram,
        silver_price_per_gram,
        Local::now().naive_local(),
    )
}

/// Calculate Zakaat with an explicit timestamp. Pure and deterministic.
pub fn calculate_at(
    declaration: &AssetDeclaration,
    gold_price_per_gram: f64,
    silver_price_per_gram: f64,
    timestamp: NaiveDateTime,
) -> CalculationResult {
    let gold_price = sanitize_amount(gold_price_per_gram);
    let silver_price = sanitize_amount(silver_price_per_gram);

    // Debts come off the liquid total before metals are added; no clamping.
    let net_before_metals = declaration.total_liquid() - declaration.debts();
    let metal_value =
        declaration.gold_grams() * gold_price + declaration.silver_grams() * silver_price;
    let net_assets = net_before_metals + metal_value;

    let threshold = nisab_threshold(gold_price, silver_price);
    let zakaat_due = if net_assets >= threshold {
        net_assets * ZAKAAT_RATE
    } else {
        0.0
    };

    CalculationResult {
        timestamp,
        declaration: declaration.clone(),
        net_assets,
        nisab_threshold: threshold,
        zakaat_due,
    }
}
