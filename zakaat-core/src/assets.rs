//! Asset declaration types: the fixed set of categories a user declares amounts for

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::inputs::{parse_amount, sanitize_amount};

/// Declared asset categories, in the order they are presented to the user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    Cash,
    BankBalance,
    /// Grams of gold
    Gold,
    /// Grams of silver
    Silver,
    Investments,
    BusinessAssets,
    RentalIncome,
    OtherAssets,
    /// Subtracted from the liquid total
    Debts,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 9] = [
        AssetCategory::Cash,
        AssetCategory::BankBalance,
        AssetCategory::Gold,
        AssetCategory::Silver,
        AssetCategory::Investments,
        AssetCategory::BusinessAssets,
        AssetCategory::RentalIncome,
        AssetCategory::OtherAssets,
        AssetCategory::Debts,
    ];

    /// Persisted field name
    pub fn key(&self) -> &'static str {
        match self {
            AssetCategory::Cash => "cash",
            AssetCategory::BankBalance => "bank_balance",
            AssetCategory::Gold => "gold",
            AssetCategory::Silver => "silver",
            AssetCategory::Investments => "investments",
            AssetCategory::BusinessAssets => "business_assets",
            AssetCategory::RentalIncome => "rental_income",
            AssetCategory::OtherAssets => "other_assets",
            AssetCategory::Debts => "debts",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            AssetCategory::Cash => "Cash on Hand",
            AssetCategory::BankBalance => "Bank Balance",
            AssetCategory::Gold => "Gold (grams)",
            AssetCategory::Silver => "Silver (grams)",
            AssetCategory::Investments => "Investments",
            AssetCategory::BusinessAssets => "Business Assets",
            AssetCategory::RentalIncome => "Rental Income",
            AssetCategory::OtherAssets => "Other Assets",
            AssetCategory::Debts => "Debts (to be subtracted)",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Counted at face value in the liquid total (everything but metals and debts)
    pub fn is_liquid(&self) -> bool {
        !matches!(
            self,
            AssetCategory::Gold | AssetCategory::Silver | AssetCategory::Debts
        )
    }

    /// Measured in grams rather than currency
    pub fn is_metal(&self) -> bool {
        matches!(self, AssetCategory::Gold | AssetCategory::Silver)
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Amounts declared per category.
///
/// Every stored amount is finite and >= 0; anything else is coerced to zero on the way in.
/// Categories that were never set read as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetDeclaration {
    amounts: BTreeMap<AssetCategory, f64>,
}

// An unset category and an explicit zero are the same declaration.
impl PartialEq for AssetDeclaration {
    fn eq(&self, other: &Self) -> bool {
        AssetCategory::ALL
            .iter()
            .all(|c| self.get(*c) == other.get(*c))
    }
}

impl AssetDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, category: AssetCategory, amount: f64) -> Self {
        self.set(category, amount);
        self
    }

    pub fn set(&mut self, category: AssetCategory, amount: f64) {
        self.amounts.insert(category, sanitize_amount(amount));
    }

    pub fn get(&self, category: AssetCategory) -> f64 {
        self.amounts.get(&category).copied().unwrap_or(0.0)
    }

    /// Build a declaration from raw text fields as typed by a user.
    ///
    /// Unknown field names are skipped; unparseable amounts become zero.
    pub fn from_raw_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut declaration = Self::new();
        for (name, raw) in fields {
            match AssetCategory::from_key(name) {
                Some(category) => declaration.set(category, parse_amount(raw)),
                None => tracing::debug!(field = name, "ignoring unknown asset field"),
            }
        }
        declaration
    }

    /// Rebuild a declaration from a persisted `assets` map
    pub fn from_map(map: &BTreeMap<String, f64>) -> Self {
        let mut declaration = Self::new();
        for (name, amount) in map {
            if let Some(category) = AssetCategory::from_key(name) {
                declaration.set(category, *amount);
            }
        }
        declaration
    }

    /// All nine categories keyed by their persisted names, zeros included
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        AssetCategory::ALL
            .iter()
            .map(|c| (c.key().to_string(), self.get(*c)))
            .collect()
    }

    /// Sum of the liquid categories (cash, bank, investments, business, rental, other)
    pub fn total_liquid(&self) -> f64 {
        AssetCategory::ALL
            .iter()
            .filter(|c| c.is_liquid())
            .map(|c| self.get(*c))
            .sum()
    }

    pub fn debts(&self) -> f64 {
        self.get(AssetCategory::Debts)
    }

    pub fn gold_grams(&self) -> f64 {
        self.get(AssetCategory::Gold)
    }

    pub fn silver_grams(&self) -> f64 {
        self.get(AssetCategory::Silver)
    }
}
