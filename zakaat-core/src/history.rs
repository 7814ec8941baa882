//! Saved calculation record as persisted in the `history` collection

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::assets::AssetDeclaration;
use crate::calculator::CalculationResult;

/// Minute-resolution stamp stored in the `date` field
pub const HISTORY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A calculation the user chose to keep
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedCalculation {
    /// Store key; not part of the persisted body
    #[serde(skip)]
    pub key: String,
    /// `YYYY-MM-DD HH:MM`
    pub date: String,
    /// Every asset category by persisted name
    pub assets: BTreeMap<String, f64>,
    pub net_assets: f64,
    pub zakaat_amount: f64,
    pub nisab_threshold: f64,
}

impl SavedCalculation {
    pub fn from_result(key: impl Into<String>, result: &CalculationResult) -> Self {
        Self {
            key: key.into(),
            date: result.timestamp().format(HISTORY_DATE_FORMAT).to_string(),
            assets: result.declaration().to_map(),
            net_assets: result.net_assets(),
            zakaat_amount: result.zakaat_due(),
            nisab_threshold: result.nisab_threshold(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// The declaration this calculation was made from
    pub fn declaration(&self) -> AssetDeclaration {
        AssetDeclaration::from_map(&self.assets)
    }

    pub fn is_due(&self) -> bool {
        self.zakaat_amount > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCategory;
    use crate::calculator::calculate_at;
    use chrono::NaiveDate;

    fn sample() -> SavedCalculation {
        let at = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 45)
            .unwrap();
        let d = AssetDeclaration::new()
            .with(AssetCategory::Cash, 1000.0)
            .with(AssetCategory::Debts, 200.0);
        SavedCalculation::from_result("calc_20260301093045", &calculate_at(&d, 60.0, 0.8, at))
    }

    #[test]
    fn test_from_result_fields() {
        let saved = sample();
        assert_eq!(saved.date, "2026-03-01 09:30");
        assert_eq!(saved.assets.len(), 9);
        assert_eq!(saved.assets["debts"], 200.0);
        assert!(saved.is_due());
        assert_eq!(saved.declaration().get(AssetCategory::Cash), 1000.0);
    }

    #[test]
    fn test_persisted_shape_has_no_key() {
        let v = serde_json::to_value(sample()).unwrap();
        let obj = v.as_object().unwrap();
        assert!(!obj.contains_key("key"));
        for field in ["date", "assets", "net_assets", "zakaat_amount", "nisab_threshold"] {
            assert!(obj.contains_key(field), "missing {field}");
        }
    }

    #[test]
    fn test_decode_from_stored_json() {
        let json = r#"{
            "date": "2025-01-05 14:02",
            "assets": {"cash": 100.0, "gold": 2.0},
            "net_assets": 220.0,
            "zakaat_amount": 0,
            "nisab_threshold": 489.888
        }"#;
        let saved: SavedCalculation = serde_json::from_str(json).unwrap();
        assert_eq!(saved.key, "");
        assert!(!saved.is_due());
        assert_eq!(saved.declaration().gold_grams(), 2.0);
    }
}
