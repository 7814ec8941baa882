use anyhow::{Context, Result, bail};
use clap::Args;
use zakaat_core::{AssetCategory, AssetDeclaration, CalculationResult, format_amount};
use zakaat_store::{RecordStore, ZakaatService};

use crate::config::Config;

/// Amounts are read leniently: "1,250.50" and "$300" work, anything that is
/// not a positive number counts as 0.
#[derive(Args, Debug, Default)]
pub struct CalculateArgs {
    /// Cash on hand
    #[arg(long, allow_hyphen_values = true)]
    pub cash: Option<String>,

    /// Money held in bank accounts
    #[arg(long, allow_hyphen_values = true)]
    pub bank_balance: Option<String>,

    /// Gold held, in grams
    #[arg(long, allow_hyphen_values = true)]
    pub gold: Option<String>,

    /// Silver held, in grams
    #[arg(long, allow_hyphen_values = true)]
    pub silver: Option<String>,

    /// Stocks, funds and other investments
    #[arg(long, allow_hyphen_values = true)]
    pub investments: Option<String>,

    /// Inventory and other business assets
    #[arg(long, allow_hyphen_values = true)]
    pub business_assets: Option<String>,

    /// Rental income held
    #[arg(long, allow_hyphen_values = true)]
    pub rental_income: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub other_assets: Option<String>,

    /// Debts and liabilities due now
    #[arg(long, allow_hyphen_values = true)]
    pub debts: Option<String>,

    /// Gold price per gram (default: config [prices].gold_per_gram)
    #[arg(long)]
    pub gold_price: Option<f64>,

    /// Silver price per gram (default: config [prices].silver_per_gram)
    #[arg(long)]
    pub silver_price: Option<f64>,

    /// Save the result to history
    #[arg(long, default_value_t = false)]
    pub save: bool,
}

impl CalculateArgs {
    fn raw_fields(&self) -> Vec<(&str, &str)> {
        let fields = [
            (AssetCategory::Cash, &self.cash),
            (AssetCategory::BankBalance, &self.bank_balance),
            (AssetCategory::Gold, &self.gold),
            (AssetCategory::Silver, &self.silver),
            (AssetCategory::Investments, &self.investments),
            (AssetCategory::BusinessAssets, &self.business_assets),
            (AssetCategory::RentalIncome, &self.rental_income),
            (AssetCategory::OtherAssets, &self.other_assets),
            (AssetCategory::Debts, &self.debts),
        ];
        fields
            .into_iter()
            .filter_map(|(category, raw)| raw.as_deref().map(|raw| (category.key(), raw)))
            .collect()
    }

    pub fn declaration(&self) -> AssetDeclaration {
        AssetDeclaration::from_raw_fields(self.raw_fields())
    }
}

pub fn run(store: &RecordStore, cfg: &Config, args: CalculateArgs) -> Result<()> {
    let gold_price = args.gold_price.unwrap_or(cfg.prices.gold_per_gram);
    let silver_price = args.silver_price.unwrap_or(cfg.prices.silver_per_gram);
    for (name, price) in [("gold", gold_price), ("silver", silver_price)] {
        if !(price.is_finite() && price > 0.0) {
            bail!("{name} price must be a positive number per gram (got {price})");
        }
    }
    let symbol = cfg.prices.currency_symbol.as_str();

    let service = ZakaatService::new(store);
    let declaration = args.declaration();
    let result = service.calculate(&declaration, gold_price, silver_price);

    print_breakdown(&result, symbol);
    println!(
        "\nGold: {}/g, Silver: {}/g, Nisab threshold: {}",
        format_amount(gold_price, symbol),
        format_amount(silver_price, symbol),
        format_amount(result.nisab_threshold(), symbol)
    );
    println!("\n{}", result.summary(symbol));

    if args.save {
        let key = service
            .save_calculation(&result)
            .context("Failed to save calculation")?;
        println!("\nSaved as {key}");
    }
    Ok(())
}

fn print_breakdown(result: &CalculationResult, symbol: &str) {
    println!("Declared assets");
    for category in AssetCategory::ALL {
        let amount = result.declaration().get(category);
        if amount == 0.0 {
            continue;
        }
        let shown = if category.is_metal() {
            format!("{amount:.2} g")
        } else {
            format_amount(amount, symbol)
        };
        println!("  {:<18} {}", category.label(), shown);
    }
    println!("  {:<18} {}", "Net assets", format_amount(result.net_assets(), symbol));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flags_are_not_declared() {
        let args = CalculateArgs {
            cash: Some("1,250.50".into()),
            debts: Some("abc".into()),
            ..Default::default()
        };
        let d = args.declaration();
        assert_eq!(d.get(AssetCategory::Cash), 1250.5);
        assert_eq!(d.get(AssetCategory::Debts), 0.0);
        assert_eq!(d.get(AssetCategory::Gold), 0.0);
        assert_eq!(args.raw_fields().len(), 2);
    }

    #[test]
    fn negative_input_counts_as_zero() {
        let args = CalculateArgs {
            bank_balance: Some("-500".into()),
            ..Default::default()
        };
        assert_eq!(args.declaration().get(AssetCategory::BankBalance), 0.0);
    }
}
