use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zakaat_core::{AssetCategory, SavedCalculation, format_amount};
use zakaat_store::{RecordStore, ZakaatService};

use crate::config::Config;

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List saved calculations, oldest first
    List,

    /// Show one saved calculation in full
    Show { key: String },

    /// Delete a saved calculation
    Delete { key: String },

    /// Export all saved calculations
    Export {
        /// Destination CSV file
        #[arg(long)]
        csv: PathBuf,
    },
}

pub fn run(store: &RecordStore, cfg: &Config, command: HistoryCommand) -> Result<()> {
    let service = ZakaatService::new(store);
    let symbol = cfg.prices.currency_symbol.as_str();

    match command {
        HistoryCommand::List => {
            let entries = service.list_history().context("Failed to load history")?;
            if entries.is_empty() {
                println!("No saved calculations found");
                return Ok(());
            }
            for entry in &entries {
                let due = if entry.is_due() {
                    format!("Zakaat: {}", format_amount(entry.zakaat_amount, symbol))
                } else {
                    "below Nisab".to_string()
                };
                println!(
                    "{}  {}  {}  (net assets {})",
                    entry.key,
                    entry.date,
                    due,
                    format_amount(entry.net_assets, symbol)
                );
            }
        }

        HistoryCommand::Show { key } => {
            let Some(entry) = service.history_entry(&key).context("Failed to load history")? else {
                println!("No saved calculation with key {key}");
                return Ok(());
            };
            print_entry(&entry, symbol);
        }

        HistoryCommand::Delete { key } => {
            let removed = service
                .delete_history_entry(&key)
                .context("Failed to delete calculation")?;
            if removed {
                println!("Deleted {key}");
            } else {
                println!("No saved calculation with key {key}");
            }
        }

        HistoryCommand::Export { csv } => {
            let entries = service.list_history().context("Failed to load history")?;
            export_csv(&csv, &entries)?;
            println!("Exported {} calculation(s) to {}", entries.len(), csv.display());
        }
    }
    Ok(())
}

fn print_entry(entry: &SavedCalculation, symbol: &str) {
    println!("{} ({})", entry.key, entry.date);
    let declaration = entry.declaration();
    for category in AssetCategory::ALL {
        let amount = declaration.get(category);
        let shown = if category.is_metal() {
            format!("{amount:.2} g")
        } else {
            format_amount(amount, symbol)
        };
        println!("  {:<18} {}", category.label(), shown);
    }
    println!("  {:<18} {}", "Net assets", format_amount(entry.net_assets, symbol));
    println!("  {:<18} {}", "Nisab threshold", format_amount(entry.nisab_threshold, symbol));
    println!("  {:<18} {}", "Zakaat due", format_amount(entry.zakaat_amount, symbol));
}

fn export_csv(path: &Path, entries: &[SavedCalculation]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_csv(file, entries).with_context(|| format!("write {}", path.display()))
}

/// One row per calculation: key, date, every asset category, then the totals.
fn write_csv<W: Write>(writer: W, entries: &[SavedCalculation]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["key", "date"];
    header.extend(AssetCategory::ALL.iter().map(|c| c.key()));
    header.extend(["net_assets", "zakaat_amount", "nisab_threshold"]);
    wtr.write_record(&header)?;

    for entry in entries {
        let declaration = entry.declaration();
        let mut row = vec![entry.key.clone(), entry.date.clone()];
        row.extend(
            AssetCategory::ALL
                .iter()
                .map(|c| format!("{:.2}", declaration.get(*c))),
        );
        row.push(format!("{:.2}", entry.net_assets));
        row.push(format!("{:.2}", entry.zakaat_amount));
        row.push(format!("{:.2}", entry.nisab_threshold));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use zakaat_core::{AssetDeclaration, calculate_at};

    fn saved(key: &str, cash: f64) -> SavedCalculation {
        let ts = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap();
        let decl = AssetDeclaration::new().with(AssetCategory::Cash, cash);
        SavedCalculation::from_result(key, &calculate_at(&decl, 60.0, 0.8, ts))
    }

    #[test]
    fn csv_has_header_and_one_row_per_entry() {
        let mut out = Vec::new();
        write_csv(&mut out, &[saved("calc_1", 1000.0), saved("calc_2", 100.0)]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "key,date,cash,bank_balance,gold,silver,investments,business_assets,\
             rental_income,other_assets,debts,net_assets,zakaat_amount,nisab_threshold"
        );
        assert!(lines[1].starts_with("calc_1,2026-03-01 09:15,1000.00,0.00"));
        assert!(lines[1].ends_with("1000.00,25.00,489.89"));
        assert!(lines[2].ends_with("100.00,0.00,489.89"));
    }

    #[test]
    fn empty_history_exports_header_only() {
        let mut out = Vec::new();
        write_csv(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[test]
    fn export_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("history.csv");
        export_csv(&path, &[saved("calc_1", 5.0)]).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("calc_1"));
    }
}
