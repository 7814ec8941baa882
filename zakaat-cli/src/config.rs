use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use zakaat_core::{DEFAULT_GOLD_PRICE_PER_GRAM, DEFAULT_SILVER_PRICE_PER_GRAM, SweepPolicy};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub prices: PricesSection,
    #[serde(default)]
    pub reminders: RemindersSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricesSection {
    /// Market price of one gram of gold, in the base currency
    pub gold_per_gram: f64,
    /// Market price of one gram of silver, in the base currency
    pub silver_per_gram: f64,
    pub currency_symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RemindersSection {
    /// Fire reminders whose date was missed (and roll them past today)
    pub catch_up: bool,
    /// Period of `zakaat reminders watch`
    pub check_interval_secs: u64,
    /// IANA zone used for "today"; the system zone when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for PricesSection {
    fn default() -> Self {
        Self {
            // Placeholders until a real price source is wired in.
            gold_per_gram: DEFAULT_GOLD_PRICE_PER_GRAM,
            silver_per_gram: DEFAULT_SILVER_PRICE_PER_GRAM,
            currency_symbol: "$".to_string(),
        }
    }
}

impl Default for RemindersSection {
    fn default() -> Self {
        Self {
            catch_up: false,
            check_interval_secs: 3600,
            timezone: None,
        }
    }
}

impl RemindersSection {
    pub fn policy(&self) -> SweepPolicy {
        if self.catch_up {
            SweepPolicy::CatchUp
        } else {
            SweepPolicy::ExactDay
        }
    }
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join("config.toml")
}

pub fn load_config(home: &Path) -> Result<Config> {
    let p = config_path(home);
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(home: &Path, cfg: &Config) -> Result<()> {
    let p = config_path(home);
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config(home: &Path) -> Result<()> {
    let p = config_path(home);
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(home, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config(home: &Path) -> Result<()> {
    let cfg = load_config(home)?;
    let p = config_path(home);
    let origin = if p.exists() { "" } else { " (not written yet; defaults)" };
    println!("# {}{}\n", p.display(), origin);
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = load_config(tmp.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.prices.gold_per_gram, 60.0);
        assert_eq!(cfg.prices.silver_per_gram, 0.8);
        assert_eq!(cfg.reminders.policy(), SweepPolicy::ExactDay);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            config_path(tmp.path()),
            "[prices]\ngold_per_gram = 75.5\n\n[reminders]\ncatch_up = true\ntimezone = \"Asia/Karachi\"\n",
        )
        .unwrap();

        let cfg = load_config(tmp.path()).unwrap();
        assert_eq!(cfg.prices.gold_per_gram, 75.5);
        assert_eq!(cfg.prices.silver_per_gram, 0.8);
        assert_eq!(cfg.prices.currency_symbol, "$");
        assert_eq!(cfg.reminders.policy(), SweepPolicy::CatchUp);
        assert_eq!(cfg.reminders.check_interval_secs, 3600);
        assert_eq!(cfg.reminders.timezone.as_deref(), Some("Asia/Karachi"));
    }

    #[test]
    fn save_then_load_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cfg = Config::default();
        cfg.prices.currency_symbol = "Rs ".to_string();
        cfg.reminders.check_interval_secs = 60;
        save_config(tmp.path(), &cfg).unwrap();
        assert_eq!(load_config(tmp.path()).unwrap(), cfg);
    }

    #[test]
    fn init_does_not_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(config_path(tmp.path()), "[prices]\ngold_per_gram = 1.0\n").unwrap();
        init_config(tmp.path()).unwrap();
        assert_eq!(load_config(tmp.path()).unwrap().prices.gold_per_gram, 1.0);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(config_path(tmp.path()), "prices = [").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }
}
