use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use zakaat_store::RecordStore;

mod about;
mod calculate_cmd;
mod config;
mod history_cmd;
mod logging;
mod reminders_cmd;
mod state;

use calculate_cmd::CalculateArgs;
use history_cmd::HistoryCommand;
use reminders_cmd::RemindersCommand;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("ZAKAAT_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "zakaat",
    version,
    long_version = LONG_VERSION,
    about = "Zakaat calculator with saved history and reminders"
)]
struct Cli {
    /// Data directory (default: ~/.zakaat)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate Zakaat from declared assets
    Calculate(CalculateArgs),

    /// Saved calculations
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Recurring Zakaat reminders
    Reminders {
        #[command(subcommand)]
        command: RemindersCommand,
    },

    /// What Zakaat is and how the Nisab works
    About,

    /// Manage ~/.zakaat/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,

    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    match cli.command {
        Command::About => about::print_about(),

        Command::Config { command } => {
            let home = state::ensure_home(cli.data_dir)?;
            match command {
                ConfigCommand::Init => config::init_config(&home)?,
                ConfigCommand::Show => config::show_config(&home)?,
            }
        }

        Command::Calculate(args) => {
            let (cfg, store) = open(cli.data_dir)?;
            calculate_cmd::run(&store, &cfg, args)?;
        }

        Command::History { command } => {
            let (cfg, store) = open(cli.data_dir)?;
            history_cmd::run(&store, &cfg, command)?;
        }

        Command::Reminders { command } => {
            let (cfg, store) = open(cli.data_dir)?;
            reminders_cmd::run(&store, &cfg, command).await?;
        }
    }

    Ok(())
}

fn open(data_dir: Option<PathBuf>) -> Result<(config::Config, RecordStore)> {
    let home = state::ensure_home(data_dir)?;
    tracing::debug!(home = %home.display(), "data directory");
    let cfg = config::load_config(&home)?;
    let store = state::open_store(&home)?;
    Ok((cfg, store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_calculate_flags() {
        let cli = Cli::try_parse_from([
            "zakaat",
            "-vv",
            "calculate",
            "--cash",
            "1,000",
            "--debts",
            "-5",
            "--gold-price",
            "70.5",
            "--save",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Calculate(args) = cli.command else {
            panic!("expected calculate");
        };
        assert_eq!(args.cash.as_deref(), Some("1,000"));
        assert_eq!(args.debts.as_deref(), Some("-5"));
        assert_eq!(args.gold_price, Some(70.5));
        assert!(args.save);
    }

    #[test]
    fn parses_reminder_set_with_kind() {
        let cli = Cli::try_parse_from([
            "zakaat",
            "--data-dir",
            "/tmp/z",
            "reminders",
            "set",
            "--kind",
            "Monthly",
            "--start",
            "2026-01-01",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/z")));
        match cli.command {
            Command::Reminders {
                command: RemindersCommand::Set { kind, start, note },
            } => {
                assert_eq!(kind, zakaat_core::ReminderKind::Monthly);
                assert_eq!(start, "2026-01-01");
                assert!(note.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_reminder_kind() {
        let res = Cli::try_parse_from(["zakaat", "reminders", "set", "--kind", "weekly"]);
        assert!(res.is_err());
    }
}
