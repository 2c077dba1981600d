//! Line-driven front-end: parses commands, forwards them as events and
//! persists after each one.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use homegame_ledger_base::effect::{Confirm, Effect};
use homegame_ledger_base::essential::{LedgerEvent, PlayerField, PlayerId, SettingsField};
use homegame_ledger_base::ledger::Ledger;
use homegame_ledger_base::snapshot;
use homegame_ledger_base::store::SnapshotStore;
use tracing::warn;

use crate::view;

/// One parsed input line. Rows are 1-based indexes into the displayed
/// roster order.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Add,
    Delete { row: usize },
    BuyIn { row: usize },
    EditPlayer {
        row: usize,
        field: PlayerField,
        value: String,
    },
    UpdateSettings {
        field: SettingsField,
        value: String,
    },
    Payout,
    Reset,
    Help,
    Quit,
}

pub fn run(store: &mut dyn SnapshotStore) -> Result<()> {
    let mut ledger = snapshot::load(store);
    println!("Home Game Poker Ledger");
    println!("Type `help` for commands.\n");
    print!("{}", view::render(&ledger));

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            print!("{}", view::render(&ledger));
            continue;
        }
        match parse_command(line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => print_help(),
            Ok(command) => {
                match to_event(&ledger, command) {
                    Ok(event) => dispatch(&mut ledger, store, event),
                    Err(msg) => println!("{msg}"),
                }
                print!("{}", view::render(&ledger));
            }
            Err(msg) => println!("{msg}"),
        }
    }
    Ok(())
}

/// Runs one event and acts on the effect: prints notices and advisory
/// errors, then saves or clears storage as flagged. Storage failures are
/// logged, never fatal.
fn dispatch(ledger: &mut Ledger, store: &mut dyn SnapshotStore, event: LedgerEvent) {
    let mut confirm = StdinConfirm;
    let mut effect = Effect::with_confirm(&mut confirm);
    if let Err(err) = ledger.handle_event(&mut effect, event) {
        println!("{err}");
    }
    for notice in effect.take_notices() {
        println!("{notice}");
    }
    if effect.should_clear_storage() {
        if let Err(err) = store.clear() {
            warn!(%err, "failed to clear storage");
        }
    } else if effect.should_checkpoint() {
        if let Err(err) = snapshot::save(store, ledger) {
            warn!(%err, "failed to save the ledger");
        }
    }
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&keyword) = tokens.first() else {
        return Err("empty command".to_string());
    };
    let keyword = keyword.to_lowercase();
    let args = &tokens[1..];
    match keyword.as_str() {
        "add" => no_args(&keyword, args, Command::Add),
        "payout" => no_args(&keyword, args, Command::Payout),
        "reset" => no_args(&keyword, args, Command::Reset),
        "help" | "?" => no_args(&keyword, args, Command::Help),
        "quit" | "exit" | "q" => no_args(&keyword, args, Command::Quit),
        "delete" => Ok(Command::Delete {
            row: row_only(&keyword, args)?,
        }),
        "buyin" => Ok(Command::BuyIn {
            row: row_only(&keyword, args)?,
        }),
        "name" => edit_command(&keyword, args, PlayerField::Name),
        "venmo" => edit_command(&keyword, args, PlayerField::PaymentMethod),
        "buyins" => edit_command(&keyword, args, PlayerField::BuyIns),
        "chips" => edit_command(&keyword, args, PlayerField::Chips),
        "value" => Ok(Command::UpdateSettings {
            field: SettingsField::ChipsPerBuyIn,
            value: single_arg(&keyword, args)?,
        }),
        "amount" => Ok(Command::UpdateSettings {
            field: SettingsField::DollarsPerBuyIn,
            value: single_arg(&keyword, args)?,
        }),
        _ => Err(format!("unknown command `{keyword}`, try `help`")),
    }
}

fn no_args(keyword: &str, args: &[&str], command: Command) -> Result<Command, String> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(format!("`{keyword}` takes no arguments"))
    }
}

fn parse_row(keyword: &str, args: &[&str]) -> Result<usize, String> {
    let raw = args
        .first()
        .ok_or_else(|| format!("usage: {keyword} <row> ..."))?;
    let row: usize = raw
        .parse()
        .map_err(|_| format!("{raw:?} is not a row number"))?;
    if row == 0 {
        return Err("rows start at 1".to_string());
    }
    Ok(row)
}

fn row_only(keyword: &str, args: &[&str]) -> Result<usize, String> {
    if args.len() > 1 {
        return Err(format!("usage: {keyword} <row>"));
    }
    parse_row(keyword, args)
}

fn single_arg(keyword: &str, args: &[&str]) -> Result<String, String> {
    match args {
        [value] => Ok((*value).to_string()),
        _ => Err(format!("usage: {keyword} <number>")),
    }
}

fn edit_command(keyword: &str, args: &[&str], field: PlayerField) -> Result<Command, String> {
    Ok(Command::EditPlayer {
        row: parse_row(keyword, args)?,
        field,
        value: args.get(1..).unwrap_or_default().join(" "),
    })
}

fn to_event(ledger: &Ledger, command: Command) -> Result<LedgerEvent, String> {
    Ok(match command {
        Command::Add => LedgerEvent::AddPlayer,
        Command::Delete { row } => LedgerEvent::DeletePlayer {
            id: row_id(ledger, row)?,
        },
        Command::BuyIn { row } => LedgerEvent::BuyIn {
            id: row_id(ledger, row)?,
        },
        Command::EditPlayer { row, field, value } => LedgerEvent::EditPlayer {
            id: row_id(ledger, row)?,
            field,
            value,
        },
        Command::UpdateSettings { field, value } => LedgerEvent::UpdateSettings { field, value },
        Command::Payout => LedgerEvent::TogglePayoutMode,
        Command::Reset => LedgerEvent::Reset,
        Command::Help | Command::Quit => unreachable!("handled in the input loop"),
    })
}

fn row_id(ledger: &Ledger, row: usize) -> Result<PlayerId, String> {
    ledger
        .players()
        .nth(row - 1)
        .map(|p| p.id.clone())
        .ok_or_else(|| format!("no row {row}"))
}

fn print_help() {
    println!("Commands:");
    println!("  add                 seat a new player with one buy-in");
    println!("  buyin <row>         record another buy-in for a player");
    println!("  name <row> <text>   set a player's name");
    println!("  venmo <row> <text>  set a player's Venmo / wallet handle");
    println!("  buyins <row> <n>    correct a player's buy-in count");
    println!("  chips <row> <n>     set a player's final stack size");
    println!("  value <n>           set the chips granted per buy-in");
    println!("  amount <n>          set the dollars owed per buy-in");
    println!("  delete <row>        remove a settled player");
    println!("  payout              toggle the payout view");
    println!("  reset               clear all current data");
    println!("  quit                leave, the ledger is saved as you go");
}

struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}
