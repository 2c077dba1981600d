//! Unit tests for the ledger state machine.

use std::collections::BTreeMap;

use crate::effect::{Confirm, Effect};
use crate::errors::LedgerError;
use crate::essential::*;
use crate::ledger::Ledger;

mod test_payout;

/// Scripted confirmation capability recording every prompt asked.
pub struct PromptLog {
    pub answer: bool,
    pub prompts: Vec<String>,
}

impl PromptLog {
    pub fn yes() -> Self {
        Self {
            answer: true,
            prompts: vec![],
        }
    }

    pub fn no() -> Self {
        Self {
            answer: false,
            prompts: vec![],
        }
    }
}

impl Confirm for PromptLog {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.answer
    }
}

pub fn sample_player(id: &str, name: &str, buy_ins: u32, chips: u64) -> Player {
    Player {
        id: id.to_string(),
        name: name.to_string(),
        payment_method: String::new(),
        buy_ins,
        chips,
        final_amount: DEFAULT_DOLLARS_PER_BUY_IN,
    }
}

/// A ledger with default settings and the given roster.
pub fn ledger_with(players: Vec<Player>) -> Ledger {
    let mut map = BTreeMap::new();
    for player in players {
        map.insert(player.id.clone(), player);
    }
    Ledger {
        settings: Settings::default(),
        players: map,
        mode: LedgerMode::default(),
    }
}
